//! Bilinear downsampling of square RGBA rasters.

use crate::{CartoonizerError, Result};
use image::{Rgba, RgbaImage};

/// Side length of a square, non-empty raster.
pub fn square_side(image: &RgbaImage) -> Result<u32> {
    let (width, height) = image.dimensions();
    if width != height {
        return Err(CartoonizerError::NotSquare { width, height });
    }
    if width == 0 {
        return Err(CartoonizerError::InvalidSize(0));
    }
    Ok(width)
}

/// Resample `image` to `target` x `target`.
///
/// Target pixel `(i, j)` samples the source at `(i, j) * (S - 1) / (T - 1)`,
/// so the corner pixels of source and target coincide. Same-size requests
/// return an unmodified copy.
pub fn resize(image: &RgbaImage, target: u32) -> Result<RgbaImage> {
    if target == 0 {
        return Err(CartoonizerError::InvalidSize(target));
    }
    let side = square_side(image)?;
    if target == side {
        return Ok(image.clone());
    }

    let step = (side - 1) as f64 / (target.max(2) - 1) as f64;
    Ok(RgbaImage::from_fn(target, target, |i, j| {
        let (x0, x1, wx) = axis(i, step, side);
        let (y0, y1, wy) = axis(j, step, side);
        let c00 = image.get_pixel(x0, y0).0;
        let c01 = image.get_pixel(x1, y0).0;
        let c10 = image.get_pixel(x0, y1).0;
        let c11 = image.get_pixel(x1, y1).0;

        let mut out = [0u8; 4];
        for k in 0..4 {
            let top = lerp(c00[k] as f64, c01[k] as f64, wx);
            let bottom = lerp(c10[k] as f64, c11[k] as f64, wx);
            out[k] = (lerp(top, bottom, wy) + 0.5).min(255.0) as u8;
        }
        Rgba(out)
    }))
}

/// Neighbouring source indices and the fractional weight of the second one.
fn axis(pos: u32, step: f64, side: u32) -> (u32, u32, f64) {
    let p = pos as f64 * step;
    let p0 = (p.floor() as u32).min(side - 1);
    let p1 = (p0 + 1).min(side - 1);
    (p0, p1, p - p0 as f64)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(side: u32) -> RgbaImage {
        RgbaImage::from_fn(side, side, |x, y| {
            let v = ((x * 37 + y * 91) % 256) as u8;
            Rgba([v, 255 - v, v / 2, (x * 10 + y) as u8])
        })
    }

    #[test]
    fn same_size_is_identity() {
        let src = checker(9);
        assert_eq!(resize(&src, 9).unwrap(), src);
    }

    #[test]
    fn corners_are_preserved() {
        let src = checker(16);
        let out = resize(&src, 5).unwrap();
        assert_eq!(out.get_pixel(0, 0), src.get_pixel(0, 0));
        assert_eq!(out.get_pixel(4, 4), src.get_pixel(15, 15));
        assert_eq!(out.get_pixel(4, 0), src.get_pixel(15, 0));
    }

    #[test]
    fn output_within_neighbour_bounds() {
        let side = 13;
        let src = checker(side);
        for target in [1, 2, 4, 7, 12] {
            let out = resize(&src, target).unwrap();
            let step = (side - 1) as f64 / (target.max(2) - 1) as f64;
            for (i, j, px) in out.enumerate_pixels() {
                let (x0, x1, _) = axis(i, step, side);
                let (y0, y1, _) = axis(j, step, side);
                let around = [
                    src.get_pixel(x0, y0).0,
                    src.get_pixel(x1, y0).0,
                    src.get_pixel(x0, y1).0,
                    src.get_pixel(x1, y1).0,
                ];
                for k in 0..4 {
                    let lo = around.iter().map(|c| c[k]).min().unwrap();
                    let hi = around.iter().map(|c| c[k]).max().unwrap();
                    assert!(lo <= px.0[k] && px.0[k] <= hi, "target {target} at ({i},{j})");
                }
            }
        }
    }

    #[test]
    fn target_one_takes_first_pixel() {
        let src = checker(8);
        let out = resize(&src, 1).unwrap();
        assert_eq!(out.get_pixel(0, 0), src.get_pixel(0, 0));
    }

    #[test]
    fn midpoint_blend_rounds_to_nearest() {
        let mut src = RgbaImage::new(3, 3);
        src.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        src.put_pixel(1, 0, Rgba([3, 255, 100, 255]));
        // Odd target columns land halfway between source columns.
        let out = resize(&src, 5).unwrap();
        assert_eq!(out.get_pixel(1, 0).0, [2, 128, 50, 128]);
    }

    #[test]
    fn rejects_zero_target_and_non_square() {
        let src = checker(4);
        assert!(matches!(resize(&src, 0), Err(CartoonizerError::InvalidSize(0))));
        let wide = RgbaImage::new(4, 2);
        assert!(matches!(
            resize(&wide, 2),
            Err(CartoonizerError::NotSquare { width: 4, height: 2 })
        ));
    }
}
