//! Procedural app icon: a camera lens with a smile over a dusk gradient.
//!
//! Every pixel is computed from closed-form math in a fixed layer order;
//! later layers overwrite earlier ones. Shape geometry is expressed in
//! absolute pixels relative to the canvas centre, tuned for [`BASE_SIZE`].

use image::{Rgba, RgbaImage};

pub const BASE_SIZE: u32 = 1024;

const TOP: [f64; 3] = [70.0, 60.0, 180.0];
const BOTTOM: [f64; 3] = [40.0, 150.0, 160.0];
const LENS_COLOR: [f64; 3] = [255.0, 210.0, 140.0];
const LENS_RADIUS: f64 = 250.0;
const LENS_ALPHA: f64 = 0.75;
const SMILE_RADIUS: f64 = 320.0;
const GLOW_SPREAD: f64 = 350.0;
const SPARKLES: [(f64, f64); 4] = [(220.0, 260.0), (780.0, 260.0), (230.0, 800.0), (700.0, 820.0)];
const SPARKLE_RADIUS: f64 = 35.0;

/// Paint the icon at `size` x `size`.
pub fn render_base(size: u32) -> RgbaImage {
    let canvas = Canvas::new(size);
    RgbaImage::from_fn(size, size, |x, y| canvas.pixel(x as f64, y as f64))
}

struct Canvas {
    size: f64,
    cx: f64,
    cy: f64,
}

impl Canvas {
    fn new(size: u32) -> Self {
        let size = size as f64;
        Self { size, cx: size / 2.0, cy: size / 2.0 + 50.0 }
    }

    fn pixel(&self, x: f64, y: f64) -> Rgba<u8> {
        let (cx, cy, size) = (self.cx, self.cy, self.size);

        // Vertical gradient
        let t = if size > 1.0 { y / (size - 1.0) } else { 0.0 };
        let mut c = [0i32; 3];
        for i in 0..3 {
            c[i] = (TOP[i] * (1.0 - t) + BOTTOM[i] * t) as i32;
        }

        // Vignette
        let dx = (x - size / 2.0) / size;
        let dy = (y - size / 2.0) / size;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist > 0.7 {
            let fade = ((dist - 0.7) / 0.3).min(1.0);
            let edge = [20.0, 20.0, 30.0];
            for i in 0..3 {
                c[i] = (c[i] as f64 * (1.0 - fade) + edge[i] * fade) as i32;
            }
        }

        // Warm glow
        let gx = (x - size / 2.0) / GLOW_SPREAD;
        let gy = (y - size * 0.45) / GLOW_SPREAD;
        let glow = (-(gx * gx + gy * gy)).exp();
        let boost = [80.0, 70.0, 40.0];
        for i in 0..3 {
            c[i] = 255i32.min((c[i] as f64 + boost[i] * glow) as i32);
        }

        // Lens with a darkened rim
        let d = (x - cx).hypot(y - cy);
        if d < LENS_RADIUS {
            let mix = LENS_ALPHA * (1.0 - d / LENS_RADIUS * 0.3);
            for i in 0..3 {
                c[i] = (c[i] as f64 * (1.0 - mix) + LENS_COLOR[i] * mix) as i32;
            }
            if LENS_RADIUS - 10.0 < d {
                for v in &mut c {
                    *v = (*v as f64 * 0.7) as i32;
                }
            }
        }

        // Highlights
        if in_ellipse(x, y, cx - 90.0, cy - 90.0, 160.0, 120.0) {
            lighten(&mut c, 0.6, 0.4);
        }
        if in_ellipse(x, y, cx + 120.0, cy - 10.0, 90.0, 60.0) {
            lighten(&mut c, 0.7, 0.3);
        }

        // Smile arc
        let smile_y = cy - 40.0;
        if (x - cx).abs() < SMILE_RADIUS {
            let arc_y = smile_y + (SMILE_RADIUS * SMILE_RADIUS - (x - cx) * (x - cx)).sqrt();
            if smile_y - 10.0 < y && y < arc_y + 5.0 && (y - arc_y).abs() < 4.0 {
                c = [200, 90, 70];
            }
        }

        // Diagonal band
        let bx = x - (cx + 40.0);
        let by = y - (cy - 250.0);
        let proj = bx * 0.6 + by * 0.8;
        let perp = -bx * 0.8 + by * 0.6;
        if 0.0 < proj && proj < 420.0 && perp.abs() < 55.0 {
            c = [255, (140.0 + perp * 0.2) as i32, 100];
        }

        // Accents
        let (rx, ry) = (cx + 150.0, cy - 50.0);
        if rx < x && x < rx + 70.0 && ry < y && y < ry + 280.0 {
            c = [60, 50, 80];
        }
        let (tx, ty) = (cx + 180.0, cy + 230.0);
        if tx < x && x < tx + 80.0 && ty < y && y < ty + 120.0 {
            c = [240, 210, 150];
        }

        // Sparkles
        let sparkle = SPARKLES
            .iter()
            .any(|&(sx, sy)| (x - sx).powi(2) + (y - sy).powi(2) < SPARKLE_RADIUS * SPARKLE_RADIUS);
        if sparkle {
            c = [255, 255, 255];
        }

        Rgba([channel(c[0]), channel(c[1]), channel(c[2]), 255])
    }
}

fn in_ellipse(x: f64, y: f64, hx: f64, hy: f64, rx: f64, ry: f64) -> bool {
    ((x - hx) / rx).powi(2) + ((y - hy) / ry).powi(2) < 1.0
}

fn lighten(c: &mut [i32; 3], keep: f64, white: f64) {
    for v in c.iter_mut() {
        *v = 255i32.min((*v as f64 * keep + 255.0 * white) as i32);
    }
}

fn channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}
