//! Input preparation: downscale photos to the working resolution and find batch inputs.

use crate::{CartoonizerError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_SIDE: u32 = 768;
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "bmp"];

/// One input image and where its cartoon goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Dimensions after shrinking so the longer side is at most `max_side`.
/// Never upscales.
pub fn fit_within(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest == 0 {
        return (width, height);
    }
    let scale = (max_side as f64 / longest as f64).min(1.0);
    if scale < 1.0 {
        (
            ((width as f64 * scale) as u32).max(1),
            ((height as f64 * scale) as u32).max(1),
        )
    } else {
        (width, height)
    }
}

pub fn prepare_image(image: &DynamicImage, max_side: u32) -> Result<RgbImage> {
    if max_side == 0 {
        return Err(CartoonizerError::InvalidSize(max_side));
    }
    let rgb = image.to_rgb8();
    let (w, h) = rgb.dimensions();
    let (tw, th) = fit_within(w, h, max_side);
    if (tw, th) == (w, h) {
        return Ok(rgb);
    }
    debug!("Resizing {}x{} -> {}x{}", w, h, tw, th);
    Ok(image::imageops::resize(&rgb, tw, th, FilterType::Lanczos3))
}

pub fn load_prepared(path: impl AsRef<Path>, max_side: u32) -> Result<RgbImage> {
    let image = image::open(path.as_ref())?;
    prepare_image(&image, max_side)
}

/// `dir/photo.jpg` -> `dir/photo_cartoon.png`
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    input.with_file_name(cartoon_file_name(input))
}

fn cartoon_file_name(input: &Path) -> String {
    let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    format!("{stem}_cartoon.png")
}

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Jobs for every supported image directly inside `in_dir`, sorted by name.
pub fn collect_batch(in_dir: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> Result<Vec<BatchJob>> {
    let in_dir = in_dir.as_ref();
    let out_dir = out_dir.as_ref();

    let mut inputs = Vec::new();
    for entry in fs::read_dir(in_dir)? {
        let path = entry?.path();
        if path.is_file() && is_supported(&path) {
            inputs.push(path);
        }
    }
    inputs.sort();

    let jobs: Vec<BatchJob> = inputs
        .into_iter()
        .map(|input| {
            let output = out_dir.join(cartoon_file_name(&input));
            BatchJob { input, output }
        })
        .collect();
    info!("Found {} images in {}", jobs.len(), in_dir.display());
    Ok(jobs)
}
