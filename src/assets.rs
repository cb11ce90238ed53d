//! App icon asset pipeline: paint once, resample per slot, write PNGs and the `.icns`.

use crate::icns::{write_icns, ICON_SLOTS};
use crate::painter::{render_base, BASE_SIZE};
use crate::png::write_png;
use crate::resample::resize;
use crate::Result;
use image::RgbaImage;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub const WEB_ICON_SIZE: u32 = 512;

/// File names of every generated asset below one root directory.
#[derive(Debug, Clone)]
pub struct AssetLayout {
    root: PathBuf,
}

impl AssetLayout {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn full_icon(&self) -> PathBuf {
        self.root.join("cartoonizer_icon_1024.png")
    }

    pub fn iconset_dir(&self) -> PathBuf {
        self.root.join("Cartoonizer.iconset")
    }

    pub fn icns(&self) -> PathBuf {
        self.root.join("Cartoonizer.icns")
    }

    pub fn web_icon(&self) -> PathBuf {
        self.root.join("cartoonizer_web_icon.png")
    }
}

/// Write the iconset: one PNG per slot, 1x and 2x for each base size.
pub fn build_iconset(base: &RgbaImage, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(ICON_SLOTS.len());
    // Smallest first; container order is handled by the icns writer.
    for slot in ICON_SLOTS.iter().rev() {
        let path = dir.join(slot.file_name());
        write_png(&resize(base, slot.pixels())?, &path)?;
        written.push(path);
    }
    info!("Iconset written to {} ({} images)", dir.display(), written.len());
    Ok(written)
}

/// Generate every icon asset under `layout`, returning the written files.
pub fn generate_icon_assets(layout: &AssetLayout) -> Result<Vec<PathBuf>> {
    info!("Rendering {0}x{0} base icon", BASE_SIZE);
    let base = render_base(BASE_SIZE);

    let mut written = Vec::new();

    write_png(&base, layout.full_icon())?;
    written.push(layout.full_icon());

    written.extend(build_iconset(&base, layout.iconset_dir())?);

    write_icns(layout.iconset_dir(), layout.icns())?;
    written.push(layout.icns());

    write_png(&resize(&base, WEB_ICON_SIZE)?, layout.web_icon())?;
    written.push(layout.web_icon());

    info!("Icon assets written to {}", layout.root().display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn layout_paths() {
        let layout = AssetLayout::new("assets");
        assert_eq!(layout.icns(), Path::new("assets/Cartoonizer.icns"));
        assert_eq!(layout.iconset_dir(), Path::new("assets/Cartoonizer.iconset"));
        assert_eq!(layout.web_icon(), Path::new("assets/cartoonizer_web_icon.png"));
    }

    #[test]
    fn iconset_images_have_slot_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let base = RgbaImage::from_pixel(64, 64, Rgba([10, 20, 30, 255]));
        let written = build_iconset(&base, dir.path()).unwrap();
        assert_eq!(written.len(), 10);
        for slot in &ICON_SLOTS {
            let img = image::open(dir.path().join(slot.file_name())).unwrap();
            assert_eq!((img.width(), img.height()), (slot.pixels(), slot.pixels()));
        }
    }
}
