//! Cartoonizer support library: app icon assets, style presets and input preparation.

pub mod assets;
pub mod icns;
pub mod job;
pub mod painter;
pub mod png;
pub mod prepare;
pub mod resample;
pub mod status;
pub mod style;

pub use assets::{generate_icon_assets, AssetLayout};
pub use job::{CartoonizePlan, GenerationParams, GenerationRequest};
pub use painter::render_base;
pub use resample::resize;
pub use style::Style;

use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartoonizerError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid raster size: {0}")]
    InvalidSize(u32),
    #[error("Raster is not square: {width}x{height}")]
    NotSquare { width: u32, height: u32 },
    #[error("Missing icon asset {}: {source}", .path.display())]
    MissingAsset {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Icon container error: {0}")]
    Icns(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, CartoonizerError>;

/// Install the stderr logger. `RUST_LOG` overrides the default `info` filter.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
