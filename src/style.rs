//! Style presets and prompt construction.

use crate::CartoonizerError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Terms steering the model away from common img2img artifacts.
pub const NEGATIVE_PROMPT: &str = "blurry, distorted, extra limbs, text, logo, low quality";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Anime,
    Comic,
    Pixar,
    Sketch,
    Watercolor,
}

impl Style {
    pub const ALL: [Style; 5] = [Style::Anime, Style::Comic, Style::Pixar, Style::Sketch, Style::Watercolor];

    pub fn name(self) -> &'static str {
        match self {
            Style::Anime => "anime",
            Style::Comic => "comic",
            Style::Pixar => "pixar",
            Style::Sketch => "sketch",
            Style::Watercolor => "watercolor",
        }
    }

    pub fn preset(self) -> &'static str {
        match self {
            Style::Anime => "highly detailed anime style, clean lines, cel shading, vibrant colors",
            Style::Comic => "comic book style, bold ink outlines, halftone shading, dramatic lighting",
            Style::Pixar => "3D Pixar style, soft lighting, smooth shading, expressive eyes",
            Style::Sketch => "clean line art sketch, black ink, minimal shading, white background",
            Style::Watercolor => "soft watercolor painting, pastel colors, gentle edges",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Style> {
        Style::ALL.into_iter().find(|s| s.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl FromStr for Style {
    type Err = CartoonizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::from_name(s).ok_or_else(|| {
            let names: Vec<&str> = Style::ALL.iter().map(|s| s.name()).collect();
            CartoonizerError::InvalidParameter(format!("unknown style '{}', expected one of: {}", s, names.join(", ")))
        })
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Preset text, with `extra` appended after a comma when it is not blank.
pub fn build_prompt(style: Style, extra: &str) -> String {
    let extra = extra.trim();
    if extra.is_empty() {
        style.preset().to_string()
    } else {
        format!("{}, {}", style.preset(), extra)
    }
}
