//! Generation parameters and the description of a cartoonize run.

use crate::prepare::{collect_batch, default_output_path, BatchJob};
use crate::style::{build_prompt, Style, NEGATIVE_PROMPT};
use crate::{CartoonizerError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL: &str = "Lykon/dreamshaper-8";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    pub strength: f32,
    pub guidance_scale: f32,
    pub steps: u32,
    /// `None` draws a fresh random seed per image.
    pub seed: Option<u64>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self { strength: 0.6, guidance_scale: 7.5, steps: 30, seed: None }
    }
}

impl GenerationParams {
    /// Negative seeds mean "random".
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = u64::try_from(seed).ok();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.1..=1.0).contains(&self.strength) {
            return Err(CartoonizerError::InvalidParameter(format!(
                "strength must be within 0.1..=1.0, got {}",
                self.strength
            )));
        }
        if !(1.0..=30.0).contains(&self.guidance_scale) {
            return Err(CartoonizerError::InvalidParameter(format!(
                "guidance scale must be within 1..=30, got {}",
                self.guidance_scale
            )));
        }
        if !(1..=150).contains(&self.steps) {
            return Err(CartoonizerError::InvalidParameter(format!(
                "steps must be within 1..=150, got {}",
                self.steps
            )));
        }
        Ok(())
    }
}

/// Everything the img2img pipeline needs besides the input image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub style: Style,
    pub prompt: String,
    pub negative_prompt: String,
    #[serde(flatten)]
    pub params: GenerationParams,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, style: Style, extra: &str, params: GenerationParams) -> Result<Self> {
        params.validate()?;
        let model = model.into();
        if model.trim().is_empty() {
            return Err(CartoonizerError::InvalidParameter("model id is empty".into()));
        }
        Ok(Self {
            model,
            style,
            prompt: build_prompt(style, extra),
            negative_prompt: NEGATIVE_PROMPT.to_string(),
            params,
        })
    }
}

/// A dry-run description of a cartoonize invocation.
#[derive(Debug, Clone, Serialize)]
pub struct CartoonizePlan {
    pub request: GenerationRequest,
    pub jobs: Vec<BatchJob>,
}

impl CartoonizePlan {
    /// One image; output defaults to `<stem>_cartoon.png` next to the input.
    pub fn single(request: GenerationRequest, input: impl AsRef<Path>, output: Option<PathBuf>) -> Self {
        let input = input.as_ref().to_path_buf();
        let output = output.unwrap_or_else(|| default_output_path(&input));
        Self { request, jobs: vec![BatchJob { input, output }] }
    }

    /// Single image first, then the folder, matching the order a run processes them.
    pub fn build(
        request: GenerationRequest,
        single: Option<(PathBuf, Option<PathBuf>)>,
        folder: Option<(PathBuf, PathBuf)>,
    ) -> Result<Self> {
        let mut plan = match single {
            Some((input, output)) => Self::single(request, input, output),
            None if folder.is_some() => Self { request, jobs: Vec::new() },
            None => {
                return Err(CartoonizerError::InvalidParameter(
                    "provide --input or --input-folder".into(),
                ))
            }
        };
        if let Some((in_dir, out_dir)) = folder {
            plan.jobs.extend(collect_batch(in_dir, out_dir)?);
        }
        Ok(plan)
    }

    /// Every supported image in `in_dir`.
    pub fn folder(request: GenerationRequest, in_dir: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> Result<Self> {
        let jobs = collect_batch(in_dir, out_dir)?;
        Ok(Self { request, jobs })
    }
}
