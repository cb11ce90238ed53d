//! cartoonizer CLI - icon assets, prompt presets and input preparation

use cartoonizer::job::DEFAULT_MODEL;
use cartoonizer::prepare::{load_prepared, DEFAULT_MAX_SIDE};
use cartoonizer::status::{
    default_status_path, join_watcher, StatusEvent, StatusFile, StatusWatcher, POLL_INTERVAL,
};
use cartoonizer::{
    generate_icon_assets, AssetLayout, CartoonizePlan, CartoonizerError, GenerationParams, GenerationRequest,
    Style,
};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cartoonizer", about = "Local photo-to-cartoon converter tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the app icon PNGs, iconset and .icns
    Icons {
        /// Output directory for the icon assets
        #[arg(long, default_value = "assets")]
        assets_dir: PathBuf,
    },
    /// Print the generation request as JSON
    Prompt {
        #[command(flatten)]
        generation: GenerationArgs,
    },
    /// Print the jobs a cartoonize run would perform as JSON
    Plan {
        /// Input image path (single-image mode)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output image path (single-image mode)
        #[arg(long, requires = "input")]
        output: Option<PathBuf>,
        /// Input folder (batch mode)
        #[arg(long)]
        input_folder: Option<PathBuf>,
        /// Output folder (batch mode)
        #[arg(long, default_value = "cartoon_out")]
        output_folder: PathBuf,
        #[command(flatten)]
        generation: GenerationArgs,
    },
    /// Downscale an input photo to the working resolution
    Prepare {
        /// Input image
        input: PathBuf,
        /// Output image
        output: PathBuf,
        /// Longest side in pixels
        #[arg(long, env = "CARTOONIZER_MAX_SIDE", default_value_t = DEFAULT_MAX_SIDE)]
        max_side: u32,
    },
    /// Read or write the startup status file
    Status {
        /// Status file (defaults to the per-user application support path)
        #[arg(long, global = true)]
        file: Option<PathBuf>,
        #[command(subcommand)]
        action: StatusAction,
    },
}

#[derive(Subcommand)]
enum StatusAction {
    /// Replace the current status line
    Set { message: String },
    /// Tell the splash window to close
    Close,
    /// Print status changes until CLOSE is written
    Watch,
}

#[derive(Args)]
struct GenerationArgs {
    /// Hugging Face model id (SD 1.5-based)
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,
    /// Style preset: anime, comic, pixar, sketch, watercolor
    #[arg(long, default_value_t = Style::Anime)]
    style: Style,
    /// Extra prompt text to append
    #[arg(long, default_value = "")]
    prompt_extra: String,
    /// How much to change the image (0.1-1.0)
    #[arg(long, default_value = "0.6")]
    strength: f32,
    /// Style intensity
    #[arg(long, default_value = "7.5")]
    guidance_scale: f32,
    /// Number of inference steps
    #[arg(long, default_value = "30")]
    steps: u32,
    /// Random seed (>=0 for reproducible results, -1 for random)
    #[arg(long, default_value = "-1", allow_negative_numbers = true)]
    seed: i64,
}

impl GenerationArgs {
    fn request(&self) -> Result<GenerationRequest, CartoonizerError> {
        let params = GenerationParams {
            strength: self.strength,
            guidance_scale: self.guidance_scale,
            steps: self.steps,
            seed: None,
        }
        .with_seed(self.seed);
        GenerationRequest::new(self.model.as_str(), self.style, &self.prompt_extra, params)
    }
}

fn main() -> Result<(), CartoonizerError> {
    cartoonizer::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Icons { assets_dir } => {
            let written = generate_icon_assets(&AssetLayout::new(&assets_dir))?;
            for path in &written {
                info!("  {}", path.display());
            }
        }
        Command::Prompt { generation } => {
            println!("{}", serde_json::to_string_pretty(&generation.request()?)?);
        }
        Command::Plan { input, output, input_folder, output_folder, generation } => {
            let request = generation.request()?;
            let single = input.map(|input| (input, output));
            let folder = input_folder.map(|folder| (folder, output_folder));
            let plan = CartoonizePlan::build(request, single, folder)?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Command::Prepare { input, output, max_side } => {
            let prepared = load_prepared(&input, max_side)?;
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            prepared.save(&output)?;
            info!(
                "{} -> {} ({}x{})",
                input.display(),
                output.display(),
                prepared.width(),
                prepared.height()
            );
        }
        Command::Status { file, action } => {
            let path = file.or_else(default_status_path).ok_or_else(|| {
                CartoonizerError::InvalidParameter("no status file given and HOME is not set".into())
            })?;
            let file = StatusFile::new(path);
            match action {
                StatusAction::Set { message } => file.write(&message)?,
                StatusAction::Close => file.close()?,
                StatusAction::Watch => {
                    let (events, handle) = StatusWatcher::new(file).spawn(POLL_INTERVAL);
                    for event in events {
                        match event {
                            StatusEvent::Message(message) => println!("{message}"),
                            StatusEvent::Close => break,
                        }
                    }
                    join_watcher(handle)?;
                }
            }
        }
    }
    Ok(())
}
