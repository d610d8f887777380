use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use lucid::sequence::{frame_paths, load_sequence};
use lucid::{filter, write_frame, BlurMode, Config, SampleSet};

#[derive(Parser, Debug)]
#[command(name = "lucid")]
#[command(version, about = "Denoise a sequence of Monte-Carlo renders", long_about = None)]
struct Cli {
    /// Output path; the file type (bmp or ppm) is taken from its suffix
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Preset image sequence to filter (0-5)
    #[arg(short = 'i', long = "image", value_name = "N", allow_negative_numbers = true)]
    sequence: Option<i64>,

    /// Number of images to combine; more than 10 reuses frames
    #[arg(short = 'n', long, value_name = "N", allow_negative_numbers = true)]
    number_of_images: Option<i64>,

    /// Smart blur amount in the range 0-1. At 1 the contribution weight has no effect
    #[arg(short, long, value_name = "X", allow_negative_numbers = true)]
    blur: Option<f64>,

    /// Smart blur type: 0 aggressive, 1 gentle
    #[arg(short = 'm', long, value_name = "MODE", allow_negative_numbers = true)]
    blur_mode: Option<i64>,

    /// Width of the spatial kernel, rounded up to an odd number
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    kernel_width: Option<i64>,

    /// Widens the range of neighboring values that can contribute
    #[arg(short, long, value_name = "X", allow_negative_numbers = true)]
    contribution: Option<f64>,

    /// First frame of the sequence; the sequence loops past its last frame
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    start_frame: Option<i64>,

    /// Directory holding the image sequences
    #[arg(long, value_name = "DIR")]
    images_dir: Option<PathBuf>,

    /// YAML file with default settings; flags override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_yaml_file(path)?,
            None => Config::default(),
        };

        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(sequence) = self.sequence {
            config.sequence = sequence;
        }
        if let Some(count) = self.number_of_images {
            config.image_count = count;
        }
        if let Some(blur) = self.blur {
            config.filter.blur_strength = blur;
        }
        if let Some(mode) = self.blur_mode {
            config.filter.blur_mode = BlurMode::from_index(mode);
        }
        if let Some(width) = self.kernel_width {
            config.filter.kernel_width = width;
        }
        if let Some(contribution) = self.contribution {
            config.filter.contribution_strength = contribution;
        }
        if let Some(start_frame) = self.start_frame {
            config.start_frame = start_frame;
        }
        if let Some(images_dir) = self.images_dir {
            config.images_dir = images_dir;
        }

        Ok(config.sanitized())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    common::log_setup::setup_logging(&cli.log_level, Path::new("logs"), "lucid");

    let config = cli.into_config()?;

    tracing::info!(
        sequence = config.sequence,
        images = config.image_count,
        start_frame = config.start_frame,
        output = %config.output_path.display(),
        "Denoising demo sequence"
    );
    tracing::info!(
        mode = %config.filter.blur_mode,
        blur_strength = config.filter.blur_strength,
        contribution_strength = config.filter.contribution_strength,
        kernel_width = config.filter.kernel_width,
        "Filter settings"
    );

    let paths = frame_paths(
        &config.images_dir,
        config.sequence_index(),
        config.start_frame_index(),
        config.frame_count(),
    );
    let frames = load_sequence(&paths)?;
    let set = SampleSet::build(&frames).context("Failed to gather frame statistics")?;
    let result = filter(&set, &config.filter);

    write_frame(&config.output_path, &result, config.output_format())
        .context("Failed to write image")?;

    Ok(())
}
