use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use slicer_core::{Slicer, SlicerConfig};

/// Slices a sprite atlas into rectangles by its alpha channel and writes
/// them as JSON.
#[derive(Parser, Debug)]
#[command(name = "sprite_slicer", version)]
struct Args {
    /// PNG atlas to slice.
    atlas: PathBuf,

    /// Where to write the sprite list. Defaults to `<ATLAS>.json`.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// YAML file with slicing settings. Flags below override it.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pixels with alpha at or below this count as background.
    #[arg(long, value_name = "0-1")]
    alpha_threshold: Option<f32>,

    /// Smallest bounding box area of a sprite, in pixels.
    #[arg(long, value_name = "PIXELS")]
    min_area: Option<u32>,

    /// Smallest side length of a sprite, in pixels.
    #[arg(long, value_name = "PIXELS")]
    min_size: Option<u32>,

    /// Keep regions that lie inside other regions.
    #[arg(long)]
    keep_contained: bool,

    /// More output. Repeat for trace logging.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn slicer_config(&self) -> Result<SlicerConfig> {
        let mut config = match &self.config {
            Some(path) => SlicerConfig::load(path)?,
            None => SlicerConfig::default(),
        };

        if let Some(threshold) = self.alpha_threshold {
            config.alpha_threshold = threshold;
        }
        if let Some(area) = self.min_area {
            config.min_region_area = area;
        }
        if let Some(size) = self.min_size {
            config.min_region_size = size;
        }
        if self.keep_contained {
            config.filter_contained_rects = false;
        }

        Ok(config)
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output(&self.atlas))
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn default_output(atlas: &Path) -> PathBuf {
    atlas.with_extension("json")
}

fn setup_logging(base_level: &str) -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(base_level)?
        .log_to_file(FileSpec::default().directory("logs"))
        .duplicate_to_stderr(Duplicate::Warn)
        .duplicate_to_stdout(Duplicate::Info)
        .rotate(
            Criterion::Size(1024 * 1024),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(5),
        )
        .start()?;

    Ok(handle)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = setup_logging(args.log_level()).context("logger initialization failed")?;

    let config = args.slicer_config()?;
    log::debug!("{config:?}");

    let mut slicer = Slicer::new(config);
    slicer.load_image(&args.atlas)?;

    let count = slicer.auto_slice();
    if count == 0 {
        log::warn!("no sprites found in {}", args.atlas.display());
    }

    let written = slicer.export_json(args.output_path())?;
    println!("{count} sprites -> {}", written.display());

    Ok(())
}
