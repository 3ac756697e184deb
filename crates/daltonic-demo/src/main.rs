//! Daltonic demo — corrects a still image (or a generated test card) for each
//! deficiency type and writes the results as PNG files.

mod args;
mod logger;
mod test_card;

use std::path::{Path, PathBuf};

use clap::Parser;
use daltonic_core::{
    CorrectionConfig, CorrectionMode, DaltonError, Frame, FrameCorrectionPipeline,
};

use crate::args::Args;

/// Errors that can end a demo run.
#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Correction(#[from] DaltonError),
    #[error("failed to read or write image: {0}")]
    Image(#[from] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn main() {
    logger::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), DemoError> {
    let config = match &args.config {
        Some(path) => CorrectionConfig::load(path)?,
        None => CorrectionConfig::default().with_env_overrides(),
    };
    let mut pipeline = FrameCorrectionPipeline::from_config(&config)?;

    let frame = load_frame(args.input.as_deref())?;
    tracing::info!("Processing {}x{} image", frame.width, frame.height);

    std::fs::create_dir_all(&args.output_dir)?;
    save(&frame, &args.output_dir.join("original.png"))?;

    let modes: Vec<CorrectionMode> = if args.modes.is_empty() {
        CorrectionMode::all()
            .iter()
            .copied()
            .filter(|m| !m.is_off())
            .collect()
    } else {
        args.modes.clone()
    };
    let detections = (!args.regions.is_empty()).then_some(args.regions.as_slice());

    for mode in modes {
        pipeline.modes_mut().set(mode);
        // Every run is frame 0 of its own window so the regions are always fresh.
        let outcome = pipeline.process_frame(frame.clone(), 0, detections)?;
        tracing::info!(
            "{}: corrected {} region(s)",
            mode.label(),
            outcome.regions.len()
        );
        save(&outcome.frame, &output_path(&args.output_dir, mode, ""))?;

        if args.simulate && !mode.is_off() {
            let simulated = pipeline.engine().simulate(&frame, mode.deficiency())?;
            save(&simulated, &output_path(&args.output_dir, mode, "_simulated"))?;
        }
    }

    tracing::info!("Wrote results to {}", args.output_dir.display());
    Ok(())
}

fn load_frame(input: Option<&Path>) -> Result<Frame, DemoError> {
    match input {
        Some(path) => {
            let img = image::open(path)?.to_rgb8();
            Ok(Frame::from_rgb_image(&img)?)
        }
        None => {
            tracing::info!("No input given, using the generated test card");
            Ok(test_card::generate()?)
        }
    }
}

fn output_path(dir: &Path, mode: CorrectionMode, suffix: &str) -> PathBuf {
    dir.join(format!("{}{suffix}.png", mode.name()))
}

fn save(frame: &Frame, path: &Path) -> Result<(), DemoError> {
    frame.to_rgb_image().save(path)?;
    tracing::debug!("Saved {}", path.display());
    Ok(())
}
