//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use daltonic_core::{CorrectionMode, Region};

#[derive(Debug, Parser)]
#[command(
    name = "daltonic-demo",
    about = "Apply color-deficiency correction to a still image"
)]
pub struct Args {
    /// Input image. A generated test card is used when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory the output images are written to.
    #[arg(short, long, default_value = "daltonic-out")]
    pub output_dir: PathBuf,

    /// Correction mode (protanopia, deuteranopia, tritanopia). Repeatable;
    /// all three are rendered when omitted.
    #[arg(short, long = "mode", value_parser = parse_mode)]
    pub modes: Vec<CorrectionMode>,

    /// Limit correction to a rectangle `x1,y1,x2,y2`. Repeatable; regions are
    /// applied in the order given.
    #[arg(short, long = "region", value_parser = parse_region)]
    pub regions: Vec<Region>,

    /// Also write what a viewer with each deficiency perceives.
    #[arg(long)]
    pub simulate: bool,

    /// JSON configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

fn parse_mode(s: &str) -> Result<CorrectionMode, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_region(s: &str) -> Result<Region, String> {
    let coords: Vec<i32> = s
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("bad coordinate in {s:?}: {e}"))?;
    match coords.as_slice() {
        &[x1, y1, x2, y2] => Ok(Region::new(x1, y1, x2, y2)),
        _ => Err(format!("expected x1,y1,x2,y2, got {s:?}")),
    }
}
