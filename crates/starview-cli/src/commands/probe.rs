use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::commands::view::{build_viewer, parse_pair, ViewArgs};
use crate::io::load_image;
use crate::summary::print_probe;

#[derive(Args)]
pub struct ProbeArgs {
    /// Input image file
    pub file: PathBuf,

    /// Window pixel to probe, as X,Y
    #[arg(long, value_parser = parse_pair::<i64>, allow_hyphen_values = true)]
    pub at: (i64, i64),

    #[command(flatten)]
    pub view: ViewArgs,
}

pub fn run(args: &ProbeArgs) -> Result<()> {
    let image = load_image(&args.file)?;
    let viewer = build_viewer(image, &args.view)?;

    let (win_x, win_y) = args.at;
    let ((x, y), value) = viewer.pixel_at_window(win_x, win_y)?;
    let back = viewer.data_to_window(x as f64, y as f64)?;

    print_probe(args.at, (x, y), value, back);
    Ok(())
}
