use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rayon::prelude::*;
use starview_core::autocuts::{autocuts_for, AUTOCUT_METHODS};
use starview_core::ImageSource;

use crate::io::load_image;
use crate::summary::{print_image_info, ImageInfo};

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let image = load_image(&args.file)?;
    let pixels = image.pixels();

    let range = pixels
        .iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f32, f32)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .map(|(lo, hi)| (f64::from(lo), f64::from(hi)));

    let cut_levels = AUTOCUT_METHODS
        .par_iter()
        .map(|&name| -> Result<(&'static str, f64, f64)> {
            let (lo, hi) = autocuts_for(name)?.calc_cut_levels(pixels);
            Ok((name, lo, hi))
        })
        .collect::<Result<Vec<_>>>()?;

    print_image_info(&ImageInfo {
        path: args.file.clone(),
        size: image.size(),
        channels: image.channels(),
        range,
        cut_levels,
    });
    Ok(())
}
