//! View flags shared by `render` and `probe`, and viewer construction.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use starview_core::{AstroImage, ImageViewer};
use tracing::debug;

use crate::settings::SettingsFile;

const DEFAULT_WINDOW: usize = 512;

#[derive(Args, Clone, Debug, Default)]
pub struct ViewArgs {
    /// Window width in pixels [default: 512]
    #[arg(long)]
    pub width: Option<usize>,

    /// Window height in pixels [default: 512]
    #[arg(long)]
    pub height: Option<usize>,

    /// Zoom level (disables auto zoom)
    #[arg(long, allow_hyphen_values = true, conflicts_with = "scale")]
    pub zoom: Option<f64>,

    /// Scale factor (disables auto zoom)
    #[arg(long)]
    pub scale: Option<f64>,

    /// Data coordinate shown at the window centre, as X,Y
    #[arg(long, value_parser = parse_pair::<f64>, allow_hyphen_values = true)]
    pub pan: Option<(f64, f64)>,

    /// Rotation in degrees, counter-clockwise
    #[arg(long, allow_hyphen_values = true)]
    pub rot: Option<f64>,

    #[arg(long)]
    pub flip_x: bool,

    #[arg(long)]
    pub flip_y: bool,

    /// Exchange the X and Y axes
    #[arg(long)]
    pub swap_xy: bool,

    /// Cut levels as LO,HI (disables auto cuts)
    #[arg(long, value_parser = parse_pair::<f64>, allow_hyphen_values = true)]
    pub cuts: Option<(f64, f64)>,

    /// Autocut method: minmax, histogram, stddev, median, zscale
    #[arg(long)]
    pub autocut: Option<String>,

    /// Colour map
    #[arg(long)]
    pub cmap: Option<String>,

    /// Intensity map
    #[arg(long)]
    pub imap: Option<String>,

    /// Colour distribution algorithm
    #[arg(long)]
    pub dist: Option<String>,

    /// TOML file with [viewer] and [view] tables; flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Parse `A,B` into a pair.
pub fn parse_pair<T>(s: &str) -> std::result::Result<(T, T), String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected two comma-separated values, got '{s}'"))?;
    let parse = |v: &str| v.trim().parse::<T>().map_err(|e| format!("'{v}': {e}"));
    Ok((parse(a)?, parse(b)?))
}

/// Create a synchronous viewer, load `image` and apply the requested view.
pub fn build_viewer(image: AstroImage, args: &ViewArgs) -> Result<ImageViewer> {
    let file = match &args.config {
        Some(path) => SettingsFile::load(path)?,
        None => SettingsFile::default(),
    };
    let view = file.view;

    let mut config = file.viewer;
    if let Some(method) = &args.autocut {
        config.autocut_method = method.clone();
    }
    if let Some(name) = &args.cmap {
        config.color_map = name.clone();
    }
    if let Some(name) = &args.imap {
        config.intensity_map = name.clone();
    }
    if let Some(name) = &args.dist {
        config.color_algorithm = name.clone();
    }

    let width = args.width.or(view.width).unwrap_or(DEFAULT_WINDOW);
    let height = args.height.or(view.height).unwrap_or(DEFAULT_WINDOW);
    let rotation = args.rot.or(view.rotation).unwrap_or(0.0);
    let flip_x = args.flip_x || view.flip_x;
    let flip_y = args.flip_y || view.flip_y;
    let swap_xy = args.swap_xy || view.swap_xy;
    let pan = args.pan.or(view.pan.map(|[x, y]| (x, y)));
    let cuts = args.cuts.or(view.cuts.map(|[lo, hi]| (lo, hi)));
    let (zoom, scale) = match (args.zoom, args.scale) {
        (None, None) => (view.zoom, view.scale),
        flags => flags,
    };

    let mut viewer = ImageViewer::new(config)?;
    viewer.with_redraw_held(|viewer| -> Result<()> {
        viewer.set_window_size(width, height);
        // Orientation first so auto zoom fits the rotated image.
        viewer.set_rotation(rotation);
        viewer.transform(flip_x, flip_y, swap_xy);
        viewer.set_image(Arc::new(image));

        if let Some(level) = zoom {
            viewer.zoom_to(level)?;
        } else if let Some(scale) = scale {
            viewer.scale_to(scale, scale)?;
        }
        if let Some((x, y)) = pan {
            viewer.set_pan(x, y);
        }
        if let Some((lo, hi)) = cuts {
            viewer.cut_levels(lo, hi);
        }
        Ok(())
    })?;

    debug!(
        width,
        height,
        scale = viewer.get_scale().0,
        rotation,
        "viewer ready"
    );
    Ok(viewer)
}
