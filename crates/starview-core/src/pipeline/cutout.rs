use std::time::Instant;

use ndarray::{s, Array3};
use tracing::{debug, warn};

use crate::buffer::ImageSource;
use crate::config::Interpolation;
use crate::error::Result;
use crate::view::CoordTransformer;

use super::types::{Cutout, DataRect};

/// Cutout stage options taken from the viewer configuration.
#[derive(Clone, Copy, Debug)]
pub struct CutoutOptions {
    pub interpolation: Interpolation,
    /// Prepare the rotation square even when the rotation is 0.
    pub always_square: bool,
    /// Pixels added to the window diagonal for the square side.
    pub square_slop: usize,
}

/// Side of the square that covers the window under any rotation.
pub fn square_side(win_wd: usize, win_ht: usize, slop: usize) -> usize {
    let diag = ((win_wd * win_wd + win_ht * win_ht) as f64).sqrt();
    diag.ceil() as usize + slop
}

/// Reduce a scale so that one data pixel never exceeds the window extent.
/// Returns the (possibly) adjusted scale.
pub fn clamp_scale(scale: f64, win_extent: usize, axis: &str) -> f64 {
    let ratio = win_extent as f64 / scale;
    if ratio < 1.0 {
        let adjusted = scale * ratio;
        warn!(axis, from = scale, to = adjusted, "scale adjusted downward");
        adjusted
    } else {
        scale
    }
}

/// Whether the cutout must be embedded in the rotation square.
pub fn needs_square(rot_deg: f64, always_square: bool) -> bool {
    always_square || rot_deg != 0.0
}

/// Extract the smallest scaled cutout of `image` that covers the window.
///
/// `coords` carries the current pan, scale, orientation and window size.
/// The returned cutout records the data box it came from, the scale the
/// buffer actually achieved, and where the pan anchor sits inside it.
pub fn extract_cutout(
    image: &dyn ImageSource,
    coords: &CoordTransformer,
    options: &CutoutOptions,
) -> Result<Cutout> {
    let start = Instant::now();
    let (win_wd, win_ht) = coords.window_size()?;
    let (win_wd, win_ht) = (win_wd.max(1), win_ht.max(1));
    let geometry = *coords.geometry();
    let (pan_x, pan_y) = geometry.pan;

    let scale_x = clamp_scale(geometry.scale.0, win_wd, "x");
    let scale_y = clamp_scale(geometry.scale.1, win_ht, "y");
    let coords = coords.with_scale(scale_x, scale_y);

    let squared = needs_square(geometry.rot_deg, options.always_square);
    let side = square_side(win_wd, win_ht, options.square_slop);

    let (min_x, min_y, max_x, max_y) = if squared {
        // The square is rotation invariant, so its data box only depends on
        // pan and scale.
        let half = side as f64 / 2.0;
        let (hx, hy) = (half / scale_x, half / scale_y);
        (pan_x - hx, pan_y - hy, pan_x + hx, pan_y + hy)
    } else {
        let mut bounds = (
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        );
        for (x, y) in coords.window_corners_to_data()? {
            bounds.0 = bounds.0.min(x);
            bounds.1 = bounds.1.min(y);
            bounds.2 = bounds.2.max(x);
            bounds.3 = bounds.3.max(y);
        }
        // Grow by one data pixel so flips of odd-sized windows stay covered.
        (bounds.0 - 1.0, bounds.1 - 1.0, bounds.2 + 1.0, bounds.3 + 1.0)
    };

    let (width, height) = image.size();
    let origin = clamp_box(min_x, min_y, max_x, max_y, width, height);

    // Offset from the cutout origin to the pan anchor, in data pixels.
    let xo = pan_x - origin.x1 as f64;
    let yo = pan_y - origin.y1 as f64;

    let scaled = image.scaled_cutout(
        origin.x1,
        origin.y1,
        origin.x2,
        origin.y2,
        scale_x,
        scale_y,
        options.interpolation,
    )?;

    let anchor_x = (xo * scaled.scale_x).round() as i64;
    let anchor_y = (yo * scaled.scale_y).round() as i64;

    let (data, anchor_x, anchor_y) = if squared {
        let (square, ax, ay) = embed_in_square(&scaled.data, anchor_x, anchor_y, side);
        (square, ax, ay)
    } else {
        (scaled.data, anchor_x, anchor_y)
    };

    debug!(
        x1 = origin.x1,
        y1 = origin.y1,
        x2 = origin.x2,
        y2 = origin.y2,
        scale_x = scaled.scale_x,
        scale_y = scaled.scale_y,
        squared,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "cutout extracted"
    );

    Ok(Cutout {
        data,
        origin,
        scale_x: scaled.scale_x,
        scale_y: scaled.scale_y,
        anchor_x,
        anchor_y,
        squared,
    })
}

/// Clamp a fractional data box to the image, producing at least 1x1.
pub fn clamp_box(
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    width: usize,
    height: usize,
) -> DataRect {
    let clamp = |v: f64, hi: usize| -> usize {
        if v.is_nan() || v <= 0.0 {
            0
        } else {
            (v as usize).min(hi)
        }
    };
    let (xmax, ymax) = (width.max(1) - 1, height.max(1) - 1);
    let x1 = clamp(min_x.floor(), xmax);
    let y1 = clamp(min_y.floor(), ymax);
    let x2 = clamp(max_x.ceil(), xmax).max(x1);
    let y2 = clamp(max_y.ceil(), ymax).max(y1);
    DataRect { x1, y1, x2, y2 }
}

/// Copy `data` into a NaN-filled `side × side` square so that the anchor
/// lands on the square's centre. Returns the square and the new anchor.
///
/// Each side copies `min(distance to the cutout edge, distance to the
/// square edge)` pixels, which also handles an anchor outside the cutout.
pub fn embed_in_square(
    data: &Array3<f32>,
    anchor_x: i64,
    anchor_y: i64,
    side: usize,
) -> (Array3<f32>, i64, i64) {
    let (ht, wd, channels) = data.dim();
    let (wd, ht) = (wd as i64, ht as i64);
    let n = side as i64;
    let (ncx, ncy) = (n / 2, n / 2);

    let mut square = Array3::<f32>::from_elem((side, side, channels), f32::NAN);

    let ldx = anchor_x.min(ncx);
    let rdx = (wd - anchor_x).min(n - ncx);
    let bdy = anchor_y.min(ncy);
    let tdy = (ht - anchor_y).min(n - ncy);

    if ldx + rdx > 0 && bdy + tdy > 0 {
        let src = data.slice(s![
            (anchor_y - bdy) as usize..(anchor_y + tdy) as usize,
            (anchor_x - ldx) as usize..(anchor_x + rdx) as usize,
            ..
        ]);
        square
            .slice_mut(s![
                (ncy - bdy) as usize..(ncy + tdy) as usize,
                (ncx - ldx) as usize..(ncx + rdx) as usize,
                ..
            ])
            .assign(&src);
    }

    (square, ncx, ncy)
}
