use std::time::Instant;

use ndarray::{s, Array3, ArrayView3, Axis};
use tracing::debug;

use crate::parallel::for_each_row;

use super::types::{Cutout, Transformed};

/// Orientation parameters for the transform stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformParams {
    pub flip_x: bool,
    pub flip_y: bool,
    pub swap_xy: bool,
    pub rot_deg: f64,
    /// Integer window centre, `(width / 2, height / 2)`.
    pub window_center: (i64, i64),
    /// Window row 0 is the top; the visual stage flips the array to match.
    pub origin_upper: bool,
}

/// Flip, swap and rotate the cutout, tracking the pan anchor, and compute
/// where the result's top-left corner lands in the window.
pub fn apply_transforms(cutout: &Cutout, params: &TransformParams) -> Transformed {
    let start = Instant::now();
    let (ht, wd, _) = cutout.data.dim();
    let (mut xoff, mut yoff) = (cutout.anchor_x, cutout.anchor_y);

    let mut data = cutout.data.view();
    if params.flip_y {
        data.invert_axis(Axis(0));
        yoff = ht as i64 - yoff;
    }
    if params.flip_x {
        data.invert_axis(Axis(1));
        xoff = wd as i64 - xoff;
    }
    if params.swap_xy {
        data.swap_axes(0, 1);
        std::mem::swap(&mut xoff, &mut yoff);
    }
    let split = start.elapsed();

    let data = if params.rot_deg != 0.0 {
        rotate_clip(data, params.rot_deg, (xoff as f64, yoff as f64))
    } else {
        data.as_standard_layout().into_owned()
    };

    // Rotation may change the shape for other rotation strategies; always
    // place from the final dimensions.
    let (ht, _, _) = data.dim();
    let (ctr_x, ctr_y) = params.window_center;
    let dst_x = ctr_x - xoff;
    let dst_y = if params.origin_upper {
        ctr_y - (ht as i64 - yoff)
    } else {
        ctr_y - yoff
    };

    debug!(
        flip_ms = split.as_secs_f64() * 1000.0,
        total_ms = start.elapsed().as_secs_f64() * 1000.0,
        rot_deg = params.rot_deg,
        dst_x,
        dst_y,
        "transforms applied"
    );

    Transformed { data, dst_x, dst_y }
}

/// Rotate `data` by `deg` degrees (counter-clockwise with row index
/// increasing upward) about the continuous point `pivot = (x, y)`, keeping
/// the input shape. Pixels that map outside the source are NaN.
///
/// Each output pixel samples the source at its inverse-rotated centre
/// (nearest neighbour).
pub fn rotate_clip(data: ArrayView3<'_, f32>, deg: f64, pivot: (f64, f64)) -> Array3<f32> {
    let (ht, wd, channels) = data.dim();
    let (sin, cos) = (-deg).to_radians().sin_cos();
    let (px, py) = pivot;

    let mut out = Array3::<f32>::from_elem((ht, wd, channels), f32::NAN);
    for_each_row(&mut out, |row, mut lane| {
        let dy = row as f64 + 0.5 - py;
        for col in 0..wd {
            let dx = col as f64 + 0.5 - px;
            let sx = (dx * cos - dy * sin + px).floor();
            let sy = (dx * sin + dy * cos + py).floor();
            if sx < 0.0 || sy < 0.0 || sx >= wd as f64 || sy >= ht as f64 {
                continue;
            }
            let (sx, sy) = (sx as usize, sy as usize);
            for ch in 0..channels {
                lane[[col, ch]] = data[[sy, sx, ch]];
            }
        }
    });
    out
}

/// Reverse row order (display flip between data and screen conventions).
pub fn flip_rows<T: Clone>(data: &Array3<T>) -> Array3<T> {
    data.slice(s![..;-1, .., ..]).to_owned()
}
