use std::time::Instant;

use ndarray::{Array2, Axis};
use tracing::debug;

use crate::autocuts::Autocuts;

use super::transform::flip_rows;
use super::types::{IndexArray, Transformed};

/// Apply cut levels to the transformed array and produce colour-table
/// indices in `0..=vmax`.
///
/// `invert_y` flips the rows once more for screens whose row 0 is at the
/// top. It is independent of the geometric Y flip of the transform stage.
pub fn apply_visuals(
    transformed: &Transformed,
    cuts: (f64, f64),
    autocuts: &dyn Autocuts,
    vmax: u32,
    invert_y: bool,
) -> IndexArray {
    let start = Instant::now();
    let data = if invert_y {
        flip_rows(&transformed.data)
    } else {
        transformed.data.clone()
    };

    let valid: Array2<bool> = data
        .index_axis(Axis(2), 0)
        .mapv(|v| v.is_finite());

    let (lo, hi) = cuts;
    let scaled = autocuts.cut_levels(data.view(), lo, hi, 0.0, vmax as f64);
    // NaN padding maps to 0; it is masked out by `valid` anyway.
    let index = scaled.mapv(|v| (v.clamp(0.0, vmax as f32) as u32).min(vmax));

    debug!(
        lo,
        hi,
        vmax,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "cut levels applied"
    );

    IndexArray {
        index,
        valid,
        vmax,
        dst_x: transformed.dst_x,
        dst_y: transformed.dst_y,
    }
}
