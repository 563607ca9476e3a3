//! Cut-level algorithms: estimate `(lo, hi)` for an image and rescale data
//! into colour-table index range.

mod histogram;
mod median;
mod minmax;
mod stddev;
mod zscale;

pub use histogram::Histogram;
pub use median::Median;
pub use minmax::MinMax;
pub use stddev::StdDev;
pub use zscale::ZScale;

use std::fmt::Debug;

use ndarray::{Array3, ArrayView3};

use crate::error::{Result, ViewerError};

/// Names accepted by [`autocuts_for`].
pub const AUTOCUT_METHODS: [&str; 5] = ["minmax", "histogram", "stddev", "median", "zscale"];

pub trait Autocuts: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    /// Estimate cut levels for `data` (shape `(height, width, channels)`).
    /// Non-finite values are ignored. An image with no finite values gives
    /// `(0.0, 0.0)`.
    fn calc_cut_levels(&self, data: ArrayView3<'_, f32>) -> (f64, f64);

    /// Linearly rescale `[lo, hi]` onto `[vmin, vmax]`, clipping outside.
    ///
    /// `hi` below `lo` is raised to `lo`. When they are equal the result is
    /// a threshold: values above `lo` become `vmax`, the rest `vmin`.
    fn cut_levels(
        &self,
        data: ArrayView3<'_, f32>,
        lo: f64,
        hi: f64,
        vmin: f64,
        vmax: f64,
    ) -> Array3<f32> {
        let hi = hi.max(lo);
        let delta = hi - lo;
        let (vmin, vmax) = (vmin as f32, vmax as f32);
        if delta > 0.0 {
            let range = (vmax - vmin) as f64;
            data.mapv(|v| {
                let f = ((v as f64 - lo) / delta * range) as f32 + vmin;
                f.clamp(vmin, vmax)
            })
        } else {
            data.mapv(|v| {
                if v.is_nan() {
                    v
                } else if v as f64 > lo {
                    vmax
                } else {
                    vmin
                }
            })
        }
    }
}

/// Build an autocut algorithm by name with its default parameters.
pub fn autocuts_for(name: &str) -> Result<Box<dyn Autocuts>> {
    match name.to_ascii_lowercase().as_str() {
        "minmax" => Ok(Box::new(MinMax)),
        "histogram" => Ok(Box::new(Histogram::default())),
        "stddev" => Ok(Box::new(StdDev::default())),
        "median" => Ok(Box::new(Median)),
        "zscale" => Ok(Box::new(ZScale::default())),
        _ => Err(ViewerError::UnknownAutocutMethod(name.to_string())),
    }
}

/// Finite values of `data`, strided so that at most `max_samples` are kept.
pub(crate) fn finite_samples(data: ArrayView3<'_, f32>, max_samples: usize) -> Vec<f32> {
    let total = data.len();
    let stride = if max_samples == 0 {
        1
    } else {
        total.div_ceil(max_samples).max(1)
    };
    data.iter()
        .step_by(stride)
        .copied()
        .filter(|v| v.is_finite())
        .collect()
}

/// Sort finite samples ascending.
pub(crate) fn sort_samples(samples: &mut [f32]) {
    samples.sort_by(|a, b| a.total_cmp(b));
}

/// Minimum and maximum of the finite values, or `None` if there are none.
pub(crate) fn finite_min_max(data: ArrayView3<'_, f32>) -> Option<(f64, f64)> {
    data.iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .map(|(lo, hi)| (lo as f64, hi as f64))
}
