use ndarray::ArrayView3;

use super::{finite_min_max, Autocuts};

/// Full data range.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinMax;

impl Autocuts for MinMax {
    fn name(&self) -> &'static str {
        "minmax"
    }

    fn calc_cut_levels(&self, data: ArrayView3<'_, f32>) -> (f64, f64) {
        finite_min_max(data).unwrap_or((0.0, 0.0))
    }
}
