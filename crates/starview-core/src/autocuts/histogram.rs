use ndarray::ArrayView3;

use crate::consts::{AUTOCUT_MAX_SAMPLES, DEFAULT_HISTOGRAM_PCT};

use super::{finite_samples, sort_samples, Autocuts};

/// Keep the central `pct` fraction of pixel values, clipping the rest
/// equally from both tails.
#[derive(Clone, Copy, Debug)]
pub struct Histogram {
    pub pct: f64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            pct: DEFAULT_HISTOGRAM_PCT,
        }
    }
}

impl Autocuts for Histogram {
    fn name(&self) -> &'static str {
        "histogram"
    }

    fn calc_cut_levels(&self, data: ArrayView3<'_, f32>) -> (f64, f64) {
        let mut samples = finite_samples(data, AUTOCUT_MAX_SAMPLES);
        if samples.is_empty() {
            return (0.0, 0.0);
        }
        sort_samples(&mut samples);

        let n = samples.len();
        let tail = (1.0 - self.pct.clamp(0.0, 1.0)) / 2.0;
        let lo_idx = ((n as f64 * tail) as usize).min(n - 1);
        let hi_idx = ((n as f64 * (1.0 - tail)) as usize).min(n - 1);
        (samples[lo_idx] as f64, samples[hi_idx] as f64)
    }
}
