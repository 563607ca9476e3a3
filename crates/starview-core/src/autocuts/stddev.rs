use ndarray::ArrayView3;

use crate::consts::{AUTOCUT_MAX_SAMPLES, DEFAULT_STDDEV_HI_SIGMA, DEFAULT_STDDEV_LO_SIGMA};

use super::{finite_samples, Autocuts};

/// `mean - lo_sigma·σ` to `mean + hi_sigma·σ`, clipped to the data range.
#[derive(Clone, Copy, Debug)]
pub struct StdDev {
    pub lo_sigma: f64,
    pub hi_sigma: f64,
}

impl Default for StdDev {
    fn default() -> Self {
        Self {
            lo_sigma: DEFAULT_STDDEV_LO_SIGMA,
            hi_sigma: DEFAULT_STDDEV_HI_SIGMA,
        }
    }
}

impl Autocuts for StdDev {
    fn name(&self) -> &'static str {
        "stddev"
    }

    fn calc_cut_levels(&self, data: ArrayView3<'_, f32>) -> (f64, f64) {
        let samples = finite_samples(data, AUTOCUT_MAX_SAMPLES);
        if samples.is_empty() {
            return (0.0, 0.0);
        }
        let n = samples.len() as f64;
        let mean = samples.iter().map(|&v| v as f64).sum::<f64>() / n;
        let var = samples
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        let std = var.sqrt();

        let (min, max) = samples.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v as f64), hi.max(v as f64))
        });
        let lo = (mean - self.lo_sigma * std).max(min);
        let hi = (mean + self.hi_sigma * std).min(max);
        (lo, hi)
    }
}
