use ndarray::ArrayView3;

use crate::consts::{ZSCALE_CONTRAST, ZSCALE_KREJ, ZSCALE_MAX_ITERATIONS, ZSCALE_MAX_SAMPLES};

use super::{finite_samples, sort_samples, Autocuts};

/// Minimum number of surviving samples for the line fit to be trusted.
const MIN_NPIXELS: usize = 5;

/// Maximum fraction of samples the fit may reject.
const MAX_REJECT: f64 = 0.5;

/// IRAF-style zscale: fit a line to the sorted sample values with iterative
/// sigma rejection and derive the range from its slope around the median.
#[derive(Clone, Copy, Debug)]
pub struct ZScale {
    pub contrast: f64,
    pub num_samples: usize,
    pub krej: f64,
    pub max_iterations: usize,
}

impl Default for ZScale {
    fn default() -> Self {
        Self {
            contrast: ZSCALE_CONTRAST,
            num_samples: ZSCALE_MAX_SAMPLES,
            krej: ZSCALE_KREJ,
            max_iterations: ZSCALE_MAX_ITERATIONS,
        }
    }
}

impl Autocuts for ZScale {
    fn name(&self) -> &'static str {
        "zscale"
    }

    fn calc_cut_levels(&self, data: ArrayView3<'_, f32>) -> (f64, f64) {
        let mut samples = finite_samples(data, self.num_samples);
        if samples.is_empty() {
            return (0.0, 0.0);
        }
        sort_samples(&mut samples);
        let samples: Vec<f64> = samples.into_iter().map(f64::from).collect();

        let npix = samples.len();
        let zmin = samples[0];
        let zmax = samples[npix - 1];
        let center = (npix - 1) / 2;
        let median = if npix % 2 == 1 {
            samples[center]
        } else {
            0.5 * (samples[center] + samples[center + 1])
        };

        let minpix = MIN_NPIXELS.max((npix as f64 * MAX_REJECT) as usize);
        let ngrow = 1.max((npix as f64 * 0.01) as usize);
        let (ngood, slope) = self.fit_line(&samples, minpix, ngrow);

        if ngood < minpix {
            return (zmin, zmax);
        }
        let slope = if self.contrast > 0.0 {
            slope / self.contrast
        } else {
            slope
        };
        let z1 = zmin.max(median - (center as f64 - 1.0) * slope);
        let z2 = zmax.min(median + (npix - center) as f64 * slope);
        (z1, z2)
    }
}

impl ZScale {
    /// Least-squares line through `(index, value)` with iterative rejection
    /// of points further than `krej` sigma from the fit; rejected points
    /// also reject `ngrow` neighbours. Returns the surviving count and the
    /// slope per sample index.
    fn fit_line(&self, samples: &[f64], minpix: usize, ngrow: usize) -> (usize, f64) {
        let npix = samples.len();
        if npix < 2 {
            return (npix, 0.0);
        }
        let xscale = 2.0 / (npix - 1) as f64;
        let xnorm: Vec<f64> = (0..npix).map(|i| i as f64 * xscale - 1.0).collect();

        let mut good = vec![true; npix];
        let mut ngood = npix;
        let mut slope = 0.0;

        for _ in 0..self.max_iterations {
            if ngood < minpix {
                break;
            }
            let (mut sx, mut sy, mut sxx, mut sxy, mut n) = (0.0, 0.0, 0.0, 0.0, 0.0);
            for i in (0..npix).filter(|&i| good[i]) {
                sx += xnorm[i];
                sy += samples[i];
                sxx += xnorm[i] * xnorm[i];
                sxy += xnorm[i] * samples[i];
                n += 1.0;
            }
            let denom = n * sxx - sx * sx;
            if denom.abs() < f64::EPSILON {
                break;
            }
            slope = (n * sxy - sx * sy) / denom;
            let intercept = (sy - slope * sx) / n;

            let residuals: Vec<f64> = (0..npix)
                .map(|i| samples[i] - (intercept + slope * xnorm[i]))
                .collect();
            let sigma = {
                let ss: f64 = (0..npix)
                    .filter(|&i| good[i])
                    .map(|i| residuals[i] * residuals[i])
                    .sum();
                (ss / n).sqrt()
            };
            let threshold = self.krej * sigma;

            let mut next = vec![true; npix];
            for i in 0..npix {
                if residuals[i].abs() > threshold {
                    let lo = i.saturating_sub(ngrow);
                    let hi = (i + ngrow).min(npix - 1);
                    next[lo..=hi].iter_mut().for_each(|g| *g = false);
                }
            }
            let next_good = next.iter().filter(|&&g| g).count();
            let converged = next == good;
            good = next;
            ngood = next_good;
            if converged {
                break;
            }
        }

        (ngood, slope * xscale)
    }
}
