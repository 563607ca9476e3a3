use ndarray::{Array2, ArrayView3, Axis};

use crate::consts::MEDIAN_FILTER_SIZE;

use super::{finite_min_max, Autocuts};

/// Min/max of a median-filtered copy of the first channel, so isolated hot
/// pixels do not stretch the range.
#[derive(Clone, Copy, Debug, Default)]
pub struct Median;

impl Autocuts for Median {
    fn name(&self) -> &'static str {
        "median"
    }

    fn calc_cut_levels(&self, data: ArrayView3<'_, f32>) -> (f64, f64) {
        let plane = data.index_axis(Axis(2), 0);
        let (h, w) = plane.dim();
        let radius = (MEDIAN_FILTER_SIZE / 2) as i64;
        let mut filtered = Array2::<f32>::from_elem((h, w), f32::NAN);
        let mut window = Vec::with_capacity(MEDIAN_FILTER_SIZE * MEDIAN_FILTER_SIZE);

        for row in 0..h {
            for col in 0..w {
                window.clear();
                for dy in -radius..=radius {
                    for dx in -radius..=radius {
                        let r = row as i64 + dy;
                        let c = col as i64 + dx;
                        if r < 0 || c < 0 || r >= h as i64 || c >= w as i64 {
                            continue;
                        }
                        let v = plane[[r as usize, c as usize]];
                        if v.is_finite() {
                            window.push(v);
                        }
                    }
                }
                if !window.is_empty() {
                    window.sort_by(|a, b| a.total_cmp(b));
                    filtered[[row, col]] = window[window.len() / 2];
                }
            }
        }

        finite_min_max(filtered.insert_axis(Axis(2)).view()).unwrap_or((0.0, 0.0))
    }
}
