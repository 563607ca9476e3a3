use ndarray::parallel::prelude::*;
use ndarray::{Array3, ArrayViewMut2, Axis};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Fill `out` row by row, in parallel once the image is large enough to be
/// worth splitting. The closure receives the row index and that row as a
/// `(width, channels)` view.
pub(crate) fn for_each_row<T, F>(out: &mut Array3<T>, fill_row: F)
where
    T: Send + Sync,
    F: Fn(usize, ArrayViewMut2<'_, T>) + Sync + Send,
{
    let (h, w, _) = out.dim();
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        out.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, lane)| fill_row(row, lane));
    } else {
        for (row, lane) in out.axis_iter_mut(Axis(0)).enumerate() {
            fill_row(row, lane);
        }
    }
}
