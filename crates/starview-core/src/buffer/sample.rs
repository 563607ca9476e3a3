use ndarray::{Array3, ArrayView3};

use crate::config::Interpolation;
use crate::parallel::for_each_row;

use super::ScaledCutout;

/// Output length and achieved scale for resampling `len` source pixels by
/// `scale`. The output always has at least one pixel.
pub fn scaled_len(len: usize, scale: f64) -> (usize, f64) {
    let out = ((scale * len as f64).round() as usize).max(1);
    (out, out as f64 / len as f64)
}

/// Resample the inclusive box `(x1, y1, x2, y2)` of `data` by `scale`.
///
/// Output pixel `k` takes its value from the source position of its centre,
/// `x1 + (k + 0.5) / achieved_scale`, so pixel edges line up with the
/// continuous data coordinates used by the coordinate transformer.
pub fn scaled_cutout(
    data: ArrayView3<'_, f32>,
    (x1, y1, x2, y2): (usize, usize, usize, usize),
    (scale_x, scale_y): (f64, f64),
    interpolation: Interpolation,
) -> ScaledCutout {
    let (_, _, channels) = data.dim();
    let (new_wd, actual_sx) = scaled_len(x2 - x1 + 1, scale_x);
    let (new_ht, actual_sy) = scaled_len(y2 - y1 + 1, scale_y);

    let xs: Vec<f64> = (0..new_wd)
        .map(|k| x1 as f64 + (k as f64 + 0.5) / actual_sx)
        .collect();
    let ys: Vec<f64> = (0..new_ht)
        .map(|k| y1 as f64 + (k as f64 + 0.5) / actual_sy)
        .collect();

    let mut out = Array3::<f32>::zeros((new_ht, new_wd, channels));
    match interpolation {
        Interpolation::Nearest => {
            let xi: Vec<usize> = xs.iter().map(|&x| (x.floor() as usize).min(x2)).collect();
            for_each_row(&mut out, |row, mut lane| {
                let src_y = (ys[row].floor() as usize).min(y2);
                for (col, &src_x) in xi.iter().enumerate() {
                    for ch in 0..channels {
                        lane[[col, ch]] = data[[src_y, src_x, ch]];
                    }
                }
            });
        }
        Interpolation::Bilinear => {
            let bounds = (x1, y1, x2, y2);
            for_each_row(&mut out, |row, mut lane| {
                for (col, &x) in xs.iter().enumerate() {
                    for ch in 0..channels {
                        lane[[col, ch]] = bilinear_sample(&data, bounds, ch, ys[row] - 0.5, x - 0.5);
                    }
                }
            });
        }
    }

    ScaledCutout {
        data: out,
        scale_x: actual_sx,
        scale_y: actual_sy,
    }
}

/// Bilinear sample at pixel-index coordinates `(y, x)`, clamping the four
/// neighbours to the inclusive box so the cutout never reads past its edge.
pub fn bilinear_sample(
    data: &ArrayView3<'_, f32>,
    (x1, y1, x2, y2): (usize, usize, usize, usize),
    ch: usize,
    y: f64,
    x: f64,
) -> f32 {
    let x = x.clamp(x1 as f64, x2 as f64);
    let y = y.clamp(y1 as f64, y2 as f64);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let xn = (x0 + 1).min(x2);
    let yn = (y0 + 1).min(y2);

    let fx = (x - x0 as f64) as f32;
    let fy = (y - y0 as f64) as f32;

    let v00 = data[[y0, x0, ch]];
    let v10 = data[[y0, xn, ch]];
    let v01 = data[[yn, x0, ch]];
    let v11 = data[[yn, xn, ch]];

    v00 * (1.0 - fx) * (1.0 - fy) + v10 * fx * (1.0 - fy) + v01 * (1.0 - fx) * fy + v11 * fx * fy
}
