use crate::config::ZoomAlgorithm;
use crate::consts::EPSILON;

/// Scale factor for a zoom level.
///
/// Step: level >= 1 magnifies by `level`, level <= -2 shrinks by `1/|level|`,
/// anything in between is 1:1. Rate: `rate ^ level`.
pub fn scale_for_level(level: f64, algorithm: ZoomAlgorithm, rate: f64) -> f64 {
    match algorithm {
        ZoomAlgorithm::Rate => rate.powf(level),
        ZoomAlgorithm::Step => {
            if level >= 1.0 {
                level
            } else if level < -1.0 {
                1.0 / level.abs()
            } else {
                1.0
            }
        }
    }
}

/// Zoom level for a scale factor; inverse of [`scale_for_level`] on its range.
pub fn level_for_scale(scale: f64, algorithm: ZoomAlgorithm, rate: f64) -> f64 {
    match algorithm {
        ZoomAlgorithm::Rate => scale.ln() / rate.ln(),
        ZoomAlgorithm::Step => {
            if scale >= 1.0 {
                scale
            } else {
                -1.0 / scale
            }
        }
    }
}

/// Next level when zooming in.
pub fn zoom_in_level(level: f64, algorithm: ZoomAlgorithm) -> f64 {
    match algorithm {
        ZoomAlgorithm::Rate => level + 1.0,
        ZoomAlgorithm::Step => {
            let zl = level.trunc();
            // -2 (half size) steps straight to 1:1; -1..1 are all 1:1
            if zl >= 1.0 || zl <= -3.0 {
                zl + 1.0
            } else {
                1.0
            }
        }
    }
}

/// Next level when zooming out.
pub fn zoom_out_level(level: f64, algorithm: ZoomAlgorithm) -> f64 {
    match algorithm {
        ZoomAlgorithm::Rate => level - 1.0,
        ZoomAlgorithm::Step => {
            let zl = level.trunc();
            if zl >= 2.0 || zl <= -2.0 {
                zl - 1.0
            } else {
                -2.0
            }
        }
    }
}

/// Largest uniform scale at which the whole image, after swap and
/// rotation, fits inside the window.
pub fn fit_scale(
    image: (usize, usize),
    window: (usize, usize),
    rot_deg: f64,
    swap_xy: bool,
) -> f64 {
    let (mut wd, mut ht) = (image.0.max(1) as f64, image.1.max(1) as f64);
    if swap_xy {
        std::mem::swap(&mut wd, &mut ht);
    }
    let (sin, cos) = rot_deg.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let rot_wd = wd * cos + ht * sin;
    let rot_ht = wd * sin + ht * cos;

    let fit_x = window.0.max(1) as f64 / rot_wd;
    let fit_y = window.1.max(1) as f64 / rot_ht;
    fit_x.min(fit_y)
}

/// Snap a fitted scale to a zoom level that does not exceed it.
pub fn fit_level(scale: f64, algorithm: ZoomAlgorithm, rate: f64) -> f64 {
    match algorithm {
        ZoomAlgorithm::Rate => (scale.ln() / rate.ln() + EPSILON).floor(),
        ZoomAlgorithm::Step => {
            if scale < 1.0 {
                -(1.0 / scale).ceil().max(2.0)
            } else {
                scale.floor().max(1.0)
            }
        }
    }
}
