#![allow(dead_code)]

use std::sync::Arc;

use ndarray::{Array2, Array3};

use starview_core::pipeline::{Cutout, DataRect};
use starview_core::{AstroImage, ImageViewer, ViewerConfig};

/// Mono image whose pixel `(x, y)` holds `y * width + x + 1`.
pub fn ramp_image(width: usize, height: usize) -> AstroImage {
    AstroImage::from_mono(Array2::from_shape_fn((height, width), |(y, x)| {
        (y * width + x) as f32 + 1.0
    }))
}

/// Configuration that redraws synchronously on every change.
pub fn immediate_config() -> ViewerConfig {
    ViewerConfig {
        defer_redraw: false,
        ..ViewerConfig::default()
    }
}

/// Viewer with the window set and a ramp image loaded under the default
/// auto policies.
pub fn viewer_with_image(width: usize, height: usize, win_wd: usize, win_ht: usize) -> ImageViewer {
    let mut viewer = ImageViewer::new(immediate_config()).expect("default config is valid");
    viewer.set_window_size(win_wd, win_ht);
    viewer.set_image(Arc::new(ramp_image(width, height)));
    viewer
}

/// Hand-built cutout with the anchor at `(anchor_x, anchor_y)`.
pub fn cutout_from(data: Array2<f32>, anchor_x: i64, anchor_y: i64) -> Cutout {
    let (h, w) = data.dim();
    let data: Array3<f32> = data.insert_axis(ndarray::Axis(2));
    Cutout {
        data,
        origin: DataRect {
            x1: 0,
            y1: 0,
            x2: w - 1,
            y2: h - 1,
        },
        scale_x: 1.0,
        scale_y: 1.0,
        anchor_x,
        anchor_y,
        squared: false,
    }
}

/// True when every surface pixel is a shade of gray (no background tint
/// showing through).
pub fn surface_is_gray(viewer: &ImageViewer) -> bool {
    viewer
        .surface()
        .rows()
        .into_iter()
        .all(|px| px[0] == px[1] && px[1] == px[2])
}
