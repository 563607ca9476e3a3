use std::sync::Arc;

use ndarray::{Array2, Array3};

use crate::rgbmap::PixelOrder;

/// Inclusive data-pixel box `[x1, x2] × [y1, y2]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataRect {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl DataRect {
    pub fn width(&self) -> usize {
        self.x2 - self.x1 + 1
    }

    pub fn height(&self) -> usize {
        self.y2 - self.y1 + 1
    }
}

/// Output of the cutout stage.
#[derive(Clone, Debug)]
pub struct Cutout {
    /// Shape `(height, width, channels)`; row 0 is the lowest data row.
    /// Padding around a square cutout is NaN.
    pub data: Array3<f32>,
    /// Data box the cutout was taken from.
    pub origin: DataRect,
    /// Scale actually achieved by the image buffer.
    pub scale_x: f64,
    pub scale_y: f64,
    /// Position of the pan anchor inside `data`, in array pixels.
    pub anchor_x: i64,
    pub anchor_y: i64,
    /// Whether `data` is the rotation-ready square.
    pub squared: bool,
}

/// Output of the transform stage: the oriented array and where its
/// top-left corner lands in the window.
#[derive(Clone, Debug)]
pub struct Transformed {
    pub data: Array3<f32>,
    pub dst_x: i64,
    pub dst_y: i64,
}

/// Output of the visual stage: colour-table indices in display orientation.
#[derive(Clone, Debug)]
pub struct IndexArray {
    /// Shape `(height, width, channels)`, every value `<= vmax`.
    pub index: Array3<u32>,
    /// False where the source had no data (NaN padding).
    pub valid: Array2<bool>,
    pub vmax: u32,
    pub dst_x: i64,
    pub dst_y: i64,
}

/// Final mapped array handed to the renderer.
#[derive(Clone, Debug)]
pub struct RgbObject {
    /// Shape `(height, width, order.channels())`.
    pub rgb: Arc<Array3<u8>>,
    pub order: PixelOrder,
    pub dst_x: i64,
    pub dst_y: i64,
}

impl RgbObject {
    pub fn width(&self) -> usize {
        self.rgb.dim().1
    }

    pub fn height(&self) -> usize {
        self.rgb.dim().0
    }
}

/// Number of times each stage has executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageCounters {
    pub cutout: u64,
    pub transform: u64,
    pub visual: u64,
    pub color: u64,
    pub blit: u64,
}
