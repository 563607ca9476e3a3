//! Source image buffers and the scaled-cutout operation the pipeline
//! requests from them.

mod astro;
pub mod sample;

pub use astro::AstroImage;

use std::fmt::Debug;

use ndarray::{Array3, ArrayView3};

use crate::config::Interpolation;
use crate::error::Result;

/// A scaled sub-region of an image, with the scale actually achieved.
///
/// The achieved scale can differ slightly from the requested one because
/// the output must have a whole number of pixels. Downstream stages must
/// use these values, not the requested scale.
#[derive(Clone, Debug)]
pub struct ScaledCutout {
    /// Shape `(height, width, channels)`.
    pub data: Array3<f32>,
    pub scale_x: f64,
    pub scale_y: f64,
}

/// Image collaborator consumed by the viewer.
///
/// Implementors are immutable per version: the viewer holds them behind an
/// `Arc` and swaps the whole buffer on `set_image`.
pub trait ImageSource: Send + Sync + Debug {
    /// `(width, height)` in data pixels.
    fn size(&self) -> (usize, usize);

    fn channels(&self) -> usize;

    /// Cut out the inclusive box `[x1, x2] × [y1, y2]` and resample it by
    /// `(scale_x, scale_y)`.
    fn scaled_cutout(
        &self,
        x1: usize,
        y1: usize,
        x2: usize,
        y2: usize,
        scale_x: f64,
        scale_y: f64,
        interpolation: Interpolation,
    ) -> Result<ScaledCutout>;

    /// Value of the first channel at integer data pixel `(x, y)`, if inside.
    fn data_xy(&self, x: i64, y: i64) -> Option<f32>;

    /// Full pixel array, shape `(height, width, channels)`.
    fn pixels(&self) -> ArrayView3<'_, f32>;

    fn name(&self) -> Option<&str> {
        None
    }
}
