use ndarray::{Array2, Array3, ArrayView3, Axis};

use crate::config::Interpolation;
use crate::error::{Result, ViewerError};

use super::sample::scaled_cutout;
use super::{ImageSource, ScaledCutout};

/// In-memory image: mono (1 channel) or colour (3/4 channels) `f32` data.
/// Row 0 is data `y = 0`.
#[derive(Clone, Debug)]
pub struct AstroImage {
    /// Shape `(height, width, channels)`.
    data: Array3<f32>,
    name: Option<String>,
}

impl AstroImage {
    pub fn from_mono(data: Array2<f32>) -> Self {
        Self {
            data: data.insert_axis(Axis(2)),
            name: None,
        }
    }

    /// Build from a `(height, width, channels)` array.
    pub fn from_channels(data: Array3<f32>) -> Result<Self> {
        let (h, w, c) = data.dim();
        if h == 0 || w == 0 || c == 0 {
            return Err(ViewerError::InvalidImage(format!(
                "empty image shape {h}x{w}x{c}"
            )));
        }
        Ok(Self { data, name: None })
    }

    /// A zero-filled mono image.
    pub fn blank(width: usize, height: usize) -> Self {
        Self::from_mono(Array2::zeros((height.max(1), width.max(1))))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }
}

impl ImageSource for AstroImage {
    fn size(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    fn channels(&self) -> usize {
        self.data.dim().2
    }

    fn scaled_cutout(
        &self,
        x1: usize,
        y1: usize,
        x2: usize,
        y2: usize,
        scale_x: f64,
        scale_y: f64,
        interpolation: Interpolation,
    ) -> Result<ScaledCutout> {
        let (w, h) = self.size();
        if x1 > x2 || y1 > y2 || x2 >= w || y2 >= h {
            return Err(ViewerError::Transform(format!(
                "cutout box ({x1}, {y1})-({x2}, {y2}) outside {w}x{h} image"
            )));
        }
        if !(scale_x > 0.0 && scale_y > 0.0) {
            return Err(ViewerError::Transform(format!(
                "non-positive cutout scale ({scale_x}, {scale_y})"
            )));
        }
        Ok(scaled_cutout(
            self.data.view(),
            (x1, y1, x2, y2),
            (scale_x, scale_y),
            interpolation,
        ))
    }

    fn data_xy(&self, x: i64, y: i64) -> Option<f32> {
        let (w, h) = self.size();
        if x < 0 || y < 0 || x as usize >= w || y as usize >= h {
            return None;
        }
        Some(self.data[[y as usize, x as usize, 0]])
    }

    fn pixels(&self) -> ArrayView3<'_, f32> {
        self.data.view()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
