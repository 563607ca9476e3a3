//! Window pixel <-> data pixel mapping.
//!
//! Data space has Y growing upward and continuous coordinates where pixel
//! `i` spans `[i, i + 1)`. Window space has its origin at the top-left
//! corner when `origin_upper` is set (most toolkits), bottom-left otherwise.
//!
//! Forward mapping, applied to the offset from the pan anchor:
//! scale, flip X/Y, swap X/Y, rotate, then add the window centre. The array
//! pipeline applies flips and swap in the same order, so a rendered pixel
//! and its computed window position always agree.

use crate::consts::DATA_CENTER_OFFSET;
use crate::error::{Result, ViewerError};

/// Geometric view parameters needed to map between window and data space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewGeometry {
    /// Data coordinate shown at the window centre.
    pub pan: (f64, f64),
    pub scale: (f64, f64),
    pub rot_deg: f64,
    pub flip_x: bool,
    pub flip_y: bool,
    pub swap_xy: bool,
    pub origin_upper: bool,
}

impl Default for ViewGeometry {
    fn default() -> Self {
        Self {
            pan: (0.0, 0.0),
            scale: (1.0, 1.0),
            rot_deg: 0.0,
            flip_x: false,
            flip_y: false,
            swap_xy: false,
            origin_upper: true,
        }
    }
}

/// Rotate a point about the origin by `deg` degrees (counter-clockwise with
/// Y up).
pub fn rotate_pt(x: f64, y: f64, deg: f64) -> (f64, f64) {
    if deg == 0.0 {
        return (x, y);
    }
    let (sin, cos) = deg.to_radians().sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

/// Integer centre pixel of a window, `(width / 2, height / 2)`.
pub fn window_center(width: usize, height: usize) -> (i64, i64) {
    ((width / 2) as i64, (height / 2) as i64)
}

/// Stateless transformer built from a geometry snapshot and window size.
#[derive(Clone, Copy, Debug)]
pub struct CoordTransformer {
    geometry: ViewGeometry,
    window: Option<(usize, usize)>,
}

impl CoordTransformer {
    pub fn new(geometry: ViewGeometry, window: Option<(usize, usize)>) -> Self {
        Self { geometry, window }
    }

    pub fn geometry(&self) -> &ViewGeometry {
        &self.geometry
    }

    /// Same transformer with a different scale.
    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.geometry.scale = (scale_x, scale_y);
        self
    }

    pub fn window_size(&self) -> Result<(usize, usize)> {
        self.window.ok_or(ViewerError::DimensionsUnknown)
    }

    pub fn center(&self) -> Result<(f64, f64)> {
        let (wd, ht) = self.window_size()?;
        let (cx, cy) = window_center(wd, ht);
        Ok((cx as f64, cy as f64))
    }

    /// Map a data coordinate to a (fractional) window coordinate.
    ///
    /// With `center`, `(x, y)` names a pixel whose centre sits at `x + 0.5`.
    pub fn data_to_window(&self, data_x: f64, data_y: f64, center: bool) -> Result<(f64, f64)> {
        let (ctr_x, ctr_y) = self.center()?;
        let g = &self.geometry;
        let (data_x, data_y) = if center {
            (data_x + DATA_CENTER_OFFSET, data_y + DATA_CENTER_OFFSET)
        } else {
            (data_x, data_y)
        };

        let mut off_x = (data_x - g.pan.0) * g.scale.0;
        let mut off_y = (data_y - g.pan.1) * g.scale.1;
        if g.flip_x {
            off_x = -off_x;
        }
        if g.flip_y {
            off_y = -off_y;
        }
        if g.swap_xy {
            std::mem::swap(&mut off_x, &mut off_y);
        }
        let (off_x, off_y) = rotate_pt(off_x, off_y, g.rot_deg);

        let win_x = ctr_x + off_x;
        let win_y = if g.origin_upper {
            ctr_y - off_y
        } else {
            ctr_y + off_y
        };
        Ok((win_x, win_y))
    }

    /// [`data_to_window`](Self::data_to_window) rounded to whole pixels.
    pub fn data_to_window_px(&self, data_x: f64, data_y: f64, center: bool) -> Result<(i64, i64)> {
        let (x, y) = self.data_to_window(data_x, data_y, center)?;
        Ok((x.round() as i64, y.round() as i64))
    }

    /// Exact inverse of [`data_to_window`](Self::data_to_window).
    pub fn window_to_data(&self, win_x: f64, win_y: f64, center: bool) -> Result<(f64, f64)> {
        let (ctr_x, ctr_y) = self.center()?;
        let g = &self.geometry;

        let off_x = win_x - ctr_x;
        let off_y = if g.origin_upper {
            ctr_y - win_y
        } else {
            win_y - ctr_y
        };
        let (mut off_x, mut off_y) = rotate_pt(off_x, off_y, -g.rot_deg);
        if g.swap_xy {
            std::mem::swap(&mut off_x, &mut off_y);
        }
        if g.flip_x {
            off_x = -off_x;
        }
        if g.flip_y {
            off_y = -off_y;
        }

        let mut data_x = off_x / g.scale.0 + g.pan.0;
        let mut data_y = off_y / g.scale.1 + g.pan.1;
        if center {
            data_x -= DATA_CENTER_OFFSET;
            data_y -= DATA_CENTER_OFFSET;
        }
        Ok((data_x, data_y))
    }

    /// Data coordinates of the four window corners, clockwise from the
    /// top-left (window space).
    pub fn window_corners_to_data(&self) -> Result<[(f64, f64); 4]> {
        let (wd, ht) = self.window_size()?;
        let (wd, ht) = (wd as f64, ht as f64);
        Ok([
            self.window_to_data(0.0, 0.0, false)?,
            self.window_to_data(wd, 0.0, false)?,
            self.window_to_data(wd, ht, false)?,
            self.window_to_data(0.0, ht, false)?,
        ])
    }
}
