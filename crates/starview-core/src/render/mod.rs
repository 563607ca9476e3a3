//! Backend renderers: the surface the RGB object is finally blitted onto.

mod buffer;

pub use buffer::BufferRenderer;

use ndarray::ArrayView3;

use crate::pipeline::RgbObject;
use crate::rgbmap::PixelOrder;

/// A drawing backend. Toolkit integrations implement this; the viewer only
/// ever talks to the trait.
pub trait Renderer: Send {
    /// Window size changed; the surface must be reallocated.
    fn resize(&mut self, width: usize, height: usize);

    /// Channel layout the backend wants RGB objects in.
    fn pixel_order(&self) -> PixelOrder;

    /// Fill the surface with the background colour.
    fn clear(&mut self, bg: [u8; 3]);

    /// Blit `rgb` with its top-left corner at window pixel `(dst_x, dst_y)`.
    fn render_image(&mut self, rgb: &RgbObject, dst_x: i64, dst_y: i64);

    /// Push the finished surface to the screen.
    fn update_image(&mut self) {}

    /// Current surface, shape `(height, width, channels)` in `pixel_order()`.
    fn get_surface(&self) -> ArrayView3<'_, u8>;
}
