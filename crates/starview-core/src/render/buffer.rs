use ndarray::{Array3, ArrayView3};
use tracing::debug;

use crate::pipeline::RgbObject;
use crate::rgbmap::PixelOrder;

use super::Renderer;

/// In-memory RGBA surface.
#[derive(Clone, Debug)]
pub struct BufferRenderer {
    surface: Array3<u8>,
    updates: u64,
}

impl Default for BufferRenderer {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl BufferRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let mut surface = Array3::<u8>::zeros((height, width, 4));
        surface.slice_mut(ndarray::s![.., .., 3]).fill(u8::MAX);
        Self {
            surface,
            updates: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.surface.dim().1
    }

    pub fn height(&self) -> usize {
        self.surface.dim().0
    }

    /// Number of times the surface was pushed with `update_image`.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// RGBA value at window pixel `(x, y)`, row 0 at the top.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let px = self.surface.slice(ndarray::s![y, x, ..]);
        Some([px[0], px[1], px[2], px[3]])
    }
}

impl Renderer for BufferRenderer {
    fn resize(&mut self, width: usize, height: usize) {
        if (width, height) != (self.width(), self.height()) {
            *self = Self {
                updates: self.updates,
                ..Self::new(width, height)
            };
        }
    }

    fn pixel_order(&self) -> PixelOrder {
        PixelOrder::Rgba
    }

    fn clear(&mut self, bg: [u8; 3]) {
        for mut px in self.surface.rows_mut() {
            px[0] = bg[0];
            px[1] = bg[1];
            px[2] = bg[2];
            px[3] = u8::MAX;
        }
    }

    fn render_image(&mut self, rgb: &RgbObject, dst_x: i64, dst_y: i64) {
        let (src_ht, src_wd, _) = rgb.rgb.dim();
        let (rgb_at, alpha_at) = rgb.order.offsets();
        let (wd, ht) = (self.width() as i64, self.height() as i64);

        // Overlap of the source rectangle with the surface, in window pixels.
        let x0 = dst_x.max(0);
        let y0 = dst_y.max(0);
        let x1 = (dst_x + src_wd as i64).min(wd);
        let y1 = (dst_y + src_ht as i64).min(ht);
        if x0 >= x1 || y0 >= y1 {
            debug!(dst_x, dst_y, "rgb object entirely off surface");
            return;
        }

        for y in y0..y1 {
            let sy = (y - dst_y) as usize;
            for x in x0..x1 {
                let sx = (x - dst_x) as usize;
                let alpha = alpha_at.map_or(u8::MAX, |a| rgb.rgb[[sy, sx, a]]);
                if alpha == 0 {
                    continue;
                }
                let a = alpha as u32;
                for (ch, at) in rgb_at.into_iter().enumerate() {
                    let src = rgb.rgb[[sy, sx, at]] as u32;
                    let dst = &mut self.surface[[y as usize, x as usize, ch]];
                    *dst = ((src * a + *dst as u32 * (255 - a) + 127) / 255) as u8;
                }
            }
        }
    }

    fn update_image(&mut self) {
        self.updates += 1;
    }

    fn get_surface(&self) -> ArrayView3<'_, u8> {
        self.surface.view()
    }
}
