use std::sync::Arc;

use ndarray::Array3;

use starview_core::pipeline::RgbObject;
use starview_core::render::{BufferRenderer, Renderer};
use starview_core::rgbmap::PixelOrder;

fn solid(width: usize, height: usize, px: &[u8], order: PixelOrder) -> RgbObject {
    let channels = order.channels();
    let data = Array3::from_shape_fn((height, width, channels), |(_, _, c)| px[c]);
    RgbObject {
        rgb: Arc::new(data),
        order,
        dst_x: 0,
        dst_y: 0,
    }
}

#[test]
fn test_new_surface_is_opaque_black() {
    let renderer = BufferRenderer::new(4, 3);
    assert_eq!(renderer.get_surface().dim(), (3, 4, 4));
    assert_eq!(renderer.pixel(3, 2), Some([0, 0, 0, 255]));
    assert_eq!(renderer.pixel(4, 0), None);
}

#[test]
fn test_clear_fills_background() {
    let mut renderer = BufferRenderer::new(2, 2);
    renderer.clear([10, 20, 30]);
    assert_eq!(renderer.pixel(1, 1), Some([10, 20, 30, 255]));
}

#[test]
fn test_resize_reallocates() {
    let mut renderer = BufferRenderer::new(2, 2);
    renderer.resize(5, 1);
    assert_eq!((renderer.width(), renderer.height()), (5, 1));
}

#[test]
fn test_blit_clips_negative_offset() {
    let mut renderer = BufferRenderer::new(4, 4);
    let rgb = solid(3, 3, &[200, 100, 50, 255], PixelOrder::Rgba);
    renderer.render_image(&rgb, -1, -1);
    assert_eq!(renderer.pixel(0, 0), Some([200, 100, 50, 255]));
    assert_eq!(renderer.pixel(1, 1), Some([200, 100, 50, 255]));
    assert_eq!(renderer.pixel(2, 2), Some([0, 0, 0, 255]));
}

#[test]
fn test_blit_off_surface_is_noop() {
    let mut renderer = BufferRenderer::new(4, 4);
    let rgb = solid(3, 3, &[200, 100, 50, 255], PixelOrder::Rgba);
    renderer.render_image(&rgb, 10, 0);
    renderer.render_image(&rgb, 0, -3);
    assert!(renderer.get_surface().iter().step_by(4).all(|&v| v == 0));
}

#[test]
fn test_transparent_pixels_keep_background() {
    let mut renderer = BufferRenderer::new(2, 1);
    renderer.clear([255, 0, 0]);
    let rgb = solid(2, 1, &[0, 0, 0, 0], PixelOrder::Rgba);
    renderer.render_image(&rgb, 0, 0);
    assert_eq!(renderer.pixel(0, 0), Some([255, 0, 0, 255]));
}

#[test]
fn test_bgra_source_converted() {
    let mut renderer = BufferRenderer::new(1, 1);
    let rgb = solid(1, 1, &[1, 2, 3, 255], PixelOrder::Bgra);
    renderer.render_image(&rgb, 0, 0);
    assert_eq!(renderer.pixel(0, 0), Some([3, 2, 1, 255]));
}

#[test]
fn test_rgb_source_is_opaque() {
    let mut renderer = BufferRenderer::new(1, 1);
    renderer.clear([9, 9, 9]);
    let rgb = solid(1, 1, &[7, 8, 9], PixelOrder::Rgb);
    renderer.render_image(&rgb, 0, 0);
    assert_eq!(renderer.pixel(0, 0), Some([7, 8, 9, 255]));
}

#[test]
fn test_update_counts() {
    let mut renderer = BufferRenderer::new(1, 1);
    renderer.update_image();
    renderer.update_image();
    assert_eq!(renderer.updates(), 2);
}
