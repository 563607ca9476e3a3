//! Raster file I/O. The core is format-agnostic; loading and saving happen
//! here with the `image` crate.

use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use ndarray::{s, Array2, Array3, ArrayView3};
use starview_core::AstroImage;

/// Load a raster image as `f32` data with Y growing upward.
///
/// Greyscale files become one channel, anything with colour three. Values
/// keep their 16-bit range so cut levels are in file units.
pub fn load_image(path: &Path) -> Result<AstroImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open image {}", path.display()))?;
    let (width, height) = (img.width() as usize, img.height() as usize);

    let data: Array3<f32> = if img.color().has_color() {
        let raw: Vec<f32> = img.to_rgb16().into_raw().into_iter().map(f32::from).collect();
        Array3::from_shape_vec((height, width, 3), raw)?
    } else {
        let raw: Vec<f32> = img.to_luma16().into_raw().into_iter().map(f32::from).collect();
        Array2::from_shape_vec((height, width), raw)?.insert_axis(ndarray::Axis(2))
    };

    // File row 0 is the top; data row 0 is the bottom.
    let data = data.slice(s![..;-1, .., ..]).to_owned();
    let image = AstroImage::from_channels(data)?;
    Ok(match path.file_stem() {
        Some(stem) => image.with_name(stem.to_string_lossy()),
        None => image,
    })
}

/// Save an RGBA surface of shape `(height, width, 4)`. The format follows
/// the file extension, PNG when it has none we know.
pub fn save_surface(surface: ArrayView3<'_, u8>, path: &Path) -> Result<()> {
    let (height, width, channels) = surface.dim();
    anyhow::ensure!(channels == 4, "expected an RGBA surface, got {channels} channels");
    let raw: Vec<u8> = surface.iter().copied().collect();
    let img = RgbaImage::from_raw(width as u32, height as u32, raw)
        .context("Surface size does not match its buffer")?;
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    img.save_with_format(path, format)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};
    use starview_core::ImageSource;

    #[test]
    fn test_gray_png_loads_bottom_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.png");
        let img = GrayImage::from_fn(4, 3, |x, y| Luma([(y * 4 + x) as u8]));
        img.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.size(), (4, 3));
        assert_eq!(loaded.channels(), 1);
        assert_eq!(loaded.name(), Some("ramp"));
        // Top-left file pixel is the last data row; 8-bit values widen to 16 bits.
        assert_eq!(loaded.data_xy(0, 2), Some(0.0));
        assert_eq!(loaded.data_xy(3, 0), Some(11.0 * 257.0));
    }

    #[test]
    fn test_color_png_has_three_channels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("color.png");
        RgbImage::from_pixel(2, 2, Rgb([255, 0, 0])).save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.channels(), 3);
        assert_eq!(loaded.pixels()[[0, 0, 0]], 65535.0);
        assert_eq!(loaded.pixels()[[0, 0, 1]], 0.0);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_image(Path::new("/nonexistent/none.png")).unwrap_err();
        assert!(format!("{err:#}").contains("none.png"));
    }

    #[test]
    fn test_surface_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut surface = Array3::<u8>::zeros((2, 3, 4));
        surface[[0, 2, 0]] = 200;
        surface.slice_mut(s![.., .., 3]).fill(255);

        save_surface(surface.view(), &path).unwrap();
        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back.dimensions(), (3, 2));
        assert_eq!(back.get_pixel(2, 0).0, [200, 0, 0, 255]);
    }

    #[test]
    fn test_surface_needs_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let surface = Array3::<u8>::zeros((2, 2, 3));
        assert!(save_surface(surface.view(), &dir.path().join("x.png")).is_err());
    }
}
