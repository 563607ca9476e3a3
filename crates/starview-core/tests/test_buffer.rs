use approx::assert_abs_diff_eq;
use ndarray::{array, Array3, Axis};

use starview_core::buffer::sample::scaled_len;
use starview_core::config::Interpolation;
use starview_core::{AstroImage, ImageSource, ViewerError};

fn two_by_two() -> AstroImage {
    AstroImage::from_mono(array![[1.0f32, 2.0], [3.0, 4.0]])
}

#[test]
fn test_size_and_channels() {
    let image = AstroImage::blank(7, 3).with_name("dark");
    assert_eq!(image.size(), (7, 3));
    assert_eq!(image.channels(), 1);
    assert_eq!(image.name(), Some("dark"));
}

#[test]
fn test_from_channels_rejects_empty() {
    let empty = Array3::<f32>::zeros((0, 4, 1));
    assert!(matches!(
        AstroImage::from_channels(empty),
        Err(ViewerError::InvalidImage(_))
    ));
}

#[test]
fn test_data_xy_bounds() {
    let image = two_by_two();
    assert_eq!(image.data_xy(1, 0), Some(2.0));
    assert_eq!(image.data_xy(0, 1), Some(3.0));
    assert_eq!(image.data_xy(-1, 0), None);
    assert_eq!(image.data_xy(2, 0), None);
}

#[test]
fn test_scaled_len_reports_achieved_scale() {
    assert_eq!(scaled_len(100, 2.0), (200, 2.0));
    let (n, actual) = scaled_len(3, 1.5);
    assert_eq!(n, 5);
    assert_abs_diff_eq!(actual, 5.0 / 3.0, epsilon = 1e-12);
    assert_eq!(scaled_len(10, 0.01).0, 1);
}

#[test]
fn test_nearest_upsample_duplicates_pixels() {
    let cut = two_by_two()
        .scaled_cutout(0, 0, 1, 1, 2.0, 2.0, Interpolation::Nearest)
        .unwrap();
    let plane = cut.data.index_axis(Axis(2), 0).to_owned();
    assert_eq!(
        plane,
        array![
            [1.0f32, 1.0, 2.0, 2.0],
            [1.0, 1.0, 2.0, 2.0],
            [3.0, 3.0, 4.0, 4.0],
            [3.0, 3.0, 4.0, 4.0]
        ]
    );
}

#[test]
fn test_nearest_downsample_samples_centres() {
    let image = AstroImage::from_mono(ndarray::Array2::from_shape_fn((4, 4), |(y, x)| {
        (y * 4 + x) as f32
    }));
    let cut = image
        .scaled_cutout(0, 0, 3, 3, 0.5, 0.5, Interpolation::Nearest)
        .unwrap();
    assert_eq!(cut.data.dim(), (2, 2, 1));
    assert_eq!(cut.data[[0, 0, 0]], 5.0);
    assert_eq!(cut.data[[1, 1, 0]], 15.0);
}

#[test]
fn test_sub_box_cutout() {
    let image = AstroImage::from_mono(ndarray::Array2::from_shape_fn((4, 4), |(y, x)| {
        (y * 4 + x) as f32
    }));
    let cut = image
        .scaled_cutout(1, 2, 2, 3, 1.0, 1.0, Interpolation::Nearest)
        .unwrap();
    assert_eq!(cut.data.index_axis(Axis(2), 0), array![[9.0f32, 10.0], [13.0, 14.0]]);
}

#[test]
fn test_bilinear_constant_stays_constant() {
    let image = AstroImage::from_mono(ndarray::Array2::from_elem((5, 5), 3.5));
    let cut = image
        .scaled_cutout(0, 0, 4, 4, 1.7, 2.3, Interpolation::Bilinear)
        .unwrap();
    assert!(cut.data.iter().all(|&v| (v - 3.5).abs() < 1e-6));
}

#[test]
fn test_bilinear_interpolates_between_pixels() {
    let image = AstroImage::from_mono(array![[0.0f32, 10.0]]);
    let cut = image
        .scaled_cutout(0, 0, 1, 0, 2.0, 1.0, Interpolation::Bilinear)
        .unwrap();
    let row: Vec<f32> = cut.data.iter().copied().collect();
    assert_eq!(row.len(), 4);
    assert!(row.windows(2).all(|w| w[0] <= w[1]));
    assert_abs_diff_eq!(row[1], 2.5, epsilon = 1e-6);
}

#[test]
fn test_cutout_box_outside_image_is_error() {
    let image = two_by_two();
    assert!(matches!(
        image.scaled_cutout(0, 0, 2, 1, 1.0, 1.0, Interpolation::Nearest),
        Err(ViewerError::Transform(_))
    ));
    assert!(matches!(
        image.scaled_cutout(0, 0, 1, 1, 0.0, 1.0, Interpolation::Nearest),
        Err(ViewerError::Transform(_))
    ));
}
