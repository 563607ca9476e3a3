use ndarray::{Array2, Array3};

use starview_core::pipeline::IndexArray;
use starview_core::rgbmap::{ColorDistribution, ColorMap, IntensityMap, PixelOrder, RgbMapper};
use starview_core::ViewerError;

fn index_array(values: Vec<u32>, channels: usize, valid: Vec<bool>) -> IndexArray {
    let n = valid.len();
    IndexArray {
        index: Array3::from_shape_vec((1, n, channels), values).unwrap(),
        valid: Array2::from_shape_vec((1, n), valid).unwrap(),
        vmax: 255,
        dst_x: 0,
        dst_y: 0,
    }
}

// ---------------------------------------------------------------------------
// Lookup table
// ---------------------------------------------------------------------------

#[test]
fn test_default_gray_table_endpoints() {
    let mapper = RgbMapper::new(256);
    assert_eq!(mapper.vmax(), 255);
    assert_eq!(mapper.lookup(0), [0, 0, 0]);
    assert_eq!(mapper.lookup(128), [128, 128, 128]);
    assert_eq!(mapper.lookup(255), [255, 255, 255]);
    assert_eq!(mapper.lookup(9999), [255, 255, 255]);
}

#[test]
fn test_neg_intensity_map_inverts() {
    let mapper = RgbMapper::from_names(256, "gray", "neg", "linear").unwrap();
    assert_eq!(mapper.lookup(0), [255, 255, 255]);
    assert_eq!(mapper.lookup(255), [0, 0, 0]);
}

#[test]
fn test_setters_rebuild_table() {
    let mut mapper = RgbMapper::new(256);
    mapper.set_color_map("red").unwrap();
    assert_eq!(mapper.lookup(255), [255, 0, 0]);
    mapper.set_distribution("sqrt").unwrap();
    assert_eq!(mapper.lookup(64)[0], 128);
    mapper.set_hashsize(16);
    assert_eq!(mapper.vmax(), 15);
    assert_eq!(mapper.lookup(15), [255, 0, 0]);
}

#[test]
fn test_unknown_names_rejected() {
    let mut mapper = RgbMapper::new(256);
    assert!(matches!(
        mapper.set_color_map("plasma"),
        Err(ViewerError::UnknownColorMap(_))
    ));
    assert!(matches!(
        mapper.set_intensity_map("wave"),
        Err(ViewerError::UnknownIntensityMap(_))
    ));
    assert!(matches!(
        mapper.set_distribution("histeq"),
        Err(ViewerError::UnknownColorAlgorithm(_))
    ));
    assert_eq!(mapper.color_map(), ColorMap::Gray);
}

#[test]
fn test_distributions_are_monotonic_and_span_unit_range() {
    for name in ColorDistribution::NAMES {
        let dist = ColorDistribution::from_name(name).unwrap();
        assert!(dist.apply(0.0).abs() < 1e-12, "{name}");
        assert!((dist.apply(1.0) - 1.0).abs() < 1e-12, "{name}");
        let samples: Vec<f64> = (0..=100).map(|i| dist.apply(i as f64 / 100.0)).collect();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]), "{name}");
    }
}

#[test]
fn test_intensity_maps_stay_in_range() {
    for name in IntensityMap::NAMES {
        let imap = IntensityMap::from_name(name).unwrap();
        for i in 0..=100 {
            let v = imap.apply(i as f64 / 100.0);
            assert!((0.0..=1.0).contains(&v), "{name}");
        }
    }
}

#[test]
fn test_color_maps_known() {
    for name in ColorMap::NAMES {
        let cmap = ColorMap::from_name(name).unwrap();
        for c in cmap.color(0.5) {
            assert!((0.0..=1.0).contains(&c));
        }
    }
    assert_eq!(ColorMap::Heat.color(1.0), [1.0, 1.0, 1.0]);
    assert_eq!(ColorMap::Heat.color(0.0), [0.0, 0.0, 0.0]);
}

// ---------------------------------------------------------------------------
// get_rgbarray
// ---------------------------------------------------------------------------

#[test]
fn test_invalid_pixels_are_transparent() {
    let mapper = RgbMapper::new(256);
    let indices = index_array(vec![255, 255], 1, vec![true, false]);
    let rgb = mapper.get_rgbarray(&indices, PixelOrder::Rgba);
    assert_eq!(rgb.dim(), (1, 2, 4));
    assert_eq!(rgb.slice(ndarray::s![0, 0, ..]).to_vec(), vec![255, 255, 255, 255]);
    assert_eq!(rgb.slice(ndarray::s![0, 1, ..]).to_vec(), vec![0, 0, 0, 0]);
}

#[test]
fn test_pixel_orders() {
    let mut mapper = RgbMapper::new(256);
    mapper.set_color_map("red").unwrap();
    let indices = index_array(vec![255], 1, vec![true]);

    let bgra = mapper.get_rgbarray(&indices, PixelOrder::Bgra);
    assert_eq!(bgra.iter().copied().collect::<Vec<_>>(), vec![0, 0, 255, 255]);

    let argb = mapper.get_rgbarray(&indices, PixelOrder::Argb);
    assert_eq!(argb.iter().copied().collect::<Vec<_>>(), vec![255, 255, 0, 0]);

    let rgb = mapper.get_rgbarray(&indices, PixelOrder::Rgb);
    assert_eq!(rgb.iter().copied().collect::<Vec<_>>(), vec![255, 0, 0]);
}

#[test]
fn test_colour_input_bypasses_color_map() {
    let mut mapper = RgbMapper::new(256);
    mapper.set_color_map("heat").unwrap();
    let indices = index_array(vec![255, 0, 128], 3, vec![true]);
    let rgb = mapper.get_rgbarray(&indices, PixelOrder::Rgb);
    assert_eq!(rgb.iter().copied().collect::<Vec<_>>(), vec![255, 0, 128]);
}

#[test]
fn test_pixel_order_channels() {
    assert_eq!(PixelOrder::Rgb.channels(), 3);
    assert_eq!(PixelOrder::Rgba.channels(), 4);
    assert_eq!(PixelOrder::Bgra.channels(), 4);
    assert_eq!(PixelOrder::Argb.channels(), 4);
}
