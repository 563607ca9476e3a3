use ndarray::{array, Array3, Axis};

use starview_core::autocuts::{Autocuts, MinMax};
use starview_core::pipeline::{apply_visuals, Transformed};

fn transformed(values: Array3<f32>) -> Transformed {
    Transformed {
        data: values,
        dst_x: 3,
        dst_y: -4,
    }
}

#[test]
fn test_cut_levels_clip_and_scale() {
    let t = transformed(array![[500.0f32, 1000.0, 3000.0, 5000.0, 9000.0]].insert_axis(Axis(2)));
    let out = apply_visuals(&t, (1000.0, 5000.0), &MinMax, 255, false);
    let idx: Vec<u32> = out.index.iter().copied().collect();
    assert_eq!(idx, vec![0, 0, 127, 255, 255]);
    assert_eq!(out.vmax, 255);
    assert_eq!((out.dst_x, out.dst_y), (3, -4));
}

#[test]
fn test_indices_never_exceed_vmax() {
    let t = transformed(array![[-1e30f32, 0.0, 1e30, f32::INFINITY]].insert_axis(Axis(2)));
    let out = apply_visuals(&t, (0.0, 1.0), &MinMax, 63, false);
    assert!(out.index.iter().all(|&v| v <= 63));
}

#[test]
fn test_monotonic_in_value() {
    let values: Vec<f32> = (0..200).map(|i| i as f32 * 37.5 - 900.0).collect();
    let data = Array3::from_shape_vec((1, values.len(), 1), values).unwrap();
    let out = apply_visuals(&transformed(data), (-100.0, 4000.0), &MinMax, 255, false);
    let idx: Vec<u32> = out.index.iter().copied().collect();
    assert!(idx.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_nan_marked_invalid() {
    let t = transformed(array![[1.0f32, f32::NAN], [2.0, 3.0]].insert_axis(Axis(2)));
    let out = apply_visuals(&t, (0.0, 3.0), &MinMax, 255, false);
    assert!(out.valid[[0, 0]]);
    assert!(!out.valid[[0, 1]]);
    assert_eq!(out.index[[0, 1, 0]], 0);
}

#[test]
fn test_invert_y_flips_rows() {
    let t = transformed(array![[0.0f32, 0.0], [3.0, f32::NAN]].insert_axis(Axis(2)));
    let out = apply_visuals(&t, (0.0, 3.0), &MinMax, 255, true);
    assert_eq!(out.index[[0, 0, 0]], 255);
    assert!(!out.valid[[0, 1]]);
    assert_eq!(out.index[[1, 0, 0]], 0);
}

#[test]
fn test_equal_cuts_threshold() {
    let data = array![[4.0f32, 5.0, 6.0, f32::NAN]].insert_axis(Axis(2));
    let out = MinMax.cut_levels(data.view(), 5.0, 5.0, 0.0, 255.0);
    assert_eq!(out[[0, 0, 0]], 0.0);
    assert_eq!(out[[0, 1, 0]], 0.0);
    assert_eq!(out[[0, 2, 0]], 255.0);
    assert!(out[[0, 3, 0]].is_nan());
}
