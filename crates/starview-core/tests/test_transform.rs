mod common;

use ndarray::{array, Array3};

use starview_core::pipeline::transform::{flip_rows, rotate_clip};
use starview_core::pipeline::{apply_transforms, TransformParams};

use common::cutout_from;

fn params(flip_x: bool, flip_y: bool, swap_xy: bool, rot_deg: f64) -> TransformParams {
    TransformParams {
        flip_x,
        flip_y,
        swap_xy,
        rot_deg,
        window_center: (10, 10),
        origin_upper: false,
    }
}

fn plane(data: &Array3<f32>) -> Vec<Vec<f32>> {
    data.outer_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

// ---------------------------------------------------------------------------
// Flips and swap
// ---------------------------------------------------------------------------

#[test]
fn test_identity_places_anchor_at_center() {
    let cutout = cutout_from(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], 1, 1);
    let out = apply_transforms(&cutout, &params(false, false, false, 0.0));
    assert_eq!(plane(&out.data), vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    assert_eq!((out.dst_x, out.dst_y), (9, 9));
}

#[test]
fn test_flip_x_reverses_columns_and_anchor() {
    let cutout = cutout_from(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], 1, 1);
    let out = apply_transforms(&cutout, &params(true, false, false, 0.0));
    assert_eq!(plane(&out.data), vec![vec![3.0, 2.0, 1.0], vec![6.0, 5.0, 4.0]]);
    // anchor_x becomes 3 - 1 = 2
    assert_eq!(out.dst_x, 8);
    assert_eq!(out.dst_y, 9);
}

#[test]
fn test_flip_y_reverses_rows_and_anchor() {
    let cutout = cutout_from(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], 1, 0);
    let out = apply_transforms(&cutout, &params(false, true, false, 0.0));
    assert_eq!(plane(&out.data), vec![vec![4.0, 5.0, 6.0], vec![1.0, 2.0, 3.0]]);
    // anchor_y becomes 2 - 0 = 2
    assert_eq!(out.dst_y, 8);
}

#[test]
fn test_swap_transposes_and_swaps_anchor() {
    let cutout = cutout_from(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], 2, 0);
    let out = apply_transforms(&cutout, &params(false, false, true, 0.0));
    assert_eq!(out.data.dim(), (3, 2, 1));
    assert_eq!(
        plane(&out.data),
        vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]
    );
    assert_eq!((out.dst_x, out.dst_y), (10, 8));
}

#[test]
fn test_flip_then_swap_order() {
    let cutout = cutout_from(array![[1.0, 2.0], [3.0, 4.0]], 0, 0);
    let out = apply_transforms(&cutout, &params(true, false, true, 0.0));
    // flip_x: [[2,1],[4,3]], then transpose: [[2,4],[1,3]]
    assert_eq!(plane(&out.data), vec![vec![2.0, 4.0], vec![1.0, 3.0]]);
}

#[test]
fn test_origin_upper_placement_uses_height() {
    let cutout = cutout_from(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], 1, 0);
    let mut p = params(false, false, false, 0.0);
    p.origin_upper = true;
    let out = apply_transforms(&cutout, &p);
    assert_eq!(out.dst_y, 10 - (2 - 0));
}

// ---------------------------------------------------------------------------
// Rotation
// ---------------------------------------------------------------------------

#[test]
fn test_rotate_quarter_turn_counter_clockwise() {
    let data = array![[1.0f32, 2.0], [3.0, 4.0]].insert_axis(ndarray::Axis(2));
    let out = rotate_clip(data.view(), 90.0, (1.0, 1.0));
    assert_eq!(plane(&out), vec![vec![3.0, 1.0], vec![4.0, 2.0]]);
}

#[test]
fn test_rotate_half_turn() {
    let data = array![[1.0f32, 2.0], [3.0, 4.0]].insert_axis(ndarray::Axis(2));
    let out = rotate_clip(data.view(), 180.0, (1.0, 1.0));
    assert_eq!(plane(&out), vec![vec![4.0, 3.0], vec![2.0, 1.0]]);
}

#[test]
fn test_rotate_fills_outside_with_nan() {
    let data = Array3::<f32>::ones((4, 8, 1));
    let out = rotate_clip(data.view(), 90.0, (4.0, 2.0));
    assert_eq!(out.dim(), (4, 8, 1));
    // Corners of the wide strip rotate out of the source.
    assert!(out[[0, 0, 0]].is_nan());
    assert_eq!(out[[2, 4, 0]], 1.0);
}

#[test]
fn test_rotation_keeps_anchor_placement() {
    let cutout = cutout_from(array![[1.0, 2.0], [3.0, 4.0]], 1, 1);
    let plain = apply_transforms(&cutout, &params(false, false, false, 0.0));
    let rotated = apply_transforms(&cutout, &params(false, false, false, 90.0));
    assert_eq!((plain.dst_x, plain.dst_y), (rotated.dst_x, rotated.dst_y));
    assert_eq!(plane(&rotated.data), vec![vec![3.0, 1.0], vec![4.0, 2.0]]);
}

#[test]
fn test_flip_rows() {
    let data = array![[1u32, 2], [3, 4], [5, 6]].insert_axis(ndarray::Axis(2));
    let flipped = flip_rows(&data);
    assert_eq!(flipped[[0, 0, 0]], 5);
    assert_eq!(flipped[[2, 1, 0]], 2);
}
