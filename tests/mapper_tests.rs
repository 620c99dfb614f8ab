use approx::assert_abs_diff_eq;
use scpp_charts::core::{
    ValueScale, map_bar_extents, map_points, map_points_in_slots, shared_max, x_for_index,
};

#[test]
fn points_scale_against_the_series_maximum() {
    let series = [10.0, 20.0, 30.0, 40.0];
    let scale = ValueScale::from_series([series.as_slice()]);
    let points: Vec<_> = map_points(&series, 300.0, 200.0, scale).collect();

    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![150.0, 100.0, 50.0, 0.0]);
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 100.0, 200.0, 300.0]);
}

#[test]
fn single_point_sits_at_origin_without_dividing_by_zero() {
    let points: Vec<_> = map_points(&[42.0], 300.0, 200.0, ValueScale::new(42.0)).collect();
    assert_eq!(points.len(), 1);
    assert_abs_diff_eq!(points[0].x, 0.0);
    assert_abs_diff_eq!(points[0].y, 0.0);
    assert_abs_diff_eq!(x_for_index(0, 0, 300.0), 0.0);
}

#[test]
fn all_zero_series_maps_to_the_baseline() {
    let series = [0.0; 5];
    let scale = ValueScale::from_series([series.as_slice()]);
    assert!(scale.is_degenerate());
    for point in map_points(&series, 100.0, 80.0, scale) {
        assert_abs_diff_eq!(point.y, 80.0);
    }
}

#[test]
fn shared_max_spans_series_and_ignores_non_finite_values() {
    let expenses = [10.0, f64::NAN, 5.0];
    let income = [7.0, f64::INFINITY, 30.0];
    assert_abs_diff_eq!(shared_max([expenses.as_slice(), income.as_slice()]), 30.0);
    assert_abs_diff_eq!(shared_max([[-4.0, -1.0].as_slice()]), 0.0);
    assert_abs_diff_eq!(shared_max(std::iter::empty::<&[f64]>()), 0.0);
}

#[test]
fn non_finite_values_map_like_zero() {
    let series = [f64::NAN, 50.0];
    let points: Vec<_> = map_points(&series, 10.0, 100.0, ValueScale::new(50.0)).collect();
    assert_abs_diff_eq!(points[0].y, 100.0);
    assert_abs_diff_eq!(points[1].y, 0.0);
}

#[test]
fn negative_values_fall_below_the_baseline() {
    let points: Vec<_> = map_points(&[-20.0, 40.0], 10.0, 100.0, ValueScale::new(40.0)).collect();
    assert_abs_diff_eq!(points[0].y, 150.0);
}

#[test]
fn mapping_iterator_restarts_when_cloned() {
    let series = [1.0, 2.0, 3.0];
    let iter = map_points(&series, 20.0, 10.0, ValueScale::new(3.0));
    let first: Vec<_> = iter.clone().collect();
    let second: Vec<_> = iter.collect();
    assert_eq!(first, second);
    assert!(map_points(&[], 20.0, 10.0, ValueScale::new(3.0)).next().is_none());
}

#[test]
fn bar_extents_follow_row_pitch_and_value_ratio() {
    let extents: Vec<_> =
        map_bar_extents(&[100.0, 50.0, 0.0], 40.0, 200.0, ValueScale::new(100.0)).collect();
    assert_eq!(extents.len(), 3);
    assert_abs_diff_eq!(extents[0].offset, 0.0);
    assert_abs_diff_eq!(extents[1].offset, 40.0);
    assert_abs_diff_eq!(extents[2].offset, 80.0);
    assert_abs_diff_eq!(extents[0].length, 200.0);
    assert_abs_diff_eq!(extents[1].length, 100.0);
    assert_abs_diff_eq!(extents[2].length, 0.0);
}

#[test]
fn degenerate_scale_yields_zero_length_bars() {
    for extent in map_bar_extents(&[0.0, 0.0], 40.0, 200.0, ValueScale::new(0.0)) {
        assert_abs_diff_eq!(extent.length, 0.0);
    }
}

#[test]
fn slotted_points_keep_the_longer_domain_spacing() {
    let xs: Vec<f64> = map_points_in_slots(&[1.0, 2.0], 5, 400.0, 100.0, ValueScale::new(2.0))
        .map(|point| point.x)
        .collect();
    assert_eq!(xs, vec![0.0, 100.0]);

    let fewer_slots: Vec<f64> = map_points_in_slots(&[1.0, 2.0, 3.0], 1, 200.0, 100.0, ValueScale::new(3.0))
        .map(|point| point.x)
        .collect();
    assert_eq!(fewer_slots, vec![0.0, 100.0, 200.0]);
}
