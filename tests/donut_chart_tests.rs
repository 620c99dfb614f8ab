use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use scpp_charts::api::{
    DANGER_RED, DonutChart, DonutChartProps, DonutChartStyle, DonutLabelPolicy, SAFE_GREEN,
    WARNING_YELLOW, clamp_percentage, severity_color,
};
use scpp_charts::render::{LineCap, NullRenderer};

fn settled(percentage: f64) -> DonutChart {
    let mut chart = DonutChart::new(
        DonutChartProps::new(percentage, "Gastado"),
        DonutChartStyle::default(),
    )
    .expect("donut");
    chart.advance(2.0).expect("advance");
    chart
}

#[test]
fn geometry_derives_from_size_and_stroke() {
    let chart = settled(40.0);
    let geometry = chart.geometry();
    assert_abs_diff_eq!(geometry.center, 100.0);
    assert_abs_diff_eq!(geometry.radius, 90.0);
    assert_abs_diff_eq!(geometry.circumference, PI * 180.0, epsilon = 1e-9);
    assert_abs_diff_eq!(
        geometry.dash_offset(40.0),
        geometry.circumference * 0.6,
        epsilon = 1e-9
    );
}

#[test]
fn overspend_draws_a_full_sweep_in_red() {
    let chart = settled(150.0);
    assert_abs_diff_eq!(chart.displayed_percentage(), 100.0);
    assert_abs_diff_eq!(chart.geometry().dash_offset(chart.displayed_percentage()), 0.0);
    assert_eq!(chart.color().to_rgb8(), DANGER_RED);
    assert_eq!(chart.value_text(), "150%");
}

#[test]
fn negative_percentage_draws_no_arc() {
    let chart = settled(-10.0);
    let geometry = chart.geometry();
    assert_abs_diff_eq!(chart.displayed_percentage(), 0.0);
    assert_abs_diff_eq!(
        geometry.dash_offset(chart.displayed_percentage()),
        geometry.circumference
    );
    assert_eq!(chart.color().to_rgb8(), SAFE_GREEN);
}

#[test]
fn clamped_label_policy_matches_the_sweep() {
    let mut chart = DonutChart::new(
        DonutChartProps::new(150.0, "Gastado"),
        DonutChartStyle {
            label_policy: DonutLabelPolicy::Clamped,
            ..DonutChartStyle::default()
        },
    )
    .expect("donut");
    chart.advance(2.0).expect("advance");
    assert_eq!(chart.value_text(), "100%");
}

#[test]
fn color_anchors_and_midpoints() {
    assert_eq!(severity_color(0.0).to_rgb8(), SAFE_GREEN);
    assert_eq!(severity_color(50.0).to_rgb8(), WARNING_YELLOW);
    assert_eq!(severity_color(100.0).to_rgb8(), DANGER_RED);

    let quarter = severity_color(25.0).to_rgb8();
    for channel in 0..3 {
        let (low, high) = if SAFE_GREEN[channel] <= WARNING_YELLOW[channel] {
            (SAFE_GREEN[channel], WARNING_YELLOW[channel])
        } else {
            (WARNING_YELLOW[channel], SAFE_GREEN[channel])
        };
        assert!(low < quarter[channel] && quarter[channel] < high);
    }
}

#[test]
fn non_finite_percentage_behaves_like_zero() {
    assert_abs_diff_eq!(clamp_percentage(f64::NAN), 0.0);
    let chart = settled(f64::NAN);
    assert_eq!(chart.value_text(), "0%");
    chart.build_render_frame().expect("frame").validate().expect("valid");
}

#[test]
fn frame_has_track_arc_and_texts() {
    let chart = settled(40.0);
    let frame = chart.build_render_frame().expect("frame");
    let circles: Vec<_> = frame.circles().collect();
    assert_eq!(circles.len(), 2);
    assert!(circles[0].stroke.is_some_and(|stroke| stroke.dash.is_none()));

    let arc = circles[1];
    assert_abs_diff_eq!(arc.rotation_deg, -90.0);
    let stroke = arc.stroke.expect("arc stroke");
    assert_eq!(stroke.cap, LineCap::Round);
    assert_eq!(stroke.color, severity_color(40.0));

    let texts: Vec<&str> = frame.texts().map(|text| text.text.as_str()).collect();
    assert_eq!(texts, vec!["40%", "Gastado"]);
    assert!(frame.texts().next().is_some_and(|text| text.bold));

    let mut renderer = NullRenderer::default();
    chart.render(&mut renderer).expect("render");
    assert_eq!(renderer.last_circle_count, 2);
}

#[test]
fn focus_replays_from_slightly_below_current() {
    let mut chart = settled(40.0);
    assert!(!chart.is_animating());
    chart.on_focus();
    assert!(chart.is_animating());
    assert_abs_diff_eq!(chart.displayed_percentage(), 35.0);
    chart.advance(2.0).expect("advance");
    assert_abs_diff_eq!(chart.displayed_percentage(), 40.0);
}

#[test]
fn step_back_never_goes_below_zero() {
    let mut chart = settled(3.0);
    chart.on_focus();
    assert_abs_diff_eq!(chart.displayed_percentage(), 0.0);
}

#[test]
fn blur_freezes_the_sweep() {
    let mut chart = DonutChart::new(
        DonutChartProps::new(80.0, "Gastado"),
        DonutChartStyle::default(),
    )
    .expect("donut");
    chart.advance(0.25).expect("advance");
    let frozen = chart.displayed_percentage();
    chart.on_blur();
    assert!(!chart.is_animating());
    chart.advance(1.0).expect("advance");
    assert_abs_diff_eq!(chart.displayed_percentage(), frozen);
}

#[test]
fn percentage_change_retriggers_the_animation() {
    let mut chart = settled(40.0);
    chart.set_percentage(60.0);
    assert!(chart.is_animating());
    assert_abs_diff_eq!(chart.displayed_percentage(), 35.0);
    chart.advance(2.0).expect("advance");
    assert_abs_diff_eq!(chart.displayed_percentage(), 60.0);
}

#[test]
fn unmount_stops_every_write_to_the_sweep() {
    let writes = Rc::new(Cell::new(0_usize));
    let mut chart = DonutChart::new(
        DonutChartProps::new(70.0, "Gastado"),
        DonutChartStyle::default(),
    )
    .expect("donut");
    let counter = Rc::clone(&writes);
    chart.set_sweep_observer(move |_| counter.set(counter.get() + 1));

    chart.advance(0.1).expect("advance");
    assert!(writes.get() > 0);

    chart.unmount();
    let after_unmount = writes.get();
    let frozen = chart.displayed_percentage();

    chart.advance(1.0).expect("advance");
    chart.set_percentage(10.0);
    chart.on_focus();
    chart.advance(1.0).expect("advance");

    assert_eq!(writes.get(), after_unmount);
    assert_abs_diff_eq!(chart.displayed_percentage(), frozen);
    assert!(!chart.is_mounted());
}

#[test]
fn invalid_sizes_are_rejected() {
    let props = DonutChartProps::new(10.0, "Gastado").with_size(20.0, 20.0);
    assert!(DonutChart::new(props, DonutChartStyle::default()).is_err());
}

#[test]
fn props_duration_overrides_the_style_timing() {
    let mut chart = DonutChart::new(
        DonutChartProps::new(60.0, "Gastado").with_duration_ms(200),
        DonutChartStyle::default(),
    )
    .expect("donut");
    assert!(chart.is_animating());
    assert!(!chart.advance(0.2).expect("advance"));
    assert_abs_diff_eq!(chart.displayed_percentage(), 60.0);

    let instant = DonutChart::new(
        DonutChartProps::new(30.0, "Gastado").with_duration_ms(0),
        DonutChartStyle::default(),
    )
    .expect("donut");
    assert!(!instant.is_animating());
    assert_abs_diff_eq!(instant.displayed_percentage(), 30.0);
}
