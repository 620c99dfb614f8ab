use approx::assert_abs_diff_eq;
use scpp_charts::core::{
    LabelStyle, NumberFormat, NumberLocale, ValueScale, bar_row_labels, line_x_labels,
    truncate_label, y_axis_ticks,
};

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

#[test]
fn y_ticks_cover_zero_to_max_evenly() {
    let ticks = y_axis_ticks(ValueScale::new(1_000.0), 4, 200.0);
    assert_eq!(ticks.len(), 5);
    let values: Vec<f64> = ticks.iter().map(|tick| tick.value).collect();
    assert_eq!(values, vec![0.0, 250.0, 500.0, 750.0, 1_000.0]);
    let offsets: Vec<f64> = ticks.iter().map(|tick| tick.offset).collect();
    assert_eq!(offsets, vec![200.0, 150.0, 100.0, 50.0, 0.0]);
}

#[test]
fn degenerate_scale_has_a_single_zero_tick() {
    let ticks = y_axis_ticks(ValueScale::new(0.0), 4, 120.0);
    assert_eq!(ticks.len(), 1);
    assert_abs_diff_eq!(ticks[0].value, 0.0);
    assert_abs_diff_eq!(ticks[0].offset, 120.0);
}

#[test]
fn zero_divisions_are_treated_as_one() {
    let ticks = y_axis_ticks(ValueScale::new(10.0), 0, 100.0);
    assert_eq!(ticks.len(), 2);
    assert_abs_diff_eq!(ticks[1].value, 10.0);
}

#[test]
fn tick_values_format_with_spanish_grouping() {
    let format = NumberFormat::default();
    let texts: Vec<String> = y_axis_ticks(ValueScale::new(4_000_000.0), 4, 100.0)
        .iter()
        .map(|tick| format.format(tick.value))
        .collect();
    assert_eq!(
        texts,
        vec!["$ 0", "$ 1.000.000", "$ 2.000.000", "$ 3.000.000", "$ 4.000.000"]
    );
}

#[test]
fn negative_amounts_keep_the_prefix_first() {
    let format = NumberFormat::new("$ ", NumberLocale::EsEs);
    assert_eq!(format.format(-1_234.0), "$ -1.234");
}

#[test]
fn x_labels_never_outnumber_points() {
    let names = labels(&["Ene", "Feb", "Mar", "Abr", "May"]);
    let laid_out = line_x_labels(&names, 3, 300.0, LabelStyle::default());
    assert_eq!(laid_out.len(), 3);
    let xs: Vec<f64> = laid_out.iter().map(|label| label.x).collect();
    assert_eq!(xs, vec![0.0, 150.0, 300.0]);
    assert!(laid_out.iter().all(|label| label.rotation_deg == 0.0));
}

#[test]
fn crowded_x_labels_rotate_together() {
    let names = labels(&["Septiembre", "Octubre", "Noviembre", "Diciembre"]);
    let laid_out = line_x_labels(&names, 4, 90.0, LabelStyle::default());
    assert_eq!(laid_out.len(), 4);
    assert!(laid_out.iter().all(|label| label.rotation_deg == -30.0));
}

#[test]
fn missing_labels_produce_no_placements() {
    assert!(line_x_labels(&[], 6, 300.0, LabelStyle::default()).is_empty());
    assert!(line_x_labels(&labels(&["Ene"]), 0, 300.0, LabelStyle::default()).is_empty());
}

#[test]
fn row_labels_are_truncated_per_row() {
    let names = labels(&["Entretenimiento", "Casa", "Salud"]);
    let rows = bar_row_labels(&names, 2, 40.0, 12);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].text, "Entretenimie");
    assert_eq!(rows[1].text, "Casa");
    assert_abs_diff_eq!(rows[1].offset, 40.0);
}

#[test]
fn truncation_handles_multibyte_text() {
    assert_eq!(truncate_label("Educación", 7), "Educaci");
    assert_eq!(truncate_label("Educación", 8), "Educació");
    assert_eq!(truncate_label("", 3), "");
}
