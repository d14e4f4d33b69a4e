// File: crates/chart-core/tests/hover.rs
// Purpose: Tooltip show/hide through direct calls and through pointer hit-testing.

use gdp_chart_core::markup::render_chart;
use gdp_chart_core::{Chart, ChartError, Dataset, Document, HoverTracker, Layout, PointerEvent, Tooltip};

fn setup() -> (Document, Chart) {
    let dataset = Dataset::from_json(br#"{"data":[["2000-01-01","3500.5"],["2000-04-01","3600.2"]]}"#).unwrap();
    let chart = Chart::new(dataset, Layout::default());
    let mut doc = Document::page("United States GDP");
    render_chart(&mut doc, &chart).unwrap();
    (doc, chart)
}

fn tooltip_el(doc: &Document) -> &gdp_chart_core::Element {
    doc.get_element_by_id("tooltip").expect("tooltip mount")
}

#[test]
fn show_populates_and_positions_the_tooltip() {
    let (mut doc, chart) = setup();
    let mut tooltip = Tooltip::new();
    tooltip.show(&mut doc, &chart, 0, PointerEvent::new(300.0, 200.0)).unwrap();

    let el = tooltip_el(&doc);
    assert_eq!(el.attr("data-date"), Some("2000-01-01"));
    assert!(el.has_class("show"));
    assert!(el.has_class("tooltip"));
    assert_eq!(el.style("left"), Some("310px"));
    assert_eq!(el.style("top"), Some("190px"));
    assert_eq!(
        el.inner_html(),
        Some("<div><strong>January 2000</strong></div><div>GDP: $3,500.50 Billion</div>")
    );
    assert!(tooltip.is_visible());
}

#[test]
fn hide_clears_visibility_but_keeps_content() {
    let (mut doc, chart) = setup();
    let mut tooltip = Tooltip::new();
    tooltip.show(&mut doc, &chart, 1, PointerEvent::new(0.0, 0.0)).unwrap();
    tooltip.hide(&mut doc).unwrap();

    let el = tooltip_el(&doc);
    assert!(!el.has_class("show"));
    assert!(el.has_class("tooltip"));
    assert_eq!(el.attr("data-date"), Some("2000-04-01"));
    assert!(!tooltip.is_visible());
}

#[test]
fn retrigger_replaces_content_and_position() {
    let (mut doc, chart) = setup();
    let mut tooltip = Tooltip::new();
    tooltip.show(&mut doc, &chart, 0, PointerEvent::new(100.0, 100.0)).unwrap();
    tooltip.show(&mut doc, &chart, 1, PointerEvent::new(900.0, 250.0)).unwrap();

    assert_eq!(doc.query_all("#tooltip").len(), 1);
    let el = tooltip_el(&doc);
    assert_eq!(el.attr("data-date"), Some("2000-04-01"));
    assert_eq!(el.style("left"), Some("910px"));
    assert_eq!(el.style("top"), Some("240px"));
    assert!(el.inner_html().unwrap().contains("April 2000"));
    assert!(el.inner_html().unwrap().contains("$3,600.20 Billion"));
}

#[test]
fn tracker_enters_and_leaves_bars() {
    let (mut doc, chart) = setup();
    let mut tooltip = Tooltip::new();
    let mut hover = HoverTracker::new();

    // margin area: nothing under the pointer
    assert!(!hover.pointer_move(&chart, &mut doc, &mut tooltip, PointerEvent::new(10.0, 10.0)).unwrap());
    assert!(!tooltip_el(&doc).has_class("show"));

    // plot origin is (80, 60); first bar covers x 0..445, y 9.97..360
    assert!(hover.pointer_move(&chart, &mut doc, &mut tooltip, PointerEvent::new(200.0, 300.0)).unwrap());
    assert_eq!(hover.active(), Some(0));
    assert!(tooltip_el(&doc).has_class("show"));
    assert_eq!(tooltip_el(&doc).attr("data-date"), Some("2000-01-01"));

    // moving within the same bar keeps the entry position
    assert!(!hover.pointer_move(&chart, &mut doc, &mut tooltip, PointerEvent::new(220.0, 310.0)).unwrap());
    assert_eq!(tooltip_el(&doc).style("left"), Some("210px"));

    // second bar starts at plot x 890
    assert!(hover.pointer_move(&chart, &mut doc, &mut tooltip, PointerEvent::new(985.0, 300.0)).unwrap());
    assert_eq!(hover.active(), Some(1));
    assert_eq!(tooltip_el(&doc).attr("data-date"), Some("2000-04-01"));

    // above the first bar's top edge is not part of the bar
    assert!(hover.pointer_move(&chart, &mut doc, &mut tooltip, PointerEvent::new(200.0, 65.0)).unwrap());
    assert_eq!(hover.active(), None);
    assert!(!tooltip_el(&doc).has_class("show"));
}

#[test]
fn tracker_exit_hides_tooltip() {
    let (mut doc, chart) = setup();
    let mut tooltip = Tooltip::new();
    let mut hover = HoverTracker::new();
    hover.pointer_move(&chart, &mut doc, &mut tooltip, PointerEvent::new(200.0, 300.0)).unwrap();
    assert!(hover.pointer_exit(&mut doc, &mut tooltip).unwrap());
    assert!(!tooltip_el(&doc).has_class("show"));
    assert!(!hover.pointer_exit(&mut doc, &mut tooltip).unwrap());
}

#[test]
fn tracker_respects_surface_origin() {
    let (mut doc, chart) = setup();
    let mut tooltip = Tooltip::new();
    let mut hover = HoverTracker::with_origin((100.0, 50.0));
    hover.pointer_move(&chart, &mut doc, &mut tooltip, PointerEvent::new(300.0, 350.0)).unwrap();
    assert_eq!(hover.active(), Some(0));
    // tooltip is placed in page coordinates
    assert_eq!(tooltip_el(&doc).style("left"), Some("310px"));
}

#[test]
fn missing_tooltip_mount_is_an_error() {
    let (_, chart) = setup();
    let mut doc = Document::empty();
    let mut tooltip = Tooltip::new();
    let err = tooltip.show(&mut doc, &chart, 0, PointerEvent::new(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, ChartError::MountMissing(_)));
    assert!(tooltip.state().is_none());
}

#[test]
fn out_of_range_index_is_an_error_and_keeps_the_current_tooltip() {
    let (mut doc, chart) = setup();
    let mut tooltip = Tooltip::new();
    tooltip.show(&mut doc, &chart, 0, PointerEvent::new(100.0, 100.0)).unwrap();

    let err = tooltip.show(&mut doc, &chart, 2, PointerEvent::new(500.0, 500.0)).unwrap_err();
    assert!(matches!(err, ChartError::BarIndex { index: 2, len: 2 }));
    assert_eq!(tooltip.state().map(|s| s.index), Some(0));
    assert_eq!(tooltip_el(&doc).attr("data-date"), Some("2000-01-01"));
    assert_eq!(tooltip_el(&doc).style("left"), Some("110px"));
}
