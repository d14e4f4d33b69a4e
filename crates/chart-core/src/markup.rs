// File: crates/chart-core/src/markup.rs
// Summary: Mounts the chart (SVG canvas, axes, titles, bars) or the error message into a Document.

use tracing::debug;

use crate::axis::{Axis, AxisTitle, Orient, TICK_SIZE};
use crate::chart::Chart;
use crate::dom::{Document, Element};
use crate::error::ChartError;
use crate::theme::{css, Theme};
use crate::types::Layout;

/// Class of the inner group translated by the margins.
const PLOT_CLASS: &str = "plot";

fn host(doc: &mut Document) -> Result<&mut Element, ChartError> {
    doc.get_element_by_id_mut(Document::CHART_ID)
        .ok_or_else(|| ChartError::MountMissing(Document::CHART_ID.to_string()))
}

/// Replace the chart host's content with an empty SVG surface of the layout's size.
pub fn init_canvas(doc: &mut Document, layout: &Layout) -> Result<(), ChartError> {
    let host = host(doc)?;
    host.clear();
    let svg = host.append(
        Element::new("svg")
            .with_attr("width", layout.width)
            .with_attr("height", layout.height),
    );
    svg.append(
        Element::new("g")
            .with_class(PLOT_CLASS)
            .with_attr("transform", format!("translate({},{})", layout.insets.left, layout.insets.top)),
    );
    Ok(())
}

/// Draw axes, titles and one bar per record into the chart host.
/// The canvas is created first when it is not there yet.
pub fn render_chart(doc: &mut Document, chart: &Chart) -> Result<(), ChartError> {
    let has_canvas = host(doc)?.query_first_mut(&format!("g.{PLOT_CLASS}")).is_some();
    if !has_canvas {
        init_canvas(doc, chart.layout())?;
    }
    let plot = host(doc)?
        .query_first_mut(&format!("g.{PLOT_CLASS}"))
        .ok_or_else(|| ChartError::MountMissing(PLOT_CLASS.to_string()))?;
    plot.clear();

    let inner_h = chart.layout().inner_height();
    plot.append(axis_group(&chart.x_axis()).with_attr("transform", format!("translate(0,{inner_h})")));
    plot.append(axis_group(&chart.y_axis()));
    for title in chart.titles() {
        plot.append(title_element(&title));
    }

    let width = chart.bar_width();
    for (_, point, rect) in chart.bars() {
        plot.append(
            Element::new("rect")
                .with_class("bar")
                .with_attr("data-date", point.iso_date())
                .with_attr("data-gdp", point.value_attr())
                .with_attr("x", rect.x)
                .with_attr("y", rect.y)
                .with_attr("width", width)
                .with_attr("height", rect.height),
        );
    }
    debug!(bars = chart.dataset().len(), "chart mounted");
    Ok(())
}

/// Replace the chart area with a single centered error message.
pub fn render_error(doc: &mut Document, message: &str) -> Result<(), ChartError> {
    let host = host(doc)?;
    host.clear();
    host.append(
        Element::new("div")
            .with_class("error")
            .with_style("text-align", "center")
            .with_style("color", "#e74c3c")
            .with_style("font-size", "18px")
            .with_text(message),
    );
    Ok(())
}

fn axis_group(axis: &Axis) -> Element {
    let (lx, ly, dy, anchor) = axis.label_anchor();
    let mut g = Element::new("g")
        .with_id(&axis.id)
        .with_class("axis")
        .with_attr("fill", "none")
        .with_attr("font-size", 10)
        .with_attr("font-family", "sans-serif")
        .with_attr("text-anchor", anchor);
    g.append(
        Element::new("path")
            .with_class("domain")
            .with_attr("stroke", "currentColor")
            .with_attr("d", axis.domain_path()),
    );
    for tick in &axis.ticks {
        let mut line = Element::new("line").with_attr("stroke", "currentColor");
        let mut text = Element::new("text").with_attr("fill", "currentColor");
        match axis.orient {
            Orient::Bottom => {
                line.set_attr("y2", TICK_SIZE);
                text.set_attr("y", ly);
            }
            Orient::Left => {
                line.set_attr("x2", -TICK_SIZE);
                text.set_attr("x", lx);
            }
        }
        text.set_attr("dy", dy);
        text.set_text(tick.label.clone());

        let t = g.append(
            Element::new("g")
                .with_class("tick")
                .with_attr("opacity", 1)
                .with_attr("transform", axis.tick_transform(tick)),
        );
        t.append(line);
        t.append(text);
    }
    g
}

fn title_element(title: &AxisTitle) -> Element {
    let mut el = Element::new("text")
        .with_class("axis-label")
        .with_attr("transform", &title.transform);
    if let Some(y) = title.y { el.set_attr("y", y); }
    if let Some(x) = title.x { el.set_attr("x", x); }
    if let Some(dy) = title.dy { el.set_attr("dy", dy); }
    el.with_style("text-anchor", "middle").with_text(title.text.clone())
}

/// Stylesheet for the standalone page: bar colors and tooltip visibility.
pub fn stylesheet(theme: &Theme) -> String {
    format!(
        "body {{ background: {bg}; font-family: sans-serif; }}\n\
         #title {{ text-align: center; color: {label}; }}\n\
         #chart {{ color: {axis}; }}\n\
         .bar {{ fill: {bar}; }}\n\
         .bar:hover {{ fill: {hover}; }}\n\
         .axis-label {{ fill: {label}; font-size: 14px; }}\n\
         #tooltip {{ position: absolute; pointer-events: none; opacity: 0; padding: 10px; border-radius: 4px; background: {tip_bg}; color: {tip_fg}; }}\n\
         #tooltip.show {{ opacity: 1; }}",
        bg = css(theme.background),
        label = css(theme.axis_label),
        axis = css(theme.axis_line),
        bar = css(theme.bar),
        hover = css(theme.bar_hover),
        tip_bg = css(theme.tooltip_background),
        tip_fg = css(theme.tooltip_text),
    )
}

/// Standalone SVG document of the chart host's surface, if one was mounted.
pub fn svg_document(doc: &Document) -> Option<String> {
    let host = doc.get_element_by_id(Document::CHART_ID)?;
    let svg = host.children().iter().find(|c| c.tag() == "svg")?;
    let mut svg = svg.clone();
    svg.set_attr("xmlns", "http://www.w3.org/2000/svg");
    Some(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}\n", svg.to_markup()))
}
