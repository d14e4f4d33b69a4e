// File: crates/chart-core/src/tooltip.rs
// Summary: The single tooltip instance and pointer hover tracking over bars.

use chrono::NaiveDate;
use tracing::debug;

use crate::chart::Chart;
use crate::dom::{Document, Element};
use crate::error::ChartError;
use crate::format::{billions_label, month_year_label};

/// Class that marks the tooltip element as visible.
pub const SHOW_CLASS: &str = "show";
/// Tooltip offset from the pointer, in page units.
pub const OFFSET_X: f64 = 10.0;
pub const OFFSET_Y: f64 = -10.0;

/// Pointer position in page coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub page_x: f64,
    pub page_y: f64,
}

impl PointerEvent {
    pub fn new(page_x: f64, page_y: f64) -> Self { Self { page_x, page_y } }
}

/// What the tooltip currently shows. Content is kept after hiding so the
/// element's last `data-date` stays inspectable.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipState {
    pub index: usize,
    pub date: NaiveDate,
    pub heading: String,
    pub body: String,
    pub left: f64,
    pub top: f64,
    pub visible: bool,
}

impl TooltipState {
    pub fn html(&self) -> String {
        format!("<div><strong>{}</strong></div><div>{}</div>", self.heading, self.body)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Tooltip {
    state: Option<TooltipState>,
}

impl Tooltip {
    pub fn new() -> Self { Self::default() }

    pub fn state(&self) -> Option<&TooltipState> { self.state.as_ref() }

    pub fn is_visible(&self) -> bool { self.state.as_ref().map_or(false, |s| s.visible) }

    /// Fill the tooltip with bar `index` and show it next to the pointer.
    pub fn show(&mut self, doc: &mut Document, chart: &Chart, index: usize, ev: PointerEvent) -> Result<(), ChartError> {
        let point = chart
            .dataset()
            .get(index)
            .ok_or(ChartError::BarIndex { index, len: chart.dataset().len() })?;
        let el = mount(doc)?;
        let state = TooltipState {
            index,
            date: point.date,
            heading: month_year_label(point.date),
            body: format!("GDP: {}", billions_label(point.value)),
            left: ev.page_x + OFFSET_X,
            top: ev.page_y + OFFSET_Y,
            visible: true,
        };
        el.set_attr("data-date", point.iso_date());
        el.set_inner_html(state.html());
        el.set_style("left", format!("{}px", state.left));
        el.set_style("top", format!("{}px", state.top));
        el.classed(SHOW_CLASS, true);
        debug!(index, date = %point.date, "tooltip shown");
        self.state = Some(state);
        Ok(())
    }

    pub fn hide(&mut self, doc: &mut Document) -> Result<(), ChartError> {
        mount(doc)?.classed(SHOW_CLASS, false);
        if let Some(s) = self.state.as_mut() {
            s.visible = false;
        }
        Ok(())
    }
}

fn mount(doc: &mut Document) -> Result<&mut Element, ChartError> {
    doc.get_element_by_id_mut(Document::TOOLTIP_ID)
        .ok_or_else(|| ChartError::MountMissing(Document::TOOLTIP_ID.to_string()))
}

/// Turns raw pointer positions into enter/leave transitions over bars.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoverTracker {
    active: Option<usize>,
    /// Page position of the surface's top-left corner.
    origin: (f64, f64),
}

impl HoverTracker {
    pub fn new() -> Self { Self::default() }

    pub fn with_origin(origin: (f64, f64)) -> Self { Self { active: None, origin } }

    /// Bar currently under the pointer, if any.
    pub fn active(&self) -> Option<usize> { self.active }

    /// Returns `true` when the hover target changed.
    pub fn pointer_move(
        &mut self,
        chart: &Chart,
        doc: &mut Document,
        tooltip: &mut Tooltip,
        ev: PointerEvent,
    ) -> Result<bool, ChartError> {
        let target = chart.bar_at(ev.page_x - self.origin.0, ev.page_y - self.origin.1);
        if target == self.active {
            return Ok(false);
        }
        if self.active.take().is_some() {
            tooltip.hide(doc)?;
        }
        if let Some(index) = target {
            tooltip.show(doc, chart, index, ev)?;
            self.active = Some(index);
        }
        Ok(true)
    }

    /// Pointer left the surface entirely.
    pub fn pointer_exit(&mut self, doc: &mut Document, tooltip: &mut Tooltip) -> Result<bool, ChartError> {
        if self.active.take().is_none() {
            return Ok(false);
        }
        tooltip.hide(doc)?;
        Ok(true)
    }
}
