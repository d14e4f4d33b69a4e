// File: crates/chart-core/src/axis.rs
// Summary: Axis model (orientation, ticks, domain line) and the two static axis titles.

use crate::scale::Scale;
use crate::types::Layout;

/// Length of the tick marks and of the domain line's end caps.
pub const TICK_SIZE: f64 = 6.0;
/// Gap between a tick mark and its label.
pub const TICK_PADDING: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Position along the axis, in plot coordinates.
    pub offset: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub id: String,
    pub orient: Orient,
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
}

impl Axis {
    pub fn new<S, F>(id: impl Into<String>, orient: Orient, scale: &S, count: usize, format: F) -> Self
    where
        S: Scale,
        F: Fn(S::Domain) -> String,
    {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|v| Tick { offset: scale.apply(v), label: format(v) })
            .collect();
        Self { id: id.into(), orient, range: scale.range(), ticks }
    }

    pub fn bottom<S: Scale>(id: impl Into<String>, scale: &S, count: usize, format: impl Fn(S::Domain) -> String) -> Self {
        Self::new(id, Orient::Bottom, scale, count, format)
    }

    pub fn left<S: Scale>(id: impl Into<String>, scale: &S, count: usize, format: impl Fn(S::Domain) -> String) -> Self {
        Self::new(id, Orient::Left, scale, count, format)
    }

    /// SVG path of the domain line with outer caps.
    pub fn domain_path(&self) -> String {
        let (r0, r1) = self.range;
        match self.orient {
            Orient::Bottom => format!("M{r0},{TICK_SIZE}V0H{r1}V{TICK_SIZE}"),
            Orient::Left => format!("M{},{r0}H0V{r1}H{}", -TICK_SIZE, -TICK_SIZE),
        }
    }

    /// Translation of one tick group along the axis.
    pub fn tick_transform(&self, tick: &Tick) -> String {
        match self.orient {
            Orient::Bottom => format!("translate({},0)", tick.offset),
            Orient::Left => format!("translate(0,{})", tick.offset),
        }
    }

    /// Label anchor relative to the tick origin: (x, y, dy, text-anchor).
    pub fn label_anchor(&self) -> (f64, f64, &'static str, &'static str) {
        let gap = TICK_SIZE + TICK_PADDING;
        match self.orient {
            Orient::Bottom => (0.0, gap, "0.71em", "middle"),
            Orient::Left => (-gap, 0.0, "0.32em", "end"),
        }
    }
}

/// Static axis title placed in the margin.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTitle {
    pub text: String,
    pub transform: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub dy: Option<&'static str>,
    /// Rotation in degrees, applied around the plot origin.
    pub rotation: f64,
}

impl AxisTitle {
    /// Vertical title against the left margin, reading bottom-to-top.
    pub fn vertical(text: impl Into<String>, layout: &Layout) -> Self {
        Self {
            text: text.into(),
            transform: "rotate(-90)".to_string(),
            x: Some(-(layout.inner_height() / 2.0)),
            y: Some(-(layout.insets.left as f64)),
            dy: Some("1em"),
            rotation: -90.0,
        }
    }

    /// Horizontal title centered beneath the bottom axis.
    pub fn horizontal(text: impl Into<String>, layout: &Layout) -> Self {
        let x = layout.inner_width() / 2.0;
        let y = layout.inner_height() + layout.insets.bottom as f64 - 10.0;
        Self {
            text: text.into(),
            transform: format!("translate({x}, {y})"),
            x: None,
            y: None,
            dy: None,
            rotation: 0.0,
        }
    }

    /// Anchor point in plot coordinates, after applying the transform.
    pub fn origin(&self, layout: &Layout) -> (f64, f64) {
        if self.rotation != 0.0 {
            // rotate(-90) maps (x, y) to (y, -x)
            (self.y.unwrap_or(0.0), -self.x.unwrap_or(0.0))
        } else {
            (layout.inner_width() / 2.0, layout.inner_height() + layout.insets.bottom as f64 - 10.0)
        }
    }
}
