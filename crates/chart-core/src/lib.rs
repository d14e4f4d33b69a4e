// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the GDP bar chart pipeline (load, scale, mount, hover, raster).

pub mod axis;
pub mod chart;
pub mod dataset;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod format;
pub mod geometry;
pub mod markup;
pub mod scale;
pub mod text;
pub mod theme;
pub mod tooltip;
pub mod types;

pub use axis::{Axis, AxisTitle, Orient, Tick};
pub use chart::{Chart, RenderOptions, ERROR_MESSAGE};
pub use dataset::{DataPoint, Dataset, FeedMeta};
pub use dom::{Document, Element};
pub use error::{ChartError, DataLoadError};
pub use fetch::{fetch_dataset, DEFAULT_DATA_URL};
pub use scale::{LinearScale, Scale, TimeScale};
pub use text::TextShaper;
pub use theme::Theme;
pub use tooltip::{HoverTracker, PointerEvent, Tooltip, TooltipState};
pub use types::{Insets, Layout};
