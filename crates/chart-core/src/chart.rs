// File: crates/chart-core/src/chart.rs
// Summary: Chart struct (scales + bar geometry for one dataset) and the headless Skia raster pipeline.

use anyhow::Result;
use skia_safe as skia;
use tracing::debug;

use crate::axis::{Axis, AxisTitle, Orient, TICK_SIZE};
use crate::dataset::{DataPoint, Dataset};
use crate::error::ChartError;
use crate::format::{trillions_label, year_label};
use crate::geometry::Rect;
use crate::scale::{LinearScale, Scale, TimeScale, DEFAULT_TICK_COUNT};
use crate::text::{Anchor, TextShaper};
use crate::theme::Theme;
use crate::tooltip::TooltipState;
use crate::types::{Insets, Layout, HEIGHT, WIDTH};

pub const Y_TITLE: &str = "Gross Domestic Product";
pub const X_TITLE: &str = "Year";
pub const ERROR_MESSAGE: &str = "Error loading data. Please check your internet connection.";

const TICK_FONT: f32 = 10.0;
const TITLE_FONT: f32 = 14.0;
const TOOLTIP_FONT: f32 = 13.0;
const TOOLTIP_PADDING: f32 = 10.0;
const ERROR_FONT: f32 = 18.0;

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    pub draw_labels: bool,
    /// Bar drawn in the hover color.
    pub hovered: Option<usize>,
    /// Tooltip painted on top, in surface coordinates.
    pub tooltip: Option<TooltipState>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::default(),
            draw_labels: true,
            hovered: None,
            tooltip: None,
        }
    }
}

impl RenderOptions {
    pub fn layout(&self) -> Layout {
        Layout::new(self.width, self.height, self.insets)
    }
}

/// A dataset bound to a layout: both scales plus everything derived from them.
/// Built once per load and handed to whatever needs the geometry (markup, raster, hover).
#[derive(Clone, Debug)]
pub struct Chart {
    dataset: Dataset,
    layout: Layout,
    x: TimeScale,
    y: LinearScale,
}

impl Chart {
    pub fn new(dataset: Dataset, layout: Layout) -> Self {
        let (w, h) = (layout.inner_width(), layout.inner_height());
        let epoch = chrono::NaiveDate::default();
        let x = TimeScale::new(dataset.date_extent().unwrap_or((epoch, epoch)), (0.0, w));
        let y = LinearScale::new((0.0, dataset.max_value().unwrap_or(0.0)), (h, 0.0));
        debug!(records = dataset.len(), x_domain = ?x.domain(), y_domain = ?y.domain(), "scales computed");
        Self { dataset, layout, x, y }
    }

    pub fn dataset(&self) -> &Dataset { &self.dataset }
    pub fn layout(&self) -> &Layout { &self.layout }
    pub fn x_scale(&self) -> &TimeScale { &self.x }
    pub fn y_scale(&self) -> &LinearScale { &self.y }

    /// Uniform bar width: the plot width split evenly across records.
    pub fn bar_width(&self) -> f64 {
        if self.dataset.is_empty() { return 0.0; }
        self.layout.inner_width() / self.dataset.len() as f64
    }

    /// Bar rectangle in plot coordinates (origin at the inner area's top-left).
    pub fn bar_rect(&self, index: usize) -> Option<Rect> {
        self.dataset.get(index).map(|p| self.rect_for(p))
    }

    fn rect_for(&self, p: &DataPoint) -> Rect {
        let y = self.y.apply(p.value);
        Rect::from_xywh(self.x.apply(p.date), y, self.bar_width(), self.layout.inner_height() - y)
    }

    /// Every bar in dataset order.
    pub fn bars(&self) -> impl Iterator<Item = (usize, &DataPoint, Rect)> + '_ {
        self.dataset.iter().enumerate().map(move |(i, p)| (i, p, self.rect_for(p)))
    }

    /// Topmost bar under a point given in surface coordinates.
    pub fn bar_at(&self, surface_x: f64, surface_y: f64) -> Option<usize> {
        let px = surface_x - self.layout.insets.left as f64;
        let py = surface_y - self.layout.insets.top as f64;
        // later bars paint over earlier ones
        self.bars().filter(|(_, _, r)| r.contains(px, py)).map(|(i, _, _)| i).last()
    }

    pub fn x_axis(&self) -> Axis {
        let mut axis = Axis::bottom("x-axis", &self.x, DEFAULT_TICK_COUNT, year_label);
        if self.dataset.is_empty() { axis.ticks.clear(); }
        axis
    }

    pub fn y_axis(&self) -> Axis {
        Axis::left("y-axis", &self.y, DEFAULT_TICK_COUNT, trillions_label)
    }

    pub fn titles(&self) -> [AxisTitle; 2] {
        [AxisTitle::vertical(Y_TITLE, &self.layout), AxisTitle::horizontal(X_TITLE, &self.layout)]
    }

    // ---- raster output ------------------------------------------------------

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(&self, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = new_surface(opts)?;
        self.draw(surface.canvas(), opts);
        encode_png(&mut surface)
    }

    /// RGBA8 pixels plus (width, height, row bytes).
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = new_surface(opts)?;
        self.draw(surface.canvas(), opts);
        read_rgba8(&mut surface, opts)
    }

    fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        canvas.clear(theme.background);
        let shaper = opts.draw_labels.then(TextShaper::new);

        canvas.save();
        canvas.translate((self.layout.insets.left as f32, self.layout.insets.top as f32));

        let mut fill = skia::Paint::default();
        fill.set_anti_alias(false);
        fill.set_style(skia::paint::Style::Fill);
        for (i, _, r) in self.bars() {
            fill.set_color(if opts.hovered == Some(i) { theme.bar_hover } else { theme.bar });
            canvas.draw_rect(skia::Rect::from_xywh(r.x as f32, r.y as f32, r.width as f32, r.height as f32), &fill);
        }

        draw_axis(canvas, &self.x_axis(), self.layout.inner_height() as f32, theme, shaper.as_ref());
        draw_axis(canvas, &self.y_axis(), 0.0, theme, shaper.as_ref());

        if let Some(shaper) = &shaper {
            for title in self.titles() {
                let (x, y) = title.origin(&self.layout);
                if title.rotation != 0.0 {
                    // centered on the rotated anchor, one line below it
                    shaper.draw_rotated(canvas, &title.text, x as f32 + TITLE_FONT, y as f32, TITLE_FONT, theme.axis_label, title.rotation as f32);
                } else {
                    shaper.draw(canvas, &title.text, x as f32, y as f32, TITLE_FONT, theme.axis_label, Anchor::Middle);
                }
            }
        }
        canvas.restore();

        if let Some(tip) = opts.tooltip.as_ref().filter(|t| t.visible) {
            draw_tooltip(canvas, tip, opts, shaper.as_ref());
        }
    }
}

/// Paint the centered error message in place of the chart.
pub fn render_error_to_rgba8(opts: &RenderOptions, message: &str) -> Result<(Vec<u8>, u32, u32, usize)> {
    let mut surface = new_surface(opts)?;
    draw_error(surface.canvas(), opts, message);
    read_rgba8(&mut surface, opts)
}

pub fn render_error_to_png_bytes(opts: &RenderOptions, message: &str) -> Result<Vec<u8>> {
    let mut surface = new_surface(opts)?;
    draw_error(surface.canvas(), opts, message);
    encode_png(&mut surface)
}

// ---- helpers ----------------------------------------------------------------

fn new_surface(opts: &RenderOptions) -> Result<skia::Surface> {
    skia::surfaces::raster_n32_premul((opts.width.max(1), opts.height.max(1)))
        .ok_or_else(|| ChartError::Raster("failed to create raster surface".into()).into())
}

fn encode_png(surface: &mut skia::Surface) -> Result<Vec<u8>> {
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| ChartError::Raster("encode PNG failed".into()))?;
    Ok(data.as_bytes().to_vec())
}

fn read_rgba8(surface: &mut skia::Surface, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
    let (w, h) = (opts.width.max(1), opts.height.max(1));
    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let row_bytes = w as usize * 4;
    let mut pixels = vec![0u8; row_bytes * h as usize];
    if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        return Err(ChartError::Raster("read pixels failed".into()).into());
    }
    Ok((pixels, w as u32, h as u32, row_bytes))
}

fn draw_axis(canvas: &skia::Canvas, axis: &Axis, offset: f32, theme: &Theme, shaper: Option<&TextShaper>) {
    let mut line = skia::Paint::default();
    line.set_anti_alias(true);
    line.set_style(skia::paint::Style::Stroke);
    line.set_stroke_width(1.0);
    line.set_color(theme.axis_line);

    let (r0, r1) = (axis.range.0 as f32, axis.range.1 as f32);
    let t = TICK_SIZE as f32;
    let (lx, ly, _, _) = axis.label_anchor();
    match axis.orient {
        Orient::Bottom => {
            canvas.draw_line((r0, offset), (r1, offset), &line);
            for tick in &axis.ticks {
                let x = tick.offset as f32;
                canvas.draw_line((x, offset), (x, offset + t), &line);
                if let Some(s) = shaper {
                    s.draw(canvas, &tick.label, x + lx as f32, offset + ly as f32 + TICK_FONT, TICK_FONT, theme.tick, Anchor::Middle);
                }
            }
        }
        Orient::Left => {
            canvas.draw_line((offset, r0), (offset, r1), &line);
            for tick in &axis.ticks {
                let y = tick.offset as f32;
                canvas.draw_line((offset - t, y), (offset, y), &line);
                if let Some(s) = shaper {
                    s.draw(canvas, &tick.label, offset + lx as f32, y + TICK_FONT * 0.35, TICK_FONT, theme.tick, Anchor::End);
                }
            }
        }
    }
}

fn draw_tooltip(canvas: &skia::Canvas, tip: &TooltipState, opts: &RenderOptions, shaper: Option<&TextShaper>) {
    let line_h = TOOLTIP_FONT * 1.5;
    let text_w = shaper
        .map(|s| s.measure_width(&tip.heading, TOOLTIP_FONT, true).max(s.measure_width(&tip.body, TOOLTIP_FONT, false)))
        .unwrap_or(160.0);
    let w = text_w + TOOLTIP_PADDING * 2.0;
    let h = line_h * 2.0 + TOOLTIP_PADDING * 2.0;
    // keep the box on the surface
    let x = (tip.left as f32).min(opts.width as f32 - w).max(0.0);
    let y = (tip.top as f32).min(opts.height as f32 - h).max(0.0);

    let mut bg = skia::Paint::default();
    bg.set_anti_alias(true);
    bg.set_color(opts.theme.tooltip_background);
    canvas.draw_round_rect(skia::Rect::from_xywh(x, y, w, h), 4.0, 4.0, &bg);

    if let Some(s) = shaper {
        let tx = x + TOOLTIP_PADDING;
        s.draw_bold(canvas, &tip.heading, tx, y + TOOLTIP_PADDING + TOOLTIP_FONT, TOOLTIP_FONT, opts.theme.tooltip_text);
        s.draw(canvas, &tip.body, tx, y + TOOLTIP_PADDING + TOOLTIP_FONT + line_h, TOOLTIP_FONT, opts.theme.tooltip_text, Anchor::Start);
    }
}

fn draw_error(canvas: &skia::Canvas, opts: &RenderOptions, message: &str) {
    canvas.clear(opts.theme.background);
    if opts.draw_labels {
        TextShaper::new().draw(canvas, message, opts.width as f32 * 0.5, ERROR_FONT * 2.0, ERROR_FONT, opts.theme.error, Anchor::Middle);
    } else {
        let mut paint = skia::Paint::default();
        paint.set_color(opts.theme.error);
        let w = opts.width as f32 * 0.5;
        canvas.draw_rect(skia::Rect::from_xywh(w * 0.5, ERROR_FONT, w, ERROR_FONT), &paint);
    }
}
