// File: crates/window-demo/src/main.rs
// Summary: Windowed GDP chart: fetch once, blit the RGBA raster via winit + softbuffer, tooltip on hover.

use anyhow::{anyhow, Context, Result};
use gdp_chart_core::chart::render_error_to_rgba8;
use gdp_chart_core::fetch::fetch_default;
use gdp_chart_core::markup::render_chart;
use gdp_chart_core::types::{HEIGHT, WIDTH};
use gdp_chart_core::{
    Chart, Document, HoverTracker, PointerEvent, RenderOptions, Tooltip, DEFAULT_DATA_URL,
    ERROR_MESSAGE,
};
use std::num::NonZeroU32;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

/// Everything the event loop needs after the one load.
enum Loaded {
    Chart { chart: Chart, doc: Document, tooltip: Tooltip, hover: HoverTracker },
    Failed,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let url = std::env::var("GDP_CHART_URL").unwrap_or_else(|_| DEFAULT_DATA_URL.to_string());
    let opts = RenderOptions::default();
    let mut state = load(&url, &opts)?;

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("United States GDP")
        .with_inner_size(PhysicalSize::new(WIDTH as u32, HEIGHT as u32))
        .with_resizable(false)
        .build(&event_loop)
        .context("build window")?;

    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow!("softbuffer context: {e}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow!("softbuffer surface: {e}"))?;

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *cf = ControlFlow::Exit,
                WindowEvent::CursorMoved { position, .. } => {
                    if let Loaded::Chart { chart, doc, tooltip, hover } = &mut state {
                        let ev = PointerEvent::new(position.x, position.y);
                        match hover.pointer_move(chart, doc, tooltip, ev) {
                            Ok(true) => window.request_redraw(),
                            Ok(false) => {}
                            Err(e) => tracing::warn!(error = %e, "hover failed"),
                        }
                    }
                }
                WindowEvent::CursorLeft { .. } => {
                    if let Loaded::Chart { doc, tooltip, hover, .. } = &mut state {
                        match hover.pointer_exit(doc, tooltip) {
                            Ok(true) => window.request_redraw(),
                            Ok(false) => {}
                            Err(e) => tracing::warn!(error = %e, "hover exit failed"),
                        }
                    }
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                if let Err(e) = draw(&mut surface, &state) {
                    tracing::error!(error = %e, "redraw failed");
                }
            }
            _ => {}
        }
    });
}

/// Fetch on a short-lived runtime, then mount the chart. A failed load paints the error message instead.
fn load(url: &str, opts: &RenderOptions) -> Result<Loaded> {
    let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build().context("tokio runtime")?;
    match rt.block_on(fetch_default(url)) {
        Ok(dataset) => {
            let mut doc = Document::page("United States GDP");
            let chart = Chart::new(dataset, opts.layout());
            render_chart(&mut doc, &chart)?;
            Ok(Loaded::Chart { chart, doc, tooltip: Tooltip::new(), hover: HoverTracker::new() })
        }
        Err(err) => {
            tracing::error!(error = %err, %url, "failed to load dataset");
            Ok(Loaded::Failed)
        }
    }
}

fn draw(surface: &mut softbuffer::Surface, state: &Loaded) -> Result<()> {
    let mut opts = RenderOptions::default();
    let (rgba, w, h, _) = match state {
        Loaded::Chart { chart, tooltip, hover, .. } => {
            opts.hovered = hover.active();
            opts.tooltip = tooltip.state().cloned();
            chart.render_to_rgba8(&opts)?
        }
        Loaded::Failed => render_error_to_rgba8(&opts, ERROR_MESSAGE)?,
    };
    let (Some(nw), Some(nh)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else { return Ok(()) };
    surface.resize(nw, nh).map_err(|e| anyhow!("resize surface: {e}"))?;

    let mut frame = surface.buffer_mut().map_err(|e| anyhow!("frame: {e}"))?;
    // softbuffer wants 0RGB
    for (dst, px) in frame.iter_mut().zip(rgba.chunks_exact(4)) {
        *dst = ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | (px[2] as u32);
    }
    frame.present().map_err(|e| anyhow!("present: {e}"))?;
    Ok(())
}
