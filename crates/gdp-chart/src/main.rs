// File: crates/gdp-chart/src/main.rs
// Summary: Fetches the GDP feed once, mounts the chart (or the error message) and writes the page out.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gdp_chart_core::chart::render_error_to_png_bytes;
use gdp_chart_core::markup::{init_canvas, render_chart, render_error, stylesheet, svg_document};
use gdp_chart_core::theme;
use gdp_chart_core::{
    fetch_dataset, Chart, ChartError, Dataset, Document, PointerEvent, RenderOptions, Tooltip, DEFAULT_DATA_URL, ERROR_MESSAGE,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PAGE_TITLE: &str = "United States GDP";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Svg,
    Png,
    All,
}

impl Format {
    fn wants(self, other: Format) -> bool {
        self == Format::All || self == other
    }
}

#[derive(Debug, Parser)]
#[command(name = "gdp-chart", about = "Render the US GDP bar chart")]
struct Args {
    /// Feed to load. Expects `{ "data": [[date, value], ...] }`.
    #[arg(long, env = "GDP_CHART_URL", default_value = DEFAULT_DATA_URL)]
    url: String,

    #[arg(long, default_value = "target/out")]
    out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::All)]
    format: Format,

    /// Theme preset (light, dark, high-contrast-dark).
    #[arg(long, default_value = "light")]
    theme: String,

    /// Show the tooltip for this bar, as if the pointer had entered it.
    #[arg(long)]
    hover: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let opts = RenderOptions { theme: theme::find(&args.theme), ..RenderOptions::default() };

    let mut doc = Document::page(PAGE_TITLE);
    init_canvas(&mut doc, &opts.layout())?;

    let client = reqwest::Client::new();
    match fetch_dataset(&client, &args.url).await {
        Ok(dataset) => write_chart(&args, opts, &mut doc, dataset),
        Err(err) => {
            tracing::error!(error = %err, url = %args.url, "failed to load dataset");
            render_error(&mut doc, ERROR_MESSAGE)?;
            write_outputs(&args, &opts, &doc, || render_error_to_png_bytes(&opts, ERROR_MESSAGE))?;
            Err(anyhow::Error::new(err).context(format!("loading {}", args.url)))
        }
    }
}

fn write_chart(args: &Args, mut opts: RenderOptions, doc: &mut Document, dataset: Dataset) -> Result<()> {
    if let Some(name) = &dataset.meta().name {
        doc.title = name.clone();
    }
    let chart = Chart::new(dataset, opts.layout());
    render_chart(doc, &chart)?;

    if let Some(index) = args.hover {
        let rect = chart
            .bar_rect(index)
            .ok_or(ChartError::BarIndex { index, len: chart.dataset().len() })
            .context("--hover")?;
        let insets = chart.layout().insets;
        // pointer at the bar's center, in page coordinates
        let ev = PointerEvent::new(
            insets.left as f64 + rect.x + rect.width / 2.0,
            insets.top as f64 + rect.y + rect.height / 2.0,
        );
        let mut tooltip = Tooltip::new();
        tooltip.show(doc, &chart, index, ev)?;
        opts.hovered = Some(index);
        opts.tooltip = tooltip.state().cloned();
    }

    write_outputs(args, &opts, doc, || chart.render_to_png_bytes(&opts))?;
    tracing::info!(bars = chart.dataset().len(), out_dir = %args.out_dir.display(), "chart written");
    Ok(())
}

fn write_outputs(args: &Args, opts: &RenderOptions, doc: &Document, png: impl FnOnce() -> Result<Vec<u8>>) -> Result<()> {
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    if args.format.wants(Format::Html) {
        let html = doc.to_html(&stylesheet(&opts.theme));
        write_file(&args.out_dir.join("index.html"), html.as_bytes())?;
    }
    if args.format.wants(Format::Svg) {
        // the error page has no surface
        if let Some(svg) = svg_document(doc) {
            write_file(&args.out_dir.join("chart.svg"), svg.as_bytes())?;
        }
    }
    if args.format.wants(Format::Png) {
        write_file(&args.out_dir.join("chart.png"), &png()?)?;
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
