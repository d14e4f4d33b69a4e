// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark color presets shared by the raster output and the page stylesheet.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub bar: skia::Color,
    pub bar_hover: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub tooltip_background: skia::Color,
    pub tooltip_text: skia::Color,
    pub error: skia::Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 255, 255, 255),
            bar: skia::Color::from_argb(255, 70, 130, 180),
            bar_hover: skia::Color::from_argb(255, 255, 165, 0),
            axis_line: skia::Color::from_argb(255, 0, 0, 0),
            axis_label: skia::Color::from_argb(255, 33, 33, 33),
            tick: skia::Color::from_argb(255, 0, 0, 0),
            tooltip_background: skia::Color::from_argb(230, 44, 62, 80),
            tooltip_text: skia::Color::from_argb(255, 255, 255, 255),
            error: skia::Color::from_argb(255, 0xe7, 0x4c, 0x3c),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            bar: skia::Color::from_argb(255, 64, 160, 255),
            bar_hover: skia::Color::from_argb(255, 255, 230, 70),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            tooltip_background: skia::Color::from_argb(235, 40, 40, 45),
            tooltip_text: skia::Color::from_argb(255, 235, 235, 245),
            error: skia::Color::from_argb(255, 0xe7, 0x4c, 0x3c),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            bar: skia::Color::from_argb(255, 0x00, 0xff, 0xff),
            bar_hover: skia::Color::from_argb(255, 0xff, 0xff, 0x00),
            axis_line: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            axis_label: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            tick: skia::Color::from_argb(255, 0xcc, 0xcc, 0xcc),
            tooltip_background: skia::Color::from_argb(255, 0x22, 0x22, 0x22),
            tooltip_text: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            error: skia::Color::from_argb(255, 0xff, 0x40, 0x40),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Theme::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}

/// CSS color for a Skia color: `#rrggbb`, or `rgba(..)` when translucent.
pub fn css(color: skia::Color) -> String {
    if color.a() == 255 {
        format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
    } else {
        format!("rgba({}, {}, {}, {:.2})", color.r(), color.g(), color.b(), color.a() as f32 / 255.0)
    }
}
