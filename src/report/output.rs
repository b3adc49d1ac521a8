use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use plotters::{
    coord::Shift,
    prelude::*,
    style::{register_font, FontStyle},
};
use std::{fs, path::PathBuf};
use tracing::info;

/// Face every chart draws its `sans-serif` text with. Bundled so bitmap
/// output does not depend on system font lookup.
static CHART_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

static FONT_READY: Lazy<bool> =
    Lazy::new(|| register_font("sans-serif", FontStyle::Normal, CHART_FONT).is_ok());

fn ensure_font() -> Result<()> {
    if !*FONT_READY {
        bail!("bundled chart font could not be loaded");
    }
    Ok(())
}

/// Where a chart goes. With neither field set, rendering does nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartOutput {
    /// Image file; `.svg` selects SVG, anything else goes through the bitmap
    /// encoder, which picks the format by extension (`.png`, `.jpg`, `.bmp`).
    pub fig_location: Option<PathBuf>,
    /// Print the chart's aggregated table to stdout.
    pub show_figure: bool,
}

impl ChartOutput {
    pub fn new(fig_location: Option<PathBuf>, show_figure: bool) -> Self {
        Self {
            fig_location,
            show_figure,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.fig_location.is_none() && !self.show_figure
    }
}

/// An aggregated chart ready to be drawn.
pub trait Chart {
    /// Pixel size of the whole figure.
    fn size(&self) -> (u32, u32);

    /// Plain-text rendering of the aggregated data.
    fn summary(&self) -> String;

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static;
}

/// Write and/or print `chart` as `out` asks.
pub fn render<C: Chart>(chart: &C, out: &ChartOutput) -> Result<()> {
    if let Some(path) = &out.fig_location {
        ensure_font()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {:?}", parent))?;
        }
        let is_svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if is_svg {
            let root = SVGBackend::new(path, chart.size()).into_drawing_area();
            root.fill(&WHITE)?;
            chart.draw(&root)?;
            root.present()?;
        } else {
            let root = BitMapBackend::new(path, chart.size()).into_drawing_area();
            root.fill(&WHITE)?;
            chart.draw(&root)?;
            root.present()?;
        }
        info!(path = %path.display(), "chart written");
    }
    if out.show_figure {
        println!("{}", chart.summary());
    }
    Ok(())
}

const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Categorical colour for series `i`.
pub fn series_color(i: usize) -> RGBColor {
    PALETTE[i % PALETTE.len()]
}

const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Sequential colour for `t` in `0.0..=1.0` (clamped).
pub fn gradient(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lo = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - lo as f64;
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (VIRIDIS[lo], VIRIDIS[lo + 1]);
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Label for the centre of segment `i` on a segmented axis.
pub fn segment_label(value: &SegmentValue<i32>, labels: &[String]) -> String {
    match value {
        SegmentValue::CenterOf(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| labels.get(i))
            .cloned()
            .unwrap_or_default(),
        _ => String::new(),
    }
}
