//! SVG chart rendering
//!
//! Renders a [`Presentation`] as a standalone SVG document:
//! - `Forks`: one scatter panel per fork, stacked vertically
//! - `Rpd`: bar chart, one bar per fork pair
//! - `Cv`: line chart with point markers

use crate::error::{ForkstatError, Result};
use crate::summary::{ChartKind, Presentation, Series};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

const WIDTH: f64 = 1000.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const TITLE_LINE_HEIGHT: f64 = 22.0;
const PANEL_HEIGHT: f64 = 260.0;
const PANEL_GAP: f64 = 70.0;
const AXIS_TICKS: usize = 5;

/// Destination for assembled presentations
pub trait ChartSink {
    /// Render `presentation` for the benchmark whose artifact stem is `stem`
    fn render(&mut self, presentation: &Presentation, stem: &str) -> Result<PathBuf>;
}

/// Writes `{stem}{suffix}.svg` files into a directory
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    output_dir: PathBuf,
}

impl SvgRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn artifact_path(&self, kind: ChartKind, stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}{}.svg", stem, kind.artifact_suffix()))
    }
}

impl ChartSink for SvgRenderer {
    fn render(&mut self, presentation: &Presentation, stem: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| ForkstatError::io(&self.output_dir, e))?;
        let path = self.artifact_path(presentation.kind, stem);
        fs::write(&path, to_svg(presentation)).map_err(|e| ForkstatError::io(&path, e))?;
        tracing::info!(path = %path.display(), "chart written");
        Ok(path)
    }
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Produce the complete SVG document for `presentation`
pub fn to_svg(presentation: &Presentation) -> String {
    let mut header_lines: Vec<&str> = presentation.title.lines().collect();
    header_lines.push(&presentation.heading);
    let header_height = TITLE_LINE_HEIGHT * header_lines.len() as f64 + 30.0;

    let panels: Vec<&Series> = match presentation.kind {
        ChartKind::Forks => presentation.series.iter().collect(),
        ChartKind::Rpd | ChartKind::Cv => presentation.series.iter().take(1).collect(),
    };
    let panel_count = panels.len().max(1);
    let height = header_height + panel_count as f64 * (PANEL_HEIGHT + PANEL_GAP);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = WIDTH,
        h = height
    );
    let _ = writeln!(
        svg,
        r#"<rect width="100%" height="100%" fill="white"/>"#
    );

    for (i, line) in header_lines.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="middle" font-size="{}">{}</text>"#,
            WIDTH / 2.0,
            TITLE_LINE_HEIGHT * (i as f64 + 1.0),
            if i + 1 == header_lines.len() { 15 } else { 17 },
            escape_xml(line)
        );
    }

    for (i, series) in panels.iter().enumerate() {
        let top = header_height + i as f64 * (PANEL_HEIGHT + PANEL_GAP);
        let panel = Panel::new(top, series);
        panel.frame(&mut svg, presentation, series);
        match presentation.kind {
            ChartKind::Forks => panel.scatter(&mut svg, series),
            ChartKind::Rpd => panel.bars(&mut svg, series),
            ChartKind::Cv => panel.line(&mut svg, series),
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Geometry of one plotting area
struct Panel {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    y_max: f64,
    count: usize,
}

impl Panel {
    fn new(top: f64, series: &Series) -> Self {
        let max = series
            .points
            .iter()
            .map(|p| p.value)
            .fold(0.0_f64, f64::max);
        Self {
            left: MARGIN_LEFT,
            top: top + 24.0,
            width: WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
            height: PANEL_HEIGHT - 24.0,
            y_max: if max > 0.0 { max * 1.1 } else { 1.0 },
            count: series.points.len(),
        }
    }

    fn x_at(&self, index: usize) -> f64 {
        let slot = self.width / self.count.max(1) as f64;
        self.left + slot * (index as f64 + 0.5)
    }

    fn y_at(&self, value: f64) -> f64 {
        self.top + self.height - (value / self.y_max) * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn frame(&self, svg: &mut String, presentation: &Presentation, series: &Series) {
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="middle" font-size="14">{}</text>"#,
            self.left + self.width / 2.0,
            self.top - 8.0,
            escape_xml(&series.name)
        );
        let _ = writeln!(
            svg,
            r##"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="#333"/>"##,
            self.left, self.top, self.width, self.height
        );

        for tick in 0..=AXIS_TICKS {
            let value = self.y_max * tick as f64 / AXIS_TICKS as f64;
            let y = self.y_at(value);
            let _ = writeln!(
                svg,
                r##"<line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="#ddd"/>"##,
                self.left,
                self.left + self.width,
            );
            let _ = writeln!(
                svg,
                r#"<text x="{}" y="{}" text-anchor="end" font-size="11">{}</text>"#,
                self.left - 6.0,
                y + 4.0,
                format_tick(value)
            );
        }

        // Label at most ~20 categories so dense scatters stay legible
        let stride = (self.count / 20).max(1);
        for (i, point) in series.points.iter().enumerate().step_by(stride) {
            let _ = writeln!(
                svg,
                r#"<text x="{}" y="{}" text-anchor="middle" font-size="11">{}</text>"#,
                self.x_at(i),
                self.bottom() + 16.0,
                escape_xml(&point.label)
            );
        }

        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="middle" font-size="12">{}</text>"#,
            self.left + self.width / 2.0,
            self.bottom() + 36.0,
            escape_xml(&presentation.x_label)
        );
        let mid_y = self.top + self.height / 2.0;
        let _ = writeln!(
            svg,
            r#"<text x="20" y="{mid_y}" text-anchor="middle" font-size="12" transform="rotate(-90 20 {mid_y})">{}</text>"#,
            escape_xml(&presentation.y_label)
        );
    }

    fn scatter(&self, svg: &mut String, series: &Series) {
        for (i, point) in series.points.iter().enumerate() {
            let _ = writeln!(
                svg,
                r##"<circle cx="{:.2}" cy="{:.2}" r="3" fill="#1f77b4"/>"##,
                self.x_at(i),
                self.y_at(point.value)
            );
        }
    }

    fn bars(&self, svg: &mut String, series: &Series) {
        let bar_width = self.width / self.count.max(1) as f64 * 0.6;
        for (i, point) in series.points.iter().enumerate() {
            let y = self.y_at(point.value);
            let _ = writeln!(
                svg,
                r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="skyblue"><title>{}</title></rect>"##,
                self.x_at(i) - bar_width / 2.0,
                y,
                bar_width,
                self.bottom() - y,
                escape_xml(&format!("{}: {:.4}", point.label, point.value))
            );
        }
    }

    fn line(&self, svg: &mut String, series: &Series) {
        let coords: Vec<String> = series
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{:.2},{:.2}", self.x_at(i), self.y_at(p.value)))
            .collect();
        let _ = writeln!(
            svg,
            r##"<polyline points="{}" fill="none" stroke="#1f77b4" stroke-width="2"/>"##,
            coords.join(" ")
        );
        self.scatter(svg, series);
    }
}

fn format_tick(value: f64) -> String {
    if value >= 100.0 {
        format!("{:.0}", value)
    } else if value >= 1.0 {
        format!("{:.2}", value)
    } else {
        format!("{:.4}", value)
    }
}
