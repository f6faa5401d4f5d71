//! Variance bar chart.
//!
//! Hand-built SVG text: one sign-colored bar per document around a zero
//! baseline. No chart crate; the output is a couple dozen elements and
//! building the markup directly keeps the byte output deterministic.

use std::path::{Path, PathBuf};

use tally_engine::StatementReport;

use crate::error::ReportError;

const POSITIVE_FILL: &str = "#4ecdc4";
const NEGATIVE_FILL: &str = "#ff6b6b";

const BAR_WIDTH: u32 = 60;
const BAR_GAP: u32 = 30;
const MARGIN: u32 = 50;
const HALF_RANGE: f64 = 100.0;
const TITLE_HEIGHT: u32 = 30;
const LABEL_HEIGHT: u32 = 30;

/// Write `variance.svg` into `dir`: per-document variance bars, green for
/// non-negative and red for negative, with a numeric label on each bar and
/// the document name beneath it.
pub fn write_variance_chart(
    dir: &Path,
    reports: &[StatementReport],
) -> Result<PathBuf, ReportError> {
    let path = dir.join("variance.svg");
    std::fs::write(&path, render(reports))
        .map_err(|e| ReportError::Io(format!("cannot write {}: {}", path.display(), e)))?;
    Ok(path)
}

fn render(reports: &[StatementReport]) -> String {
    let n = reports.len() as u32;
    let width = (2 * MARGIN + n * (BAR_WIDTH + BAR_GAP)).max(320);
    let height = TITLE_HEIGHT + 2 * HALF_RANGE as u32 + LABEL_HEIGHT + MARGIN;
    let baseline = f64::from(TITLE_HEIGHT) + HALF_RANGE;

    // Scale so the largest bar fills the half range. An all-zero batch
    // still needs a finite scale.
    let max_abs = reports
        .iter()
        .map(|r| r.reconciliation.variance.abs())
        .fold(0.0_f64, f64::max)
        .max(0.01);
    let scale = HALF_RANGE / max_abs;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\" font-family=\"sans-serif\">\n"
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"20\" text-anchor=\"middle\" font-size=\"14\">\
         Variance by Statement</text>\n",
        width / 2
    ));
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{baseline}\" x2=\"{}\" y2=\"{baseline}\" \
         stroke=\"#333\" stroke-width=\"1\"/>\n",
        MARGIN - 10,
        width - MARGIN + 10,
    ));

    for (i, report) in reports.iter().enumerate() {
        let variance = report.reconciliation.variance;
        let x = MARGIN + i as u32 * (BAR_WIDTH + BAR_GAP);
        let center = f64::from(x) + f64::from(BAR_WIDTH) / 2.0;
        let bar_height = variance.abs() * scale;

        let (y, fill) = if variance >= 0.0 {
            (baseline - bar_height, POSITIVE_FILL)
        } else {
            (baseline, NEGATIVE_FILL)
        };
        svg.push_str(&format!(
            "  <rect x=\"{x}\" y=\"{y:.1}\" width=\"{BAR_WIDTH}\" height=\"{bar_height:.1}\" \
             fill=\"{fill}\"/>\n"
        ));

        // Numeric label just past the bar tip, document name under the axis
        let label_y = if variance >= 0.0 {
            baseline - bar_height - 6.0
        } else {
            baseline + bar_height + 14.0
        };
        svg.push_str(&format!(
            "  <text x=\"{center}\" y=\"{label_y:.1}\" text-anchor=\"middle\" \
             font-size=\"11\">{variance:.2}</text>\n"
        ));
        svg.push_str(&format!(
            "  <text x=\"{center}\" y=\"{}\" text-anchor=\"middle\" font-size=\"11\">{}</text>\n",
            f64::from(TITLE_HEIGHT) + 2.0 * HALF_RANGE + 20.0,
            xml_escape(&report.meta.file),
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
