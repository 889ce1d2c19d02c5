//! SVG rendering of a tour over projected points.

use std::fmt::Write;

use crate::error::{Error, Result};
use crate::projection::Point2;
use crate::tour::is_permutation;

const WIDTH: f64 = 1100.0;
const HEIGHT: f64 = 800.0;
const MARGIN: f64 = 40.0;
const PATH_COLOR: &str = "#d62728";

/// Renders the projected scatter with labels and the tour path on top.
///
/// Each consecutive pair of tour positions is drawn as a dashed segment;
/// the path is open, so there is no segment from the last stop back to the
/// first.
pub fn render_svg<L: AsRef<str>>(
    points: &[Point2],
    labels: &[L],
    permutation: &[usize],
) -> Result<String> {
    if points.len() != labels.len() {
        return Err(Error::invalid_input(format!(
            "{} points for {} labels",
            points.len(),
            labels.len()
        )));
    }
    if !is_permutation(permutation, points.len()) {
        return Err(Error::invalid_input(
            "tour is not a permutation of the plotted points",
        ));
    }

    let canvas = Canvas::fit(points);
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#);

    let _ = writeln!(out, r#"<g fill="black" fill-opacity="0.5">"#);
    for p in points {
        let (x, y) = canvas.map(*p);
        let _ = writeln!(out, r#"<circle cx="{x:.2}" cy="{y:.2}" r="2.5"/>"#);
    }
    let _ = writeln!(out, "</g>");

    let _ = writeln!(
        out,
        r#"<g stroke="{PATH_COLOR}" stroke-opacity="0.75" stroke-dasharray="6,4" stroke-width="1.2">"#
    );
    for pair in permutation.windows(2) {
        let (x1, y1) = canvas.map(points[pair[0]]);
        let (x2, y2) = canvas.map(points[pair[1]]);
        let _ = writeln!(
            out,
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}"/>"#
        );
    }
    let _ = writeln!(out, "</g>");

    let _ = writeln!(
        out,
        r#"<g font-family="sans-serif" font-size="7" text-anchor="middle">"#
    );
    for (p, label) in points.iter().zip(labels) {
        let (x, y) = canvas.map(*p);
        let _ = writeln!(
            out,
            r#"<text x="{x:.2}" y="{:.2}">{}</text>"#,
            y - 4.0,
            escape(label.as_ref())
        );
    }
    let _ = writeln!(out, "</g>");
    out.push_str("</svg>\n");

    Ok(out)
}

/// Maps data coordinates onto the drawing area, y pointing up.
struct Canvas {
    min_x: f64,
    min_y: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Canvas {
    fn fit(points: &[Point2]) -> Self {
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        if points.is_empty() {
            (min_x, max_x, min_y, max_y) = (0.0, 0.0, 0.0, 0.0);
        }

        let span_x = max_x - min_x;
        let span_y = max_y - min_y;
        let avail_x = WIDTH - 2.0 * MARGIN;
        let avail_y = HEIGHT - 2.0 * MARGIN;
        let scale = match (span_x > 0.0, span_y > 0.0) {
            (true, true) => (avail_x / span_x).min(avail_y / span_y),
            (true, false) => avail_x / span_x,
            (false, true) => avail_y / span_y,
            (false, false) => 0.0,
        };

        // Center the drawing in whichever axis has slack
        Self {
            min_x,
            min_y,
            scale,
            offset_x: MARGIN + (avail_x - span_x * scale) / 2.0,
            offset_y: MARGIN + (avail_y - span_y * scale) / 2.0,
        }
    }

    fn map(&self, p: Point2) -> (f64, f64) {
        let x = self.offset_x + (p.x - self.min_x) * self.scale;
        let y = HEIGHT - (self.offset_y + (p.y - self.min_y) * self.scale);
        (x, y)
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
