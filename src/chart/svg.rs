//! SVG output for ring charts.

use super::geometry::RingChart;

/// Track color drawn under the segments.
const TRACK_COLOR: &str = "#f1f5f9";

/// Escape a string for safe HTML/SVG insertion.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Render the ring as a standalone `<svg>` element.
///
/// Every segment is a full circle whose dash pattern exposes only its arc.
/// The group is rotated by -90 degrees so the first arc starts at
/// 12 o'clock and the ring fills clockwise.
pub fn render_svg(chart: &RingChart, caption: &str) -> String {
    let size = chart.diameter;
    let r = chart.radius;
    let c = chart.circumference;

    let mut svg = format!(
        "<svg width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    );
    svg.push_str(&format!(
        "  <g transform=\"translate({}, {})\">\n",
        f64::from(size) / 2.0,
        f64::from(size) / 2.0
    ));
    svg.push_str(&format!(
        "    <circle r=\"{}\" cx=\"0\" cy=\"0\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
        r, TRACK_COLOR, chart.stroke_width
    ));

    for segment in &chart.segments {
        svg.push_str(&format!(
            "    <circle r=\"{}\" cx=\"0\" cy=\"0\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-dasharray=\"{} {}\" stroke-dashoffset=\"{}\" transform=\"rotate(-90)\" stroke-linecap=\"butt\"/>\n",
            r,
            escape(&segment.color),
            chart.stroke_width,
            segment.arc_length,
            (c - segment.arc_length).max(0.0),
            0.0 - segment.arc_offset,
        ));
    }

    let hole = r.saturating_sub(chart.stroke_width + 2);
    svg.push_str(&format!(
        "    <circle r=\"{}\" cx=\"0\" cy=\"0\" fill=\"#fff\" stroke=\"none\"/>\n",
        hole
    ));
    svg.push_str(&format!(
        "    <text x=\"0\" y=\"-6\" text-anchor=\"middle\" font-size=\"14\" font-weight=\"700\" fill=\"#0f172a\">{}</text>\n",
        chart.total
    ));
    svg.push_str(&format!(
        "    <text x=\"0\" y=\"12\" text-anchor=\"middle\" font-size=\"11\" fill=\"#6b7280\">{}</text>\n",
        escape(caption)
    ));
    svg.push_str("  </g>\n");
    svg.push_str("</svg>\n");

    svg
}

/// Render the legend as an HTML list: swatch, label, value and percentage.
pub fn render_legend(chart: &RingChart) -> String {
    let mut html = String::from("<ul class=\"legend\">\n");

    for entry in &chart.legend {
        html.push_str(&format!(
            "  <li><span class=\"swatch\" style=\"background:{}\"></span><span class=\"label\">{}</span><span class=\"value\">{} ({}%)</span></li>\n",
            escape(&entry.color),
            escape(&entry.label),
            entry.value,
            entry.percent
        ));
    }

    html.push_str("</ul>\n");
    html
}
