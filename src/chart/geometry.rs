//! Arc geometry for ring charts.
//!
//! Each count becomes one arc whose length is its share of the
//! circumference, rounded on its own. Arcs start at the end of the
//! previous one, so the drawn total can miss the true circumference by up
//! to one unit per segment. No normalization pass is applied.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// Colors used when the caller supplies no palette, or one too short.
pub const DEFAULT_PALETTE: [&str; 5] = ["#2b7df7", "#34d399", "#f59e0b", "#f97316", "#ef4444"];

/// Space left between the ring and the edge of the drawing, for stroke overhang.
const EDGE_MARGIN: u32 = 6;

/// Thinnest ring stroke.
const MIN_STROKE_WIDTH: u32 = 12;

/// One colored arc of the ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSegment {
    /// Position of the count in the input.
    pub index: usize,
    /// The raw count.
    pub value: u32,
    /// Share of the total, 0 when the total is 0.
    pub fraction: f64,
    /// Rounded arc length along the circumference.
    pub arc_length: f64,
    /// Sum of the arc lengths of all earlier segments.
    pub arc_offset: f64,
    pub color: String,
}

/// One legend row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub value: u32,
    /// Rounded percentage of the total.
    pub percent: u32,
}

/// Complete geometry of a ring chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingChart {
    pub diameter: u32,
    pub radius: u32,
    pub circumference: f64,
    pub stroke_width: u32,
    pub total: u64,
    pub segments: Vec<ChartSegment>,
    pub legend: Vec<LegendEntry>,
}

impl RingChart {
    /// Compute arcs and legend for `counts`.
    ///
    /// Missing or empty labels fall back to the 1-based position. A palette
    /// is only used when it has a color for every count; otherwise the
    /// default palette is cycled.
    pub fn compute(
        counts: &[u32],
        labels: &[String],
        diameter: u32,
        palette: Option<&[String]>,
    ) -> Self {
        let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();
        let radius = (diameter / 2).saturating_sub(EDGE_MARGIN);
        let circumference = 2.0 * PI * f64::from(radius);
        let stroke_width = MIN_STROKE_WIDTH.max(diameter / 12);

        let colors: Vec<&str> = match palette {
            Some(p) if !p.is_empty() && p.len() >= counts.len() => {
                p.iter().map(String::as_str).collect()
            }
            _ => DEFAULT_PALETTE.to_vec(),
        };

        let mut offset = 0.0;
        let mut segments = Vec::with_capacity(counts.len());
        let mut legend = Vec::with_capacity(counts.len());

        for (index, &value) in counts.iter().enumerate() {
            let fraction = if total == 0 {
                0.0
            } else {
                f64::from(value) / total as f64
            };
            let arc_length = (fraction * circumference).round().max(0.0);
            let color = colors[index % colors.len()].to_string();

            let label = labels
                .get(index)
                .filter(|l| !l.is_empty())
                .cloned()
                .unwrap_or_else(|| (index + 1).to_string());

            legend.push(LegendEntry {
                label,
                color: color.clone(),
                value,
                percent: (fraction * 100.0).round() as u32,
            });

            segments.push(ChartSegment {
                index,
                value,
                fraction,
                arc_length,
                arc_offset: offset,
                color,
            });

            offset += arc_length;
        }

        let chart = Self {
            diameter,
            radius,
            circumference,
            stroke_width,
            total,
            segments,
            legend,
        };

        debug!(
            "Ring chart: {} segments, total {}, drawn {:.0}/{:.2}",
            chart.segments.len(),
            chart.total,
            chart.drawn_length(),
            chart.circumference
        );

        chart
    }

    /// Sum of all drawn arc lengths.
    pub fn drawn_length(&self) -> f64 {
        self.segments.iter().map(|s| s.arc_length).sum()
    }
}
