//! Ring chart rendering.
//!
//! Converts a list of counts into arc segments laid end to end around a
//! circle, and draws them as SVG.

pub mod geometry;
pub mod svg;

pub use geometry::{RingChart, DEFAULT_PALETTE};
pub use svg::{escape, render_legend, render_svg};
