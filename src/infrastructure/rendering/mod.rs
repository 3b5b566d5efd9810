//! Canvas 2D chart rendering: a per-target instance registry over plain
//! bar and doughnut painters.

mod canvas_chart;
pub mod chart_surface;

pub use chart_surface::*;
