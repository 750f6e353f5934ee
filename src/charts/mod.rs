//! Charts module - Chart descriptions and static rendering

mod plotter;
#[cfg(feature = "render")]
mod renderer;

pub use plotter::{ChartPlotter, ChartSeries, LineChart, ReferenceLine};
#[cfg(feature = "render")]
pub use renderer::{RenderError, SvgRenderer};
