//! Reference chart host driving separators end to end.
//!
//! [`GridChart`] owns stacked axes per direction, one [`crate::axis::AxisSeparators`]
//! set per axis, the retained scene and a renderer. Hosts change axis ranges,
//! call [`GridChart::refresh`] to reconcile, tick [`GridChart::advance`] from
//! their frame clock and [`GridChart::render`] whenever they draw.

mod chart;
mod chart_init;
mod config;
mod stacked_axis;
mod surface;

pub use chart::{AdvanceReport, AxisPassReport, GridChart, RefreshReport};
pub use config::{AxisRangeConfig, GRID_CHART_CONFIG_JSON_SCHEMA_V1, GridChartConfig};
pub use stacked_axis::StackedAxis;
pub use surface::ChartSurface;
