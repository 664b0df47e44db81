//! chart-separators: animated axis grid lines for retained-mode charts.
//!
//! Each tick of an axis owns a [`separator::Separator`]: a grid line spanning
//! the plot area plus its value label. Separators move between three states
//! (`InitialAdd`, `DrawOrKeep`, `Remove`) and either set their geometry
//! directly or animate into it, detaching from the scene once a removal fade
//! finishes. [`axis::AxisSeparators`] decides which state each separator gets
//! on every pass and [`api::GridChart`] drives the whole loop.

pub mod animation;
pub mod api;
pub mod axis;
pub mod core;
pub mod error;
pub mod render;
pub mod scene;
pub mod separator;
pub mod telemetry;

pub use api::{GridChart, GridChartConfig};
pub use error::{ChartError, ChartResult};
