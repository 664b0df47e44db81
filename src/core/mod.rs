pub mod scale;
pub mod types;

pub use scale::LinearScale;
pub use types::{AxisDirection, LabelSize, PlotArea, Viewport};
