use crate::core::{AxisDirection, LabelSize, PlotArea};
use crate::scene::LineGeometry;

/// On-screen placement of a separator: its line and the label coordinate
/// along the separator's direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparatorPose {
    pub line: LineGeometry,
    /// Label `top` for `Y` separators, label `left` for `X` separators.
    pub label_along: f64,
}

/// Places a separator at `pixel` along `direction`.
///
/// The line spans the plot area across the other direction and the label is
/// centered on `pixel`. X and Y only differ in which coordinate is held fixed.
#[must_use]
pub fn separator_pose(
    pixel: f64,
    plot_area: PlotArea,
    direction: AxisDirection,
    label_size: LabelSize,
) -> SeparatorPose {
    SeparatorPose {
        line: LineGeometry::across(direction, pixel, plot_area.cross_span(direction)),
        label_along: pixel - label_size.extent_along(direction) * 0.5,
    }
}
