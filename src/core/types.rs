use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Screen axis a separator belongs to.
///
/// `Y` separators are horizontal grid lines placed at a vertical pixel,
/// `X` separators are vertical grid lines placed at a horizontal pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisDirection {
    X,
    Y,
}

impl AxisDirection {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// Full canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Plot-area rectangle in pixels, the region grid lines span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "plot area origin must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(ChartError::InvalidPlotArea {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Pixel extent a separator line spans, held constant while the separator
    /// moves along `direction`.
    #[must_use]
    pub fn cross_span(self, direction: AxisDirection) -> (f64, f64) {
        match direction {
            AxisDirection::Y => (self.x, self.x + self.width),
            AxisDirection::X => (self.y, self.y + self.height),
        }
    }

    /// Pixel extent values are mapped into along `direction`.
    #[must_use]
    pub fn along_span(self, direction: AxisDirection) -> (f64, f64) {
        self.cross_span(direction.other())
    }
}

/// Measured size of a separator label.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelSize {
    pub width: f64,
    pub height: f64,
}

impl LabelSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Label extent measured along the direction it is centered on.
    #[must_use]
    pub fn extent_along(self, direction: AxisDirection) -> f64 {
        match direction {
            AxisDirection::Y => self.height,
            AxisDirection::X => self.width,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width < 0.0
            || self.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "label size must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisDirection, LabelSize, PlotArea};

    #[test]
    fn cross_and_along_spans_swap_with_direction() {
        let area = PlotArea::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(area.cross_span(AxisDirection::Y), (10.0, 110.0));
        assert_eq!(area.cross_span(AxisDirection::X), (20.0, 70.0));
        assert_eq!(area.along_span(AxisDirection::Y), (20.0, 70.0));
        assert_eq!(area.along_span(AxisDirection::X), (10.0, 110.0));
    }

    #[test]
    fn degenerate_plot_area_is_rejected() {
        assert!(PlotArea::new(0.0, 0.0, 0.0, 10.0).validate().is_err());
        assert!(PlotArea::new(f64::NAN, 0.0, 10.0, 10.0).validate().is_err());
        assert!(PlotArea::new(0.0, 0.0, 10.0, 10.0).validate().is_ok());
    }

    #[test]
    fn label_extent_follows_direction() {
        let size = LabelSize::new(30.0, 12.0);
        assert_eq!(size.extent_along(AxisDirection::Y), 12.0);
        assert_eq!(size.extent_along(AxisDirection::X), 30.0);
    }
}
