use serde::{Deserialize, Serialize};

use crate::core::types::{AxisDirection, PlotArea};
use crate::error::{ChartError, ChartResult};

/// Linear value-to-pixel mapping for one axis instance.
///
/// `Y` mappings are inverted so larger values sit higher on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !(domain_end - domain_start).is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain width overflows f64".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn value_to_pixel(
        self,
        value: f64,
        plot_area: PlotArea,
        direction: AxisDirection,
    ) -> ChartResult<f64> {
        plot_area.validate()?;
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        let pixel = match direction {
            AxisDirection::X => plot_area.x + normalized * plot_area.width,
            AxisDirection::Y => plot_area.y + (1.0 - normalized) * plot_area.height,
        };
        Ok(pixel)
    }

    pub fn pixel_to_value(
        self,
        pixel: f64,
        plot_area: PlotArea,
        direction: AxisDirection,
    ) -> ChartResult<f64> {
        plot_area.validate()?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = match direction {
            AxisDirection::X => (pixel - plot_area.x) / plot_area.width,
            AxisDirection::Y => 1.0 - (pixel - plot_area.y) / plot_area.height,
        };
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}
