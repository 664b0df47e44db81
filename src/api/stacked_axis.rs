use serde::{Deserialize, Serialize};

use crate::core::{AxisDirection, LinearScale};
use crate::error::ChartResult;
use crate::separator::{AxisOrigin, SeparatorChart};

/// One axis instance of a direction; charts may stack several per direction.
///
/// Besides the current range it remembers the range that was on screen at the
/// last reconciliation pass, which is where new separators slide in from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackedAxis {
    scale: LinearScale,
    last_rendered: Option<LinearScale>,
}

impl StackedAxis {
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        Ok(Self {
            scale: LinearScale::new(min, max)?,
            last_rendered: None,
        })
    }

    #[must_use]
    pub fn scale(&self) -> LinearScale {
        self.scale
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.scale.domain()
    }

    #[must_use]
    pub fn last_rendered_range(&self) -> Option<(f64, f64)> {
        self.last_rendered.map(LinearScale::domain)
    }

    pub fn set_range(&mut self, min: f64, max: f64) -> ChartResult<()> {
        self.scale = LinearScale::new(min, max)?;
        Ok(())
    }

    /// Records the current range as the one on screen.
    pub fn commit(&mut self) {
        self.last_rendered = Some(self.scale);
    }
}

impl AxisOrigin for StackedAxis {
    /// Pixel `value` occupied under the last rendered range, so a new
    /// separator appears to travel with the pan/zoom that revealed it.
    /// Before any pass it enters from the start edge of the plot area.
    fn from_last_axis(
        &self,
        value: f64,
        direction: AxisDirection,
        chart: &dyn SeparatorChart,
    ) -> ChartResult<f64> {
        let plot_area = chart.plot_area();
        match self.last_rendered {
            Some(previous) => previous.value_to_pixel(value, plot_area, direction),
            None => {
                let (start, end) = plot_area.along_span(direction);
                Ok(match direction {
                    AxisDirection::X => start,
                    AxisDirection::Y => end,
                })
            }
        }
    }
}
