use serde::{Deserialize, Serialize};

use crate::core::LabelSize;
use crate::error::{ChartError, ChartResult};

/// Produces separator label text and its measured size.
///
/// Text formatting belongs to the host; this trait is the seam it plugs into.
pub trait TickLabeler {
    fn text(&self, value: f64) -> String;

    fn measure(&self, text: &str) -> LabelSize;
}

/// Fixed-precision decimal labels measured with a deterministic,
/// backend-independent width estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedPrecisionLabeler {
    pub precision: usize,
    pub font_size_px: f64,
    pub line_height_ratio: f64,
}

impl Default for FixedPrecisionLabeler {
    fn default() -> Self {
        Self {
            precision: 2,
            font_size_px: 12.0,
            line_height_ratio: 1.2,
        }
    }
}

impl FixedPrecisionLabeler {
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        for (name, value) in [
            ("font_size_px", self.font_size_px),
            ("line_height_ratio", self.line_height_ratio),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "labeler `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

impl TickLabeler for FixedPrecisionLabeler {
    fn text(&self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.precision)
    }

    fn measure(&self, text: &str) -> LabelSize {
        LabelSize::new(
            estimate_label_text_width_px(text, self.font_size_px),
            self.font_size_px * self.line_height_ratio,
        )
    }
}

pub(crate) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

#[cfg(test)]
mod tests {
    use super::{FixedPrecisionLabeler, TickLabeler};

    #[test]
    fn text_uses_configured_precision() {
        let labeler = FixedPrecisionLabeler::default().with_precision(1);
        assert_eq!(labeler.text(12.345), "12.3");
        assert_eq!(labeler.text(-0.5), "-0.5");
    }

    #[test]
    fn wider_text_measures_wider() {
        let labeler = FixedPrecisionLabeler::default();
        let narrow = labeler.measure("1.00");
        let wide = labeler.measure("1000.00");
        assert!(wide.width > narrow.width);
        assert!((narrow.height - 14.4).abs() <= 1e-9);
    }

    #[test]
    fn non_positive_or_nan_metrics_are_rejected() {
        FixedPrecisionLabeler::default().validate().expect("default labeler");
        let nan_font = FixedPrecisionLabeler {
            font_size_px: f64::NAN,
            ..FixedPrecisionLabeler::default()
        };
        assert!(nan_font.validate().is_err());
        let negative_ratio = FixedPrecisionLabeler {
            line_height_ratio: -1.0,
            ..FixedPrecisionLabeler::default()
        };
        assert!(negative_ratio.validate().is_err());
    }
}
