use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::scene::LineGeometry;

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Same color with alpha multiplied by a primitive opacity.
    #[must_use]
    pub fn faded(self, opacity: f64) -> Self {
        Self {
            alpha: self.alpha * opacity.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Draw command for one grid line in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub geometry: LineGeometry,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(geometry: LineGeometry, stroke_width: f64, color: Color) -> Self {
        Self {
            geometry,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        let LineGeometry { x1, y1, x2, y2 } = self.geometry;
        if !x1.is_finite() || !y1.is_finite() || !x2.is_finite() || !y2.is_finite() {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one separator label, positioned by its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub left: f64,
    pub top: f64,
    pub font_size_px: f64,
    pub color: Color,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        left: f64,
        top: f64,
        font_size_px: f64,
        color: Color,
    ) -> Self {
        Self {
            text: text.into(),
            left,
            top,
            font_size_px,
            color,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.left.is_finite() || !self.top.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Paint used for separator primitives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridStyle {
    pub line_color: Color,
    pub line_width_px: f64,
    pub label_color: Color,
    pub label_font_size_px: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            line_color: Color::rgba(0.55, 0.58, 0.62, 0.35),
            line_width_px: 1.0,
            label_color: Color::rgb(0.25, 0.27, 0.30),
            label_font_size_px: 12.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, LinePrimitive};
    use crate::scene::LineGeometry;

    #[test]
    fn faded_color_scales_alpha_only() {
        let color = Color::rgba(0.2, 0.4, 0.6, 0.5).faded(0.5);
        assert_eq!(color, Color::rgba(0.2, 0.4, 0.6, 0.25));
        assert_eq!(Color::rgb(0.0, 0.0, 0.0).faded(3.0).alpha, 1.0);
    }

    #[test]
    fn line_with_nan_endpoint_is_invalid() {
        let line = LinePrimitive::new(
            LineGeometry::new(0.0, f64::NAN, 10.0, 0.0),
            1.0,
            Color::rgb(0.0, 0.0, 0.0),
        );
        assert!(line.validate().is_err());
    }
}
