use serde::{Deserialize, Serialize};

use crate::axis::{
    AXIS_X_TARGET_SPACING_PX, AXIS_Y_TARGET_SPACING_PX, FixedPrecisionLabeler, SeparatorIdentity,
};
use crate::core::{AxisDirection, PlotArea, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::GridStyle;
use crate::separator::SeparatorAnimationConfig;

pub const GRID_CHART_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Initial value range of one stacked axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRangeConfig {
    pub min: f64,
    pub max: f64,
}

impl AxisRangeConfig {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Public bootstrap configuration of a [`super::GridChart`].
///
/// Serializable so hosts can persist chart setup instead of inventing an
/// ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridChartConfig {
    pub viewport: Viewport,
    pub plot_area: PlotArea,
    pub x_axes: Vec<AxisRangeConfig>,
    pub y_axes: Vec<AxisRangeConfig>,
    #[serde(default)]
    pub identity: SeparatorIdentity,
    #[serde(default)]
    pub animation: SeparatorAnimationConfig,
    #[serde(default)]
    pub style: GridStyle,
    #[serde(default)]
    pub labeler: FixedPrecisionLabeler,
    #[serde(default = "default_x_tick_spacing_px")]
    pub x_tick_spacing_px: f64,
    #[serde(default = "default_y_tick_spacing_px")]
    pub y_tick_spacing_px: f64,
    /// Thickness reserved for the labels of each stacked axis.
    #[serde(default = "default_axis_label_band_px")]
    pub axis_label_band_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct GridChartConfigJsonContractV1 {
    schema_version: u32,
    config: GridChartConfig,
}

impl GridChartConfig {
    /// Creates a config with one X axis and one Y axis.
    #[must_use]
    pub fn new(
        viewport: Viewport,
        plot_area: PlotArea,
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> Self {
        Self {
            viewport,
            plot_area,
            x_axes: vec![AxisRangeConfig::new(x_range.0, x_range.1)],
            y_axes: vec![AxisRangeConfig::new(y_range.0, y_range.1)],
            identity: SeparatorIdentity::default(),
            animation: SeparatorAnimationConfig::default(),
            style: GridStyle::default(),
            labeler: FixedPrecisionLabeler::default(),
            x_tick_spacing_px: default_x_tick_spacing_px(),
            y_tick_spacing_px: default_y_tick_spacing_px(),
            axis_label_band_px: default_axis_label_band_px(),
        }
    }

    /// Stacks an additional axis instance on `direction`.
    #[must_use]
    pub fn with_stacked_axis(mut self, direction: AxisDirection, min: f64, max: f64) -> Self {
        let axis = AxisRangeConfig::new(min, max);
        match direction {
            AxisDirection::X => self.x_axes.push(axis),
            AxisDirection::Y => self.y_axes.push(axis),
        }
        self
    }

    #[must_use]
    pub fn with_identity(mut self, identity: SeparatorIdentity) -> Self {
        self.identity = identity;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: SeparatorAnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: GridStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_labeler(mut self, labeler: FixedPrecisionLabeler) -> Self {
        self.labeler = labeler;
        self
    }

    #[must_use]
    pub fn with_tick_spacing(mut self, direction: AxisDirection, spacing_px: f64) -> Self {
        match direction {
            AxisDirection::X => self.x_tick_spacing_px = spacing_px,
            AxisDirection::Y => self.y_tick_spacing_px = spacing_px,
        }
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidData(format!(
                "invalid viewport: width={}, height={}",
                self.viewport.width, self.viewport.height
            )));
        }
        self.plot_area.validate()?;
        if self.x_axes.is_empty() || self.y_axes.is_empty() {
            return Err(ChartError::InvalidData(
                "chart needs at least one axis per direction".to_owned(),
            ));
        }
        for (name, value) in [
            ("x_tick_spacing_px", self.x_tick_spacing_px),
            ("y_tick_spacing_px", self.y_tick_spacing_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        if !self.axis_label_band_px.is_finite() || self.axis_label_band_px < 0.0 {
            return Err(ChartError::InvalidData(
                "`axis_label_band_px` must be finite and >= 0".to_owned(),
            ));
        }
        self.labeler.validate()?;
        self.animation.validate()
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = GridChartConfigJsonContractV1 {
            schema_version: GRID_CHART_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart config contract v1: {e}"))
        })
    }

    /// Accepts either a bare config or a versioned v1 contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let config = match serde_json::from_str::<Self>(input) {
            Ok(config) => config,
            Err(_) => {
                let payload: GridChartConfigJsonContractV1 =
                    serde_json::from_str(input).map_err(|e| {
                        ChartError::InvalidData(format!("failed to parse chart config json: {e}"))
                    })?;
                if payload.schema_version != GRID_CHART_CONFIG_JSON_SCHEMA_V1 {
                    return Err(ChartError::InvalidData(format!(
                        "unsupported chart config schema version: {}",
                        payload.schema_version
                    )));
                }
                payload.config
            }
        };
        config.validate()?;
        Ok(config)
    }
}

fn default_x_tick_spacing_px() -> f64 {
    AXIS_X_TARGET_SPACING_PX
}

fn default_y_tick_spacing_px() -> f64 {
    AXIS_Y_TARGET_SPACING_PX
}

fn default_axis_label_band_px() -> f64 {
    48.0
}
