use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_MOVE_DURATION_MS: u64 = 500;
pub const DEFAULT_LABEL_FADE_IN_MS: u64 = 500;
pub const DEFAULT_LINE_FADE_IN_MS: u64 = 1_000;
const MAX_DURATION_MS: u64 = 60_000;

/// Timing of separator transitions.
///
/// Slides and the remove fade share `move_duration_ms`; new grid lines fade in
/// over the longer `line_fade_in_ms` so they appear more gently than they move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeparatorAnimationConfig {
    /// Suppresses every transition: final geometry is applied directly and
    /// removals detach synchronously.
    #[serde(default)]
    pub disable_animation: bool,
    #[serde(default = "default_move_duration_ms")]
    pub move_duration_ms: u64,
    #[serde(default = "default_label_fade_in_ms")]
    pub label_fade_in_ms: u64,
    #[serde(default = "default_line_fade_in_ms")]
    pub line_fade_in_ms: u64,
    #[serde(default)]
    pub easing: Easing,
}

impl Default for SeparatorAnimationConfig {
    fn default() -> Self {
        Self {
            disable_animation: false,
            move_duration_ms: DEFAULT_MOVE_DURATION_MS,
            label_fade_in_ms: DEFAULT_LABEL_FADE_IN_MS,
            line_fade_in_ms: DEFAULT_LINE_FADE_IN_MS,
            easing: Easing::Linear,
        }
    }
}

impl SeparatorAnimationConfig {
    /// Config with every transition suppressed.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            disable_animation: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn with_move_duration_ms(mut self, duration_ms: u64) -> Self {
        self.move_duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn move_duration(&self) -> Duration {
        Duration::from_millis(self.move_duration_ms)
    }

    #[must_use]
    pub fn label_fade_in(&self) -> Duration {
        Duration::from_millis(self.label_fade_in_ms)
    }

    #[must_use]
    pub fn line_fade_in(&self) -> Duration {
        Duration::from_millis(self.line_fade_in_ms)
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("move_duration_ms", self.move_duration_ms),
            ("label_fade_in_ms", self.label_fade_in_ms),
            ("line_fade_in_ms", self.line_fade_in_ms),
        ] {
            if value == 0 || value > MAX_DURATION_MS {
                return Err(ChartError::InvalidData(format!(
                    "`{name}` must be in 1..={MAX_DURATION_MS}"
                )));
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize animation config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse animation config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }
}

fn default_move_duration_ms() -> u64 {
    DEFAULT_MOVE_DURATION_MS
}

fn default_label_fade_in_ms() -> u64 {
    DEFAULT_LABEL_FADE_IN_MS
}

fn default_line_fade_in_ms() -> u64 {
    DEFAULT_LINE_FADE_IN_MS
}

#[cfg(test)]
mod tests {
    use super::SeparatorAnimationConfig;
    use crate::animation::Easing;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config =
            SeparatorAnimationConfig::from_json_str(r#"{ "easing": "EaseOut" }"#).expect("parse");
        assert!(!config.disable_animation);
        assert_eq!(config.move_duration_ms, 500);
        assert_eq!(config.line_fade_in_ms, 1_000);
        assert_eq!(config.easing, Easing::EaseOut);
    }

    #[test]
    fn zero_duration_is_rejected() {
        let err = SeparatorAnimationConfig::from_json_str(r#"{ "move_duration_ms": 0 }"#)
            .expect_err("zero duration");
        assert!(err.to_string().contains("move_duration_ms"));
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let config = SeparatorAnimationConfig::disabled().with_easing(Easing::EaseInOut);
        let json = config.to_json_pretty().expect("serialize");
        let back = SeparatorAnimationConfig::from_json_str(&json).expect("parse");
        assert_eq!(back, config);
    }
}
