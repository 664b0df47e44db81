use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Per-pass classification of a separator, assigned by the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeparatorState {
    /// Tick value dropped out of the current tick set.
    Remove,
    /// Tick value is present this pass; the separator is new or kept.
    DrawOrKeep,
    /// First-ever render of the axis: no transition at all.
    InitialAdd,
}

impl SeparatorState {
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Remove => 0,
            Self::DrawOrKeep => 1,
            Self::InitialAdd => 2,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Remove => "remove",
            Self::DrawOrKeep => "draw_or_keep",
            Self::InitialAdd => "initial_add",
        }
    }
}

impl TryFrom<u8> for SeparatorState {
    type Error = ChartError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Remove),
            1 => Ok(Self::DrawOrKeep),
            2 => Ok(Self::InitialAdd),
            other => Err(ChartError::InvalidState(format!(
                "unknown separator state code {other}"
            ))),
        }
    }
}

impl FromStr for SeparatorState {
    type Err = ChartError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim() {
            "remove" | "Remove" => Ok(Self::Remove),
            "draw_or_keep" | "DrawOrKeep" => Ok(Self::DrawOrKeep),
            "initial_add" | "InitialAdd" => Ok(Self::InitialAdd),
            other => Err(ChartError::InvalidState(format!(
                "unknown separator state `{other}`"
            ))),
        }
    }
}

impl fmt::Display for SeparatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
