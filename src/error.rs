use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Separator classification outside the supported state machine.
    ///
    /// This signals a defect in the reconciliation driver and must not be retried.
    #[error("invalid separator state: {0}")]
    InvalidState(String),

    #[error("invalid plot area: width={width}, height={height}")]
    InvalidPlotArea { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
