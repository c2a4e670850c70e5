use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to load dataset from `{location}`: {reason}")]
    DatasetLoad { location: String, reason: String },

    #[error("dataset has not been loaded")]
    DatasetNotLoaded,

    #[error("no measures found for {level} `{name}`")]
    EmptySelection { level: &'static str, name: String },

    #[error("no subsector data available for the Industrie sector")]
    MissingSubsectorData,

    #[error("event `{event}` is not valid in view `{view}`")]
    InvalidTransition { view: String, event: String },
}

impl ChartError {
    /// Errors that leave the controller in its last valid state and only
    /// warrant a non-fatal notice.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::EmptySelection { .. } | Self::MissingSubsectorData | Self::InvalidTransition { .. }
        )
    }
}
