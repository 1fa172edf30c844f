//! Domain error types.

/// Top-level error type for stocksim.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("window out of range: cursor {cursor:?}, window {window}, {len} days available")]
    OutOfRange {
        cursor: Option<usize>,
        window: usize,
        len: usize,
    },

    #[error("moving average window must be non-zero")]
    DivideByZero,

    #[error("data format error: {reason}")]
    DataFormat { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no data for {code}")]
    NoData { code: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SimError {
    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            SimError::Io(_) => 1,
            SimError::ConfigParse { .. }
            | SimError::ConfigMissing { .. }
            | SimError::ConfigInvalid { .. } => 2,
            SimError::DataFormat { .. } => 3,
            SimError::OutOfRange { .. } | SimError::DivideByZero => 4,
            SimError::NoData { .. } => 5,
        }
    }
}

impl From<&SimError> for std::process::ExitCode {
    fn from(err: &SimError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
