//! Domain error types.

/// Top-level error type for fourd.
#[derive(Debug, thiserror::Error)]
pub enum FourdError {
    #[error("malformed draw record: date {date:?} is not a valid YYYY-MM-DD date")]
    MalformedRecord { date: String },

    #[error("invalid digit filter {value:?}: expected digits 0-9")]
    InvalidDigit { value: String },

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

    #[error("store error: {reason}")]
    Store { reason: String },

    #[error("no draws in history: {reason}")]
    NoData { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&FourdError> for std::process::ExitCode {
    fn from(err: &FourdError) -> Self {
        let code: u8 = match err {
            FourdError::Io(_) => 1,
            FourdError::ConfigParse { .. }
            | FourdError::ConfigMissing { .. }
            | FourdError::ConfigInvalid { .. } => 2,
            FourdError::Store { .. } => 3,
            FourdError::MalformedRecord { .. } | FourdError::InvalidDigit { .. } => 4,
            FourdError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
