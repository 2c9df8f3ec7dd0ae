use thiserror::Error;

/// All errors produced by the StrandCC congestion-control layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrandCcError {
    #[error("unknown protocol type: {0:?} (expected \"Westwood\" or \"WestwoodPlus\")")]
    UnknownProtocolType(String),

    #[error("unknown filter type: {0:?} (expected \"None\" or \"Tustin\")")]
    UnknownFilterType(String),

    #[error("unknown congestion control algorithm: {0:?}")]
    UnknownAlgorithm(String),

    #[error("delayed bandwidth sampling requires a tokio runtime")]
    NoRuntime,
}

pub type Result<T> = std::result::Result<T, StrandCcError>;
