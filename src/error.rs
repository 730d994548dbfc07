use thiserror::Error;

/// Top-level error type for the equicut splitter.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no feasible cut: {0}")]
    Infeasible(String),

    #[error("numerical failure: {0}")]
    NumericalFailure(String),
}

/// Convenience type alias for results using [`SplitError`].
pub type Result<T> = std::result::Result<T, SplitError>;
