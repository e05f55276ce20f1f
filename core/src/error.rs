use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("host is empty")]
    EmptyHost,
    #[error("invalid port: {0}")]
    InvalidPort(u16),
}

#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("concurrency budget closed")]
    Closed(#[from] tokio::sync::AcquireError),
}

/// Outcome of a failed attempt. Failures are deliberately not classified.
#[derive(Debug, Error)]
#[error("attempt failed: {source}")]
pub struct AttemptError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl AttemptError {
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        AttemptError { source: source.into() }
    }
}

impl From<BudgetError> for AttemptError {
    fn from(e: BudgetError) -> Self {
        AttemptError::new(e)
    }
}
