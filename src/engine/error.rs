use ulid::Ulid;

use crate::model::Span;

#[derive(Debug)]
pub enum EngineError {
    /// Interval with `start >= end`.
    InvalidInterval(Span),
    /// Booking claiming zero units.
    InvalidQuantity(Ulid),
    LimitExceeded(&'static str),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidInterval(span) => {
                write!(f, "invalid interval [{}, {})", span.start, span.end)
            }
            EngineError::InvalidQuantity(id) => {
                write!(f, "booking {id} has zero quantity")
            }
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
