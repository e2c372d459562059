use thiserror::Error;

/// Errors raised at the buffer-exchange boundary.
///
/// The arithmetic itself never fails; degenerate inputs propagate as Inf/NaN.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    #[error("Buffer length mismatch: expected {expected} floats, got {actual}")]
    BufferLength { expected: usize, actual: usize },
}

pub type LinalgResult<T> = Result<T, LinalgError>;
