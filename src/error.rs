use thiserror::Error;

/// Every failure the network surfaces to its caller.
///
/// Operations that return one of these have not mutated any committed state,
/// so the caller can simply drop the error and keep using the network.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Malformed constructor input (unset transfer function, zero width,
    /// empty layer, inverted weight range).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An input or expected-output vector does not match the network width.
    #[error("{what} has length {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A layer, neuron, weight, input or output index outside its bound.
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed network spec: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetworkError>;

impl NetworkError {
    pub(crate) fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        NetworkError::IndexOutOfRange { what, index, len }
    }

    pub(crate) fn mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        NetworkError::DimensionMismatch { what, expected, actual }
    }
}

/// Returns `Ok(())` when `index < len`, the matching `IndexOutOfRange` otherwise.
pub(crate) fn check_index(what: &'static str, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(NetworkError::out_of_range(what, index, len))
    }
}
