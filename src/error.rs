use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, NetError>;

/// Everything that can go wrong when building, editing or training a network.
///
/// All of these are detected before any parameter is touched, so a rejected
/// call never leaves a half-updated network behind.
#[derive(Error, Debug)]
pub enum NetError {
    /// Malformed layer-size sequence.
    #[error("invalid architecture: {reason}")]
    InvalidArchitecture { reason: String },

    /// An input or target vector disagrees with the declared architecture.
    #[error("dimension mismatch for {what}: got {got}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },

    /// Manual parameter access outside the network's shape.
    #[error("{what} index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// A host-side setting such as the learning rate is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NetError {
    pub(crate) fn invalid_architecture(reason: impl Into<String>) -> NetError {
        NetError::InvalidArchitecture { reason: reason.into() }
    }
}

/// Fails with `IndexOutOfBounds` unless `index < len`.
pub(crate) fn check_index(what: &'static str, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(NetError::IndexOutOfBounds { what, index, len })
    }
}

/// Fails with `DimensionMismatch` unless `got == expected`.
pub(crate) fn check_len(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got == expected {
        Ok(())
    } else {
        Err(NetError::DimensionMismatch { what, got, expected })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_quantity() {
        let err = check_len("input", 3, 2).unwrap_err();
        assert_eq!(err.to_string(), "dimension mismatch for input: got 3, expected 2");

        let err = check_index("layer", 4, 2).unwrap_err();
        assert_eq!(err.to_string(), "layer index 4 out of bounds (len 2)");
    }

    #[test]
    fn in_range_checks_pass() {
        assert!(check_len("target", 1, 1).is_ok());
        assert!(check_index("dst", 0, 1).is_ok());
        assert!(check_index("dst", 0, 0).is_err());
    }
}
