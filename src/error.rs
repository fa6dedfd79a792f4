//! Error types for the voxa host.

/// Top-level error type for the host side of a search-augmented turn.
#[derive(Debug, thiserror::Error)]
pub enum VoxaError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised while building the search pipeline.
    #[error("search error: {0}")]
    Search(#[from] voxa_search::SearchError),

    /// Async runtime setup error.
    #[error("runtime error: {0}")]
    Runtime(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, VoxaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_errors_convert() {
        let err: VoxaError =
            voxa_search::SearchError::Config("google api_key is not set".into()).into();
        assert_eq!(
            err.to_string(),
            "search error: config error: google api_key is not set"
        );
    }

    #[test]
    fn io_errors_convert() {
        let err: VoxaError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, VoxaError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: missing");
    }
}
