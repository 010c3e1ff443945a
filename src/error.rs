/// Error types for the Transifex sync workflow
///
/// Remote rejections (non-2xx statuses) and response-parse failures are not
/// errors at this level: the transport hands every status back as a
/// [`crate::api::RemoteResponse`] and the download workflow classifies them
/// as [`crate::repository::FailureKind`] outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransifexError {
    /// A derived slug failed its sanity check; no remote call was made
    SlugGeneration(String),
    /// Connection-level failure talking to the remote API
    Transport(String),
    /// Credential resolution failed
    CredentialError(String),
    /// Local filesystem operation failed
    Io(String),
}

impl std::fmt::Display for TransifexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransifexError::SlugGeneration(msg) => write!(f, "Slug generation error: {}", msg),
            TransifexError::Transport(msg) => write!(f, "Transport error: {}", msg),
            TransifexError::CredentialError(msg) => write!(f, "Credential error: {}", msg),
            TransifexError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for TransifexError {}

/// Result type for Transifex sync operations
pub type TransifexResult<T> = Result<T, TransifexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            TransifexError::SlugGeneration("bad slug".to_string()).to_string(),
            "Slug generation error: bad slug"
        );
        assert_eq!(
            TransifexError::Transport("connection refused".to_string()).to_string(),
            "Transport error: connection refused"
        );
        assert_eq!(
            TransifexError::CredentialError("not set".to_string()).to_string(),
            "Credential error: not set"
        );
        assert_eq!(
            TransifexError::Io("disk full".to_string()).to_string(),
            "I/O error: disk full"
        );
    }
}
