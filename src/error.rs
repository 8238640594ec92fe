use thiserror::Error;

/// Unified error type for release-publish operations
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Argument error: {0}")]
    Argument(String),

    #[error("Branch policy error: {0}")]
    BranchPolicy(String),

    #[error("Version consistency error: {0}")]
    VersionConsistency(String),

    #[error("Tag resolution error: {0}")]
    TagResolution(String),

    #[error("Command `{command}` failed: {detail}")]
    CommandFailure { command: String, detail: String },

    #[error("Configuration error: {0}")]
    Config(String),

    /// A release step failed after the mutation sequence started. Earlier steps
    /// are not rolled back.
    #[error("{step} failed: {source}")]
    Step {
        step: &'static str,
        #[source]
        source: Box<PublishError>,
    },

    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-publish
pub type Result<T> = std::result::Result<T, PublishError>;

impl PublishError {
    pub fn argument(msg: impl Into<String>) -> Self {
        PublishError::Argument(msg.into())
    }

    pub fn branch_policy(msg: impl Into<String>) -> Self {
        PublishError::BranchPolicy(msg.into())
    }

    pub fn version_consistency(msg: impl Into<String>) -> Self {
        PublishError::VersionConsistency(msg.into())
    }

    pub fn tag_resolution(msg: impl Into<String>) -> Self {
        PublishError::TagResolution(msg.into())
    }

    pub fn command_failure(command: impl Into<String>, detail: impl Into<String>) -> Self {
        PublishError::CommandFailure {
            command: command.into(),
            detail: detail.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        PublishError::Config(msg.into())
    }

    pub fn step(step: &'static str, source: PublishError) -> Self {
        PublishError::Step {
            step,
            source: Box::new(source),
        }
    }

    /// Validation errors are raised before any mutation is attempted.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PublishError::Argument(_)
                | PublishError::BranchPolicy(_)
                | PublishError::VersionConsistency(_)
                | PublishError::TagResolution(_)
        )
    }
}
