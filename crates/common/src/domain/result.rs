use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Group creation failed: {0}")]
    GroupCreationFailed(String),

    #[error("Document existence check failed for {document}: HTTP {status}")]
    DocumentCheckFailed { document: String, status: u16 },

    #[error("Wiki transport error during {operation}: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    #[error("Unexpected wiki status {status} from {operation}")]
    UnexpectedStatus { operation: &'static str, status: u16 },

    #[error("Wiki space not found: {0}")]
    SpaceNotFound(i64),

    #[error("Wiki space already exists: {0}")]
    SpaceAlreadyExists(String),

    #[error("Repository error: {0}")]
    RepositoryError(#[from] anyhow::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Remote failures that leave no guaranteed state change behind.
    ///
    /// Boolean reconciler operations report these as `false`; everything else
    /// is a precondition or contract failure and is raised to the caller.
    pub fn is_fail_soft(&self) -> bool {
        matches!(
            self,
            DomainError::Transport { .. }
                | DomainError::UnexpectedStatus { .. }
                | DomainError::DocumentCheckFailed { .. }
        )
    }
}
