use crate::domain::DomainError;

/// Classify a reqwest failure into a transport error for `operation`.
pub(crate) fn transport_error(operation: &'static str, error: &reqwest::Error) -> DomainError {
    let kind = if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connect"
    } else if error.is_builder() {
        "request"
    } else if error.is_body() || error.is_decode() {
        "body"
    } else {
        "network"
    };

    DomainError::Transport {
        operation,
        message: format!("{}: {}", kind, error),
    }
}
