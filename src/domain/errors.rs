//! Domain error types
//!
//! These errors are framework-agnostic. Services recover them at the boundary
//! that issued the remote call; they never reach the view layer.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// Network failure, timeout or undecodable body
    Transport(String),
    /// Remote answered with a non-success status
    Status(u16),
    /// Response decoded but an expected key or field is absent
    ShapeMismatch(String),
    /// Invalid configuration
    Config(String),
}

impl DomainError {
    /// Transport and non-success status are both transport failures
    pub fn is_transport(&self) -> bool {
        matches!(self, DomainError::Transport(_) | DomainError::Status(_))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Transport(msg) => write!(f, "Transport failure: {}", msg),
            DomainError::Status(code) => write!(f, "Remote returned status: {}", code),
            DomainError::ShapeMismatch(msg) => write!(f, "Unexpected response shape: {}", msg),
            DomainError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => DomainError::Status(status.as_u16()),
            None => DomainError::Transport(e.to_string()),
        }
    }
}
