// Domain errors - Failures reported by collaborator ports

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// File not found
    FileNotFound(String),
    /// Media prober failed or returned unreadable output
    ProbeFail(String),
    /// A diagnostic filter subprocess failed
    FilterFail(String),
    /// Frame sampler could not open or decode the input
    SamplerFail(String),
    /// Collaborator was not initialized at startup
    NotAvailable(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::FileNotFound(msg) => write!(f, "File not found: {}", msg),
            DomainError::ProbeFail(msg) => write!(f, "Probe failed: {}", msg),
            DomainError::FilterFail(msg) => write!(f, "Filter failed: {}", msg),
            DomainError::SamplerFail(msg) => write!(f, "Frame sampling failed: {}", msg),
            DomainError::NotAvailable(msg) => write!(f, "Not available: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
