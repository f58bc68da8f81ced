//! Shared domain contract: identifiable entities and the error type
//! every repository and command returns.

use serde::{Deserialize, Serialize};

/// Anything the repositories store: boards, lists, cards, checklists
/// and their items. Each carries a stable id the UI can key on.
pub trait Entity: Sized + Send + Sync + Clone {
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    fn id(&self) -> Self::Id;
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Errors crossing the command boundary. Serializable so the frontend
/// receives them as structured values rather than opaque strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainError {
    NotFound(String),
    InvalidInput(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
