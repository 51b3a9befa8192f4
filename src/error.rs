//! Error Types
//!
//! Every failure a user action can hit. None is fatal; the dispatcher turns
//! each one into a notice (and a debug record for admins).

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::level::{AccessLevel, Action};

/// Repository operation, used for messages and debug records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Debug record tag for a successful call
    pub fn tag(&self) -> &'static str {
        match self {
            Operation::Read => "READ",
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        }
    }

    /// Debug record tag for a failed call
    pub fn error_tag(&self) -> &'static str {
        match self {
            Operation::Read => "READ_ERROR",
            Operation::Create => "CREATE_ERROR",
            Operation::Update => "UPDATE_ERROR",
            Operation::Delete => "DELETE_ERROR",
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Operation::Read => Action::Read,
            Operation::Create => Action::Create,
            Operation::Update => Action::Update,
            Operation::Delete => Action::Delete,
        }
    }

    /// Message used when the server gives none
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Operation::Read => "Error loading tasks",
            Operation::Create => "Error creating task",
            Operation::Update => "Error updating task",
            Operation::Delete => "Error deleting task",
        }
    }

    /// Shown while the request is in flight
    pub fn progress_message(&self) -> &'static str {
        match self {
            Operation::Read => "Loading tasks...",
            Operation::Create => "Creating task...",
            Operation::Update => "Updating task...",
            Operation::Delete => "Deleting task...",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Read => "read",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("API not configured: {0}")]
    Configuration(String),

    #[error("level `{level}` is not allowed to {action}")]
    Permission { level: AccessLevel, action: Action },

    #[error("invalid task: {0}")]
    Validation(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("{message}")]
    Api {
        operation: Operation,
        status: u16,
        message: String,
    },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl AppError {
    /// Errors raised before any request was sent
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            AppError::Configuration(_) | AppError::Permission { .. } | AppError::Validation(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
