//! Failures encountered while walking a graph.
//!
//! None of these ever reach the caller of [`reclaim`](crate::reclaim) as an
//! error: they are collected into the [`ReclaimReport`](crate::ReclaimReport)
//! and forwarded to the diagnostic sink.

use std::fmt;

use crate::handle::ReleaseFailure;
use crate::path::SlotPath;

/// A failure recorded during a reclaim pass.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReclaimError {
    /// The shape of a value could not be enumerated.
    ///
    /// Aborts the branch rooted at the current member.
    #[error("cannot introspect `{path}`: {reason}")]
    Introspection { path: SlotPath, reason: String },

    /// A handle's `release()` failed or panicked.
    ///
    /// The handle keeps its slot; siblings are still visited.
    #[error("failed to release {handle} at `{path}`: {source}")]
    Release {
        path: SlotPath,
        handle: String,
        #[source]
        source: ReleaseFailure,
    },

    /// Nesting went deeper than the configured bound.
    ///
    /// Aborts the branch rooted at the current member.
    #[error("nesting depth exceeded {limit} at `{path}` (cyclic graph?)")]
    DepthExceeded { path: SlotPath, limit: usize },

    /// More values were visited than the configured budget allows.
    ///
    /// Abandons the whole pass.
    #[error("visit budget of {limit} values exhausted at `{path}` (cyclic graph?)")]
    VisitBudgetExceeded { path: SlotPath, limit: usize },

    /// Something other than `release()` panicked mid-walk.
    ///
    /// Abandons the whole pass.
    #[error("walk panicked near `{path}`: {message}")]
    Panicked { path: SlotPath, message: String },
}

impl ReclaimError {
    /// Stable code for searching logs.
    pub fn code(&self) -> ErrorCode {
        match self {
            ReclaimError::Introspection { .. } => ErrorCode::R0001,
            ReclaimError::Release { .. } => ErrorCode::R0002,
            ReclaimError::DepthExceeded { .. } => ErrorCode::R0003,
            ReclaimError::VisitBudgetExceeded { .. } => ErrorCode::R0004,
            ReclaimError::Panicked { .. } => ErrorCode::R0005,
        }
    }

    /// Where the failure happened.
    pub fn path(&self) -> &SlotPath {
        match self {
            ReclaimError::Introspection { path, .. }
            | ReclaimError::Release { path, .. }
            | ReclaimError::DepthExceeded { path, .. }
            | ReclaimError::VisitBudgetExceeded { path, .. }
            | ReclaimError::Panicked { path, .. } => path,
        }
    }

    /// Whether the failure ends the whole pass rather than one branch.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ReclaimError::VisitBudgetExceeded { .. } | ReclaimError::Panicked { .. }
        )
    }
}

/// Error codes for reclaim failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Introspection failure.
    R0001,
    /// Release failure.
    R0002,
    /// Depth bound exceeded.
    R0003,
    /// Visit budget exhausted.
    R0004,
    /// Panic during walk.
    R0005,
    /// Summary of a pass with failures.
    R0100,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::R0001 => "R0001",
            ErrorCode::R0002 => "R0002",
            ErrorCode::R0003 => "R0003",
            ErrorCode::R0004 => "R0004",
            ErrorCode::R0005 => "R0005",
            ErrorCode::R0100 => "R0100",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
