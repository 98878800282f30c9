//! The capability every releasable pool resource provides.

use std::fmt;

/// A handle into an external runtime's live-object pool.
///
/// The runtime owns the underlying resource; this crate only observes it
/// through [`exists`](Self::exists) and destroys it through
/// [`release`](Self::release).
///
/// # Contract
///
/// - `exists` must be safe to call on a handle whose resource vanished
///   out-of-band. It answers `false` instead of failing.
/// - `release` may only be called right after `exists` answered `true`.
///   The walkers in this crate never call it otherwise.
///
/// Both methods take `&self`: handles are addressed, not owned, and they
/// may sit in positions that cannot be borrowed mutably (map keys, set
/// members).
pub trait ResourceHandle {
    /// Whether the underlying resource is still alive.
    fn exists(&self) -> bool;

    /// Ask the runtime to destroy the underlying resource.
    fn release(&self) -> Result<(), ReleaseFailure>;

    /// Human-readable identity used in diagnostics.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_owned()
    }
}

/// Why the resource runtime refused or failed to release a handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseFailure {
    message: String,
}

impl ReleaseFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ReleaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ReleaseFailure {}
