//! The side channel for reclaim failures.
//!
//! A pass that hit failures emits exactly one [`Diagnostic`] to its
//! [`DiagnosticSink`]. Passes without failures emit nothing.

use parking_lot::Mutex;

use crate::error::{ErrorCode, ReclaimError};

/// One record describing a pass that did not complete cleanly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: ErrorCode,
    /// Type name of the root that was being reclaimed.
    pub root: &'static str,
    pub message: String,
    /// Every failure, in traversal order.
    pub errors: Vec<ReclaimError>,
}

impl Diagnostic {
    pub(crate) fn for_failures(root: &'static str, errors: &[ReclaimError]) -> Self {
        let abandoned = errors.iter().any(ReclaimError::is_fatal);
        let message = if abandoned {
            format!(
                "reclaim of `{root}` was abandoned after {} failure(s); remaining resources were not released",
                errors.len()
            )
        } else {
            format!(
                "reclaim of `{root}` finished with {} failure(s); affected resources were not released",
                errors.len()
            )
        };

        Self {
            code: ErrorCode::R0100,
            root,
            message,
            errors: errors.to_vec(),
        }
    }

    /// Failure details joined into one line each.
    pub fn detail(&self) -> String {
        self.errors
            .iter()
            .map(|err| format!("[{}] {err}", err.code()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Receiver for reclaim diagnostics.
pub trait DiagnosticSink {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Default sink: one `tracing` warning per diagnostic.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        tracing::warn!(
            code = %diagnostic.code,
            root = diagnostic.root,
            failures = diagnostic.errors.len(),
            detail = %diagnostic.detail(),
            "{}",
            diagnostic.message
        );
    }
}

/// Sink that keeps diagnostics in memory until drained.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Take every recorded diagnostic, leaving the sink empty.
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.records.lock())
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.records.lock().push(diagnostic.clone());
    }
}
