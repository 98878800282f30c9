//! The public entrypoint.
//!
//! [`reclaim`] never fails from the caller's point of view. Whatever goes
//! wrong inside the walk ends up in the returned [`ReclaimReport`] and,
//! once per pass, in the configured [`DiagnosticSink`].

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::config::ReclaimConfig;
use crate::diagnostic::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{panic_message, ReclaimError};
use crate::members::Members;
use crate::panic_hook::quiet_panics;
use crate::walk::Walker;

/// Counters for one pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReclaimStats {
    /// Values classified, including opaque ones.
    pub visited: usize,
    /// Handles whose `release()` succeeded.
    pub released: usize,
    /// Handles skipped because `exists()` was false.
    pub dead: usize,
    /// Root member slots that were emptied. Slots that were due for
    /// detaching but have no empty form are not counted.
    pub detached: usize,
}

/// What a pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReclaimReport {
    pub stats: ReclaimStats,
    /// Failures in traversal order. Empty for a clean pass.
    pub errors: Vec<ReclaimError>,
}

impl ReclaimReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether a failure ended the pass before every member was visited.
    pub fn was_abandoned(&self) -> bool {
        self.errors.iter().any(ReclaimError::is_fatal)
    }
}

/// Configurable reclaim entrypoint.
///
/// ```text
/// let sink = MemorySink::new();
/// let report = Reclaimer::new()
///     .with_config(ReclaimConfig::from_env())
///     .with_sink(&sink)
///     .reclaim(&mut mission);
/// ```
#[derive(Clone, Copy)]
pub struct Reclaimer<'s> {
    config: ReclaimConfig,
    sink: &'s dyn DiagnosticSink,
}

impl Default for Reclaimer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s> Reclaimer<'s> {
    /// Default bounds, diagnostics to `tracing`.
    pub fn new() -> Self {
        Self {
            config: ReclaimConfig::default(),
            sink: &TracingSink,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ReclaimConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_sink(mut self, sink: &'s dyn DiagnosticSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &ReclaimConfig {
        &self.config
    }

    /// Release every live handle reachable from `root` and detach the
    /// member slots that held them.
    ///
    /// Best effort: a failing handle or branch is recorded and the rest of
    /// the graph is still visited, unless the failure abandons the pass.
    ///
    /// Panics raised during the pass are contained and reported only
    /// through the sink; they are logged at `debug` level instead of being
    /// printed by the panic hook. A host that installs its own panic hook
    /// after the first pass sees them through that hook instead.
    pub fn reclaim<R: Members + ?Sized>(&self, root: &mut R) -> ReclaimReport {
        let root_name = std::any::type_name::<R>();
        let span = tracing::debug_span!("reclaim", root = root_name);
        let _guard = span.enter();

        let mut walker = Walker::new(self.config);
        let outcome = quiet_panics(|| catch_unwind(AssertUnwindSafe(|| walker.walk_root(root))));
        if let Err(payload) = outcome {
            let err = ReclaimError::Panicked {
                path: walker.path().clone(),
                message: panic_message(payload.as_ref()),
            };
            walker.errors.push(err);
        }

        let report = ReclaimReport {
            stats: walker.stats,
            errors: walker.errors,
        };

        if report.is_clean() {
            tracing::debug!(
                released = report.stats.released,
                dead = report.stats.dead,
                detached = report.stats.detached,
                "reclaim complete"
            );
        } else {
            self.sink
                .emit(&Diagnostic::for_failures(root_name, &report.errors));
        }

        report
    }
}

/// Reclaim `root` with default bounds, reporting failures via `tracing`.
pub fn reclaim<R: Members + ?Sized>(root: &mut R) -> ReclaimReport {
    Reclaimer::new().reclaim(root)
}
