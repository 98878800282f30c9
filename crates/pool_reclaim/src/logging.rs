//! Opt-in console output for reclaim passes.
//!
//! The library only emits `tracing` events: releases at `debug`, visited
//! members at `trace`, diagnostics at `warn`. Hosts that already run
//! a subscriber see them there. Hosts without one can call
//! [`init_tracing`] to print them, filtered by [`LOG_ENV`] (a level for this
//! crate alone) or, failing that, by the usual `RUST_LOG` directives.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding a level for this crate's events only,
/// e.g. `POOL_RECLAIM_LOG=debug`. Takes precedence over `RUST_LOG`.
pub const LOG_ENV: &str = "POOL_RECLAIM_LOG";

/// Target prefix shared by every event this crate emits.
const CRATE_TARGET: &str = "pool_reclaim";

static SUBSCRIBER: Once = Once::new();

/// Install a console subscriber for reclaim events.
///
/// Does nothing when neither [`LOG_ENV`] nor `RUST_LOG` holds a usable
/// filter, or when the host already owns the global subscriber. Only the
/// first call has any effect.
pub fn init_tracing() {
    SUBSCRIBER.call_once(|| {
        let Some(filter) = filter_from_lookup(|key| std::env::var(key).ok()) else {
            return;
        };
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .try_init();
    });
}

/// Build the filter from [`LOG_ENV`], then `RUST_LOG`. Blank or malformed
/// values are passed over.
fn filter_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<EnvFilter> {
    let scoped = lookup(LOG_ENV)
        .map(|level| level.trim().to_owned())
        .filter(|level| !level.is_empty())
        .and_then(|level| EnvFilter::try_new(format!("{CRATE_TARGET}={level}")).ok());

    scoped.or_else(|| {
        lookup("RUST_LOG")
            .filter(|directives| !directives.trim().is_empty())
            .and_then(|directives| EnvFilter::try_new(directives).ok())
    })
}
