//! Traversal bounds.
//!
//! The walk performs no cycle detection. Instead every pass runs under two
//! bounds that turn a runaway traversal into a reported failure:
//!
//! - **`max_depth`**: how many aggregates may be nested inside one root
//!   member. Exceeding it aborts that member's branch.
//! - **`max_visits`**: how many values one pass may visit in total.
//!   Exceeding it abandons the pass.
//!
//! # Environment
//!
//! [`ReclaimConfig::from_env`] reads `POOL_RECLAIM_MAX_DEPTH` and
//! `POOL_RECLAIM_MAX_VISITS`.

/// Environment variable overriding [`ReclaimConfig::max_depth`].
pub const MAX_DEPTH_ENV: &str = "POOL_RECLAIM_MAX_DEPTH";

/// Environment variable overriding [`ReclaimConfig::max_visits`].
pub const MAX_VISITS_ENV: &str = "POOL_RECLAIM_MAX_VISITS";

const DEFAULT_MAX_DEPTH: usize = 512;
const DEFAULT_MAX_VISITS: usize = 1_000_000;

/// Bounds for one reclaim pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReclaimConfig {
    /// Maximum aggregate nesting below a root member.
    pub max_depth: usize,
    /// Maximum number of values visited per pass.
    pub max_visits: usize,
}

impl Default for ReclaimConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_visits: DEFAULT_MAX_VISITS,
        }
    }
}

impl ReclaimConfig {
    /// Defaults, overridden by any valid environment settings.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by whatever `lookup` returns for the
    /// environment keys. Unparsable values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(depth) = parse_bound(MAX_DEPTH_ENV, lookup(MAX_DEPTH_ENV)) {
            config.max_depth = depth;
        }
        if let Some(visits) = parse_bound(MAX_VISITS_ENV, lookup(MAX_VISITS_ENV)) {
            config.max_visits = visits;
        }
        config
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_max_visits(mut self, max_visits: usize) -> Self {
        self.max_visits = max_visits;
        self
    }
}

fn parse_bound(key: &str, raw: Option<String>) -> Option<usize> {
    let raw = raw?;
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring invalid traversal bound");
            None
        }
        Ok(bound) => Some(bound),
    }
}
