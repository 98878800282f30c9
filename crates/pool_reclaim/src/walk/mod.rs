//! The traversal engine.
//!
//! [`Walker`] carries the state of one pass: the current [`SlotPath`], the
//! nesting depth, the counters reported back to the caller, and every
//! failure seen so far. This module holds the container cases; the
//! root-member case lives in [`structural`].
//!
//! # Failure handling
//!
//! Walk functions return `Err` only for failures that abort a branch
//! (introspection, depth, budget). A failed release is recorded and the
//! walk moves on to the next sibling.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::config::ReclaimConfig;
use crate::error::{panic_message, ReclaimError};
use crate::handle::{ReleaseFailure, ResourceHandle};
use crate::path::{PathSegment, SlotPath};
use crate::reclaim::ReclaimStats;
use crate::shape::{Dictionary, FixedTuple, Reclaim, Sequence, Shape};
use crate::stack::ensure_sufficient_stack;

mod structural;

type Step = Result<(), ReclaimError>;

/// What happened to a handle that was visited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Released,
    /// `exists()` was false; release was not attempted.
    Dead,
    Failed,
}

pub(crate) struct Walker {
    config: ReclaimConfig,
    path: SlotPath,
    depth: usize,
    /// Set once a failure abandons the pass.
    halted: bool,
    pub(crate) stats: ReclaimStats,
    pub(crate) errors: Vec<ReclaimError>,
}

impl Walker {
    pub(crate) fn new(config: ReclaimConfig) -> Self {
        Self {
            config,
            path: SlotPath::new(),
            depth: 0,
            halted: false,
            stats: ReclaimStats::default(),
            errors: Vec::new(),
        }
    }

    /// Where the walk currently is; used to locate panics.
    pub(crate) fn path(&self) -> &SlotPath {
        &self.path
    }

    /// Classify one value and dispatch on its shape.
    pub(crate) fn walk_value(&mut self, value: &dyn Reclaim) -> Step {
        self.tick()?;
        match value.shape() {
            Shape::Handle(handle) => {
                self.release(handle);
                Ok(())
            }
            Shape::Tuple(tuple) => self.nested(|walker| walker.walk_tuple(tuple)),
            Shape::Dictionary(dict) => self.nested(|walker| walker.walk_dictionary(dict)),
            Shape::Sequence(seq) => self.nested(|walker| walker.walk_sequence(seq)),
            Shape::Opaque => Ok(()),
        }
    }

    /// Visit every element. The sequence itself is never modified.
    pub(crate) fn walk_sequence(&mut self, seq: &dyn Sequence) -> Step {
        for (index, elem) in seq.elements().enumerate() {
            self.within(PathSegment::Index(index), |walker| walker.walk_value(elem))?;
        }
        Ok(())
    }

    /// Keys first, then values; both are walked exactly like sequence
    /// elements.
    pub(crate) fn walk_dictionary(&mut self, dict: &dyn Dictionary) -> Step {
        for (index, key) in dict.keys().enumerate() {
            self.within(PathSegment::Key(index), |walker| walker.walk_value(key))?;
        }
        for (index, value) in dict.values().enumerate() {
            self.within(PathSegment::Value(index), |walker| walker.walk_value(value))?;
        }
        Ok(())
    }

    /// Visit each declared position of a fixed tuple.
    pub(crate) fn walk_tuple(&mut self, tuple: &dyn FixedTuple) -> Step {
        let arity = tuple.arity();
        for index in 0..arity {
            self.within(PathSegment::Position(index), |walker| {
                let slot = tuple.position(index).ok_or_else(|| ReclaimError::Introspection {
                    path: walker.path.clone(),
                    reason: format!("tuple of arity {arity} has no position {index}"),
                })?;
                walker.walk_value(slot)
            })?;
        }
        Ok(())
    }

    /// Release a live handle, recording the outcome.
    pub(crate) fn release(&mut self, handle: &dyn ResourceHandle) -> Outcome {
        if !handle.exists() {
            self.stats.dead += 1;
            tracing::trace!(path = %self.path, "handle no longer exists");
            return Outcome::Dead;
        }

        let failure = match catch_unwind(AssertUnwindSafe(|| handle.release())) {
            Ok(Ok(())) => None,
            Ok(Err(failure)) => Some(failure),
            Err(payload) => Some(ReleaseFailure::new(format!(
                "release panicked: {}",
                panic_message(payload.as_ref())
            ))),
        };

        match failure {
            None => {
                self.stats.released += 1;
                tracing::debug!(path = %self.path, handle = %handle.describe(), "released");
                Outcome::Released
            }
            Some(source) => {
                let err = ReclaimError::Release {
                    path: self.path.clone(),
                    handle: handle.describe(),
                    source,
                };
                tracing::debug!(error = %err, "release failed");
                self.errors.push(err);
                Outcome::Failed
            }
        }
    }

    /// Count one visited value against the budget.
    fn tick(&mut self) -> Step {
        self.stats.visited += 1;
        if self.stats.visited > self.config.max_visits {
            return Err(ReclaimError::VisitBudgetExceeded {
                path: self.path.clone(),
                limit: self.config.max_visits,
            });
        }
        Ok(())
    }

    /// Enter one level of aggregate nesting.
    fn nested(&mut self, f: impl FnOnce(&mut Self) -> Step) -> Step {
        if self.depth >= self.config.max_depth {
            return Err(ReclaimError::DepthExceeded {
                path: self.path.clone(),
                limit: self.config.max_depth,
            });
        }

        self.depth += 1;
        let result = ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    /// Run `f` with `segment` appended to the current path.
    fn within(&mut self, segment: PathSegment, f: impl FnOnce(&mut Self) -> Step) -> Step {
        self.path.push(segment);
        let result = f(self);
        self.path.pop();
        result
    }
}
