//! Reclamation of externally owned pool handles.
//!
//! Given any root object, [`reclaim`] visits every slot reachable from it,
//! releases every live [`ResourceHandle`] it finds exactly once, and
//! empties the root's collection slots so the graph can be dropped.
//!
//! # Pieces
//!
//! - **Contract** ([`ResourceHandle`]): `exists()` and `release()`,
//!   implemented by whatever runtime owns the resources.
//! - **Classification** ([`Reclaim`], [`Shape`]): every value answers
//!   whether it is a handle, a dictionary, a sequence, a fixed tuple, or
//!   opaque. Implemented here for std types.
//! - **Members** ([`Members`]): the root's storage locations, usually
//!   generated with `#[derive(Reclaim)]`.
//! - **Walk**: depth-first, bounded by [`ReclaimConfig`], never
//!   propagating a failure; see [`ReclaimReport`] and [`DiagnosticSink`].
//!
//! # Example
//!
//! ```text
//! #[derive(Reclaim)]
//! struct Mission {
//!     escort: Option<Vehicle>,
//!     props: Vec<Prop>,
//!     spawns: HashMap<Ped, SpawnPoint>,
//!     #[reclaim(skip)]
//!     title: String,
//! }
//!
//! let report = pool_reclaim::reclaim(&mut mission);
//! assert!(mission.props.is_empty());
//! ```
//!
//! # Crate Dependencies
//!
//! `tracing` for logging, `thiserror` for [`ReclaimError`], `smallvec` for
//! slot paths, `parking_lot` for [`MemorySink`], `stacker` for stack growth
//! on deep graphs.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod config;
mod diagnostic;
mod error;
mod handle;
mod impls;
mod logging;
mod members;
mod panic_hook;
mod path;
mod reclaim;
mod shape;
mod stack;
mod walk;

pub use config::{ReclaimConfig, MAX_DEPTH_ENV, MAX_VISITS_ENV};
pub use diagnostic::{Diagnostic, DiagnosticSink, MemorySink, TracingSink};
pub use error::{ErrorCode, ReclaimError};
pub use handle::{ReleaseFailure, ResourceHandle};
pub use logging::{init_tracing, LOG_ENV};
pub use members::{Binding, Member, Members};
pub use path::{PathSegment, SlotPath};
pub use pool_reclaim_macros::Reclaim;
pub use reclaim::{reclaim, ReclaimReport, ReclaimStats, Reclaimer};
pub use shape::{
    classify, Dictionary, Elements, FixedTuple, Reclaim, Sequence, Shape, ShapeKind,
};

#[cfg(test)]
mod test_helpers;
