//! Value classification.
//!
//! Every value reachable from a root answers one question: what shape is
//! it? The answer is a [`Shape`], which either carries a trait object for
//! the walker to continue through or says the value is opaque.
//!
//! # Precedence
//!
//! A type gives exactly one answer, so precedence lives in the impl:
//!
//! 1. [`Shape::Handle`]: a resource handle is never also walked as a
//!    container, even if it happens to be iterable.
//! 2. [`Shape::Dictionary`]: a map is not also walked as a sequence of
//!    entries.
//! 3. [`Shape::Sequence`]
//! 4. [`Shape::Tuple`]
//! 5. [`Shape::Opaque`]: including "null" (`None`).

use crate::handle::ResourceHandle;

/// A value that may appear somewhere inside a reclaimable graph.
pub trait Reclaim {
    /// Classify this value for the walker.
    fn shape(&self) -> Shape<'_>;

    /// Replace this value with its empty form, answering whether it now
    /// holds nothing.
    ///
    /// Options become `None`, growable collections are cleared. Values
    /// without an empty form (bare handles, tuples, scalars, fixed arrays,
    /// shared `Rc`/`Arc`) stay as-is and answer `false`.
    fn detach(&mut self) -> bool {
        false
    }
}

/// Classification result, borrowing the value it describes.
#[derive(Clone, Copy)]
pub enum Shape<'a> {
    Handle(&'a dyn ResourceHandle),
    Tuple(&'a dyn FixedTuple),
    Dictionary(&'a dyn Dictionary),
    Sequence(&'a dyn Sequence),
    Opaque,
}

impl Shape<'_> {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Handle(_) => ShapeKind::Handle,
            Shape::Tuple(_) => ShapeKind::Tuple,
            Shape::Dictionary(_) => ShapeKind::Dictionary,
            Shape::Sequence(_) => ShapeKind::Sequence,
            Shape::Opaque => ShapeKind::Opaque,
        }
    }
}

impl std::fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Shape::{:?}", self.kind())
    }
}

/// Data-free form of [`Shape`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Handle,
    Tuple,
    Dictionary,
    Sequence,
    Opaque,
}

impl ShapeKind {
    /// Dictionaries and sequences: the slot kinds that are always detached
    /// after their contents were walked.
    pub fn is_collection(self) -> bool {
        matches!(self, ShapeKind::Dictionary | ShapeKind::Sequence)
    }
}

/// Classify a value.
#[inline]
pub fn classify(value: &dyn Reclaim) -> ShapeKind {
    value.shape().kind()
}

/// Borrowed element iterator shared by the aggregate traits.
pub type Elements<'a> = Box<dyn Iterator<Item = &'a dyn Reclaim> + 'a>;

/// An iterable aggregate; ordered or not, homogeneous or not.
pub trait Sequence {
    fn elements(&self) -> Elements<'_>;
}

/// A key/value aggregate, walked as two independent sequences.
pub trait Dictionary {
    fn keys(&self) -> Elements<'_>;
    fn values(&self) -> Elements<'_>;
}

/// A fixed-arity positional aggregate.
///
/// `position(i)` must answer `Some` for every `i < arity()`. A `None`
/// inside that range means the shape is malformed and is reported as an
/// introspection failure.
pub trait FixedTuple {
    fn arity(&self) -> usize;
    fn position(&self, index: usize) -> Option<&dyn Reclaim>;
}
