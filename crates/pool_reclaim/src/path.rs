//! Locations inside a graph, for diagnostics.

use std::fmt;

use smallvec::SmallVec;

/// One step from a slot to one of its children.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named member of the root (`fleet`).
    Member(&'static str),
    /// The n-th element of a sequence (`[3]`).
    Index(usize),
    /// The n-th key of a dictionary (`{key #3}`).
    Key(usize),
    /// The n-th value of a dictionary (`{value #3}`).
    Value(usize),
    /// A fixed tuple position (`.1`).
    Position(usize),
}

/// Chain of segments from a root member down to a slot.
///
/// Most graphs are shallow, so the first few segments live inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SlotPath {
    segments: SmallVec<[PathSegment; 8]>,
}

impl SlotPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for SlotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "<root>");
        }

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Member(name) if i == 0 => write!(f, "{name}")?,
                PathSegment::Member(name) => write!(f, "::{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(index) => write!(f, "{{key #{index}}}")?,
                PathSegment::Value(index) => write!(f, "{{value #{index}}}")?,
                PathSegment::Position(index) => write!(f, ".{index}")?,
            }
        }
        Ok(())
    }
}

impl FromIterator<PathSegment> for SlotPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
