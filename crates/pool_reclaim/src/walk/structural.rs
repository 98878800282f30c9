//! Root-member traversal.
//!
//! Each member slot of the root is classified and handled once:
//!
//! | Shape        | Action                                     | Slot afterwards        |
//! |--------------|--------------------------------------------|------------------------|
//! | Handle       | release if it still exists                 | detached if released   |
//! | Tuple        | walk positions                             | untouched (read-only)  |
//! | Dictionary   | walk keys, then values                     | always detached        |
//! | Sequence     | walk elements                              | always detached        |
//! | Opaque       | nothing                                    | untouched              |
//!
//! Collections are detached whether or not anything was found inside them.
//! A member whose branch was aborted keeps its value.
//!
//! "Detached" means [`Reclaim::detach`](crate::Reclaim::detach) answered
//! `true`. Slots without an empty form (bare handles, fixed arrays, shared
//! `Rc`/`Arc`) keep their value and are not counted.

use crate::error::ReclaimError;
use crate::members::{Member, Members};
use crate::path::PathSegment;
use crate::shape::Shape;

use super::{Outcome, Walker};

impl Walker {
    /// Walk every member of `root`. Stops early once the pass is halted.
    pub(crate) fn walk_root<R: Members + ?Sized>(&mut self, root: &mut R) {
        root.for_each_member(&mut |member| {
            if !self.halted {
                self.walk_member(member);
            }
        });
    }

    fn walk_member(&mut self, mut member: Member<'_>) {
        self.path.push(PathSegment::Member(member.name()));
        tracing::trace!(
            member = member.name(),
            binding = ?member.binding(),
            shape = ?member.slot().shape().kind(),
            "visiting member"
        );

        if let Err(err) = self.visit_member(&mut member) {
            tracing::debug!(error = %err, "member branch aborted");
            if err.is_fatal() {
                self.halted = true;
            }
            self.errors.push(err);
        }

        self.path.pop();
    }

    fn visit_member(&mut self, member: &mut Member<'_>) -> Result<(), ReclaimError> {
        self.tick()?;

        let detach = match member.slot().shape() {
            Shape::Handle(handle) => self.release(handle) == Outcome::Released,
            Shape::Tuple(tuple) => {
                self.nested(|walker| walker.walk_tuple(tuple))?;
                false
            }
            Shape::Dictionary(dict) => {
                self.nested(|walker| walker.walk_dictionary(dict))?;
                true
            }
            Shape::Sequence(seq) => {
                self.nested(|walker| walker.walk_sequence(seq))?;
                true
            }
            Shape::Opaque => false,
        };

        if detach {
            if member.slot_mut().detach() {
                self.stats.detached += 1;
                tracing::debug!(member = member.name(), "detached");
            } else {
                tracing::debug!(member = member.name(), "slot has no empty form; kept");
            }
        }
        Ok(())
    }
}
