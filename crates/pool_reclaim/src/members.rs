//! Member enumeration for root objects.
//!
//! A root exposes its storage locations as [`Member`]s. Usually the impl is
//! generated by `#[derive(Reclaim)]`; hand-written impls follow the same
//! pattern:
//!
//! ```text
//! impl Members for Convoy {
//!     fn for_each_member(&mut self, visit: &mut dyn FnMut(Member<'_>)) {
//!         visit(Member::instance("lead", &mut self.lead));
//!         visit(Member::instance("escorts", &mut self.escorts));
//!         self.base.for_each_member(visit);
//!     }
//! }
//! ```

use crate::shape::Reclaim;

/// How a member is bound to its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Stored on the root value itself.
    Instance,
    /// Process-wide state associated with the root's type.
    Static,
}

/// A named, mutable storage location of a root.
pub struct Member<'a> {
    name: &'static str,
    binding: Binding,
    slot: &'a mut dyn Reclaim,
}

impl<'a> Member<'a> {
    pub fn instance(name: &'static str, slot: &'a mut dyn Reclaim) -> Self {
        Self {
            name,
            binding: Binding::Instance,
            slot,
        }
    }

    pub fn static_member(name: &'static str, slot: &'a mut dyn Reclaim) -> Self {
        Self {
            name,
            binding: Binding::Static,
            slot,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn binding(&self) -> Binding {
        self.binding
    }

    pub fn slot(&self) -> &dyn Reclaim {
        &*self.slot
    }

    pub fn slot_mut(&mut self) -> &mut dyn Reclaim {
        &mut *self.slot
    }
}

impl std::fmt::Debug for Member<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("binding", &self.binding)
            .field("shape", &self.slot.shape())
            .finish()
    }
}

/// A value whose member slots can be enumerated and mutated in place.
///
/// Implementations must yield every slot exactly once: instance members,
/// static members, and the members of flattened bases.
pub trait Members {
    fn for_each_member(&mut self, visit: &mut dyn FnMut(Member<'_>));
}

/// `None` is a null root and has no members.
impl<R: Members> Members for Option<R> {
    fn for_each_member(&mut self, visit: &mut dyn FnMut(Member<'_>)) {
        if let Some(root) = self {
            root.for_each_member(visit);
        }
    }
}

impl<R: Members + ?Sized> Members for Box<R> {
    fn for_each_member(&mut self, visit: &mut dyn FnMut(Member<'_>)) {
        (**self).for_each_member(visit);
    }
}

impl<R: Members + ?Sized> Members for &mut R {
    fn for_each_member(&mut self, visit: &mut dyn FnMut(Member<'_>)) {
        (**self).for_each_member(visit);
    }
}
