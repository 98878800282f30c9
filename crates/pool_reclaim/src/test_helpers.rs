//! A fake resource runtime for unit tests.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::handle::{ReleaseFailure, ResourceHandle};
use crate::shape::{Reclaim, Shape};

#[derive(Default)]
struct PoolState {
    next_id: u32,
    live: BTreeSet<u32>,
    failing: BTreeSet<u32>,
    panicking: BTreeSet<u32>,
    released: Vec<u32>,
}

/// Shared handle registry. Clones observe the same state.
#[derive(Clone, Default)]
pub(crate) struct Pool {
    state: Rc<RefCell<PoolState>>,
}

impl Pool {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn spawn(&self) -> Entity {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.live.insert(id);
        Entity {
            id,
            pool: self.clone(),
        }
    }

    /// A live entity whose release returns an error.
    pub(crate) fn spawn_failing(&self) -> Entity {
        let entity = self.spawn();
        self.state.borrow_mut().failing.insert(entity.id);
        entity
    }

    /// A live entity whose release panics.
    pub(crate) fn spawn_panicking(&self) -> Entity {
        let entity = self.spawn();
        self.state.borrow_mut().panicking.insert(entity.id);
        entity
    }

    /// Remove an entity behind the walker's back.
    pub(crate) fn vanish(&self, entity: &Entity) {
        self.state.borrow_mut().live.remove(&entity.id);
    }

    /// Ids in release order.
    pub(crate) fn released(&self) -> Vec<u32> {
        self.state.borrow().released.clone()
    }

    pub(crate) fn live_count(&self) -> usize {
        self.state.borrow().live.len()
    }
}

#[derive(Clone)]
pub(crate) struct Entity {
    pub(crate) id: u32,
    pool: Pool,
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Entity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}

impl ResourceHandle for Entity {
    fn exists(&self) -> bool {
        self.pool.state.borrow().live.contains(&self.id)
    }

    fn release(&self) -> Result<(), ReleaseFailure> {
        let panics = self.pool.state.borrow().panicking.contains(&self.id);
        if panics {
            panic!("entity {} exploded", self.id);
        }

        let mut state = self.pool.state.borrow_mut();
        if state.failing.contains(&self.id) {
            return Err(ReleaseFailure::new(format!("entity {} is locked", self.id)));
        }
        state.live.remove(&self.id);
        state.released.push(self.id);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("Entity({})", self.id)
    }
}

impl Reclaim for Entity {
    fn shape(&self) -> Shape<'_> {
        Shape::Handle(self)
    }
}
