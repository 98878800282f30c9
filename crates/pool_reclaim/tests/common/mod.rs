//! A thread-safe fake resource runtime shared by the integration tests.

#![allow(dead_code, reason = "Not every test binary uses every helper")]

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;
use pool_reclaim::{Reclaim, ReleaseFailure, ResourceHandle};

#[derive(Default)]
struct WorldState {
    next_id: u32,
    live: BTreeSet<u32>,
    failing: BTreeSet<u32>,
    releases: Vec<u32>,
}

/// The runtime that owns every actor. Clones share state.
#[derive(Clone, Default)]
pub struct World {
    state: Arc<Mutex<WorldState>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&self) -> Actor {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.live.insert(id);
        Actor {
            id,
            world: self.clone(),
        }
    }

    pub fn spawn_many(&self, count: usize) -> Vec<Actor> {
        (0..count).map(|_| self.spawn()).collect()
    }

    /// An actor whose release is refused by the runtime.
    pub fn spawn_locked(&self) -> Actor {
        let actor = self.spawn();
        self.state.lock().failing.insert(actor.id);
        actor
    }

    /// Destroy an actor out-of-band.
    pub fn despawn_externally(&self, actor: &Actor) {
        self.state.lock().live.remove(&actor.id);
    }

    /// Every release call in order, including repeated ones.
    pub fn releases(&self) -> Vec<u32> {
        self.state.lock().releases.clone()
    }

    pub fn release_count(&self) -> usize {
        self.state.lock().releases.len()
    }

    pub fn live_count(&self) -> usize {
        self.state.lock().live.len()
    }
}

/// A handle into [`World`].
#[derive(Clone, Reclaim)]
#[reclaim(handle)]
pub struct Actor {
    pub id: u32,
    world: World,
}

impl PartialEq for Actor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Actor {}

impl std::hash::Hash for Actor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Actor {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Actor {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Actor({})", self.id)
    }
}

impl ResourceHandle for Actor {
    fn exists(&self) -> bool {
        self.world.state.lock().live.contains(&self.id)
    }

    fn release(&self) -> Result<(), ReleaseFailure> {
        let mut state = self.world.state.lock();
        state.releases.push(self.id);
        if state.failing.contains(&self.id) {
            return Err(ReleaseFailure::new(format!("actor {} is pinned", self.id)));
        }
        state.live.remove(&self.id);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("Actor({})", self.id)
    }
}
