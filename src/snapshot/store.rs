//! Generation-guarded snapshot store.

use super::types::Snapshot;
use crate::error::SolveError;
use crate::generation::Generation;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;

struct Slot<P, S> {
    snapshot: Arc<Snapshot<P, S>>,
    generation: Generation,
}

/// Thread-safe map from session id to the latest published snapshot.
///
/// A write is accepted only if its generation is at least the generation
/// of the last accepted write for that session. Once [`seal`](Self::seal)
/// has returned, every write is dropped; reads keep working.
pub struct SnapshotStore<P, S> {
    slots: DashMap<String, Slot<P, S>>,
    // `true` once sealed. Writers hold the read side for the whole write.
    sealed: RwLock<bool>,
}

impl<P, S> SnapshotStore<P, S> {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
            sealed: RwLock::new(false),
        }
    }

    /// Returns the current snapshot of `session`.
    pub fn get(&self, session: &str) -> Result<Arc<Snapshot<P, S>>, SolveError> {
        self.slots
            .get(session)
            .map(|slot| Arc::clone(&slot.snapshot))
            .ok_or_else(|| SolveError::NotBootstrapped(session.to_owned()))
    }

    /// Replaces the snapshot of `session` unless `generation` is stale.
    ///
    /// Returns whether the write was accepted.
    pub fn put(&self, session: &str, snapshot: Snapshot<P, S>, generation: Generation) -> bool {
        let sealed = self.sealed.read();
        if *sealed {
            tracing::debug!(session, %generation, "store sealed, dropping write");
            return false;
        }

        match self.slots.entry(session.to_owned()) {
            Entry::Occupied(mut occupied) => {
                let slot = occupied.get_mut();
                if generation < slot.generation {
                    tracing::debug!(
                        session,
                        %generation,
                        current = %slot.generation,
                        "dropping stale snapshot write"
                    );
                    return false;
                }
                slot.snapshot = Arc::new(snapshot);
                slot.generation = generation;
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Slot {
                    snapshot: Arc::new(snapshot),
                    generation,
                });
            }
        }
        true
    }

    pub fn contains(&self, session: &str) -> bool {
        self.slots.contains_key(session)
    }

    /// Generation of the last accepted write for `session`.
    pub fn generation_of(&self, session: &str) -> Option<Generation> {
        self.slots.get(session).map(|slot| slot.generation)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Rejects all further writes. Waits for in-progress writes to land.
    pub fn seal(&self) {
        *self.sealed.write() = true;
    }

    pub fn is_sealed(&self) -> bool {
        *self.sealed.read()
    }
}

impl<P, S> Default for SnapshotStore<P, S> {
    fn default() -> Self {
        Self::new()
    }
}
