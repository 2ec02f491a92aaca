//! Arena of live logger queues
//!
//! Loggers are referenced by stable handles (slot index plus generation)
//! rather than by pointer. The dispatcher walks the slots in index order and
//! drains each queue in turn.
//!
//! Lock order: the registry lock is always taken before any queue lock.

use super::log_entry::LogEntry;
use parking_lot::Mutex;
use std::sync::Arc;

/// Pending remote-bound entries of one logger
pub(crate) type PendingQueue = Arc<Mutex<Vec<LogEntry>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RegistryHandle {
    index: usize,
    generation: u64,
}

struct Slot {
    generation: u64,
    queue: Option<PendingQueue>,
}

#[derive(Default)]
pub(crate) struct Registry {
    slots: Vec<Slot>,
    free: Vec<usize>,
    default: Option<RegistryHandle>,
    live: usize,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, queue: PendingQueue) -> RegistryHandle {
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.generation += 1;
            slot.queue = Some(queue);
            return RegistryHandle {
                index,
                generation: slot.generation,
            };
        }

        self.slots.push(Slot {
            generation: 0,
            queue: Some(queue),
        });
        RegistryHandle {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    /// Remove a member; stale handles are ignored
    pub(crate) fn remove(&mut self, handle: RegistryHandle) -> Option<PendingQueue> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        let queue = slot.queue.take()?;
        self.free.push(handle.index);
        self.live -= 1;
        if self.default == Some(handle) {
            self.default = None;
        }
        Some(queue)
    }

    pub(crate) fn set_default(&mut self, handle: RegistryHandle) {
        self.default = Some(handle);
    }

    fn get(&self, handle: RegistryHandle) -> Option<&PendingQueue> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.queue.as_ref())
    }

    /// Queue of the default logger, if it is still registered
    pub(crate) fn default_queue(&self) -> Option<PendingQueue> {
        self.default
            .and_then(|handle| self.get(handle))
            .map(Arc::clone)
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, handle: RegistryHandle) -> bool {
        self.get(handle).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.live
    }

    fn queues(&self) -> impl Iterator<Item = &PendingQueue> {
        self.slots.iter().filter_map(|slot| slot.queue.as_ref())
    }

    /// Move every pending entry out of every queue, one queue lock at a time
    pub(crate) fn drain_all(&self) -> Vec<LogEntry> {
        let mut batch = Vec::new();
        for queue in self.queues() {
            batch.append(&mut queue.lock());
        }
        batch
    }

    /// Number of pending entries across all queues
    pub(crate) fn pending(&self) -> usize {
        self.queues().map(|queue| queue.lock().len()).sum()
    }
}
