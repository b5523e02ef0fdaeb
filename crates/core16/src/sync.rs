//! Shared bus lock serializing cores.
//!
//! The lock is an explicit handle rather than process-wide state: every
//! holder clones the same [`BusLock`]. The mutex guards the transcript, which
//! is the only data cores actually share; core state stays private to each
//! worker.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{Notice, TranscriptEntry};

/// Shared-ownership handle to the single bus mutex.
///
/// The mutex is not reentrant: acquiring it twice on one thread deadlocks.
/// Code that already holds a [`BusGuard`] passes it along instead.
#[derive(Debug, Clone, Default)]
pub struct BusLock {
    inner: Arc<Mutex<Vec<TranscriptEntry>>>,
}

impl BusLock {
    /// Creates a fresh, unlocked bus with an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until the bus is free and returns the scoped guard.
    ///
    /// A worker that panicked while holding the bus leaves the transcript
    /// intact, so poisoning is ignored.
    pub fn acquire(&self) -> BusGuard<'_> {
        BusGuard {
            transcript: self.inner.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Copies the transcript recorded so far.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.acquire().transcript.clone()
    }

    /// Returns `true` when both handles refer to the same mutex.
    #[must_use]
    pub fn same_bus(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Proof that the current thread holds the bus. Released on drop.
#[derive(Debug)]
pub struct BusGuard<'a> {
    transcript: MutexGuard<'a, Vec<TranscriptEntry>>,
}

impl BusGuard<'_> {
    /// Logs `notice` and appends it to the transcript under `core_id`.
    pub fn record(&mut self, core_id: usize, notice: Notice) {
        log::info!("[core {core_id}] {notice}");
        self.transcript.push(TranscriptEntry { core_id, notice });
    }

    /// Number of transcript entries recorded so far.
    #[must_use]
    pub fn recorded(&self) -> usize {
        self.transcript.len()
    }
}

#[cfg(test)]
mod tests {
    use super::BusLock;
    use crate::{Notice, TranscriptEntry};

    #[test]
    fn clones_share_one_transcript() {
        let bus = BusLock::new();
        let other = bus.clone();
        assert!(bus.same_bus(&other));
        assert!(!bus.same_bus(&BusLock::new()));

        other.acquire().record(3, Notice::StoreFence);

        assert_eq!(
            bus.transcript(),
            vec![TranscriptEntry {
                core_id: 3,
                notice: Notice::StoreFence,
            }]
        );
    }

    #[test]
    fn guard_releases_on_drop() {
        let bus = BusLock::new();
        {
            let mut guard = bus.acquire();
            guard.record(1, Notice::LoadFence);
            assert_eq!(guard.recorded(), 1);
        }
        let guard = bus.acquire();
        assert_eq!(guard.recorded(), 1);
    }

    #[test]
    fn poisoned_bus_still_yields_transcript() {
        let bus = BusLock::new();
        let worker = bus.clone();
        let outcome = std::thread::spawn(move || {
            let mut guard = worker.acquire();
            guard.record(1, Notice::MemoryFence);
            panic!("worker died holding the bus");
        })
        .join();

        assert!(outcome.is_err());
        assert_eq!(bus.transcript().len(), 1);
    }
}
