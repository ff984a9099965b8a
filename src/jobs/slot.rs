//! DataSlot: single-slot safe-publish cell for a job's latest result.

use crate::app::JobValue;
use std::sync::RwLock;

/// The cache cell a job worker publishes into and apps read from.
///
/// Single-writer (the owning worker's rescheduling chain), multi-reader
/// (any app bound to the job). A publish swaps the whole value, so a
/// reader's snapshot is always a fully completed run — never a torn or
/// partial result. Readers clone the inner `Arc` out; they hold the lock
/// only for the pointer copy.
#[derive(Default)]
pub struct DataSlot {
    cell: RwLock<Option<JobValue>>,
}

impl DataSlot {
    /// Create an empty slot ("no data yet").
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a completed result, replacing any previous value.
    pub fn publish(&self, value: JobValue) {
        // A poisoned lock means some reader or writer panicked mid-swap;
        // the slot itself is still just a pointer, so keep serving it.
        let mut guard = match self.cell.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(value);
    }

    /// Snapshot the latest value, or `None` if no run has completed.
    pub fn snapshot(&self) -> Option<JobValue> {
        let guard = match self.cell.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.clone()
    }
}

impl std::fmt::Debug for DataSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSlot")
            .field("has_value", &self.snapshot().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_empty_slot() {
        let slot = DataSlot::new();
        assert!(slot.snapshot().is_none());
    }

    #[test]
    fn test_publish_and_snapshot() {
        let slot = DataSlot::new();
        slot.publish(Arc::new(42u32));

        let value = slot.snapshot().unwrap();
        assert_eq!(value.downcast_ref::<u32>(), Some(&42));
    }

    #[test]
    fn test_publish_replaces() {
        let slot = DataSlot::new();
        slot.publish(Arc::new(1u32));
        slot.publish(Arc::new(2u32));

        let value = slot.snapshot().unwrap();
        assert_eq!(value.downcast_ref::<u32>(), Some(&2));
    }

    #[test]
    fn test_snapshots_are_shared() {
        let slot = DataSlot::new();
        slot.publish(Arc::new(String::from("reading")));

        let a = slot.snapshot().unwrap();
        let b = slot.snapshot().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
