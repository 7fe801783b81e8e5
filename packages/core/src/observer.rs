//! Mutation observer trait and composite implementation.
//!
//! Defines [`MutationObserver`] for reacting to committed mutations of the
//! [`RecordStore`](crate::RecordStore), and [`CompositeMutationObserver`]
//! which fans out notifications to multiple observers.

use std::sync::Arc;

use crate::record::Pokemon;

/// Kind of mutation that was just committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// A single record was created.
    Insert,
    /// A batch insert finished (possibly with zero records inserted).
    BulkInsert,
    /// A record was fully replaced.
    Replace,
    /// A record was partially updated.
    Patch,
    /// A record was removed.
    Delete,
    /// The whole collection was emptied and the id counter reset.
    Clear,
}

impl MutationKind {
    /// Returns a stable lowercase label for logging.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::BulkInsert => "bulk_insert",
            Self::Replace => "replace",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Clear => "clear",
        }
    }
}

/// Observer for committed store mutations.
///
/// Invoked while the store's exclusive lock is still held, so observers see
/// mutations in exactly the order they were linearized. Implementations must
/// return quickly and must not call back into the store.
///
/// Used as `Arc<dyn MutationObserver>`.
pub trait MutationObserver: Send + Sync {
    /// Called after a successful mutation with the full post-mutation collection.
    fn on_mutation(&self, kind: MutationKind, records: &[Pokemon]);
}

/// Composite observer that fans out to multiple observers.
#[derive(Default)]
pub struct CompositeMutationObserver {
    observers: Vec<Arc<dyn MutationObserver>>,
}

impl CompositeMutationObserver {
    /// Creates a composite observer with the given list of observers.
    #[must_use]
    pub fn new(observers: Vec<Arc<dyn MutationObserver>>) -> Self {
        Self { observers }
    }

    /// Adds an observer after construction.
    pub fn add(&mut self, observer: Arc<dyn MutationObserver>) {
        self.observers.push(observer);
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl MutationObserver for CompositeMutationObserver {
    fn on_mutation(&self, kind: MutationKind, records: &[Pokemon]) {
        for observer in &self.observers {
            observer.on_mutation(kind, records);
        }
    }
}
