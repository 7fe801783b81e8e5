//! Mutation audit log and the observer set attached to the store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use pokedex_core::{CompositeMutationObserver, MutationKind, MutationObserver, Pokemon};
use tracing::info;

use crate::persistence::SnapshotPublisher;

/// Logs every committed mutation with a sequence number.
///
/// The store calls observers under its write lock, so sequence numbers
/// follow commit order.
#[derive(Debug, Default)]
pub struct MutationLog {
    seq: AtomicU64,
}

impl MutationLog {
    /// Number of mutations logged so far.
    #[must_use]
    pub fn logged(&self) -> u64 {
        self.seq.load(Ordering::Relaxed)
    }
}

impl MutationObserver for MutationLog {
    fn on_mutation(&self, kind: MutationKind, records: &[Pokemon]) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        info!(seq, kind = kind.as_str(), records = records.len(), "store mutated");
    }
}

/// Builds the observer attached to the store: the audit log, plus the
/// snapshot publisher when snapshots are enabled.
#[must_use]
pub fn store_observers(
    log: Arc<MutationLog>,
    publisher: Option<SnapshotPublisher>,
) -> CompositeMutationObserver {
    let mut observers = CompositeMutationObserver::new(vec![log as Arc<dyn MutationObserver>]);
    if let Some(publisher) = publisher {
        observers.add(Arc::new(publisher));
    }
    observers
}
