//! Lock-guarded, insertion-ordered record store.
//!
//! [`RecordStore`] owns the full collection of [`Pokemon`] records and the
//! next-id counter behind a single reader/writer lock. Reads clone a
//! [`snapshot`](RecordStore::snapshot) under the shared lock so that query
//! processing never holds it; every mutation runs under the exclusive lock
//! and is therefore linearized against all other operations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::clock::{ClockSource, SystemClock};
use crate::error::{StoreError, StoreResult};
use crate::observer::{MutationKind, MutationObserver};
use crate::record::{Pokemon, PokemonData, PokemonPatch};

/// First id handed out by a fresh or cleared store.
pub const INITIAL_ID: i64 = 1;

/// Result of a [`RecordStore::bulk_insert`] call.
///
/// Never rolled back: `inserted` holds every record that was committed, in
/// input order, and `errors` one entry per skipped candidate.
#[derive(Debug, Clone, Default)]
pub struct BulkInsertOutcome {
    pub inserted: Vec<Pokemon>,
    pub errors: Vec<StoreError>,
}

impl BulkInsertOutcome {
    /// Whether at least one candidate was rejected.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }
}

struct Inner {
    records: Vec<Pokemon>,
    next_id: i64,
}

impl Inner {
    fn position(&self, id: i64) -> StoreResult<usize> {
        self.records
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound { id })
    }

    fn has_num(&self, num: &str) -> bool {
        self.records.iter().any(|p| p.data.num == num)
    }

    /// Appends `data` under a freshly assigned id.
    fn push(&mut self, data: PokemonData, now: DateTime<Utc>) -> Pokemon {
        let record = Pokemon {
            id: self.next_id,
            data,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;
        self.records.push(record.clone());
        record
    }

    /// Validates and appends a client candidate.
    fn try_insert(&mut self, data: PokemonData, now: DateTime<Utc>) -> StoreResult<Pokemon> {
        if data.name.is_empty() {
            return Err(StoreError::InvalidInput("Name is required".to_string()));
        }
        if self.has_num(&data.num) {
            return Err(StoreError::DuplicateKey { num: data.num });
        }
        Ok(self.push(data, now))
    }
}

/// The single shared collection of records plus its id counter.
///
/// Explicitly constructed and shared by reference (typically behind an
/// `Arc`); there is no global instance.
pub struct RecordStore {
    inner: RwLock<Inner>,
    clock: Arc<dyn ClockSource>,
    observer: Option<Arc<dyn MutationObserver>>,
}

impl RecordStore {
    /// Creates an empty store stamped by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: Vec::new(),
                next_id: INITIAL_ID,
            }),
            clock: Arc::new(SystemClock),
            observer: None,
        }
    }

    /// Replaces the clock used for `created_at` / `updated_at`.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn ClockSource>) -> Self {
        self.clock = clock;
        self
    }

    /// Registers the observer notified after every committed mutation.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn MutationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Loads trusted seed data in order, assigning ids and timestamps.
    ///
    /// No validation or duplicate check is applied, and observers are not
    /// notified. Returns the number of records loaded.
    pub fn seed(&self, records: Vec<PokemonData>) -> usize {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        let count = records.len();
        for data in records {
            inner.push(data, now);
        }
        debug!(count, "seeded record store");
        count
    }

    /// Returns a copy of the current collection, in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Pokemon> {
        self.inner.read().records.clone()
    }

    /// Number of records currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }

    /// Looks up a single record by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has this id.
    pub fn get(&self, id: i64) -> StoreResult<Pokemon> {
        let inner = self.inner.read();
        let idx = inner.position(id)?;
        Ok(inner.records[idx].clone())
    }

    /// Creates a record from a client candidate.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidInput`] if the name is empty and
    /// [`StoreError::DuplicateKey`] if another record already uses `num`.
    /// The store is unchanged on error.
    pub fn insert(&self, data: PokemonData) -> StoreResult<Pokemon> {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        let record = inner.try_insert(data, now)?;
        debug!(id = record.id, num = %record.data.num, "inserted record");
        self.notify(MutationKind::Insert, &inner.records);
        Ok(record)
    }

    /// Overwrites every client field of an existing record.
    ///
    /// `id` and `created_at` are preserved and `updated_at` refreshed. The
    /// business key is not re-checked, so a replace may introduce a
    /// duplicate `num`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has this id.
    pub fn replace(&self, id: i64, data: PokemonData) -> StoreResult<Pokemon> {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        let idx = inner.position(id)?;
        let record = &mut inner.records[idx];
        record.data = data;
        record.updated_at = record.updated_at.max(now);
        let record = record.clone();
        debug!(id, "replaced record");
        self.notify(MutationKind::Replace, &inner.records);
        Ok(record)
    }

    /// Applies a sparse set of field assignments to an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has this id.
    pub fn patch(&self, id: i64, patch: PokemonPatch) -> StoreResult<Pokemon> {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        let idx = inner.position(id)?;
        let record = &mut inner.records[idx];
        patch.apply_to(&mut record.data);
        record.updated_at = record.updated_at.max(now);
        let record = record.clone();
        debug!(id, "patched record");
        self.notify(MutationKind::Patch, &inner.records);
        Ok(record)
    }

    /// Removes a record, preserving the relative order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has this id.
    pub fn delete(&self, id: i64) -> StoreResult<Pokemon> {
        let mut inner = self.inner.write();
        let idx = inner.position(id)?;
        let removed = inner.records.remove(idx);
        debug!(id, "deleted record");
        self.notify(MutationKind::Delete, &inner.records);
        Ok(removed)
    }

    /// Empties the collection and resets the id counter to [`INITIAL_ID`].
    ///
    /// Returns the number of records removed.
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.write();
        let count = inner.records.len();
        inner.records.clear();
        inner.next_id = INITIAL_ID;
        debug!(count, "cleared record store");
        self.notify(MutationKind::Clear, &inner.records);
        count
    }

    /// Inserts candidates in input order under a single lock acquisition.
    ///
    /// Candidates with an empty name, or whose `num` matches an existing
    /// record (including one inserted earlier in the same call), are skipped
    /// and reported in [`BulkInsertOutcome::errors`].
    pub fn bulk_insert(&self, candidates: Vec<PokemonData>) -> BulkInsertOutcome {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        let mut outcome = BulkInsertOutcome::default();
        for data in candidates {
            match inner.try_insert(data, now) {
                Ok(record) => outcome.inserted.push(record),
                Err(StoreError::InvalidInput(_)) => outcome.errors.push(
                    StoreError::InvalidInput("Pokemon name cannot be empty".to_string()),
                ),
                Err(err) => outcome.errors.push(err),
            }
        }
        debug!(
            inserted = outcome.inserted.len(),
            failed = outcome.errors.len(),
            "bulk insert finished"
        );
        self.notify(MutationKind::BulkInsert, &inner.records);
        outcome
    }

    fn notify(&self, kind: MutationKind, records: &[Pokemon]) {
        if let Some(observer) = &self.observer {
            observer.on_mutation(kind, records);
        }
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
