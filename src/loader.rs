//! Batch loading into a single store.

use record_core::{Entity, EntityKind, Record};
use serde::Serialize;
use sqlite_store::{EntityStore, InsertOutcome, SqliteEntity};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Counts from loading one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSummary {
    /// Entity kind of the batch.
    pub kind: EntityKind,
    /// Records in the batch.
    pub total: u64,
    /// Records written (or, for a dry run, that would be written).
    pub inserted: u64,
    /// Records rejected by validation.
    pub rejected: u64,
    /// Valid records refused by storage.
    pub failed: u64,
    /// Time taken for the whole batch.
    pub duration: Duration,
}

impl LoadSummary {
    fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            total: 0,
            inserted: 0,
            rejected: 0,
            failed: 0,
            duration: Duration::ZERO,
        }
    }

    fn record(&mut self, outcome: &InsertOutcome) {
        self.total += 1;
        match outcome {
            InsertOutcome::Inserted => self.inserted += 1,
            InsertOutcome::ValidationFailed(_) => self.rejected += 1,
            InsertOutcome::InsertFailed(_) => self.failed += 1,
        }
    }

    /// Whether every record in the batch was accepted.
    pub fn is_clean(&self) -> bool {
        self.rejected == 0 && self.failed == 0
    }

    /// Calculate records processed per second.
    pub fn records_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.total as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Insert every record of `records` into `store`, in order.
///
/// A rejected or failed record never stops the batch.
pub fn load_batch<E: SqliteEntity>(store: &EntityStore<E>, records: &[Record]) -> LoadSummary {
    let start_time = Instant::now();
    let mut summary = LoadSummary::new(E::KIND);

    info!(
        "Loading {} {} record(s) into '{}'",
        records.len(),
        E::KIND,
        E::KIND.table_name()
    );

    for record in records {
        let outcome = store.insert(record);
        summary.record(&outcome);
    }

    summary.duration = start_time.elapsed();
    info!(
        "Loaded '{}': {} inserted, {} rejected, {} failed in {:?}",
        E::KIND.table_name(),
        summary.inserted,
        summary.rejected,
        summary.failed,
        summary.duration
    );

    summary
}

/// Validate every record of `records` without touching any store.
pub fn validate_batch<E: Entity>(records: &[Record]) -> LoadSummary {
    let start_time = Instant::now();
    let mut summary = LoadSummary::new(E::KIND);

    for record in records {
        summary.total += 1;
        match E::validate(record) {
            Ok(()) => summary.inserted += 1,
            Err(e) => {
                warn!("[DRY-RUN] {}", e);
                summary.rejected += 1;
            }
        }
    }

    summary.duration = start_time.elapsed();
    info!(
        "[DRY-RUN] '{}': {} valid, {} rejected",
        E::KIND.table_name(),
        summary.inserted,
        summary.rejected
    );

    summary
}
