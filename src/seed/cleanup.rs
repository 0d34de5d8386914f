//! Whole-table deletion ahead of a fresh run.

use super::graph::cleanup_order;
use super::report::{CleanupReport, TableCleanup};
use super::SeedError;
use crate::progress::StageSpinner;
use crate::store::RemoteStore;
use tracing::info;

/// Empties every seeded table, children before parents.
///
/// Stops at the first failing table; tables already emptied stay empty.
pub struct CleanupStage {
    progress: bool,
}

impl CleanupStage {
    pub fn new(progress: bool) -> Self {
        Self { progress }
    }

    pub fn run<S: RemoteStore + ?Sized>(&self, store: &mut S) -> Result<CleanupReport, SeedError> {
        self.run_observed(store, |_| {})
    }

    /// Like `run`, calling `on_table` as soon as each table is emptied.
    pub fn run_observed<S, F>(
        &self,
        store: &mut S,
        mut on_table: F,
    ) -> Result<CleanupReport, SeedError>
    where
        S: RemoteStore + ?Sized,
        F: FnMut(&TableCleanup),
    {
        let mut report = CleanupReport::default();

        for kind in cleanup_order() {
            let spinner = StageSpinner::start(
                self.progress,
                format!("Clearing {}...", kind.table()),
            );
            let result = store.delete_all(kind.table());
            spinner.finish();

            let deleted = result.map_err(|source| SeedError::Cleanup {
                table: kind,
                source,
            })?;
            info!(table = kind.table(), deleted, "table cleared");
            let table = TableCleanup { kind, deleted };
            on_table(&table);
            report.tables.push(table);
        }

        Ok(report)
    }
}
