//! Per-stage and summary reporting for a seeding run.

use super::graph::STAGE_ORDER;
use demo_data_gen::EntityKind;
use serde::Serialize;
use std::fmt;

/// Rows inserted by one stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub kind: EntityKind,
    pub rows: usize,
}

/// Rows removed from one table during cleanup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableCleanup {
    pub kind: EntityKind,
    pub deleted: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub tables: Vec<TableCleanup>,
}

impl CleanupReport {
    pub fn total_deleted(&self) -> u64 {
        self.tables.iter().map(|t| t.deleted).sum()
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub seed: u64,
    pub dry_run: bool,
    pub cleanup: Option<CleanupReport>,
    pub stages: Vec<StageReport>,
}

impl SeedReport {
    pub fn new(seed: u64, cleanup: Option<CleanupReport>) -> Self {
        Self {
            seed,
            dry_run: false,
            cleanup,
            stages: Vec::with_capacity(STAGE_ORDER.len()),
        }
    }

    pub fn record(&mut self, kind: EntityKind, rows: usize) {
        self.stages.push(StageReport { kind, rows });
    }

    /// Rows inserted for `kind`, 0 if its stage never ran
    pub fn count(&self, kind: EntityKind) -> usize {
        self.stages
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.rows)
            .sum()
    }

    pub fn total(&self) -> usize {
        self.stages.iter().map(|s| s.rows).sum()
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(cleanup) = &self.cleanup {
            writeln!(f, "Cleanup:")?;
            for table in &cleanup.tables {
                writeln!(f, "{}", SeedEvent::Cleared(*table))?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Stages:")?;
        for stage in &self.stages {
            writeln!(f, "{}", SeedEvent::Inserted(*stage))?;
        }
        writeln!(f)?;

        write!(f, "{}", self.summary())
    }
}

impl SeedReport {
    /// The summary table alone, for callers that already streamed the
    /// per-stage lines
    pub fn summary(&self) -> Summary<'_> {
        Summary(self)
    }
}

pub struct Summary<'r>(&'r SeedReport);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let title = if report.dry_run {
            "Seed summary (dry run)"
        } else {
            "Seed summary"
        };
        writeln!(f, "{} (seed {})", title, report.seed)?;
        writeln!(f, "{}", "-".repeat(40))?;
        for kind in STAGE_ORDER {
            writeln!(f, "  {:<24} {:>8}", kind.label(), report.count(kind))?;
        }
        writeln!(f, "{}", "-".repeat(40))?;
        write!(f, "  {:<24} {:>8}", "Total", report.total())
    }
}

/// Progress of a run, emitted as soon as each store call succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedEvent {
    Cleared(TableCleanup),
    Inserted(StageReport),
}

impl fmt::Display for SeedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedEvent::Cleared(t) => {
                write!(f, "  Deleted {} rows from {}", t.deleted, t.kind.table())
            }
            SeedEvent::Inserted(s) => write!(f, "  ✓ Inserted {} {}", s.rows, s.kind.table()),
        }
    }
}
