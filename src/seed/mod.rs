//! Staged seeding pipeline.
//!
//! Stages run in `STAGE_ORDER`. Each one generates its batch, submits it in
//! a single insert, and, when later stages reference its rows, captures the
//! ids the store assigned into the `GenerationContext` handed to the next
//! stage. The first failure aborts the run; rows inserted by earlier stages
//! are left in place and a `--clean` run is the recovery path.

mod cleanup;
mod graph;
mod report;

pub use cleanup::CleanupStage;
pub use graph::{cleanup_order, dependency_order, STAGE_ORDER};
pub use report::{CleanupReport, SeedEvent, SeedReport, StageReport, Summary, TableCleanup};

use crate::config::{ConfigError, SeedPlan};
use crate::progress::StageSpinner;
use crate::store::{RemoteStore, StoreError};
use demo_data_gen::{
    EntityKind, GenerationContext, Generator, Inserted, PreconditionError, Record, RecordId,
};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Plan(#[from] ConfigError),
    #[error("cleanup of table {table} failed")]
    Cleanup {
        table: EntityKind,
        #[source]
        source: StoreError,
    },
    #[error("stage {stage}: cannot generate records")]
    Generate {
        stage: EntityKind,
        #[source]
        source: PreconditionError,
    },
    #[error("stage {stage}: cannot serialize records")]
    Serialize {
        stage: EntityKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("stage {stage}: insertion failed")]
    Insert {
        stage: EntityKind,
        #[source]
        source: StoreError,
    },
    #[error("stage {stage}: submitted {expected} rows but the store returned {received} assigned ids")]
    IdentifierCapture {
        stage: EntityKind,
        expected: usize,
        received: usize,
    },
}

impl SeedError {
    /// The stage (or cleanup table) the run stopped at
    pub fn stage(&self) -> Option<EntityKind> {
        match self {
            SeedError::Plan(_) => None,
            SeedError::Cleanup { table, .. } => Some(*table),
            SeedError::Generate { stage, .. }
            | SeedError::Serialize { stage, .. }
            | SeedError::Insert { stage, .. }
            | SeedError::IdentifierCapture { stage, .. } => Some(*stage),
        }
    }
}

type Observer<'s> = Box<dyn FnMut(&SeedEvent) + 's>;

/// Drives one seeding run against a store.
pub struct SeedOrchestrator<'s, S: RemoteStore + ?Sized> {
    store: &'s mut S,
    plan: SeedPlan,
    seed: u64,
    progress: bool,
    observer: Option<Observer<'s>>,
}

impl<'s, S: RemoteStore + ?Sized> SeedOrchestrator<'s, S> {
    pub fn new(store: &'s mut S, plan: SeedPlan, seed: u64) -> Self {
        Self {
            store,
            plan,
            seed,
            progress: false,
            observer: None,
        }
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Called after every successful store call, before the next one starts.
    /// Lets the caller report completed stages even if a later stage fails.
    pub fn with_observer(mut self, observer: impl FnMut(&SeedEvent) + 's) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Run every stage, optionally emptying all tables first.
    pub fn run(mut self, clean: bool) -> Result<SeedReport, SeedError> {
        self.plan.validate()?;
        let window = self.plan.window()?;

        let cleanup = if clean {
            let observer = &mut self.observer;
            let report = CleanupStage::new(self.progress)
                .run_observed(&mut *self.store, |table| {
                    notify(observer, SeedEvent::Cleared(*table))
                })?;
            Some(report)
        } else {
            None
        };

        let range = self.plan.messages_per_campaign;
        let mut generator = Generator::new(self.seed)
            .with_window(window)
            .with_messages_per_campaign(range.min, range.max);
        let mut ctx = GenerationContext::default();
        let mut report = SeedReport::new(self.seed, cleanup);

        for kind in STAGE_ORDER {
            let records = generator
                .generate(kind, self.plan.count(kind), &ctx)
                .map_err(|source| SeedError::Generate {
                    stage: kind,
                    source,
                })?;
            let Submitted { rows, ids } = self.submit(kind, &records)?;

            info!(stage = kind.table(), rows, "stage complete");
            report.record(kind, rows);
            notify(&mut self.observer, SeedEvent::Inserted(StageReport { kind, rows }));
            ctx = capture(ctx, kind, records, ids);
        }

        Ok(report)
    }

    /// One bulk insert. Parents must come back with one id per record;
    /// other kinds report however many rows the store returned.
    fn submit(&mut self, kind: EntityKind, records: &[Record]) -> Result<Submitted, SeedError> {
        if records.is_empty() {
            debug!(stage = kind.table(), "empty batch, skipping insert");
            return Ok(Submitted {
                rows: 0,
                ids: Vec::new(),
            });
        }

        let rows = records
            .iter()
            .map(Record::to_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| SeedError::Serialize {
                stage: kind,
                source,
            })?;

        let spinner = StageSpinner::start(
            self.progress,
            format!("Inserting {} {}...", rows.len(), kind.table()),
        );
        let result = self.store.insert(kind.table(), rows);
        spinner.finish();

        let returned = result.map_err(|source| SeedError::Insert {
            stage: kind,
            source,
        })?;

        let ids: Vec<RecordId> = returned.iter().filter_map(RecordId::from_row).collect();
        if kind.has_dependents() && (returned.len() != records.len() || ids.len() != records.len())
        {
            return Err(SeedError::IdentifierCapture {
                stage: kind,
                expected: records.len(),
                received: ids.len(),
            });
        }

        Ok(Submitted {
            rows: returned.len(),
            ids,
        })
    }
}

struct Submitted {
    rows: usize,
    ids: Vec<RecordId>,
}

fn notify(observer: &mut Option<Observer<'_>>, event: SeedEvent) {
    if let Some(observer) = observer.as_mut() {
        observer(&event);
    }
}

/// Thread the ids of a parent stage into the context for later stages.
fn capture(
    ctx: GenerationContext,
    kind: EntityKind,
    records: Vec<Record>,
    ids: Vec<RecordId>,
) -> GenerationContext {
    match kind {
        EntityKind::Prospect => ctx.with_prospects(
            ids.into_iter()
                .zip(records.into_iter().filter_map(Record::into_prospect))
                .map(|(id, record)| Inserted::new(id, record))
                .collect(),
        ),
        EntityKind::Campaign => ctx.with_campaigns(
            ids.into_iter()
                .zip(records.into_iter().filter_map(Record::into_campaign))
                .map(|(id, record)| Inserted::new(id, record))
                .collect(),
        ),
        _ => ctx,
    }
}
