//! Schema migration runner.
//!
//! Scripts come from a fixed catalog whose order is itself a dependency
//! contract: the core schema first, then additive feature scripts. New
//! scripts go after the ones they depend on.

use crate::store::{ExecOutcome, RemoteStore, StoreError};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Catalog name that runs every script in order
pub const RUN_ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationScript {
    pub name: &'static str,
    pub file: &'static str,
    pub description: &'static str,
}

pub const CATALOG: &[MigrationScript] = &[
    MigrationScript {
        name: "schema",
        file: "001_schema.sql",
        description: "Core tables: prospects, campaigns, messages, interactions",
    },
    MigrationScript {
        name: "enrichment",
        file: "002_enrichment_data.sql",
        description: "Company enrichment profiles per prospect",
    },
    MigrationScript {
        name: "engagement",
        file: "003_engagement_scores.sql",
        description: "Composite engagement scores per prospect",
    },
    MigrationScript {
        name: "agent_logs",
        file: "004_agent_logs.sql",
        description: "Automation agent activity log",
    },
    MigrationScript {
        name: "indexes",
        file: "005_indexes.sql",
        description: "Secondary indexes for dashboard filters",
    },
];

#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("unknown migration {name:?} (known: {known}, or {RUN_ALL})")]
    UnknownScript { name: String, known: String },
    #[error("failed to read migration {name} at {path:?}")]
    ReadScript {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("migration {name} failed")]
    Store {
        name: &'static str,
        #[source]
        source: StoreError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    Applied,
    /// No execution endpoint; the operator must run `sql` by hand
    ManualRequired { sql: String },
}

/// A catalog script with its text loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedScript {
    pub script: MigrationScript,
    pub sql: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRun {
    pub script: MigrationScript,
    pub outcome: MigrationOutcome,
}

/// Loads catalog scripts from a directory and submits them to a store.
pub struct SchemaMigrationExecutor {
    dir: PathBuf,
}

impl SchemaMigrationExecutor {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Scripts selected by `name`, in catalog order
    pub fn resolve(name: &str) -> Result<Vec<MigrationScript>, ExecutionError> {
        if name == RUN_ALL {
            return Ok(CATALOG.to_vec());
        }
        CATALOG
            .iter()
            .find(|script| script.name == name)
            .map(|script| vec![*script])
            .ok_or_else(|| ExecutionError::UnknownScript {
                name: name.to_string(),
                known: CATALOG
                    .iter()
                    .map(|s| s.name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    pub fn load(&self, script: &MigrationScript) -> Result<String, ExecutionError> {
        let path = self.dir.join(script.file);
        fs::read_to_string(&path).map_err(|source| ExecutionError::ReadScript {
            name: script.name,
            path,
            source,
        })
    }

    /// Read every script selected by `name`, in catalog order.
    pub fn prepare(&self, name: &str) -> Result<Vec<PreparedScript>, ExecutionError> {
        Self::resolve(name)?
            .into_iter()
            .map(|script| {
                self.load(&script)
                    .map(|sql| PreparedScript { script, sql })
            })
            .collect()
    }

    /// Run the script (or the whole catalog) named `name`.
    ///
    /// Every selected file is read before the first request, so a missing
    /// file never leaves the catalog half applied.
    pub fn execute<S: RemoteStore + ?Sized>(
        &self,
        store: &mut S,
        name: &str,
    ) -> Result<Vec<MigrationRun>, ExecutionError> {
        let prepared = self.prepare(name)?;
        Self::apply(store, prepared)
    }

    /// Submit prepared scripts in order. Once the store reports that it has
    /// no execution endpoint, the remaining scripts are returned for manual
    /// application instead of being submitted.
    pub fn apply<S: RemoteStore + ?Sized>(
        store: &mut S,
        prepared: Vec<PreparedScript>,
    ) -> Result<Vec<MigrationRun>, ExecutionError> {
        let mut endpoint_missing = false;
        let mut runs = Vec::with_capacity(prepared.len());

        for PreparedScript { script, sql } in prepared {
            if endpoint_missing {
                runs.push(MigrationRun {
                    script,
                    outcome: MigrationOutcome::ManualRequired { sql },
                });
                continue;
            }

            let outcome = store
                .execute_sql(&sql)
                .map_err(|source| ExecutionError::Store {
                    name: script.name,
                    source,
                })?;

            let outcome = match outcome {
                ExecOutcome::Executed => {
                    info!(migration = script.name, "applied");
                    MigrationOutcome::Applied
                }
                ExecOutcome::EndpointMissing => {
                    warn!(
                        migration = script.name,
                        "no execution endpoint; script must be applied manually"
                    );
                    endpoint_missing = true;
                    MigrationOutcome::ManualRequired { sql }
                }
            };
            runs.push(MigrationRun { script, outcome });
        }

        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_single_and_all() {
        let one = SchemaMigrationExecutor::resolve("engagement").unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].file, "003_engagement_scores.sql");

        let all = SchemaMigrationExecutor::resolve(RUN_ALL).unwrap();
        assert_eq!(all, CATALOG.to_vec());
        assert_eq!(all[0].name, "schema");
    }

    #[test]
    fn test_resolve_unknown() {
        let err = SchemaMigrationExecutor::resolve("drop_everything").unwrap_err();
        assert!(matches!(err, ExecutionError::UnknownScript { .. }));
        assert!(err.to_string().contains("schema, enrichment"));
    }

    #[test]
    fn test_catalog_files_are_ordered() {
        let files: Vec<_> = CATALOG.iter().map(|s| s.file).collect();
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
        assert!(CATALOG.iter().all(|s| s.name != RUN_ALL));
    }
}
