//! Migration catalog runs against the in-memory store.

use prospect_seed::migrate::{
    ExecutionError, MigrationOutcome, SchemaMigrationExecutor, CATALOG, RUN_ALL,
};
use prospect_seed::store::{MemoryStore, StoreOp};
use std::path::Path;
use tempfile::TempDir;

fn catalog_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    for script in CATALOG {
        std::fs::write(
            dir.path().join(script.file),
            format!("-- {}\nselect 1;\n", script.name),
        )
        .unwrap();
    }
    dir
}

fn executed(store: &MemoryStore) -> Vec<&str> {
    store
        .ops()
        .iter()
        .filter_map(|op| match op {
            StoreOp::Execute { sql } => Some(sql.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_single_script() {
    let dir = catalog_dir();
    let mut store = MemoryStore::new();

    let runs = SchemaMigrationExecutor::new(dir.path())
        .execute(&mut store, "engagement")
        .unwrap();

    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].script.name, "engagement");
    assert_eq!(runs[0].outcome, MigrationOutcome::Applied);
    assert_eq!(executed(&store), vec!["-- engagement\nselect 1;\n"]);
}

#[test]
fn test_all_runs_catalog_in_order() {
    let dir = catalog_dir();
    let mut store = MemoryStore::new();

    let runs = SchemaMigrationExecutor::new(dir.path())
        .execute(&mut store, RUN_ALL)
        .unwrap();

    let names: Vec<&str> = runs.iter().map(|r| r.script.name).collect();
    assert_eq!(
        names,
        vec!["schema", "enrichment", "engagement", "agent_logs", "indexes"]
    );
    assert!(runs.iter().all(|r| r.outcome == MigrationOutcome::Applied));

    let sql = executed(&store);
    assert_eq!(sql.len(), CATALOG.len());
    assert!(sql[0].starts_with("-- schema"));
    assert!(sql[4].starts_with("-- indexes"));
}

#[test]
fn test_missing_endpoint_surfaces_sql() {
    let dir = catalog_dir();
    let mut store = MemoryStore::new().without_exec_endpoint();

    let runs = SchemaMigrationExecutor::new(dir.path())
        .execute(&mut store, RUN_ALL)
        .unwrap();

    assert_eq!(runs.len(), CATALOG.len());
    for run in &runs {
        match &run.outcome {
            MigrationOutcome::ManualRequired { sql } => {
                assert!(sql.starts_with(&format!("-- {}", run.script.name)));
            }
            MigrationOutcome::Applied => panic!("{} reported applied", run.script.name),
        }
    }
    // Only the first script is attempted once the endpoint is known missing
    assert_eq!(executed(&store).len(), 1);
}

#[test]
fn test_missing_file_fails_before_any_request() {
    let dir = catalog_dir();
    std::fs::remove_file(dir.path().join("004_agent_logs.sql")).unwrap();
    let mut store = MemoryStore::new();

    let err = SchemaMigrationExecutor::new(dir.path())
        .execute(&mut store, RUN_ALL)
        .unwrap_err();

    match err {
        ExecutionError::ReadScript { name, path, .. } => {
            assert_eq!(name, "agent_logs");
            assert!(path.ends_with("004_agent_logs.sql"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.ops().is_empty());
}

#[test]
fn test_unknown_name_fails_before_any_request() {
    let dir = catalog_dir();
    let mut store = MemoryStore::new();

    let err = SchemaMigrationExecutor::new(dir.path())
        .execute(&mut store, "seed_data")
        .unwrap_err();

    assert!(matches!(err, ExecutionError::UnknownScript { .. }));
    assert!(store.ops().is_empty());
}

#[test]
fn test_shipped_catalog_is_complete() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let prepared = SchemaMigrationExecutor::new(dir).prepare(RUN_ALL).unwrap();

    assert_eq!(prepared.len(), CATALOG.len());
    assert!(prepared[0].sql.contains("create table if not exists prospects"));
    assert!(prepared[0].sql.contains("function exec_sql"));
    for table in ["enrichment_data", "engagement_scores", "agent_logs"] {
        assert!(
            prepared
                .iter()
                .any(|p| p.sql.contains(&format!("create table if not exists {table}"))),
            "{table}"
        );
    }
}
