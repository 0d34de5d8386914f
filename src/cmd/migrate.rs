use super::MigrateCli;
use crate::config::StoreConfig;
use crate::migrate::{
    MigrationOutcome, MigrationRun, SchemaMigrationExecutor, CATALOG, RUN_ALL,
};
use crate::store::RestStore;

pub fn run(cli: MigrateCli) -> anyhow::Result<()> {
    let name = match cli.name {
        Some(name) if !cli.list => name,
        _ => {
            print_catalog();
            return Ok(());
        }
    };

    // Unknown names and unreadable files fail here, before credentials or network.
    let prepared = SchemaMigrationExecutor::new(cli.dir).prepare(&name)?;

    let config = StoreConfig::from_env()?;
    let mut store = RestStore::new(config)?;
    let runs = SchemaMigrationExecutor::apply(&mut store, prepared)?;
    print!("{}", render_runs(&runs));

    Ok(())
}

fn print_catalog() {
    println!("Available migrations:\n");
    for script in CATALOG {
        println!(
            "  {:<12} {:<28} {}",
            script.name, script.file, script.description
        );
    }
    println!("\n  {:<12} run every migration above, in order", RUN_ALL);
}

/// Applied scripts first, then a banner with the text of every script
/// that has to be run by hand.
pub fn render_runs(runs: &[MigrationRun]) -> String {
    let mut out = String::new();
    let mut manual = Vec::new();

    for run in runs {
        match &run.outcome {
            MigrationOutcome::Applied => {
                out.push_str(&format!(
                    "✓ Applied {} ({})\n",
                    run.script.name, run.script.file
                ));
            }
            MigrationOutcome::ManualRequired { sql } => manual.push((run.script, sql)),
        }
    }

    if manual.is_empty() {
        return out;
    }

    let rule = "=".repeat(72);
    out.push_str(&format!("{rule}\n"));
    out.push_str("The store has no exec_sql endpoint. Apply the following SQL manually\n");
    out.push_str("in the database console, in the order shown.\n");
    out.push_str(&format!("{rule}\n"));
    for (script, sql) in manual {
        out.push_str(&format!("\n-- {} ({})\n\n", script.name, script.file));
        out.push_str(sql.trim_end());
        out.push('\n');
    }
    out.push_str(&format!("\n{rule}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(name: &'static str, outcome: MigrationOutcome) -> MigrationRun {
        let script = *CATALOG.iter().find(|s| s.name == name).unwrap();
        MigrationRun { script, outcome }
    }

    #[test]
    fn test_render_applied_only() {
        let out = render_runs(&[run("schema", MigrationOutcome::Applied)]);
        assert_eq!(out, "✓ Applied schema (001_schema.sql)\n");
    }

    #[test]
    fn test_render_manual_banner() {
        let out = render_runs(&[
            run("schema", MigrationOutcome::Applied),
            run(
                "indexes",
                MigrationOutcome::ManualRequired {
                    sql: "create index foo on bar (baz);\n\n".to_string(),
                },
            ),
        ]);
        assert!(out.starts_with("✓ Applied schema"));
        assert!(out.contains("no exec_sql endpoint"));
        assert!(out.contains("-- indexes (005_indexes.sql)\n\ncreate index foo on bar (baz);\n"));
    }
}
