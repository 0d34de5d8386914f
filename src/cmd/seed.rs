use super::SeedCli;
use crate::config::{SeedPlan, StoreConfig};
use crate::seed::{SeedEvent, SeedOrchestrator, SeedReport};
use crate::store::{MemoryStore, RemoteStore, RestStore};
use tracing::info;

pub fn run(cli: SeedCli) -> anyhow::Result<()> {
    // Everything that can be rejected locally is checked before the first request.
    let plan = match &cli.plan {
        Some(path) => SeedPlan::load(path)?,
        None => SeedPlan::default(),
    };
    plan.validate()?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, dry_run = cli.dry_run, clean = cli.clean, "starting seed run");

    let report = if cli.dry_run {
        let mut store = MemoryStore::new();
        let mut report = seed_with(&mut store, plan, seed, &cli)?;
        report.dry_run = true;
        report
    } else {
        let config = StoreConfig::from_env()?;
        let mut store = RestStore::new(config)?;
        seed_with(&mut store, plan, seed, &cli)?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n{}", report.summary());
    }

    Ok(())
}

fn seed_with<S: RemoteStore + ?Sized>(
    store: &mut S,
    plan: SeedPlan,
    seed: u64,
    cli: &SeedCli,
) -> anyhow::Result<SeedReport> {
    // Stage lines are printed as they complete so a failed run still shows
    // which rows were written. With --json they go to stderr to keep stdout
    // parseable.
    let json = cli.json;
    let report = SeedOrchestrator::new(store, plan, seed)
        .with_progress(cli.progress)
        .with_observer(|event: &SeedEvent| {
            if json {
                eprintln!("{event}");
            } else {
                println!("{event}");
            }
        })
        .run(cli.clean)?;
    Ok(report)
}
