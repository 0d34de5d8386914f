pub mod migrate;
pub mod seed;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "prospect-seed")]
#[command(version)]
#[command(
    about = "Seed the prospect store with FK-consistent demo data",
    long_about = "Seed the prospect store with FK-consistent demo data.\n\n\
        Reads SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY from the environment \
        (not needed with --dry-run). Stages run in dependency order: prospects, \
        enrichment_data, engagement_scores, campaigns, messages, interactions, agent_logs."
)]
pub struct SeedCli {
    /// Delete all rows from every table (children first) before seeding
    #[arg(long)]
    pub clean: bool,

    /// Run the full pipeline against an in-memory store; no credentials or network needed
    #[arg(long)]
    pub dry_run: bool,

    /// YAML file overriding the default volumes and demo window
    #[arg(long, value_name = "FILE")]
    pub plan: Option<PathBuf>,

    /// Fix the random seed for a reproducible data set
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Show a spinner while each stage is in flight
    #[arg(short, long)]
    pub progress: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Log stage events to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(name = "prospect-migrate")]
#[command(version)]
#[command(
    about = "Apply schema scripts from the migration catalog",
    long_about = "Apply schema scripts from the migration catalog.\n\n\
        Pass a script name, or `all` to run the whole catalog in order. \
        Without arguments the catalog is listed. If the store has no exec_sql \
        endpoint, the script text is printed for manual application."
)]
pub struct MigrateCli {
    /// Catalog script name, or `all`
    pub name: Option<String>,

    /// Directory holding the catalog's .sql files
    #[arg(short, long, default_value = "migrations")]
    pub dir: PathBuf,

    /// List the catalog and exit
    #[arg(short, long)]
    pub list: bool,

    /// Log each applied script to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
