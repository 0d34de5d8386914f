use clap::Parser;
use prospect_seed::cmd::{self, MigrateCli};
use prospect_seed::logging;

fn main() {
    let cli = MigrateCli::parse();
    logging::init(cli.verbose);

    if let Err(e) = cmd::migrate::run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
