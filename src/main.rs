use clap::Parser;
use prospect_seed::cmd::{self, SeedCli};
use prospect_seed::logging;

fn main() {
    let cli = SeedCli::parse();
    logging::init(cli.verbose);

    if let Err(e) = cmd::seed::run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
