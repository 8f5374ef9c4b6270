use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!(error))
        .context("failed to install tracing subscriber")
}

fn main() -> ExitCode {
    if let Err(error) = init_tracing() {
        eprintln!("{error:#}");
        return ExitCode::from(3);
    }

    plansim_cli::run()
}
