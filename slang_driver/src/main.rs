//! `slang-driver` entry point: parse arguments, set up logging, dispatch.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use slang_driver::cli::{CommandLine, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = CommandLine::parse();
    init_tracing(cli.verbose);
    let mut stdout = std::io::stdout().lock();
    run(&cli, &mut stdout).map_err(color_eyre::eyre::Report::from)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
