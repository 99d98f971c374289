//! coremeta - core metadata renderer and parser

use std::process::ExitCode;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use coremeta::cli::{self, Cli};
use coremeta::ui::output;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(&cli);

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    let filter = if cli.quiet {
        "error"
    } else if cli.debug {
        "warn,coremeta=debug"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
