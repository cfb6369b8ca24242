use std::env;
use std::io;
use std::process::ExitCode;

use pophery_cli::config::{RunConfig, USAGE};
use pophery_cli::trace::Tracer;
use tracing::{error, Level};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(Level::WARN.as_str())),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "run failed");
            eprintln!("pophery: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = RunConfig::from_args(env::args().skip(1))?;

    if config.show_help {
        println!("{}", USAGE);
        return Ok(());
    }
    if config.show_license {
        println!("{}", pophery_cli::license_text());
        return Ok(());
    }
    if !config.has_programs() {
        eprintln!("{}", USAGE);
        return Err("no program given".into());
    }

    let stdin = io::stdin();
    let mut tracer = Tracer::new(config.trace, io::stdout());
    let _streams = pophery_cli::execute(&config, stdin.lock(), io::stdout(), &mut tracer)?;
    Ok(())
}
