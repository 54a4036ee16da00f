//! retequiv CLI - Filter trivially equivalent return-value mutants.

use std::io::stdout;
use std::process::ExitCode;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use retequiv::cli::{Cli, Command, FilterArgs};
use retequiv::config::Config;
use retequiv::core::{Analyzer, UnitFile};
use retequiv::filter::default_registry;
use retequiv::output::Format;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Logs go to stderr so stdout stays parseable.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> retequiv::core::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default(&cli.path)?,
    };
    if let Some(jobs) = cli.jobs {
        config.jobs = jobs;
    }
    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let format = cli
        .format
        .map(Format::from)
        .unwrap_or_else(|| Format::from(config.output.format));

    match cli.command {
        Command::Filter(args) => run_filter(&args, &config, format)?,
        Command::Features => {
            let status = default_registry().status(&config.feature_toggles());
            format.write_features(&status, &mut stdout())?;
        }
        Command::Config(args) => {
            if args.default {
                print!("{}", Config::default_toml());
            } else {
                print!("{}", config.to_toml()?);
            }
        }
    }

    Ok(())
}

fn run_filter(args: &FilterArgs, config: &Config, format: Format) -> retequiv::core::Result<()> {
    let units = args
        .files
        .iter()
        .map(UnitFile::load)
        .collect::<retequiv::core::Result<Vec<_>>>()?;
    tracing::info!(units = units.len(), "loaded unit files");

    let analysis = Analyzer::new(config).analyze(&units)?;
    format.write_analysis(&analysis, args.show_kept, &mut stdout())?;
    Ok(())
}
