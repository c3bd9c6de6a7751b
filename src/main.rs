use clap::Parser;
use tracing::info;

use patchlint::cli::Cli;
use patchlint::config::{Config, OutputFormat};
use patchlint::dispatch::{DispatchOptions, Dispatcher, ReportSummary};
use patchlint::error::Result;
use patchlint::git::GitRepo;
use patchlint::sink::{ConsoleSink, JsonSink};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

fn run(cli: &Cli, config: &Config) -> Result<ReportSummary> {
    let repo = GitRepo::new();
    let dispatcher = Dispatcher::new(&repo, DispatchOptions::from(config));

    match config.format {
        OutputFormat::Console => {
            let mut sink = ConsoleSink::new();
            dispatcher.report(&cli.report, &mut sink)
        }
        OutputFormat::Json => {
            let mut sink = JsonSink::new();
            let summary = dispatcher.report(&cli.report, &mut sink)?;
            println!("{}", sink.render()?);
            Ok(summary)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    info!("patchlint starting");

    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    info!(?config, "config loaded");

    match run(&cli, &config) {
        Ok(summary) => {
            info!(
                files = summary.reported_files.len(),
                comments = summary.comment_count,
                "done"
            );
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
