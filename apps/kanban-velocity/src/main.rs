//! kanban-velocity CLI binary entry point.
//! Resolves configuration, runs the pipeline, and prints results.

use clap::Parser;
use kanban_velocity::board::{Credentials, SnapshotReader};
use kanban_velocity::cli::{BoardArgs, Cli, Commands};
use kanban_velocity::config::{self, CliOverrides, Effective};
use kanban_velocity::pipeline::{self, RunOptions};
use kanban_velocity::report::WorkbookSink;
use kanban_velocity::utils::{error_prefix, info_prefix, note_prefix};
use kanban_velocity::{output, VelocityError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Tickets { board } => {
            let eff = resolve(&board, None);
            let (reader, credentials, opts) = prepare(&eff);
            match pipeline::extract_from_board(&reader, &credentials, &opts) {
                Ok(tickets) => output::print_tickets(&tickets, &eff.output),
                Err(e) => fail(&e),
            }
        }
        Commands::Report { board, report } => {
            let eff = resolve(&board, report);
            let (reader, credentials, opts) = prepare(&eff);
            let sink = WorkbookSink::create(&eff.report);
            match pipeline::run_report(&reader, &credentials, &opts, sink) {
                Ok((result, saved_to)) => output::print_report(&result, &saved_to, &eff.output),
                Err(e) => fail(&e),
            }
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kanban_velocity={}", level)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn resolve(board: &BoardArgs, report: Option<String>) -> Effective {
    let eff = config::resolve_effective(&CliOverrides {
        repo_root: board.repo_root.clone(),
        board: board.board.clone(),
        credentials: board.credentials.clone(),
        report,
        exclude: Some(board.exclude.clone()),
        workers: board.workers,
        output: board.output.clone(),
    });
    if eff.output != "json" {
        if !eff.config_found {
            eprintln!("{} No kanban-velocity.toml found; using defaults.", note_prefix());
        }
        if let Some(url) = eff.url.as_deref() {
            eprintln!("{} Board: {}", info_prefix(), url);
        }
    }
    eff
}

/// Build the reader and load credentials, exiting with status 2 on setup problems.
fn prepare(eff: &Effective) -> (SnapshotReader, Credentials, RunOptions) {
    if !eff.board.is_file() {
        eprintln!(
            "{} Board snapshot not found: {} (pass --board or set [board].source)",
            error_prefix(),
            eff.board.display()
        );
        std::process::exit(2);
    }
    let credentials = match Credentials::load(&eff.credentials) {
        Ok(c) => c,
        Err(e) => fail(&e),
    };
    let opts = RunOptions {
        exclude: eff.exclude.clone(),
        workers: eff.workers,
    };
    (SnapshotReader::new(&eff.board), credentials, opts)
}

fn fail(e: &VelocityError) -> ! {
    eprintln!("{} {}", error_prefix(), e);
    std::process::exit(if e.is_configuration() { 2 } else { 1 });
}
