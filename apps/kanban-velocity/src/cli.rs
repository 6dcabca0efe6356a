//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "kanban-velocity",
    version,
    about = "Ticket extraction and velocity reports for kanban boards",
    long_about = "kanban-velocity — read swim lanes from a kanban board, classify each card by project and status, and report committed/completed/deployed velocity per user and project.\n\nConfiguration precedence: CLI > kanban-velocity.toml > defaults.",
    after_help = "Examples:\n  kanban-velocity report --board board.json --credentials User.txt\n  kanban-velocity report --exclude bot --exclude admin --output json\n  kanban-velocity tickets --board snapshots/board.yaml",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current kanban-velocity version.")]
    Version,
    /// Extract tickets and write the velocity workbook
    #[command(
        about = "Build the velocity report",
        long_about = "Extract every ticket from the board, compute velocity per user+project, per user and per project, and save the five datasets to the report workbook. A failed run leaves no workbook behind.",
        after_help = "Examples:\n  kanban-velocity report\n  kanban-velocity report --report out/Tickets.json --workers 4"
    )]
    Report {
        #[command(flatten)]
        board: BoardArgs,
        #[arg(long, help = "Workbook path (default: Tickets.json)")]
        report: Option<String>,
    },
    /// Extract and print tickets only
    #[command(
        about = "List extracted tickets",
        long_about = "Extract tickets from the board and print them in report order (user, status, project, size). Nothing is written.",
        after_help = "Examples:\n  kanban-velocity tickets --output json"
    )]
    Tickets {
        #[command(flatten)]
        board: BoardArgs,
    },
}

#[derive(Args)]
/// Board-related options shared by `report` and `tickets`.
pub struct BoardArgs {
    #[arg(long, help = "Repository root (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long, help = "Board snapshot file, .json or .yaml (default: board.json)")]
    pub board: Option<String>,
    #[arg(long, help = "Two-line credentials file (default: User.txt)")]
    pub credentials: Option<String>,
    #[arg(long = "exclude", value_name = "NAME", help = "Skip lanes whose owner contains NAME (repeatable, case-insensitive)")]
    pub exclude: Vec<String>,
    #[arg(long, help = "Lanes processed concurrently (default: 8)")]
    pub workers: Option<usize>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
}
