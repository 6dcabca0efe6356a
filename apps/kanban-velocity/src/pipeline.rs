//! End-to-end run: board session, extraction, aggregation, report.
//!
//! The board session lives only for the extraction step and is dropped on
//! every exit path before an error reaches the caller. The sink persists
//! nothing unless every sheet was added.

use crate::board::{BoardReader, BoardSession, Credentials};
use crate::error::Result;
use crate::extract::{extract_tickets, DEFAULT_WORKERS};
use crate::models::Ticket;
use crate::report::{write_report, ReportSink};
use crate::velocity::{aggregate, VelocityReport};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Lane owner substrings to skip, case-insensitive.
    pub exclude: Vec<String>,
    /// Max lanes extracted concurrently.
    pub workers: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            exclude: Vec::new(),
            workers: DEFAULT_WORKERS,
        }
    }
}

/// Open a session, extract the sorted ticket list, release the session.
pub fn extract_from_board<R: BoardReader>(
    reader: &R,
    credentials: &Credentials,
    opts: &RunOptions,
) -> Result<Vec<Ticket>> {
    let mut session = reader.open(credentials)?;
    let lanes = session.swim_lanes()?;
    extract_tickets(lanes, &opts.exclude, opts.workers)
}

/// Full run. Returns the computed datasets and where the report was saved.
pub fn run_report<R: BoardReader, S: ReportSink>(
    reader: &R,
    credentials: &Credentials,
    opts: &RunOptions,
    mut sink: S,
) -> Result<(VelocityReport, PathBuf)> {
    let tickets = extract_from_board(reader, credentials, opts)?;
    let report = aggregate(tickets);
    write_report(&mut sink, &report)?;
    let path = sink.save()?;
    info!(
        user_tickets = report.user_tickets.len(),
        unassigned = report.unassigned_tickets.len(),
        users = report.by_user.len(),
        projects = report.by_project.len(),
        "velocity report complete"
    );
    Ok((report, path))
}
