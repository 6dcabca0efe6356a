//! Ticket extraction from swim lanes.
//!
//! Lanes are independent, so they are processed on a bounded rayon pool.
//! Completion order is irrelevant: the combined list is sorted once, on the
//! calling thread, before it is returned. Any lane failure aborts the whole
//! extraction and the other lanes' tickets are dropped.

use crate::error::{Result, VelocityError};
use crate::models::board::{RawCard, SwimLane};
use crate::models::Ticket;
use crate::project;
use crate::status::Status;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Default number of lanes processed concurrently.
pub const DEFAULT_WORKERS: usize = 8;

/// Extract every ticket from `lanes`, skipping lanes whose owner contains
/// any `exclude` substring (case-insensitive).
pub fn extract_tickets(lanes: &[SwimLane], exclude: &[String], workers: usize) -> Result<Vec<Ticket>> {
    let exclude: Vec<String> = exclude
        .iter()
        .filter(|n| !n.is_empty())
        .map(|n| n.to_lowercase())
        .collect();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()?;

    let per_lane: Vec<Vec<Ticket>> = pool.install(|| {
        lanes
            .par_iter()
            .filter(|lane| {
                let skip = is_excluded(&lane.owner, &exclude);
                if skip {
                    debug!(lane = %lane.owner, "lane excluded");
                }
                !skip
            })
            .map(extract_lane)
            .collect::<Result<Vec<_>>>()
    })?;

    let mut tickets: Vec<Ticket> = per_lane.into_iter().flatten().collect();
    sort_tickets(&mut tickets);
    warn_duplicates(&tickets);
    debug!(lanes = lanes.len(), tickets = tickets.len(), "extraction finished");
    Ok(tickets)
}

/// `exclude` entries must already be lowercased.
fn is_excluded(owner: &str, exclude: &[String]) -> bool {
    if exclude.is_empty() {
        return false;
    }
    let owner = owner.to_lowercase();
    exclude.iter().any(|n| owner.contains(n.as_str()))
}

/// Turn one lane into tickets. The column ordinal decides the status.
pub fn extract_lane(lane: &SwimLane) -> Result<Vec<Ticket>> {
    let mut out = Vec::new();
    for (ci, column) in lane.columns.iter().enumerate() {
        let status = Status::from_column(ci).map_err(|source| VelocityError::StatusOutOfRange {
            lane: lane.owner.clone(),
            source,
        })?;
        for (ki, card) in column.cards.iter().enumerate() {
            out.push(ticket_from_card(&lane.owner, status, card, ci, ki)?);
        }
    }
    trace!(lane = %lane.owner, tickets = out.len(), "lane extracted");
    Ok(out)
}

fn ticket_from_card(
    owner: &str,
    status: Status,
    card: &RawCard,
    column: usize,
    index: usize,
) -> Result<Ticket> {
    let field = |value: &Option<String>, name: &'static str| {
        value.clone().ok_or_else(|| VelocityError::MissingCardField {
            lane: owner.to_string(),
            column,
            card: index,
            field: name,
        })
    };
    let project_key = field(&card.project_key, "projectKey")?;
    let issue_number = field(&card.issue_number, "issueNumber")?;
    let description = field(&card.description, "description")?;
    let size_text = field(&card.size, "size")?;

    Ok(Ticket {
        user: owner.to_string(),
        project: project::classify(&description).to_string(),
        number: format!("{}{}", project_key, issue_number),
        description,
        status,
        size: parse_size(&size_text),
    })
}

/// Parse story-point text. Anything that is not a non-negative integer is
/// treated as "no size" rather than an error.
pub fn parse_size(text: &str) -> Option<u32> {
    let t = text.trim();
    match t.parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            if !t.is_empty() {
                trace!(size = t, "unparseable size treated as absent");
            }
            None
        }
    }
}

/// Report order: user, status column, project, size (absent first). The
/// issue number breaks any remaining tie.
pub fn compare_tickets(a: &Ticket, b: &Ticket) -> Ordering {
    a.user
        .cmp(&b.user)
        .then(a.status.cmp(&b.status))
        .then_with(|| a.project.cmp(&b.project))
        .then(a.size.cmp(&b.size))
        .then_with(|| a.number.cmp(&b.number))
}

pub fn sort_tickets(tickets: &mut [Ticket]) {
    tickets.sort_by(compare_tickets);
}

fn warn_duplicates(tickets: &[Ticket]) {
    let mut seen = HashSet::new();
    for t in tickets {
        if !seen.insert(t.number.as_str()) {
            warn!(number = %t.number, user = %t.user, "duplicate ticket number on board");
        }
    }
}
