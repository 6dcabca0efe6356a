//! Velocity aggregation over an extracted ticket list.
//!
//! A single pass classifies each assigned ticket into at most one of the five
//! base metrics and folds it into its (user, project) group. User and project
//! rows are then summed from the (user, project) rows, not from tickets.
//! Groups come out ordered by their key.

use crate::models::velocity::{VelocityByProject, VelocityByProjectAndUser, VelocityByUser, VelocityMetrics};
use crate::models::Ticket;
use serde::Serialize;
use std::collections::BTreeMap;

/// Description marker for production-incident fixes, matched case-insensitively.
pub const PROD_BUG_MARKER: &str = "prod bug";

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
/// Everything a report needs, in report order.
pub struct VelocityReport {
    pub user_tickets: Vec<Ticket>,
    pub unassigned_tickets: Vec<Ticket>,
    pub by_project_and_user: Vec<VelocityByProjectAndUser>,
    pub by_user: Vec<VelocityByUser>,
    pub by_project: Vec<VelocityByProject>,
}

pub fn is_prod_fix(ticket: &Ticket) -> bool {
    ticket.description.to_lowercase().contains(PROD_BUG_MARKER)
}

/// The metrics a single ticket contributes. At most one field is non-zero;
/// `AWAITING FEEDBACK` tickets contribute nothing.
pub fn ticket_metrics(ticket: &Ticket) -> VelocityMetrics {
    let points = ticket.points();
    let prod = is_prod_fix(ticket);
    let status = ticket.status;
    let mut m = VelocityMetrics::default();
    if status.is_committed() {
        // Committed work has no production-fix bucket.
        if !prod {
            m.committed_non_prod_fixes = points;
        }
    } else if status.is_completed() {
        if prod {
            m.completed_prod_fixes = points;
        } else {
            m.completed_non_prod_fixes = points;
        }
    } else if status.is_deployed() {
        if prod {
            m.deployed_prod_fixes = points;
        } else {
            m.deployed_non_prod_fixes = points;
        }
    }
    m
}

/// Split into (assigned, unassigned), keeping the input order in each half.
pub fn partition(tickets: Vec<Ticket>) -> (Vec<Ticket>, Vec<Ticket>) {
    tickets.into_iter().partition(Ticket::is_assigned)
}

pub fn by_project_and_user(assigned: &[Ticket]) -> Vec<VelocityByProjectAndUser> {
    let mut groups: BTreeMap<(&str, &str), VelocityMetrics> = BTreeMap::new();
    for t in assigned {
        *groups.entry((t.user.as_str(), t.project.as_str())).or_default() += ticket_metrics(t);
    }
    groups
        .into_iter()
        .map(|((user, project), metrics)| VelocityByProjectAndUser {
            user: user.to_string(),
            project: project.to_string(),
            metrics,
        })
        .collect()
}

pub fn by_user(rows: &[VelocityByProjectAndUser]) -> Vec<VelocityByUser> {
    let mut groups: BTreeMap<&str, VelocityMetrics> = BTreeMap::new();
    for r in rows {
        *groups.entry(r.user.as_str()).or_default() += r.metrics;
    }
    groups
        .into_iter()
        .map(|(user, metrics)| VelocityByUser {
            user: user.to_string(),
            metrics,
        })
        .collect()
}

pub fn by_project(rows: &[VelocityByProjectAndUser]) -> Vec<VelocityByProject> {
    let mut groups: BTreeMap<&str, VelocityMetrics> = BTreeMap::new();
    for r in rows {
        *groups.entry(r.project.as_str()).or_default() += r.metrics;
    }
    groups
        .into_iter()
        .map(|(project, metrics)| VelocityByProject {
            project: project.to_string(),
            metrics,
        })
        .collect()
}

/// Build all five report datasets from a sorted ticket list.
pub fn aggregate(tickets: Vec<Ticket>) -> VelocityReport {
    let (user_tickets, unassigned_tickets) = partition(tickets);
    let by_project_and_user = by_project_and_user(&user_tickets);
    let by_user = by_user(&by_project_and_user);
    let by_project = by_project(&by_project_and_user);
    VelocityReport {
        user_tickets,
        unassigned_tickets,
        by_project_and_user,
        by_user,
        by_project,
    }
}
