//! Output rendering for the `tickets` and `report` commands.
//!
//! Supports `human` (default) and `json`. The JSON forms are composed by
//! pure functions so their shape can be tested directly.

use crate::models::velocity::VelocityMetrics;
use crate::models::Ticket;
use crate::utils::colors_enabled;
use crate::velocity::VelocityReport;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::path::Path;

fn use_colors(output: &str) -> bool {
    output != "json" && colors_enabled()
}

fn size_text(size: Option<u32>) -> String {
    size.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Print the sorted ticket list.
pub fn print_tickets(tickets: &[Ticket], output: &str) {
    match output {
        "json" => println!("{}", pretty(&compose_tickets_json(tickets))),
        _ => {
            let color = use_colors(output);
            let mut last_user: Option<&str> = None;
            for t in tickets {
                if last_user != Some(t.user.as_str()) {
                    if color {
                        println!("{}", t.user.bold());
                    } else {
                        println!("{}", t.user);
                    }
                    last_user = Some(t.user.as_str());
                }
                let status = format!("{:<20}", t.status.name());
                let status = if color {
                    status.cyan().to_string()
                } else {
                    status
                };
                println!(
                    "  {} {:<8} {:<12} {:>3}  {}",
                    status,
                    t.project,
                    t.number,
                    size_text(t.size),
                    t.description
                );
            }
            let summary = format!("— Summary — tickets={}", tickets.len());
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print the outcome of a full run: velocity per user plus a summary line.
pub fn print_report(report: &VelocityReport, saved_to: &Path, output: &str) {
    match output {
        "json" => println!("{}", pretty(&compose_report_json(report, saved_to))),
        _ => {
            let color = use_colors(output);
            let header = format!(
                "{:<24} {:>9} {:>9} {:>9} {:>9} {:>9} {:>7}",
                "user", "committed", "completed", "deployed", "prod done", "prod dep", "total"
            );
            if color {
                println!("{}", header.bold());
            } else {
                println!("{}", header);
            }
            for row in &report.by_user {
                println!("{}", metrics_line(&row.user, &row.metrics));
            }
            let team: VelocityMetrics = report.by_user.iter().map(|r| &r.metrics).sum();
            let total = metrics_line("(team)", &team);
            if color {
                println!("{}", total.bold());
            } else {
                println!("{}", total);
            }
            let summary = format!(
                "— Summary — user_tickets={} unassigned={} users={} projects={} saved={}",
                report.user_tickets.len(),
                report.unassigned_tickets.len(),
                report.by_user.len(),
                report.by_project.len(),
                saved_to.display()
            );
            if color {
                println!("{}", summary.green().bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

fn metrics_line(label: &str, m: &VelocityMetrics) -> String {
    format!(
        "{:<24} {:>9} {:>9} {:>9} {:>9} {:>9} {:>7}",
        label,
        m.committed_non_prod_fixes,
        m.completed_non_prod_fixes,
        m.deployed_non_prod_fixes,
        m.completed_prod_fixes,
        m.deployed_prod_fixes,
        m.grand_total()
    )
}

fn pretty(v: &JsonVal) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

/// Compose tickets JSON object (pure) for testing/snapshot purposes.
pub fn compose_tickets_json(tickets: &[Ticket]) -> JsonVal {
    json!({
        "tickets": tickets,
        "summary": { "total": tickets.len() },
    })
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &VelocityReport, saved_to: &Path) -> JsonVal {
    json!({
        "report": report,
        "summary": {
            "userTickets": report.user_tickets.len(),
            "unassignedTickets": report.unassigned_tickets.len(),
            "users": report.by_user.len(),
            "projects": report.by_project.len(),
            "savedTo": saved_to.to_string_lossy(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Status;
    use crate::velocity::aggregate;

    fn tickets() -> Vec<Ticket> {
        vec![
            Ticket {
                user: "Ana".into(),
                project: "TM".into(),
                number: "TM-1".into(),
                description: "TM Prod Bug".into(),
                status: Status::Done,
                size: Some(5),
            },
            Ticket {
                user: "Unassigned".into(),
                project: "Unknown".into(),
                number: "X-2".into(),
                description: "triage".into(),
                status: Status::ToDo,
                size: None,
            },
        ]
    }

    #[test]
    fn test_compose_tickets_json_shape() {
        let out = compose_tickets_json(&tickets());
        assert_eq!(out["summary"]["total"], 2);
        assert_eq!(out["tickets"][0]["status"], "DONE");
        assert!(out["tickets"][1]["size"].is_null());
    }

    #[test]
    fn test_compose_report_json_includes_derived_totals() {
        let report = aggregate(tickets());
        let out = compose_report_json(&report, Path::new("Tickets.json"));
        assert_eq!(out["summary"]["unassignedTickets"], 1);
        assert_eq!(out["summary"]["savedTo"], "Tickets.json");
        let row = &out["report"]["byUser"][0];
        assert_eq!(row["user"], "Ana");
        assert_eq!(row["deployedProdFixes"], 5);
        assert_eq!(row["totalProdFixes"], 5);
        assert_eq!(row["grandTotal"], 5);
    }

    #[test]
    fn test_metrics_line_ends_with_grand_total() {
        let m = VelocityMetrics {
            committed_non_prod_fixes: 2,
            deployed_prod_fixes: 3,
            ..Default::default()
        };
        let line = metrics_line("Ana", &m);
        assert!(line.starts_with("Ana"));
        assert!(line.trim_end().ends_with('5'));
    }
}
