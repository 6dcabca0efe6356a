//! Report sink: named tabular sheets persisted as one artifact.
//!
//! `WorkbookSink` keeps sheets in memory until `save`, then writes a JSON
//! workbook through a temp file in the destination directory and renames it
//! into place. A failed or abandoned run never leaves a partial workbook.

use crate::error::{Result, VelocityError};
use crate::models::velocity::{VelocityByProject, VelocityByProjectAndUser, VelocityByUser};
use crate::models::Ticket;
use crate::velocity::VelocityReport;
use serde::Serialize;
use serde_json::Value as Json;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

pub const SHEET_USER_TICKETS: &str = "User Tickets";
pub const SHEET_UNASSIGNED_TICKETS: &str = "Unassigned Tickets";
pub const SHEET_BY_PROJECT_AND_USER: &str = "Velocity By Project and User";
pub const SHEET_BY_USER: &str = "Velocity By User";
pub const SHEET_BY_PROJECT: &str = "Velocity By Project";

const METRIC_COLUMNS: [&str; 9] = [
    "committedNonProdFixes",
    "completedNonProdFixes",
    "completedProdFixes",
    "deployedNonProdFixes",
    "deployedProdFixes",
    "totalCommittedNonProdFixes",
    "totalNonProdFixes",
    "totalProdFixes",
    "grandTotal",
];

/// A row type with a fixed header, so empty sheets still get columns.
pub trait SheetRow: Serialize {
    fn columns() -> Vec<&'static str>;
}

impl SheetRow for Ticket {
    fn columns() -> Vec<&'static str> {
        vec!["user", "project", "number", "description", "status", "size"]
    }
}

impl SheetRow for VelocityByProjectAndUser {
    fn columns() -> Vec<&'static str> {
        let mut c = vec!["user", "project"];
        c.extend(METRIC_COLUMNS);
        c
    }
}

impl SheetRow for VelocityByUser {
    fn columns() -> Vec<&'static str> {
        let mut c = vec!["user"];
        c.extend(METRIC_COLUMNS);
        c
    }
}

impl SheetRow for VelocityByProject {
    fn columns() -> Vec<&'static str> {
        let mut c = vec!["project"];
        c.extend(METRIC_COLUMNS);
        c
    }
}

/// Destination for named datasets. Nothing is persisted before `save`.
pub trait ReportSink {
    fn add_sheet<T: SheetRow>(&mut self, name: &str, rows: &[T]) -> Result<()>;

    /// Persist every added sheet; returns where the artifact landed.
    fn save(self) -> Result<PathBuf>;
}

#[derive(Debug, Clone, Serialize)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Json>>,
}

#[derive(Debug, Serialize)]
struct Workbook<'a> {
    sheets: &'a [Sheet],
}

pub struct WorkbookSink {
    path: PathBuf,
    sheets: Vec<Sheet>,
}

impl WorkbookSink {
    pub fn create(path: impl Into<PathBuf>) -> Self {
        WorkbookSink {
            path: path.into(),
            sheets: Vec::new(),
        }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    fn fail(&self, reason: impl ToString) -> VelocityError {
        VelocityError::SinkWrite {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl ReportSink for WorkbookSink {
    fn add_sheet<T: SheetRow>(&mut self, name: &str, rows: &[T]) -> Result<()> {
        if self.sheets.iter().any(|s| s.name == name) {
            return Err(self.fail(format!("duplicate sheet '{}'", name)));
        }
        let columns = T::columns();
        let mut cells = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::to_value(row).map_err(|e| self.fail(e))?;
            let Json::Object(obj) = value else {
                return Err(self.fail(format!("sheet '{}': row is not a record", name)));
            };
            cells.push(
                columns
                    .iter()
                    .map(|c| obj.get(*c).cloned().unwrap_or(Json::Null))
                    .collect(),
            );
        }
        debug!(sheet = name, rows = cells.len(), "sheet added");
        self.sheets.push(Sheet {
            name: name.to_string(),
            columns: columns.into_iter().map(String::from).collect(),
            rows: cells,
        });
        Ok(())
    }

    fn save(self) -> Result<PathBuf> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| self.fail(e))?;
        serde_json::to_writer_pretty(
            &mut tmp,
            &Workbook {
                sheets: &self.sheets,
            },
        )
        .map_err(|e| self.fail(e))?;
        tmp.write_all(b"\n").map_err(|e| self.fail(e))?;
        tmp.persist(&self.path).map_err(|e| self.fail(e.error))?;
        info!(path = %self.path.display(), sheets = self.sheets.len(), "report saved");
        Ok(self.path)
    }
}

/// Add the five report datasets to `sink` in their fixed order.
pub fn write_report<S: ReportSink>(sink: &mut S, report: &VelocityReport) -> Result<()> {
    sink.add_sheet(SHEET_USER_TICKETS, &report.user_tickets)?;
    sink.add_sheet(SHEET_UNASSIGNED_TICKETS, &report.unassigned_tickets)?;
    sink.add_sheet(SHEET_BY_PROJECT_AND_USER, &report.by_project_and_user)?;
    sink.add_sheet(SHEET_BY_USER, &report.by_user)?;
    sink.add_sheet(SHEET_BY_PROJECT, &report.by_project)?;
    Ok(())
}
