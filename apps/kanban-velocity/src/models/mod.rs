//! Shared data models: extracted tickets, board input shapes, and velocity rows.

pub mod board;
pub mod velocity;

use crate::status::Status;
use serde::Serialize;

/// Lane owner used by the board for cards nobody has picked up.
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// One card observed on the board.
pub struct Ticket {
    pub user: String,
    pub project: String,
    pub number: String,
    pub description: String,
    pub status: Status,
    /// Story points; `None` when the card shows no numeric size.
    pub size: Option<u32>,
}

impl Ticket {
    pub fn is_assigned(&self) -> bool {
        self.user != UNASSIGNED
    }

    /// Size contribution when summing; absent counts as zero.
    pub fn points(&self) -> u64 {
        u64::from(self.size.unwrap_or(0))
    }
}
