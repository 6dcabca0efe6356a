//! Delivery status lookup by column position.
//!
//! The board always presents its columns in the same order, so a card's
//! status is fully determined by the ordinal of the column it sits in.

use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Board statuses in column order. Variant order doubles as the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    ToDo,
    InProgress,
    AwaitingFeedback,
    AwaitingMrApproval,
    InDevelop,
    InDev,
    InSit,
    InUat,
    Done,
}

/// Column-ordinal lookup table.
pub const STATUSES: [Status; 9] = [
    Status::ToDo,
    Status::InProgress,
    Status::AwaitingFeedback,
    Status::AwaitingMrApproval,
    Status::InDevelop,
    Status::InDev,
    Status::InSit,
    Status::InUat,
    Status::Done,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("column ordinal {ordinal} exceeds the {} known statuses", STATUSES.len())]
/// A lane presented more columns than there are statuses.
pub struct OutOfRange {
    pub ordinal: usize,
}

impl Status {
    /// Map a zero-based column ordinal to its status.
    pub fn from_column(ordinal: usize) -> Result<Status, OutOfRange> {
        STATUSES.get(ordinal).copied().ok_or(OutOfRange { ordinal })
    }

    /// Position of this status in the board's column order.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Status::ToDo => "TO DO",
            Status::InProgress => "IN PROGRESS",
            Status::AwaitingFeedback => "AWAITING FEEDBACK",
            Status::AwaitingMrApproval => "AWAITING MR APPROVAL",
            Status::InDevelop => "IN DEVELOP",
            Status::InDev => "IN DEV",
            Status::InSit => "IN SIT",
            Status::InUat => "IN UAT",
            Status::Done => "DONE",
        }
    }

    /// Work not yet handed over: `TO DO` and `IN PROGRESS`.
    pub fn is_committed(self) -> bool {
        matches!(self, Status::ToDo | Status::InProgress)
    }

    /// Anything past review but not yet deployed. `AWAITING FEEDBACK` is
    /// neither committed nor completed.
    pub fn is_completed(self) -> bool {
        !self.is_committed() && !matches!(self, Status::AwaitingFeedback | Status::Done)
    }

    pub fn is_deployed(self) -> bool {
        self == Status::Done
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_column_follows_board_order() {
        assert_eq!(Status::from_column(0), Ok(Status::ToDo));
        assert_eq!(Status::from_column(2), Ok(Status::AwaitingFeedback));
        assert_eq!(Status::from_column(8), Ok(Status::Done));
        for (i, s) in STATUSES.iter().enumerate() {
            assert_eq!(s.ordinal(), i);
        }
    }

    #[test]
    fn test_from_column_out_of_range_fails() {
        let err = Status::from_column(9).unwrap_err();
        assert_eq!(err.ordinal, 9);
        assert!(err.to_string().contains("9 known statuses"));
    }

    #[test]
    fn test_stage_predicates_leave_awaiting_feedback_out() {
        let fb = Status::AwaitingFeedback;
        assert!(!fb.is_committed() && !fb.is_completed() && !fb.is_deployed());
        assert!(Status::InSit.is_completed());
        assert!(Status::AwaitingMrApproval.is_completed());
        assert!(!Status::Done.is_completed());
        assert!(Status::InProgress.is_committed());
    }

    #[test]
    fn test_serializes_as_board_name() {
        let v = serde_json::to_value(Status::AwaitingMrApproval).unwrap();
        assert_eq!(v, "AWAITING MR APPROVAL");
    }
}
