//! kanban-velocity core library.
//!
//! This crate turns the swim lanes of a kanban board into normalized ticket
//! records and folds them into velocity summaries per user+project, per user,
//! and per project, split into production-fix and non-production work across
//! the committed, completed, and deployed stages.
//!
//! High-level modules:
//! - `status`: Column-ordinal to status lookup.
//! - `project`: Ordered project-code classification of card descriptions.
//! - `extract`: Bounded parallel lane extraction with deterministic ordering.
//! - `velocity`: Metric classification and the three-level rollup.
//! - `board`: Credentials, board reader/session traits, snapshot reader.
//! - `report`: Report sink trait and the atomic JSON workbook sink.
//! - `pipeline`: End-to-end run with scoped session release.
//! - `config`: Discovery and effective configuration resolution.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `output`: Human/JSON printers.
//! - `models`: Tickets, board input shapes, velocity rows.
//! - `error`: Error taxonomy.
//! - `utils`: Supporting helpers.
pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod project;
pub mod report;
pub mod status;
pub mod utils;
pub mod velocity;

pub use error::{Result, VelocityError};
