//! Board access: credentials and the reader/session seam.
//!
//! A `BoardReader` opens a `BoardSession`; the session owns whatever the
//! reader needed (a browser, a file handle, a cached snapshot) and releases
//! it in `Drop`, so an extraction failure still frees it on the way out.
//!
//! `SnapshotReader` is the file-backed reader: it loads a JSON or YAML board
//! snapshot with the same lane/column/card shape a live board presents.

use crate::error::{Result, VelocityError};
use crate::models::board::{Board, SwimLane};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Clone)]
/// Login pair read from a two-line text file.
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Credentials {
    /// Read username (line 1) and password (line 2). Only presence is checked.
    pub fn load(path: &Path) -> Result<Credentials> {
        let text = fs::read_to_string(path).map_err(|e| VelocityError::Credentials {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let mut lines = text.lines().map(|l| l.trim_end_matches('\r'));
        match (lines.next(), lines.next()) {
            (Some(username), Some(password)) => Ok(Credentials {
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => Err(VelocityError::Credentials {
                path: path.to_path_buf(),
                reason: "expected username on line 1 and password on line 2".into(),
            }),
        }
    }
}

/// Something that can authenticate against a board and hand out a session.
pub trait BoardReader {
    type Session: BoardSession;

    fn open(&self, credentials: &Credentials) -> Result<Self::Session>;
}

/// A live connection to a board. Dropping it releases the connection.
pub trait BoardSession {
    /// Swim lanes in board order, columns in canonical status order.
    fn swim_lanes(&mut self) -> Result<&[SwimLane]>;
}

/// Reads a board snapshot from disk (`.json`, `.yaml` or `.yml`).
pub struct SnapshotReader {
    path: PathBuf,
}

impl SnapshotReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotReader { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Board> {
        let err = |reason: String| VelocityError::Board {
            path: self.path.clone(),
            reason,
        };
        let text = fs::read_to_string(&self.path).map_err(|e| err(e.to_string()))?;
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&text).map_err(|e| err(e.to_string())),
            _ => serde_json::from_str(&text).map_err(|e| err(e.to_string())),
        }
    }
}

impl BoardReader for SnapshotReader {
    type Session = SnapshotSession;

    fn open(&self, credentials: &Credentials) -> Result<SnapshotSession> {
        if credentials.username.trim().is_empty() {
            return Err(VelocityError::Authentication(
                "username is empty".to_string(),
            ));
        }
        let board = self.load()?;
        info!(
            source = %self.path.display(),
            url = board.url.as_deref().unwrap_or("-"),
            lanes = board.lanes.len(),
            user = %credentials.username,
            "board session opened"
        );
        Ok(SnapshotSession {
            path: self.path.clone(),
            board: Some(board),
        })
    }
}

pub struct SnapshotSession {
    path: PathBuf,
    board: Option<Board>,
}

impl BoardSession for SnapshotSession {
    fn swim_lanes(&mut self) -> Result<&[SwimLane]> {
        match self.board.as_ref() {
            Some(b) => Ok(&b.lanes),
            None => Err(VelocityError::Board {
                path: self.path.clone(),
                reason: "session already released".into(),
            }),
        }
    }
}

impl Drop for SnapshotSession {
    fn drop(&mut self) {
        if self.board.take().is_some() {
            debug!(source = %self.path.display(), "board session released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn creds(user: &str) -> Credentials {
        Credentials {
            username: user.into(),
            password: "secret".into(),
        }
    }

    #[test]
    fn test_credentials_two_lines() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("User.txt");
        fs::write(&p, "jdoe\r\nhunter2\r\n").unwrap();
        let c = Credentials::load(&p).unwrap();
        assert_eq!(c.username, "jdoe");
        assert_eq!(c.password, "hunter2");
        assert!(!format!("{:?}", c).contains("hunter2"));
    }

    #[test]
    fn test_credentials_missing_password_line() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("User.txt");
        fs::write(&p, "jdoe\n").unwrap();
        let err = Credentials::load(&p).unwrap_err();
        assert!(matches!(err, VelocityError::Credentials { .. }));
        assert!(err.is_configuration());
        let err = Credentials::load(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, VelocityError::Credentials { .. }));
    }

    #[test]
    fn test_snapshot_json_session() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("board.json");
        fs::write(
            &p,
            r#"{"url":"https://jira.example/board","lanes":[{"owner":"Ana","columns":[{"cards":[]}]},{"owner":"Unassigned"}]}"#,
        )
        .unwrap();
        let reader = SnapshotReader::new(&p);
        let mut session = reader.open(&creds("jdoe")).unwrap();
        let lanes = session.swim_lanes().unwrap();
        assert_eq!(lanes.len(), 2);
        assert_eq!(lanes[0].owner, "Ana");
        assert!(lanes[1].columns.is_empty());
    }

    #[test]
    fn test_snapshot_yaml_by_extension() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("board.yml");
        fs::write(&p, "lanes:\n  - owner: Ana\n    columns: []\n").unwrap();
        let mut session = SnapshotReader::new(&p).open(&creds("jdoe")).unwrap();
        assert_eq!(session.swim_lanes().unwrap()[0].owner, "Ana");
    }

    #[test]
    fn test_open_failures() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("board.json");
        fs::write(&p, "{ not json").unwrap();
        let reader = SnapshotReader::new(&p);
        assert!(matches!(
            reader.open(&creds(" ")),
            Err(VelocityError::Authentication(_))
        ));
        assert!(matches!(
            reader.open(&creds("jdoe")),
            Err(VelocityError::Board { .. })
        ));
    }
}
