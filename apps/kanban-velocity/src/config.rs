//! Configuration discovery and effective settings resolution.
//!
//! Reads `kanban-velocity.toml|yaml|yml` from the repository root (or the
//! closest ancestor) and merges it with CLI flags into an `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `credentials`: `User.txt`
//! - `board.source`: `board.json`
//! - `board.exclude`: empty
//! - `board.workers`: 8
//! - `report.path`: `Tickets.json`
//!
//! Overrides precedence: CLI > config file > defaults. Relative paths are
//! resolved against the detected root.

use crate::extract::DEFAULT_WORKERS;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_NAMES: [&str; 3] = ["kanban-velocity.toml", "kanban-velocity.yaml", "kanban-velocity.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Board section under `[board]`.
pub struct BoardCfg {
    /// Snapshot file read by the board reader.
    pub source: Option<String>,
    pub url: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub workers: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Report section under `[report]`.
pub struct ReportCfg {
    pub path: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `kanban-velocity.toml|yaml`.
pub struct VelocityConfig {
    pub output: Option<String>,
    pub credentials: Option<String>,
    pub board: Option<BoardCfg>,
    pub report: Option<ReportCfg>,
}

#[derive(Debug, Default, Clone)]
/// Values given on the command line; `None` means "not passed".
pub struct CliOverrides {
    pub repo_root: Option<String>,
    pub board: Option<String>,
    pub credentials: Option<String>,
    pub report: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub workers: Option<usize>,
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub board: PathBuf,
    pub url: Option<String>,
    pub credentials: PathBuf,
    pub report: PathBuf,
    pub exclude: Vec<String>,
    pub workers: usize,
    pub output: String,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a config file or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `VelocityConfig` from the first config file present under `root`.
/// An unreadable or malformed file is reported and treated as absent.
pub fn load_config(root: &Path) -> Option<VelocityConfig> {
    for name in CONFIG_NAMES {
        let p = root.join(name);
        if !p.exists() {
            continue;
        }
        let s = match fs::read_to_string(&p) {
            Ok(s) => s,
            Err(e) => {
                warn!(path = %p.display(), error = %e, "config unreadable");
                return None;
            }
        };
        let parsed = if name.ends_with(".toml") {
            toml::from_str::<VelocityConfig>(&s).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<VelocityConfig>(&s).map_err(|e| e.to_string())
        };
        return match parsed {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                warn!(path = %p.display(), error = %e, "config is not valid");
                None
            }
        };
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides) -> Effective {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root);
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();
    let board_cfg = cfg.board.unwrap_or_default();
    let report_cfg = cfg.report.unwrap_or_default();

    let board = cli
        .board
        .clone()
        .or(board_cfg.source)
        .unwrap_or_else(|| "board.json".to_string());
    let credentials = cli
        .credentials
        .clone()
        .or(cfg.credentials)
        .unwrap_or_else(|| "User.txt".to_string());
    let report = cli
        .report
        .clone()
        .or(report_cfg.path)
        .unwrap_or_else(|| "Tickets.json".to_string());
    // CLI exclusions replace the configured list rather than extending it
    let exclude = cli
        .exclude
        .clone()
        .filter(|v| !v.is_empty())
        .or(board_cfg.exclude)
        .unwrap_or_default();
    let workers = cli
        .workers
        .or(board_cfg.workers)
        .unwrap_or(DEFAULT_WORKERS)
        .max(1);
    let output = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    Effective {
        board: repo_root.join(board),
        credentials: repo_root.join(credentials),
        report: repo_root.join(report),
        url: board_cfg.url,
        exclude,
        workers,
        output,
        config_found,
        repo_root,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn at(root: &Path) -> CliOverrides {
        CliOverrides {
            repo_root: root.to_str().map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("kanban-velocity.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
credentials = "secrets/login.txt"
[board]
source = "snapshots/board.yaml"
url = "https://jira.example/secure/RapidBoard.jspa?rapidView=1"
exclude = ["bot"]
workers = 3
[report]
path = "out/velocity.json"
    "#
        )
        .unwrap();

        // Resolve using explicit repo_root to avoid global CWD races
        let eff = resolve_effective(&at(root));
        assert!(eff.config_found);
        assert_eq!(eff.output, "json");
        assert_eq!(eff.board, root.join("snapshots/board.yaml"));
        assert_eq!(eff.credentials, root.join("secrets/login.txt"));
        assert_eq!(eff.report, root.join("out/velocity.json"));
        assert_eq!(eff.exclude, ["bot"]);
        assert_eq!(eff.workers, 3);
        assert!(eff.url.unwrap().contains("rapidView=1"));
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("kanban-velocity.yaml"),
            "board:\n  exclude:\n    - admin\n",
        )
        .unwrap();

        let eff = resolve_effective(&at(root));
        assert_eq!(eff.exclude, ["admin"]);
        assert_eq!(eff.output, "human");
        assert_eq!(eff.workers, DEFAULT_WORKERS);
        assert_eq!(eff.board, root.join("board.json"));
        assert_eq!(eff.credentials, root.join("User.txt"));
        assert_eq!(eff.report, root.join("Tickets.json"));
    }

    #[test]
    fn test_cli_takes_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("kanban-velocity.toml"),
            "output = \"json\"\n[board]\nexclude = [\"bot\"]\nworkers = 4\n",
        )
        .unwrap();
        let cli = CliOverrides {
            output: Some("human".into()),
            exclude: Some(vec!["qa".into(), "ops".into()]),
            workers: Some(0),
            report: Some("/abs/report.json".into()),
            ..at(root)
        };
        let eff = resolve_effective(&cli);
        assert_eq!(eff.output, "human");
        assert_eq!(eff.exclude, ["qa", "ops"]);
        // zero workers is clamped
        assert_eq!(eff.workers, 1);
        assert_eq!(eff.report, PathBuf::from("/abs/report.json"));
    }

    #[test]
    fn test_invalid_config_treated_as_absent() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("kanban-velocity.toml"), "[board\nsource=").unwrap();
        assert!(load_config(root).is_none());
        let eff = resolve_effective(&at(root));
        assert!(!eff.config_found);
        assert_eq!(eff.output, "human");
    }

    #[test]
    fn test_detect_root_walks_up_to_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("kanban-velocity.yml"), "output: json\n").unwrap();
        let nested = root.join("a/b");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(detect_repo_root(&nested), root);
    }
}
