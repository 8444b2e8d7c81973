//! Command-line and environment configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

pub const DEFAULT_DB_URL: &str = "sqlite://quizzes.sqlite3";
pub const DEFAULT_ADDR: &str = "0.0.0.0:3030";

#[derive(Debug, Parser)]
#[command(name = "quiz", version, about = "Interactive quiz sessions over TCP or the terminal")]
pub struct Cli {
    /// SQLite database URL or path
    #[arg(long = "db", env = "QUIZ_DB_URL", default_value = DEFAULT_DB_URL, global = true)]
    pub db_url: String,

    /// Disable colored output
    #[arg(long, env = "QUIZ_NO_COLOR", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Serve quiz sessions over TCP (default)
    Serve {
        /// Address to listen on
        #[arg(long, env = "QUIZ_ADDR", default_value = DEFAULT_ADDR)]
        addr: String,
    },
    /// Run one session on this terminal
    Local,
    /// Insert the starter quizzes
    Seed {
        /// Insert even when the store already has quizzes
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or_else(|| Commands::Serve {
            addr: std::env::var("QUIZ_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string()),
        })
    }
}

/// Accept `sqlite::memory:`, `sqlite://...` URLs, or bare paths made absolute.
#[must_use]
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Make sure the database file and its parent directory exist.
///
/// # Errors
///
/// Fails on malformed URLs or when the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> anyhow::Result<()> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let Some(path) = db_url.strip_prefix("sqlite://") else {
        bail!("invalid --db value: {db_url}");
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        bail!("invalid --db value: {db_url}");
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("creating {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_pass_through() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/q.sqlite3"),
            "sqlite:///tmp/q.sqlite3"
        );
    }

    #[test]
    fn bare_and_prefixed_paths_become_absolute() {
        assert_eq!(normalize_sqlite_url("/data/q.db"), "sqlite:///data/q.db");
        assert_eq!(normalize_sqlite_url("sqlite:/data/q.db"), "sqlite:///data/q.db");
        let relative = normalize_sqlite_url("q.db");
        assert!(relative.starts_with("sqlite:///"));
        assert!(relative.ends_with("/q.db"));
    }

    #[test]
    fn prepare_rejects_non_sqlite_urls() {
        assert!(prepare_sqlite_file("postgres://x").is_err());
        assert!(prepare_sqlite_file("sqlite://").is_err());
        assert!(prepare_sqlite_file("sqlite::memory:").is_ok());
    }

    #[test]
    fn default_command_is_serve() {
        let cli = Cli::parse_from(["quiz"]);
        assert!(matches!(cli.command(), Commands::Serve { .. }));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["quiz", "seed", "--force", "--db", "sqlite::memory:"]);
        assert!(matches!(cli.command(), Commands::Seed { force: true }));
        assert_eq!(cli.db_url, "sqlite::memory:");
    }
}
