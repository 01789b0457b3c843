//! Daemon configuration, read from `STAGE_TRACKER_*` environment variables.

use stage_tracker_api_rpc::server::{DEFAULT_RPC_HOST, DEFAULT_RPC_PORT};
use stage_tracker_core::error::{AppError, Result};
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "~/.stage-tracker/tracker.db";

pub const ENV_DB_PATH: &str = "STAGE_TRACKER_DB_PATH";
pub const ENV_RPC_HOST: &str = "STAGE_TRACKER_RPC_HOST";
pub const ENV_RPC_PORT: &str = "STAGE_TRACKER_RPC_PORT";
pub const ENV_TOKENS: &str = "STAGE_TRACKER_TOKENS";
pub const ENV_LOG_FORMAT: &str = "STAGE_TRACKER_LOG_FORMAT";
pub const ENV_LOG_DIR: &str = "STAGE_TRACKER_LOG_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Development: pretty formatting with colors
    Pretty,
    /// Production: JSON structured logging
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    pub db_path: String,
    pub rpc_host: String,
    pub rpc_port: u16,
    /// `token=subject` pairs for the static identity provider
    pub tokens: String,
    pub log_format: LogFormat,
    pub log_dir: Option<PathBuf>,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = lookup(ENV_DB_PATH).unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let db_path = if db_path.starts_with("sqlite:") {
            db_path
        } else {
            shellexpand::tilde(&db_path).into_owned()
        };

        let rpc_host = lookup(ENV_RPC_HOST).unwrap_or_else(|| DEFAULT_RPC_HOST.to_string());

        let rpc_port = match lookup(ENV_RPC_PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                AppError::Config(format!("{} must be a port number, got {:?}: {}", ENV_RPC_PORT, raw, e))
            })?,
            None => DEFAULT_RPC_PORT,
        };

        let log_format = match lookup(ENV_LOG_FORMAT).as_deref().map(str::trim) {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "{} must be pretty or json, got {:?}",
                    ENV_LOG_FORMAT, other
                )))
            }
        };

        let log_dir = lookup(ENV_LOG_DIR)
            .filter(|dir| !dir.trim().is_empty())
            .map(|dir| PathBuf::from(shellexpand::tilde(&dir).into_owned()));

        Ok(Self {
            db_path,
            rpc_host,
            rpc_port,
            tokens: lookup(ENV_TOKENS).unwrap_or_default(),
            log_format,
            log_dir,
        })
    }

    /// Directory that must exist before the database file can be created
    pub fn db_parent_dir(&self) -> Option<PathBuf> {
        if self.db_path.starts_with("sqlite:") {
            return None;
        }
        PathBuf::from(&self.db_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<DaemonConfig> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DaemonConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert!(config.db_path.ends_with(".stage-tracker/tracker.db"));
        assert!(!config.db_path.starts_with('~'));
        assert_eq!(config.rpc_host, "127.0.0.1");
        assert_eq!(config.rpc_port, 9640);
        assert_eq!(config.tokens, "");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (ENV_DB_PATH, "/tmp/tracker.db"),
            (ENV_RPC_PORT, "7000"),
            (ENV_TOKENS, "tok=alice"),
            (ENV_LOG_FORMAT, "json"),
            (ENV_LOG_DIR, "/var/log/stage-tracker"),
        ])
        .unwrap();

        assert_eq!(config.db_path, "/tmp/tracker.db");
        assert_eq!(config.db_parent_dir(), Some(PathBuf::from("/tmp")));
        assert_eq!(config.rpc_port, 7000);
        assert_eq!(config.tokens, "tok=alice");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/stage-tracker")));
    }

    #[test]
    fn test_sqlite_url_is_kept_verbatim() {
        let config = config_from(&[(ENV_DB_PATH, "sqlite::memory:")]).unwrap();
        assert_eq!(config.db_path, "sqlite::memory:");
        assert!(config.db_parent_dir().is_none());
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        assert!(matches!(
            config_from(&[(ENV_RPC_PORT, "not-a-port")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            config_from(&[(ENV_LOG_FORMAT, "xml")]),
            Err(AppError::Config(_))
        ));
    }
}
