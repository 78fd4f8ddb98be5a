//! Configuration loading and persistence.
//!
//! Settings are read from a TOML file under the platform config directory,
//! with environment variable overrides applied on top. A missing config
//! file is not an error; defaults are used so a scheduled run works out of
//! the box.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

use crate::constants::{
    DEFAULT_GAME_STATS_API_BASE, DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_LEAGUE_API_BASE,
    DEFAULT_LEAGUE_SLUGS, DEFAULT_MATCH_DETAILS_API_BASE, DEFAULT_RETENTION_DAYS,
};
use crate::error::AppError;

mod paths;
mod validation;

pub use paths::{get_config_path, get_default_output_file_path, get_log_dir_path};
pub use validation::validate_config;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// League slugs to fetch, e.g. `na-lcs`.
    #[serde(default = "default_league_slugs")]
    pub league_slugs: Vec<String>,
    /// Matches older than this many days are evicted from the cache.
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
    #[serde(default = "default_league_api_base")]
    pub league_api_base: String,
    #[serde(default = "default_match_details_api_base")]
    pub match_details_api_base: String,
    #[serde(default = "default_game_stats_api_base")]
    pub game_stats_api_base: String,
    #[serde(default = "default_cache_file_path")]
    pub cache_file_path: String,
    #[serde(default = "default_output_file_path")]
    pub output_file_path: String,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Custom log file path. When unset, logs go to the default log
    /// directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

fn default_league_slugs() -> Vec<String> {
    DEFAULT_LEAGUE_SLUGS.iter().map(|s| s.to_string()).collect()
}

fn default_retention_days() -> i64 {
    DEFAULT_RETENTION_DAYS
}

fn default_league_api_base() -> String {
    DEFAULT_LEAGUE_API_BASE.to_string()
}

fn default_match_details_api_base() -> String {
    DEFAULT_MATCH_DETAILS_API_BASE.to_string()
}

fn default_game_stats_api_base() -> String {
    DEFAULT_GAME_STATS_API_BASE.to_string()
}

fn default_cache_file_path() -> String {
    paths::get_default_cache_file_path()
}

fn default_output_file_path() -> String {
    paths::get_default_output_file_path()
}

fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            league_slugs: default_league_slugs(),
            retention_days: default_retention_days(),
            league_api_base: default_league_api_base(),
            match_details_api_base: default_match_details_api_base(),
            game_stats_api_base: default_game_stats_api_base(),
            cache_file_path: default_cache_file_path(),
            output_file_path: default_output_file_path(),
            http_timeout_seconds: default_http_timeout(),
            log_file_path: None,
        }
    }
}

impl Config {
    /// Loads the configuration from the default location, falling back to
    /// defaults if the file does not exist, then applies environment
    /// variable overrides and validates the result.
    #[instrument]
    pub async fn load() -> Result<Config, AppError> {
        Self::load_from_path(&get_config_path()).await
    }

    /// Loads the configuration from the given path.
    #[instrument]
    pub async fn load_from_path(path: &str) -> Result<Config, AppError> {
        let mut config = if Path::new(path).exists() {
            debug!("Reading config from {path}");
            let content = tokio::fs::read_to_string(path).await?;
            toml::from_str::<Config>(&content)?
        } else {
            debug!("No config file at {path}, using defaults");
            Config::default()
        };

        config.apply_env_overrides()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Applies `VODLIST_*` environment variable overrides on top of the
    /// file-provided (or default) settings.
    fn apply_env_overrides(&mut self) -> Result<(), AppError> {
        if let Ok(leagues) = std::env::var("VODLIST_LEAGUES") {
            self.league_slugs = leagues
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(days) = std::env::var("VODLIST_RETENTION_DAYS") {
            self.retention_days = days.parse().map_err(|_| {
                AppError::config_error(format!(
                    "VODLIST_RETENTION_DAYS must be an integer, got '{days}'"
                ))
            })?;
        }
        if let Ok(path) = std::env::var("VODLIST_CACHE_FILE") {
            self.cache_file_path = path;
        }
        if let Ok(path) = std::env::var("VODLIST_OUTPUT_FILE") {
            self.output_file_path = path;
        }
        if let Ok(timeout) = std::env::var("VODLIST_HTTP_TIMEOUT") {
            self.http_timeout_seconds = timeout.parse().map_err(|_| {
                AppError::config_error(format!(
                    "VODLIST_HTTP_TIMEOUT must be a number of seconds, got '{timeout}'"
                ))
            })?;
        }
        if let Ok(path) = std::env::var("VODLIST_LOG_FILE") {
            self.log_file_path = Some(path);
        }
        Ok(())
    }

    /// Saves the configuration to the default location.
    pub async fn save(&self) -> Result<(), AppError> {
        self.save_to_path(&get_config_path()).await
    }

    /// Saves the configuration to the given path, creating parent
    /// directories as needed.
    #[instrument(skip(self))]
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let toml_str = toml::to_string_pretty(self)?;
        if let Some(parent) = Path::new(path).parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, toml_str).await?;
        Ok(())
    }

    /// Renders the effective settings for `--list-config`.
    pub fn display(&self) -> String {
        let log_file = self
            .log_file_path
            .clone()
            .unwrap_or_else(|| format!("{} (default)", get_log_dir_path()));
        format!(
            "Config file: {}\n\
             Leagues: {}\n\
             Retention days: {}\n\
             League API base: {}\n\
             Match details API base: {}\n\
             Game stats API base: {}\n\
             Cache file: {}\n\
             Output file: {}\n\
             HTTP timeout: {}s\n\
             Log file: {}",
            get_config_path(),
            self.league_slugs.join(", "),
            self.retention_days,
            self.league_api_base,
            self.match_details_api_base,
            self.game_stats_api_base,
            self.cache_file_path,
            self.output_file_path,
            self.http_timeout_seconds,
            log_file,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        for var in [
            "VODLIST_LEAGUES",
            "VODLIST_RETENTION_DAYS",
            "VODLIST_CACHE_FILE",
            "VODLIST_OUTPUT_FILE",
            "VODLIST_HTTP_TIMEOUT",
            "VODLIST_LOG_FILE",
        ] {
            unsafe { std::env::remove_var(var) };
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_load_missing_file_uses_defaults() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.toml");
        let config = Config::load_from_path(path.to_str().unwrap()).await.unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    #[serial]
    async fn test_save_and_load_round_trip() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let path_str = path.to_str().unwrap();

        let config = Config {
            league_slugs: vec!["eu-lcs".to_string()],
            retention_days: 7,
            http_timeout_seconds: 10,
            ..Config::default()
        };
        config.save_to_path(path_str).await.unwrap();

        let loaded = Config::load_from_path(path_str).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    #[serial]
    async fn test_partial_file_fills_in_defaults() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        tokio::fs::write(&path, "retention_days = 3\n").await.unwrap();

        let config = Config::load_from_path(path.to_str().unwrap()).await.unwrap();
        assert_eq!(config.retention_days, 3);
        assert_eq!(config.league_slugs, default_league_slugs());
        assert_eq!(config.http_timeout_seconds, DEFAULT_HTTP_TIMEOUT_SECONDS);
    }

    #[tokio::test]
    #[serial]
    async fn test_env_overrides_take_precedence() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        tokio::fs::write(&path, "retention_days = 3\n").await.unwrap();

        unsafe {
            std::env::set_var("VODLIST_LEAGUES", "na-lcs, worlds");
            std::env::set_var("VODLIST_RETENTION_DAYS", "21");
            std::env::set_var("VODLIST_HTTP_TIMEOUT", "5");
        }

        let config = Config::load_from_path(path.to_str().unwrap()).await.unwrap();
        clear_env();

        assert_eq!(config.league_slugs, vec!["na-lcs", "worlds"]);
        assert_eq!(config.retention_days, 21);
        assert_eq!(config.http_timeout_seconds, 5);
    }

    #[tokio::test]
    #[serial]
    async fn test_invalid_env_override_is_an_error() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.toml");

        unsafe { std::env::set_var("VODLIST_RETENTION_DAYS", "two weeks") };
        let result = Config::load_from_path(path.to_str().unwrap()).await;
        clear_env();

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_invalid_toml_is_an_error() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        tokio::fs::write(&path, "retention_days = [not toml").await.unwrap();

        let result = Config::load_from_path(path.to_str().unwrap()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    #[serial]
    async fn test_invalid_loaded_config_is_rejected() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        tokio::fs::write(&path, "retention_days = -1\n").await.unwrap();

        let result = Config::load_from_path(path.to_str().unwrap()).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_display_includes_effective_settings() {
        let config = Config::default();
        let rendered = config.display();
        assert!(rendered.contains("na-lcs"));
        assert!(rendered.contains("Retention days: 14"));
    }
}
