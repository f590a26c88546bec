use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::Deserialize;
use thiserror::Error;

use crate::active_state::{DEFAULT_STAY_MINUTES, default_stay};
use crate::packing::UNCATEGORIZED;

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "trip_timeline";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;
const DEFAULT_LOG_FILTER: &str = "info";

pub const CONFIG_ENV: &str = "TRIP_TIMELINE_CONFIG";
pub const TRIP_ENV: &str = "TRIP_TIMELINE_TRIP";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read config `{}`: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to parse config `{}`: {source}", .path.display())]
	Parse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},
	#[error("invalid config: {0}")]
	Invalid(String),
	#[error("no trip selected: pass --trip <path> or set TRIP_TIMELINE_TRIP")]
	NoTrip,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
	pub default_stay_minutes: i64,
	pub poll_interval_secs: u64,
	pub uncategorized_label: String,
	pub log_filter: String,
}

impl Default for TimelineConfig {
	fn default() -> Self {
		Self {
			default_stay_minutes: DEFAULT_STAY_MINUTES,
			poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
			uncategorized_label: UNCATEGORIZED.to_string(),
			log_filter: DEFAULT_LOG_FILTER.to_string(),
		}
	}
}

impl TimelineConfig {
	pub fn default_stay(&self) -> Duration {
		Duration::try_minutes(self.default_stay_minutes).unwrap_or_else(default_stay)
	}

	pub fn poll_interval(&self) -> std::time::Duration {
		std::time::Duration::from_secs(self.poll_interval_secs)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.default_stay_minutes <= 0 || Duration::try_minutes(self.default_stay_minutes).is_none() {
			return Err(ConfigError::Invalid(format!(
				"default_stay_minutes must be a positive number of minutes, got {}",
				self.default_stay_minutes
			)));
		}
		if self.poll_interval_secs == 0 {
			return Err(ConfigError::Invalid(
				"poll_interval_secs must be positive".to_string(),
			));
		}
		if self.uncategorized_label.trim().is_empty() {
			return Err(ConfigError::Invalid(
				"uncategorized_label must not be empty".to_string(),
			));
		}
		Ok(())
	}
}

/// Loads the config from `path`, or the built-in defaults when there is none.
pub fn load_config(path: Option<&Path>) -> Result<TimelineConfig, ConfigError> {
	let Some(path) = path else {
		return Ok(TimelineConfig::default());
	};

	let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	let config: TimelineConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
		path: path.to_path_buf(),
		source,
	})?;
	config.validate()?;
	Ok(config)
}

/// Flag, then environment, then the per-user config file if it exists.
pub fn resolve_config_path(cli_path: Option<PathBuf>) -> Option<PathBuf> {
	if let Some(path) = cli_path {
		return Some(absolutize(path));
	}

	if let Some(path) = non_empty_env_path(CONFIG_ENV) {
		return Some(absolutize(path));
	}

	let default_path = config_dir().join(CONFIG_FILE);
	default_path.is_file().then_some(default_path)
}

pub fn resolve_trip_path(cli_path: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
	if let Some(path) = cli_path {
		return Ok(absolutize(path));
	}

	non_empty_env_path(TRIP_ENV)
		.map(absolutize)
		.ok_or(ConfigError::NoTrip)
}

fn non_empty_env_path(key: &str) -> Option<PathBuf> {
	env::var_os(key)
		.map(PathBuf::from)
		.filter(|path| !path.as_os_str().is_empty())
}

fn config_dir() -> PathBuf {
	#[cfg(target_os = "windows")]
	{
		if let Some(path) = env::var_os("APPDATA") {
			return PathBuf::from(path).join(APP_DIR);
		}
	}

	if let Some(path) = env::var_os("XDG_CONFIG_HOME") {
		return PathBuf::from(path).join(APP_DIR);
	}

	if let Some(path) = env::var_os("HOME") {
		return PathBuf::from(path).join(".config").join(APP_DIR);
	}

	PathBuf::from(".trip_timeline")
}

fn absolutize(path: PathBuf) -> PathBuf {
	let path = if path.is_absolute() {
		path
	} else if let Ok(cwd) = env::current_dir() {
		cwd.join(path)
	} else {
		path
	};

	if path.exists() {
		fs::canonicalize(&path).unwrap_or(path)
	} else {
		path
	}
}
