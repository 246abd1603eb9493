//! Configuration module for the orderflow system.
//!
//! Configuration is read from a TOML file. Every section is optional and
//! falls back to defaults, so an empty file is a valid configuration.
//! Values may reference environment variables as `${VAR}` or
//! `${VAR:-default}`; they are resolved before the TOML is parsed.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Upper bound for the lifecycle notification buffer.
pub const MAX_EVENT_CAPACITY: usize = 65_536;
/// Upper bound for the number of orders the driver creates.
const MAX_DRIVER_ORDERS: u64 = 10_000;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Keep the message, drop the echoed input
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for orderflow.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
	/// Identity of this service instance.
	#[serde(default)]
	pub service: ServiceConfig,
	/// Lifecycle notification settings.
	#[serde(default)]
	pub events: EventsConfig,
	/// Settings for the two-actor demonstration driver.
	#[serde(default)]
	pub driver: DriverConfig,
}

/// Configuration specific to the service instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
	/// Identifier used in logs.
	#[serde(default = "default_service_id")]
	pub id: String,
}

impl Default for ServiceConfig {
	fn default() -> Self {
		Self {
			id: default_service_id(),
		}
	}
}

fn default_service_id() -> String {
	"orderflow".to_string()
}

/// Configuration for the lifecycle notification bus.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventsConfig {
	/// Number of notifications buffered per subscriber before lagging.
	#[serde(default = "default_event_capacity")]
	pub capacity: usize,
}

impl Default for EventsConfig {
	fn default() -> Self {
		Self {
			capacity: default_event_capacity(),
		}
	}
}

fn default_event_capacity() -> usize {
	1024
}

/// Configuration for the demonstration driver.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DriverConfig {
	/// Number of orders created before the actors start.
	#[serde(default = "default_driver_orders")]
	pub orders: u64,
	/// Order driven by the concurrent customer context.
	#[serde(default = "default_customer_order")]
	pub customer_order: u64,
}

impl Default for DriverConfig {
	fn default() -> Self {
		Self {
			orders: default_driver_orders(),
			customer_order: default_customer_order(),
		}
	}
}

fn default_driver_orders() -> u64 {
	2
}

fn default_customer_order() -> u64 {
	1
}

/// Resolves environment variables in a string.
///
/// Replaces `${VAR_NAME}` with the value of `VAR_NAME`, or with the fallback
/// given as `${VAR_NAME:-fallback}` when the variable is unset.
///
/// Input strings are limited to 1MB.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut resolved = String::with_capacity(input.len());
	let mut last = 0;

	for cap in re.captures_iter(input) {
		let (Some(whole), Some(name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};

		let value = match std::env::var(name.as_str()) {
			Ok(v) => v,
			Err(_) => match cap.get(2) {
				Some(fallback) => fallback.as_str().to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						name.as_str()
					)))
				},
			},
		};

		resolved.push_str(&input[last..whole.start()]);
		resolved.push_str(&value);
		last = whole.end();
	}
	resolved.push_str(&input[last..]);

	Ok(resolved)
}

impl Config {
	/// Loads configuration from a TOML file.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path.as_ref()).await?;
		content.parse()
	}

	/// Validates field ranges and cross-field constraints.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.service.id.trim().is_empty() {
			return Err(ConfigError::Validation(
				"service.id cannot be empty".into(),
			));
		}

		if self.events.capacity == 0 {
			return Err(ConfigError::Validation(
				"events.capacity must be at least 1".into(),
			));
		}
		if self.events.capacity > MAX_EVENT_CAPACITY {
			return Err(ConfigError::Validation(format!(
				"events.capacity cannot exceed {}",
				MAX_EVENT_CAPACITY
			)));
		}

		if self.driver.orders == 0 {
			return Err(ConfigError::Validation(
				"driver.orders must be at least 1".into(),
			));
		}
		if self.driver.orders > MAX_DRIVER_ORDERS {
			return Err(ConfigError::Validation(format!(
				"driver.orders cannot exceed {}",
				MAX_DRIVER_ORDERS
			)));
		}
		if self.driver.customer_order == 0 || self.driver.customer_order > self.driver.orders {
			return Err(ConfigError::Validation(format!(
				"driver.customer_order must be between 1 and driver.orders ({})",
				self.driver.orders
			)));
		}

		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("ORDERFLOW_TEST_HOST", "localhost");
		std::env::set_var("ORDERFLOW_TEST_PORT", "5432");

		let input = "host = \"${ORDERFLOW_TEST_HOST}:${ORDERFLOW_TEST_PORT}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "host = \"localhost:5432\"");

		std::env::remove_var("ORDERFLOW_TEST_HOST");
		std::env::remove_var("ORDERFLOW_TEST_PORT");
	}

	#[test]
	fn test_env_var_with_default() {
		let input = "value = \"${ORDERFLOW_MISSING_VAR:-fallback}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "value = \"fallback\"");
	}

	#[test]
	fn test_missing_env_var_error() {
		let input = "value = \"${ORDERFLOW_MISSING_VAR}\"";
		let result = resolve_env_vars(input);
		assert!(result.is_err());
		assert!(result
			.unwrap_err()
			.to_string()
			.contains("ORDERFLOW_MISSING_VAR"));
	}

	#[test]
	fn test_text_without_placeholders_is_untouched() {
		let input = "[service]\nid = \"plain\"\n";
		assert_eq!(resolve_env_vars(input).unwrap(), input);
	}

	#[test]
	fn test_empty_config_uses_defaults() {
		let config: Config = "".parse().unwrap();
		assert_eq!(config.service.id, "orderflow");
		assert_eq!(config.events.capacity, 1024);
		assert_eq!(config.driver.orders, 2);
		assert_eq!(config.driver.customer_order, 1);
		assert!(Config::default().validate().is_ok());
	}

	#[test]
	fn test_config_with_env_vars() {
		std::env::set_var("ORDERFLOW_TEST_SERVICE_ID", "orders-eu");

		let config_str = r#"
[service]
id = "${ORDERFLOW_TEST_SERVICE_ID}"

[events]
capacity = ${ORDERFLOW_TEST_CAPACITY:-256}

[driver]
orders = 5
customer_order = 3
"#;

		let config: Config = config_str.parse().unwrap();
		assert_eq!(config.service.id, "orders-eu");
		assert_eq!(config.events.capacity, 256);
		assert_eq!(config.driver.orders, 5);
		assert_eq!(config.driver.customer_order, 3);

		std::env::remove_var("ORDERFLOW_TEST_SERVICE_ID");
	}

	#[test]
	fn test_validation_rejects_bad_values() {
		let cases = [
			("[service]\nid = \"  \"", "service.id"),
			("[events]\ncapacity = 0", "events.capacity"),
			("[events]\ncapacity = 100000", "events.capacity"),
			("[driver]\norders = 0", "driver.orders"),
			("[driver]\norders = 2\ncustomer_order = 3", "driver.customer_order"),
			("[driver]\ncustomer_order = 0", "driver.customer_order"),
		];

		for (input, field) in cases {
			let err = input.parse::<Config>().unwrap_err();
			assert!(
				matches!(err, ConfigError::Validation(ref msg) if msg.contains(field)),
				"expected validation error for {}, got {:?}",
				field,
				err
			);
		}
	}

	#[test]
	fn test_parse_error_is_reported() {
		let err = "[events]\ncapacity = \"many\"".parse::<Config>().unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[tokio::test]
	async fn test_from_file() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "[driver]\norders = 4\ncustomer_order = 2").unwrap();

		let config = Config::from_file(file.path()).await.unwrap();
		assert_eq!(config.driver.orders, 4);
		assert_eq!(config.driver.customer_order, 2);
	}

	#[tokio::test]
	async fn test_from_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let result = Config::from_file(dir.path().join("absent.toml")).await;
		assert!(matches!(result, Err(ConfigError::Io(_))));
	}
}
