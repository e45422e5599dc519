use globset::{Glob, GlobSet, GlobSetBuilder};
use grok_directive::Data;
use grok_primitives::Value;
use serde::Deserialize;

use crate::ConfigError;

/// Discovery settings, usually read from a `grok.toml`.
///
/// ```toml
/// exclude = ["tests", "*_fixture"]
///
/// [data]
/// site = "main"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
	/// Glob patterns matched against sub-namespace short names.
	pub exclude: Vec<String>,
	/// Seed data handed to every pass.
	pub data: toml::Table,
}

impl DiscoveryConfig {
	pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(s)?)
	}

	/// Compiles the exclude patterns, or `None` if there are none.
	pub fn exclude_set(&self) -> Result<Option<GlobSet>, ConfigError> {
		if self.exclude.is_empty() {
			return Ok(None);
		}
		let mut builder = GlobSetBuilder::new();
		for pattern in &self.exclude {
			builder.add(Glob::new(pattern)?);
		}
		Ok(Some(builder.build()?))
	}

	/// Converts `[data]` into pass data. Floats and datetimes have no
	/// counterpart in [`Value`] and are rejected.
	pub fn seed_data(&self) -> Result<Data, ConfigError> {
		self.data
			.iter()
			.map(|(k, v)| Ok((k.clone(), to_value(k, v)?)))
			.collect()
	}
}

fn to_value(key: &str, value: &toml::Value) -> Result<Value, ConfigError> {
	Ok(match value {
		toml::Value::String(s) => Value::Str(s.clone()),
		toml::Value::Integer(i) => Value::Int(*i),
		toml::Value::Boolean(b) => Value::Bool(*b),
		toml::Value::Float(_) | toml::Value::Datetime(_) => {
			return Err(ConfigError::Unsupported {
				key: key.to_string(),
				kind: value.type_str(),
			});
		}
		toml::Value::Array(items) => Value::List(
			items
				.iter()
				.map(|v| to_value(key, v))
				.collect::<Result<_, _>>()?,
		),
		toml::Value::Table(table) => Value::Map(
			table
				.iter()
				.map(|(k, v)| Ok((k.clone(), to_value(&format!("{key}.{k}"), v)?)))
				.collect::<Result<_, ConfigError>>()?,
		),
	})
}
