//! Service configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty document is a
//! valid configuration:
//!
//! ```toml
//! hours_per_day = 10
//! roles = ["Server", "Line_Cook", "Host"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use thiserror::Error;

use crate::models::{Role, HOURS_PER_DAY};

/// Longest shift a configuration may declare.
pub const MAX_HOURS_PER_DAY: u32 = 24;

/// Failure to load a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// The roles known at configuration time.
///
/// An empty catalog places no restriction on roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCatalog(Vec<Role>);

impl RoleCatalog {
    pub fn new<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        Self(roles.into_iter().map(Into::into).collect())
    }

    /// Whether `role` is allowed by this catalog.
    pub fn admits(&self, role: &Role) -> bool {
        self.0.is_empty() || self.0.contains(role)
    }

    pub fn roles(&self) -> &[Role] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Shift service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftConfig {
    /// Hours credited per assigned day.
    pub hours_per_day: u32,
    /// Known roles.
    pub roles: RoleCatalog,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            hours_per_day: HOURS_PER_DAY,
            roles: RoleCatalog::default(),
        }
    }
}

impl ShiftConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ShiftConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            hours_per_day = config.hours_per_day,
            roles = config.roles.roles().len(),
            "Loaded shift config"
        );
        Ok(config)
    }

    /// Sets hours per day.
    pub fn with_hours_per_day(mut self, hours: u32) -> Self {
        self.hours_per_day = hours;
        self
    }

    /// Sets the role catalog.
    pub fn with_roles(mut self, roles: RoleCatalog) -> Self {
        self.roles = roles;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.hours_per_day == 0 {
            return Err(ConfigError::Invalid(
                "hours_per_day must be greater than zero".into(),
            ));
        }
        if self.hours_per_day > MAX_HOURS_PER_DAY {
            return Err(ConfigError::Invalid(format!(
                "hours_per_day must be at most {MAX_HOURS_PER_DAY}, got {}",
                self.hours_per_day
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ShiftConfig::from_toml_str("").unwrap();
        assert_eq!(config, ShiftConfig::default());
        assert_eq!(config.hours_per_day, 10);
        assert!(config.roles.is_empty());
    }

    #[test]
    fn test_parse_full_document() {
        let config = ShiftConfig::from_toml_str(
            r#"
            hours_per_day = 8
            roles = ["Server", "Cook"]
            "#,
        )
        .unwrap();
        assert_eq!(config.hours_per_day, 8);
        assert!(config.roles.admits(&Role::new("Cook")));
        assert!(!config.roles.admits(&Role::new("Host")));
    }

    #[test]
    fn test_zero_hours_rejected() {
        let err = ShiftConfig::from_toml_str("hours_per_day = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_hours_above_a_day_rejected() {
        assert!(ShiftConfig::from_toml_str("hours_per_day = 24").is_ok());
        let err = ShiftConfig::from_toml_str("hours_per_day = 1000000000").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("at most 24")));
    }

    #[test]
    fn test_malformed_document() {
        let err = ShiftConfig::from_toml_str("hours_per_day = \"ten\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_empty_catalog_admits_anything() {
        let catalog = RoleCatalog::default();
        assert!(catalog.admits(&Role::new("Anything")));
    }
}
