//! Application configuration with environment overrides.
//!
//! [`AppConfig`] resolves where the roster database and logs live, which log
//! level to use, and which currency symbol results are printed with.
//! Precedence: explicit overrides (CLI flags) > environment > defaults.

use crate::logging::default_log_level;
use crate::report::DEFAULT_CURRENCY_SYMBOL;
use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "WATERBILL_DATA_DIR";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "WATERBILL_LOG_LEVEL";
/// Environment variable overriding the currency symbol.
pub const ENV_CURRENCY: &str = "WATERBILL_CURRENCY";

const DEFAULT_DATA_DIR: &str = ".waterbill";
const DEFAULT_DB_FILE_NAME: &str = "waterbill.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the database and logs. Default: `./.waterbill`.
    pub data_dir: PathBuf,
    /// Database file name inside `data_dir`. Default: `waterbill.sqlite3`.
    pub db_file_name: String,
    /// `trace|debug|info|warn|error`. Default depends on build mode.
    pub log_level: String,
    /// Prefix for displayed amounts. Default: `₹`.
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            db_file_name: DEFAULT_DB_FILE_NAME.to_string(),
            log_level: default_log_level().to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`; blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = non_blank(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir.trim());
        }
        if let Some(level) = non_blank(ENV_LOG_LEVEL) {
            config.log_level = level.trim().to_string();
        }
        if let Some(symbol) = non_blank(ENV_CURRENCY) {
            config.currency_symbol = symbol.trim().to_string();
        }
        config
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file_name)
    }

    /// Log directory as an absolute path, as `init_logging` requires.
    pub fn log_dir(&self) -> PathBuf {
        let dir = self.data_dir.join(LOG_DIR_NAME);
        if dir.is_absolute() {
            return dir;
        }
        std::env::current_dir()
            .map(|cwd| cwd.join(&dir))
            .unwrap_or(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ENV_CURRENCY, ENV_DATA_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.currency_symbol, "₹");
        assert!(config.db_path().ends_with("waterbill.sqlite3"));
    }

    #[test]
    fn environment_overrides_defaults_and_ignores_blank_values() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_DATA_DIR, "/srv/waterbill"),
            (ENV_LOG_LEVEL, "warn"),
            (ENV_CURRENCY, "   "),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/srv/waterbill"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(
            config.db_path(),
            PathBuf::from("/srv/waterbill/waterbill.sqlite3")
        );
        assert_eq!(config.log_dir(), PathBuf::from("/srv/waterbill/logs"));
    }

    #[test]
    fn builder_overrides_win() {
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_CURRENCY, "€")]))
            .with_currency_symbol("$")
            .with_log_level("error");
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.log_level, "error");
    }

    #[test]
    fn relative_log_dir_is_made_absolute() {
        let config = AppConfig::default().with_data_dir("relative-data");
        assert!(config.log_dir().is_absolute());
    }
}
