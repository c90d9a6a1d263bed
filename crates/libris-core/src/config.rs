//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/libris/config.toml)
//! 3. Environment variables (LIBRIS_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::access::Role;

/// Environment variable prefix
const ENV_PREFIX: &str = "LIBRIS";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the library database
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Write logs to this file instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Populate a freshly created database with sample records
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,

    /// Role used when none is given on the command line
    #[serde(default)]
    pub role: Role,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_file: None,
            seed_demo_data: default_seed_demo_data(),
            role: Role::default(),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (LIBRIS_DATA_DIR, LIBRIS_LOG_FILE, ...)
    /// 2. Config file (~/.config/libris/config.toml or LIBRIS_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from an explicit path when one was given on the
    /// command line, otherwise from the default location
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        // LIBRIS_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // LIBRIS_LOG_FILE
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        // LIBRIS_SEED_DEMO_DATA
        if let Ok(val) = std::env::var(format!("{}_SEED_DEMO_DATA", ENV_PREFIX)) {
            self.seed_demo_data = val.eq_ignore_ascii_case("true") || val == "1";
        }

        // LIBRIS_ROLE
        if let Ok(val) = std::env::var(format!("{}_ROLE", ENV_PREFIX)) {
            self.role = val
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid LIBRIS_ROLE")?;
        }

        Ok(())
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with LIBRIS_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("libris")
            .join("config.toml")
    }

    /// Get the path to the SQLite database
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("library.db")
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("libris")
}

fn default_seed_demo_data() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "LIBRIS_DATA_DIR",
        "LIBRIS_LOG_FILE",
        "LIBRIS_SEED_DEMO_DATA",
        "LIBRIS_ROLE",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.seed_demo_data);
        assert!(config.log_file.is_none());
        assert_eq!(config.role, Role::Admin);
        assert!(config.data_dir.ends_with("libris"));
    }

    #[test]
    fn test_database_path() {
        let config = Config::default();
        assert!(config.database_path().ends_with("library.db"));
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("LIBRIS_DATA_DIR", "/tmp/libris-test");
        config.apply_env_overrides().unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/libris-test"));
    }

    #[test]
    fn test_env_override_seed_demo_data() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("LIBRIS_SEED_DEMO_DATA", "false");
        config.apply_env_overrides().unwrap();
        assert!(!config.seed_demo_data);

        env::set_var("LIBRIS_SEED_DEMO_DATA", "1");
        config.apply_env_overrides().unwrap();
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_env_override_role() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("LIBRIS_ROLE", "user");
        config.apply_env_overrides().unwrap();
        assert_eq!(config.role, Role::User);

        env::set_var("LIBRIS_ROLE", "librarian");
        assert!(config.apply_env_overrides().is_err());
    }

    #[test]
    fn test_env_override_log_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("LIBRIS_LOG_FILE", "/tmp/libris.log");
        config.apply_env_overrides().unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/libris.log")));

        // Empty string clears it
        env::set_var("LIBRIS_LOG_FILE", "");
        config.apply_env_overrides().unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            data_dir: PathBuf::from("/data/libris"),
            log_file: Some(PathBuf::from("/data/libris/libris.log")),
            seed_demo_data: false,
            role: Role::User,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_dir"));
        assert!(toml_str.contains("role = \"user\""));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.log_file, config.log_file);
        assert_eq!(parsed.seed_demo_data, config.seed_demo_data);
        assert_eq!(parsed.role, config.role);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            seed_demo_data = false
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert!(!config.seed_demo_data);
        assert_eq!(config.role, Role::Admin);
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = Config {
            data_dir: temp_dir.path().join("data"),
            seed_demo_data: false,
            ..Config::default()
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_with_cli_override(Some(&path)).unwrap();
        assert_eq!(loaded.data_dir, config.data_dir);
        assert!(!loaded.seed_demo_data);
        assert!(loaded.data_dir.exists());
    }
}
