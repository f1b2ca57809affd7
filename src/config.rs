use crate::catalog::{Catalog, CatalogEntry};
use crate::error::{JdkmanError, Result};
use crate::platform;
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";
const MANAGED_DIR_NAME: &str = ".jdks";

/// Manager configuration rooted at the managed directory.
///
/// The managed directory holds one subdirectory per installed distribution
/// plus an optional `config.toml`. Its location comes from `JDKMAN_HOME`
/// when set to an absolute path, otherwise `~/.jdks`.
#[derive(Debug, Clone)]
pub struct JdkmanConfig {
    home: PathBuf,
    settings: Settings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub probe: ProbeSettings,

    #[serde(default)]
    pub install: InstallSettings,

    /// Catalog extensions; see `Catalog::with_extensions`.
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeSettings {
    /// Additional roots scanned alongside the conventional system roots.
    #[serde(default)]
    pub extra_roots: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallSettings {
    /// Delete the downloaded archive after a successful install.
    #[serde(default = "default_true")]
    pub cleanup_archives: bool,
}

impl Default for InstallSettings {
    fn default() -> Self {
        Self {
            cleanup_archives: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl JdkmanConfig {
    pub fn new() -> Result<Self> {
        Self::with_home(Self::resolve_home()?)
    }

    pub fn with_home(home: PathBuf) -> Result<Self> {
        let settings = Self::load_settings(&home)?;
        Ok(Self { home, settings })
    }

    fn resolve_home() -> Result<PathBuf> {
        if let Ok(home) = std::env::var("JDKMAN_HOME") {
            let path = PathBuf::from(home);
            if path.is_absolute() {
                return Ok(path);
            }
            log::warn!("Ignoring relative JDKMAN_HOME: {}", path.display());
        }

        home_dir()
            .map(|home| home.join(MANAGED_DIR_NAME))
            .ok_or_else(|| {
                JdkmanError::ConfigError("Unable to determine home directory".to_string())
            })
    }

    fn load_settings(home: &Path) -> Result<Settings> {
        let config_path = home.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            log::debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Settings::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let settings = toml::from_str(&contents).map_err(|e| {
            JdkmanError::ConfigError(format!(
                "Failed to parse {}: {e}",
                config_path.display()
            ))
        })?;
        log::debug!("Loaded config from {}", config_path.display());
        Ok(settings)
    }

    pub fn save_settings(&self) -> Result<()> {
        fs::create_dir_all(&self.home)?;
        let contents = toml::to_string_pretty(&self.settings)
            .map_err(|e| JdkmanError::ConfigError(format!("Failed to serialize config: {e}")))?;
        fs::write(self.home.join(CONFIG_FILE_NAME), contents)?;
        Ok(())
    }

    /// The managed directory: one subdirectory per distribution this
    /// manager installed itself.
    pub fn managed_dir(&self) -> &Path {
        &self.home
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// System roots probed after the managed directory.
    pub fn probe_roots(&self) -> Vec<PathBuf> {
        let mut roots = platform::system_install_roots();
        roots.extend(self.settings.probe.extra_roots.iter().cloned());
        roots
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::with_extensions(&self.settings.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_home_from_env() {
        let temp_dir = TempDir::new().unwrap();
        unsafe {
            std::env::set_var("JDKMAN_HOME", temp_dir.path());
        }

        let home = JdkmanConfig::resolve_home().unwrap();
        assert_eq!(home, temp_dir.path());

        unsafe {
            std::env::remove_var("JDKMAN_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_home_defaults_under_user_home() {
        unsafe {
            std::env::remove_var("JDKMAN_HOME");
        }
        let home = JdkmanConfig::resolve_home().unwrap();
        assert!(home.ends_with(MANAGED_DIR_NAME));
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = JdkmanConfig::with_home(temp_dir.path().to_path_buf()).unwrap();
        assert!(config.settings().install.cleanup_archives);
        assert!(config.settings().probe.extra_roots.is_empty());
        assert_eq!(config.catalog().entries().len(), 4);
    }

    #[test]
    fn test_load_settings_with_catalog_extension() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"
            [install]
            cleanup_archives = false

            [probe]
            extra_roots = ["/opt/custom-jdks"]

            [[catalog]]
            id = "corporate-17"
            name = "Corporate JDK 17"
            url = "https://mirror.corp.example/jdk-17.zip"
            "#,
        )
        .unwrap();

        let config = JdkmanConfig::with_home(temp_dir.path().to_path_buf()).unwrap();
        assert!(!config.settings().install.cleanup_archives);
        assert!(
            config
                .probe_roots()
                .contains(&PathBuf::from("/opt/custom-jdks"))
        );
        assert!(config.catalog().find("corporate-17").is_some());
    }

    #[test]
    fn test_invalid_config_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "not valid toml [[").unwrap();

        let result = JdkmanConfig::with_home(temp_dir.path().to_path_buf());
        assert!(matches!(result, Err(JdkmanError::ConfigError(_))));
    }

    #[test]
    fn test_save_and_reload_settings() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = JdkmanConfig::with_home(temp_dir.path().to_path_buf()).unwrap();
        config.settings_mut().install.cleanup_archives = false;
        config.save_settings().unwrap();

        let reloaded = JdkmanConfig::with_home(temp_dir.path().to_path_buf()).unwrap();
        assert!(!reloaded.settings().install.cleanup_archives);
    }
}
