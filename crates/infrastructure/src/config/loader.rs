use anyhow::{Context, Result};
use domain::config::*;
use serde_json::Value;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Environment,
    Default,
}

pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_paths: Self::default_config_paths(),
            env_prefix: "STOREFRONT_".to_string(),
        }
    }

    /// Search `path` before any default location
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.config_paths.insert(0, path);
        self
    }

    /// Replace the search paths entirely
    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.config_paths = paths;
        self
    }

    pub fn with_env_prefix(mut self, prefix: String) -> Self {
        self.env_prefix = prefix;
        self
    }

    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            // Current directory
            PathBuf::from("storefront.toml"),
            PathBuf::from("storefront.json"),
            PathBuf::from(".storefrontrc"),
            PathBuf::from(".storefrontrc.toml"),
            PathBuf::from(".storefrontrc.json"),
        ];

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("storefront").join("config.toml"));
            paths.push(config_dir.join("storefront").join("config.json"));
        }

        paths
    }

    /// Profile defaults, then the first config file found, then environment overrides
    pub async fn load(&self) -> Result<FacadeConfig> {
        let (config, source) = self.load_with_source().await?;
        debug!("Configuration resolved from {:?}", source);
        Ok(config)
    }

    /// Like [`load`](Self::load), also reporting where the values came from
    ///
    /// The source is the most specific layer that contributed: environment
    /// overrides beat a file, a file beats the defaults.
    pub async fn load_with_source(&self) -> Result<(FacadeConfig, ConfigSource)> {
        let mut source = ConfigSource::Default;
        let base = self.load_base_config().await;

        // The profile picks the defaults the file is layered onto
        let profile = self
            .detect_profile()
            .or_else(|| base.as_ref().and_then(|(raw, _)| declared_profile(raw)))
            .unwrap_or_default();

        let mut config = match base {
            Some((raw, path)) => {
                source = ConfigSource::File(path.clone());
                layer_onto_profile(profile, raw)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            None => FacadeConfig::for_profile(profile),
        };

        if self.apply_env_overrides(&mut config) {
            source = ConfigSource::Environment;
        }
        debug!("Active profile: {}", config.profile.name());

        Ok((config, source))
    }

    /// Detect the active profile from environment variables
    pub fn detect_profile(&self) -> Option<Profile> {
        env::var(format!("{}ENV", self.env_prefix))
            .ok()
            .map(|env_val| Profile::from_str(&env_val).unwrap_or_default())
    }

    /// First config file that exists and parses, as raw values
    async fn load_base_config(&self) -> Option<(Value, PathBuf)> {
        for path in &self.config_paths {
            if path.exists() {
                match self.load_raw_file(path).await {
                    Ok(raw) => {
                        info!("Loaded configuration from: {}", path.display());
                        return Some((raw, path.clone()));
                    }
                    Err(e) => {
                        warn!("Failed to load config from {}: {:#}", path.display(), e);
                    }
                }
            }
        }
        None
    }

    /// Parse one config file, TOML or JSON by extension
    ///
    /// Keys the file leaves out take the defaults of the profile it declares.
    pub async fn load_from_file(&self, path: &Path) -> Result<FacadeConfig> {
        let raw = self.load_raw_file(path).await?;
        let profile = declared_profile(&raw).unwrap_or_default();
        layer_onto_profile(profile, raw)
    }

    /// Read and parse a file without filling in defaults
    ///
    /// Fails on syntax errors and on values of the wrong type.
    async fn load_raw_file(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        let raw: Value = match extension {
            "toml" | "" => toml::from_str(&content).context("Failed to parse TOML config")?,
            "json" => serde_json::from_str(&content).context("Failed to parse JSON config")?,
            _ => {
                // Try TOML first, then JSON
                toml::from_str(&content)
                    .or_else(|_| serde_json::from_str(&content))
                    .context("Failed to parse config file")?
            }
        };

        serde_json::from_value::<FacadeConfig>(raw.clone())
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(raw)
    }

    /// Returns whether any override was applied
    fn apply_env_overrides(&self, config: &mut FacadeConfig) -> bool {
        let mut applied = false;

        if let Some(profile) = self.detect_profile() {
            config.profile = profile;
            applied = true;
        }

        if let Ok(index) = env::var(format!("{}SEARCH_INDEX", self.env_prefix)) {
            config.search.index = index;
            applied = true;
        }

        if let Ok(log_level) = env::var(format!("{}LOG_LEVEL", self.env_prefix)) {
            config.logging.level = log_level;
            applied = true;
        }

        if let Ok(json) = env::var(format!("{}LOG_JSON", self.env_prefix)) {
            config.logging.json_output = json.to_lowercase() == "true"
                || json == "1"
                || json.to_lowercase() == "yes";
            applied = true;
        }

        applied
    }

    pub async fn save_config(&self, config: &FacadeConfig, path: &Path) -> Result<()> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("toml");

        let content = match extension {
            "json" => serde_json::to_string_pretty(config)?,
            _ => toml::to_string_pretty(config)?,
        };

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(path, content).await?;
        info!("Configuration saved to: {}", path.display());

        Ok(())
    }

    pub fn generate_example_config() -> String {
        let config = FacadeConfig {
            profile: Profile::Dev,
            search: SearchSettings {
                index: DEFAULT_SEARCH_INDEX.to_string(),
            },
            logging: LoggingSettings {
                level: "info,application=debug".to_string(),
                ..LoggingSettings::default()
            },
        };

        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| String::from("# Failed to generate example"))
    }
}

fn declared_profile(raw: &Value) -> Option<Profile> {
    raw.get("profile")
        .and_then(Value::as_str)
        .map(|name| Profile::from_str(name).unwrap_or_default())
}

/// Values present in `raw` win over the defaults of `profile`
fn layer_onto_profile(profile: Profile, raw: Value) -> Result<FacadeConfig> {
    let mut layered = serde_json::to_value(FacadeConfig::for_profile(profile.clone()))?;
    merge_values(&mut layered, raw);

    let mut config: FacadeConfig = serde_json::from_value(layered)?;
    config.profile = profile;
    Ok(config)
}

fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
