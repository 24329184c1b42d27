use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Search index used when nothing else is configured
pub const DEFAULT_SEARCH_INDEX: &str = "firebase";

/// Configuration profile for different environments
///
/// Stored as a bare string (`"dev"`, `"prod"` or any custom name).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Profile {
    /// Development profile with human-readable logging
    #[default]
    Dev,
    /// Production profile with JSON logging
    Prod,
    /// Custom profile with user-defined name
    Custom(String),
}

impl Profile {
    /// Get the profile name as a string
    pub fn name(&self) -> &str {
        match self {
            Profile::Dev => "dev",
            Profile::Prod => "prod",
            Profile::Custom(name) => name,
        }
    }
}

impl FromStr for Profile {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "dev" | "development" => Profile::Dev,
            "prod" | "production" => Profile::Prod,
            custom => Profile::Custom(custom.to_string()),
        })
    }
}

impl Serialize for Profile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Profile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Profile::from_str(&name).unwrap_or_default())
    }
}

/// Top-level configuration of the storefront facade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FacadeConfig {
    /// Active configuration profile
    #[serde(default)]
    pub profile: Profile,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where the search-backed reads go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Index name sent with every query the facade builds itself
    #[serde(default = "default_search_index")]
    pub index: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `application=debug`
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json_output: bool,

    #[serde(default = "default_color_output")]
    pub color_output: bool,

    #[serde(default)]
    pub include_line_numbers: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            index: default_search_index(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_output: false,
            color_output: default_color_output(),
            include_line_numbers: false,
        }
    }
}

fn default_search_index() -> String {
    DEFAULT_SEARCH_INDEX.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_color_output() -> bool {
    true
}

impl FacadeConfig {
    /// Defaults implied by `profile`, before any file or environment layer
    ///
    /// Production logs uncoloured JSON. Other profiles keep the plain defaults.
    pub fn for_profile(profile: Profile) -> Self {
        let mut config = Self {
            profile,
            ..Self::default()
        };
        if config.profile == Profile::Prod {
            config.logging.json_output = true;
            config.logging.color_output = false;
        }
        config
    }
}
