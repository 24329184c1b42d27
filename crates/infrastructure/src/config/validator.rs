use anyhow::{bail, Result};
use domain::config::*;
use tracing::warn;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, config: &FacadeConfig) -> Result<()> {
        self.validate_search_config(&config.search)?;
        self.validate_logging_config(&config.logging)?;
        Ok(())
    }

    fn validate_search_config(&self, config: &SearchSettings) -> Result<()> {
        let index = &config.index;

        if index.trim().is_empty() {
            bail!("Search index name cannot be empty");
        }
        if index.chars().any(char::is_whitespace) {
            bail!("Search index name must not contain whitespace, got '{}'", index);
        }
        if index.contains('/') {
            bail!("Search index name must not contain '/', got '{}'", index);
        }

        if index.chars().any(char::is_uppercase) {
            warn!(
                "Search index '{}' contains uppercase letters, most search backends reject them",
                index
            );
        }

        Ok(())
    }

    /// Accepts plain levels and `target=level` directives, comma separated
    fn validate_logging_config(&self, config: &LoggingSettings) -> Result<()> {
        for directive in config.level.split(',').map(str::trim) {
            if directive.is_empty() {
                continue;
            }

            let level = match directive.rsplit_once('=') {
                Some((_, level)) => level,
                None if LOG_LEVELS.contains(&directive.to_lowercase().as_str()) => directive,
                // A bare target enables everything for it
                None => continue,
            };

            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                bail!("Unknown log level '{}' in '{}'", level, config.level);
            }
        }

        if config.json_output && config.color_output {
            warn!("color_output has no effect with json_output enabled");
        }

        Ok(())
    }
}
