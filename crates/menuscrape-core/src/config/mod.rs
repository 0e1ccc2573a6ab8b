mod env;
mod types;

#[cfg(test)]
mod tests;

pub use types::*;

use std::path::Path;

use anyhow::{Context, bail};

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str::<Self>(&content)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Reject settings no scrape could succeed with.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.target_domain.trim().is_empty() {
            bail!("target_domain must not be empty");
        }
        if self.fetch.timeout == 0 {
            bail!("fetch.timeout must be greater than zero");
        }
        if self.fetch.connect_timeout == 0 {
            bail!("fetch.connect_timeout must be greater than zero");
        }
        if self.fetch.max_body_bytes == 0 {
            bail!("fetch.max_body_bytes must be greater than zero");
        }
        if self.fetch.user_agent.trim().is_empty() {
            bail!("fetch.user_agent must not be empty");
        }
        if self.output.dir.as_os_str().is_empty() {
            bail!("output.dir must not be empty");
        }
        Ok(())
    }
}
