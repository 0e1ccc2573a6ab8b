use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use menuscrape_fetch::{DEFAULT_TARGET_DOMAIN, FetchConfig};
use serde::Deserialize;

use crate::sink::{CsvFileSink, JsonFileSink, MenuSink};

fn default_target_domain() -> String {
    DEFAULT_TARGET_DOMAIN.to_owned()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("menus")
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// URLs must contain this domain to be scraped.
    #[serde(default = "default_target_domain")]
    pub target_domain: String,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_domain: default_target_domain(),
            fetch: FetchConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Where and how `save` writes artifacts.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default)]
    pub format: SaveFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: SaveFormat::default(),
        }
    }
}

impl OutputConfig {
    /// Sink writing into `dir` in the configured format.
    #[must_use]
    pub fn sink(&self) -> Box<dyn MenuSink> {
        match self.format {
            SaveFormat::Csv => Box::new(CsvFileSink::new(&self.dir)),
            SaveFormat::Json => Box::new(JsonFileSink::new(&self.dir)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveFormat {
    #[default]
    Csv,
    Json,
}

impl SaveFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for SaveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for SaveFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown save format: {other}")),
        }
    }
}
