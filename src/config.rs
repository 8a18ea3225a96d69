//! Report configuration, read from a TOML file.
//!
//! ```toml
//! [data]
//! path = "adult.data.csv"
//!
//! [output]
//! print = true
//! format = "json"
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::{ReportError, Result};
use crate::report::CSV_FILE_PATH;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "demographic.toml";

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default)]
    pub data: DataConf,
    #[serde(default)]
    pub output: OutputConf,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DataConf {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataConf {
    fn default() -> Self {
        DataConf {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from(CSV_FILE_PATH)
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConf {
    #[serde(default = "default_print")]
    pub print: bool,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConf {
    fn default() -> Self {
        OutputConf {
            print: default_print(),
            format: OutputFormat::default(),
        }
    }
}

fn default_print() -> bool {
    true
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Labelled lines, one per metric.
    #[default]
    Text,
    /// Pretty-printed JSON object.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl ReportConfig {
    pub fn from_toml_str(path: &Path, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ReportError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ReportError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!("loaded report config {}", path.display());
        ReportConfig::from_toml_str(path, &content)
    }

    /// Like [`ReportConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            ReportConfig::load(path)
        } else {
            debug!("no config at {}, using defaults", path.display());
            Ok(ReportConfig::default())
        }
    }
}
