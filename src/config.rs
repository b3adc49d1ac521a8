use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_URL: &str = "https://ehw.fit.vutbr.cz/izv/";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/95.0.4638.54 Safari/537.36";

/// Where archives come from and where they (and the region cache) live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listing page holding the download buttons.
    pub url: String,
    /// Working directory for archives and cache files. Created on demand.
    pub folder: PathBuf,
    /// Cache file name; `{}` is replaced by the region code.
    pub cache_filename: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            folder: PathBuf::from("data"),
            cache_filename: "data_{}.parquet".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Read a YAML config. Keys that are absent keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
        Self::from_yaml(&text).with_context(|| format!("parsing config {:?}", path))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// `load` if a path is given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn cache_path(&self, region_code: &str) -> PathBuf {
        self.folder
            .join(self.cache_filename.replace("{}", region_code))
    }
}
