//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw storage configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Directory holding one JSON document per meeting
    pub dir: Option<String>,
}

impl FileStorageConfig {
    /// The configured directory, or `<data_dir>/roundtable/meetings`.
    pub fn meetings_dir(&self) -> Option<PathBuf> {
        match &self.dir {
            Some(dir) => Some(super::expand_home(dir)),
            None => dirs::data_dir().map(|d| d.join("roundtable").join("meetings")),
        }
    }
}
