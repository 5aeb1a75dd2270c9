use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;

/// Largest number of distinct paginated URLs a document may link to before
/// it is treated as a listing or calendar page instead of an article.
pub const MAX_PAGING_DOCS: usize = 10;

/// Largest number the scanner accepts as a page number
pub const MAX_PAGE_NUMBER: i32 = 100;

/// Configuration for pagination detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Maximum number of distinct (number, url) outlinks before detection gives up
    #[serde(default = "default_max_paging_docs")]
    pub max_paging_docs: usize,

    /// Numbers above this are treated as group boundaries by the event feeder
    #[serde(default = "default_max_page_number")]
    pub max_page_number: i32,

    /// Names added to the built-in bad page parameter denylist
    #[serde(default)]
    pub extra_bad_param_names: Vec<String>,
}

/// Default value for max_paging_docs
fn default_max_paging_docs() -> usize {
    MAX_PAGING_DOCS
}

/// Default value for max_page_number
fn default_max_page_number() -> i32 {
    MAX_PAGE_NUMBER
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            max_paging_docs: default_max_paging_docs(),
            max_page_number: default_max_page_number(),
            extra_bad_param_names: Vec::new(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)?;
        Ok(config)
    }
}
