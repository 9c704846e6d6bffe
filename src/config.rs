//! Configuration handling for csvstore

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{FieldSeparator, SeparatorPolicy, DEFAULT_MAX_FILE_BYTES};

/// Settings for loading and saving tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Character dividing cells; also decides the decimal mark
    pub field_separator: FieldSeparator,
    /// Start a new output file once `max_file_bytes` is exceeded
    pub split_files: bool,
    /// Size threshold for output splitting, in bytes
    pub max_file_bytes: u64,
    /// Treat the first line of an input file as column names
    pub has_header_on_load: bool,
    /// Write the column names as the first output line
    pub write_header_on_save: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_separator: FieldSeparator::Semicolon,
            split_files: true,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            has_header_on_load: true,
            write_header_on_save: true,
        }
    }
}

impl Config {
    /// Read a JSON configuration file; missing keys take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Separator policy derived from the field separator
    pub fn policy(&self) -> SeparatorPolicy {
        SeparatorPolicy::new(self.field_separator)
    }

    /// Set the field separator
    pub fn with_field_separator(mut self, separator: FieldSeparator) -> Self {
        self.field_separator = separator;
        self
    }

    /// Enable or disable output splitting
    pub fn with_split_files(mut self, split: bool) -> Self {
        self.split_files = split;
        self
    }

    /// Set the output size threshold
    pub fn with_max_file_bytes(mut self, max: u64) -> Self {
        self.max_file_bytes = max;
        self
    }

    /// Set whether input files start with a header line
    pub fn with_header_on_load(mut self, has_header: bool) -> Self {
        self.has_header_on_load = has_header;
        self
    }

    /// Set whether the header is written on save
    pub fn with_header_on_save(mut self, write_header: bool) -> Self {
        self.write_header_on_save = write_header;
        self
    }
}
