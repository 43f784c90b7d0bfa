//! Parser and output configuration.
//!
//! Defines the YAML-serializable configuration shared by the library and the
//! `deal-finder` binary. Every section is optional; missing keys take their
//! defaults.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! parser:
//!   heading_max_chars: 40
//! output:
//!   format: markdown
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FinderError, Result};
use crate::output::OutputFormat;

/// Default limit below which a leading bold span counts as a heading.
pub const DEFAULT_HEADING_MAX_CHARS: usize = 40;

/// Tuning for the alternatives parser.
///
/// # Examples
///
/// ```
/// # use deal_finder_parser::ParserConfig;
/// let config = ParserConfig::default();
/// assert_eq!(config.heading_max_chars, 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// In flat replies, a first bold span shorter than this many characters is
    /// treated as a section heading when there are more bold spans than links.
    pub heading_max_chars: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            heading_max_chars: DEFAULT_HEADING_MAX_CHARS,
        }
    }
}

/// Settings for rendering parsed alternatives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Top-level configuration file.
///
/// # Examples
///
/// ```no_run
/// use deal_finder_parser::FinderConfig;
///
/// let config = FinderConfig::load("deal-finder.yml").unwrap();
/// println!("heading threshold: {}", config.parser.heading_max_chars);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    pub parser: ParserConfig,
    pub output: OutputConfig,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            parser: ParserConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl FinderConfig {
    /// Loads and validates configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](FinderError::IoError) if the file cannot be read,
    /// [`YamlError`](FinderError::YamlError) if parsing fails, or
    /// [`InvalidConfig`](FinderError::InvalidConfig) if a value is out of
    /// range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.parser.heading_max_chars == 0 {
            return Err(FinderError::InvalidConfig(
                "parser.heading_max_chars must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
