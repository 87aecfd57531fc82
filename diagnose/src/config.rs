//! Runtime configuration for the extraction loop.
//!
//! Only the polling cadence and the surface selectors are configurable. The
//! rule keywords and the low-speed threshold are fixed constants in
//! [`rules`](crate::rules).
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! poll_interval_secs: 3
//! surface_selectors:
//!   - .blocklyWorkspace
//!   - .blocklySvg
//!   - "#blocklyDiv"
//!   - .injectionDiv
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DoctorError, Result};
use crate::extractor::DEFAULT_SURFACE_SELECTORS;

/// Current configuration format version.
pub const CONFIG_VERSION: &str = "1.0";

/// Default seconds between extraction cycles.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;

/// Top-level configuration.
///
/// Missing keys fall back to their defaults, so an empty YAML document is a
/// valid configuration.
///
/// # Examples
///
/// ```
/// use block_doctor_diagnose::config::DoctorConfig;
///
/// let config: DoctorConfig = serde_yaml::from_str("poll_interval_secs: 5").unwrap();
/// assert_eq!(config.poll_interval().as_secs(), 5);
/// assert_eq!(config.surface_selectors[0], ".blocklyWorkspace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoctorConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    /// Seconds between extraction cycles.
    pub poll_interval_secs: u64,
    /// Candidate selectors for the raw text surface, tried in order.
    pub surface_selectors: Vec<String>,
}

impl Default for DoctorConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            surface_selectors: DEFAULT_SURFACE_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl DoctorConfig {
    /// Loads and validates configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](DoctorError::IoError) if the file cannot be read,
    /// [`YamlError`](DoctorError::YamlError) if parsing fails, or
    /// [`InvalidConfig`](DoctorError::InvalidConfig) if validation fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](DoctorError::IoError) if the file cannot be
    /// written, or [`YamlError`](DoctorError::YamlError) if serialization
    /// fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Checks the invariants the polling loop relies on.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            return Err(DoctorError::InvalidConfig(
                "poll_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.surface_selectors.iter().all(|s| s.trim().is_empty()) {
            return Err(DoctorError::InvalidConfig(
                "surface_selectors must contain at least one selector".to_string(),
            ));
        }
        Ok(())
    }

    /// Interval between extraction cycles.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
