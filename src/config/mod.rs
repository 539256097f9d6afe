use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Folder path '{0}' must not be empty")]
    EmptyPath(&'static str),
}

/// Processor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorConfig {
    /// Folder holding files awaiting processing
    pub input_folder: PathBuf,
    /// Destination for files the handler accepted
    pub done_folder: PathBuf,
    /// Destination for files the handler rejected
    pub failed_folder: PathBuf,
    /// Leave files in the input folder after processing (dry runs, tests)
    #[serde(default)]
    pub suppress_move: bool,
}

impl ProcessorConfig {
    pub fn new(
        input_folder: impl Into<PathBuf>,
        done_folder: impl Into<PathBuf>,
        failed_folder: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_folder: input_folder.into(),
            done_folder: done_folder.into(),
            failed_folder: failed_folder.into(),
            suppress_move: false,
        }
    }

    /// All three folder paths must be non-empty. Equal done and failed
    /// folders are allowed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let folders = [
            ("inputFolder", &self.input_folder),
            ("doneFolder", &self.done_folder),
            ("failedFolder", &self.failed_folder),
        ];
        for (name, path) in folders {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::EmptyPath(name));
            }
        }
        Ok(())
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::new("input", "done", "failed")
    }
}

/// Read a configuration file
pub fn read_config(config_path: &Path) -> Result<ProcessorConfig, ConfigError> {
    let content = fs::read_to_string(config_path)?;
    let config: ProcessorConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Write a configuration file
pub fn write_config(config_path: &Path, config: &ProcessorConfig) -> Result<(), ConfigError> {
    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(config)?;
    fs::write(config_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ProcessorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_suppress_move_defaults_to_false() {
        let json = r#"{"inputFolder":"in","doneFolder":"out","failedFolder":"bad"}"#;
        let config: ProcessorConfig = serde_json::from_str(json).unwrap();
        assert!(!config.suppress_move);
        assert_eq!(config.input_folder, PathBuf::from("in"));
    }

    #[test]
    fn test_empty_path_rejected() {
        let config = ProcessorConfig::new("in", "", "bad");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPath("doneFolder"))
        ));
    }

    #[test]
    fn test_same_done_and_failed_allowed() {
        let config = ProcessorConfig::new("in", "out", "out");
        assert!(config.validate().is_ok());
    }
}
