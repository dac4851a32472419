// Mon Oct 12 2026 - Alex

use crate::pattern::AlignmentPolicy;
use crate::scan::BackendFamily;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Settings for building scan contexts and driving the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// `None` picks the fastest family the host supports.
    pub backend: Option<BackendFamily>,
    /// Required start-address stride; 1 means any address.
    pub alignment: usize,
    /// Longest pattern checked with a single vector compare. Can only lower
    /// the family's own limit.
    pub vector_verify_limit: Option<usize>,
    /// Stop after this many matches per file; 0 for no limit.
    pub max_matches: usize,
    pub parallel: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            backend: None,
            alignment: 1,
            vector_verify_limit: None,
            max_matches: 0,
            parallel: true,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: BackendFamily) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_alignment(mut self, alignment: usize) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_vector_verify_limit(mut self, limit: usize) -> Self {
        self.vector_verify_limit = Some(limit);
        self
    }

    pub fn with_max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = max_matches;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn alignment_policy(&self) -> Result<AlignmentPolicy, ConfigError> {
        AlignmentPolicy::aligned(self.alignment).map_err(|e| ConfigError::Validation(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.alignment_policy()?;

        if let Some(backend) = self.backend {
            if !backend.is_supported() {
                return Err(ConfigError::Validation(format!(
                    "backend {} is not supported on this host",
                    backend
                )));
            }
        }

        if self.vector_verify_limit == Some(0) {
            return Err(ConfigError::Validation(
                "vector_verify_limit must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !ext.eq_ignore_ascii_case("json") {
            return Err(ConfigError::UnsupportedFormat(ext.to_string()));
        }

        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;

        log::info!("Loaded scan config from {}", path.display());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        if !ext.eq_ignore_ascii_case("json") {
            return Err(ConfigError::UnsupportedFormat(ext.to_string()));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Using default scan config: {}", e);
                Self::default()
            }
        }
    }
}
