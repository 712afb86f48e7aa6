//! Configuration for the OCR reader.

use serde::{Deserialize, Serialize};

/// Hugging Face identifier of the default manga-ocr model.
pub const DEFAULT_MODEL: &str = "kha-white/manga-ocr-base";

/// Configuration for constructing a [`Reader`](crate::Reader).
///
/// # Examples
///
/// ```rust,ignore
/// use mocr::ReaderConfig;
///
/// // Default model, accelerator allowed.
/// let config = ReaderConfig::new();
///
/// // Local model checkout, CPU only.
/// let config = ReaderConfig::new()
///     .with_model("/opt/models/manga-ocr-base")
///     .with_force_cpu(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Model identifier: a Hugging Face repo name or a local path
    model: String,

    /// Run inference on the CPU even when an accelerator is available
    force_cpu: bool,
}

impl ReaderConfig {
    /// Create a configuration for the default model with default settings.
    pub fn new() -> Self {
        Self {
            model: DEFAULT_MODEL.to_owned(),
            force_cpu: false,
        }
    }

    /// Get the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get whether inference is pinned to the CPU.
    pub fn force_cpu(&self) -> bool {
        self.force_cpu
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set whether inference is pinned to the CPU.
    pub fn with_force_cpu(mut self, force_cpu: bool) -> Self {
        self.force_cpu = force_cpu;
        self
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReaderConfig::default();
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert!(!config.force_cpu());
    }

    #[test]
    fn test_fluent_api() {
        let config = ReaderConfig::new()
            .with_model("/opt/models/manga-ocr-base")
            .with_force_cpu(true);

        assert_eq!(config.model(), "/opt/models/manga-ocr-base");
        assert!(config.force_cpu());
    }

    #[test]
    fn test_serialization() {
        let config = ReaderConfig::new().with_force_cpu(true);
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: ReaderConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);

        // Missing fields fall back to the defaults.
        let partial: ReaderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(partial, ReaderConfig::default());
    }
}
