//! # Processor Configuration

use scantask_compiler::config::runtime::{RuntimeConfig, DEFAULT_VENDOR_ID};
use scantask_compiler::loader::TaskLoader;

/// Configuration for the task processor
///
/// Controls vendor identity, logging, directory processing and reply output.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Vendor identity the engine resolves as
    pub vendor_id: String,

    /// Enable debug logging
    pub debug_logging: bool,

    /// Stop directory processing at the first failed task
    pub fail_fast: bool,

    /// Descend into subdirectories when processing a directory
    pub recursive: bool,

    /// Pretty-print JSON replies
    pub pretty_replies: bool,

    /// Runtime preferences for the loader
    pub runtime: RuntimeConfig,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_VENDOR_ID)
    }
}

impl ProcessorConfig {
    /// Create a configuration for a specific vendor identity
    pub fn new(vendor_id: impl Into<String>) -> Self {
        Self {
            vendor_id: vendor_id.into(),
            debug_logging: false,
            fail_fast: false,
            recursive: true,
            pretty_replies: false,
            runtime: RuntimeConfig::from_env(),
        }
    }

    /// Configuration taken entirely from `SCANTASK_*` environment variables
    pub fn from_env() -> Self {
        let runtime = RuntimeConfig::from_env();
        Self {
            vendor_id: runtime.engine.vendor_id.clone(),
            runtime,
            ..Self::new(DEFAULT_VENDOR_ID)
        }
    }

    /// Enable debug logging
    pub fn with_debug_logging(mut self) -> Self {
        self.debug_logging = true;
        self
    }

    /// Set the vendor identity
    pub fn with_vendor(mut self, vendor_id: impl Into<String>) -> Self {
        self.vendor_id = vendor_id.into();
        self
    }

    /// Enable or disable fail-fast mode (stop on first error)
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Enable or disable recursive directory processing
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Pretty-print replies
    pub fn with_pretty_replies(mut self, pretty: bool) -> Self {
        self.pretty_replies = pretty;
        self
    }

    pub(crate) fn loader(&self) -> TaskLoader {
        TaskLoader::with_preferences(self.runtime.loader.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProcessorConfig::default();
        assert_eq!(config.vendor_id, DEFAULT_VENDOR_ID);
        assert!(!config.debug_logging);
        assert!(!config.fail_fast);
        assert!(config.recursive);
    }

    #[test]
    fn test_config_builder() {
        let config = ProcessorConfig::new("acme")
            .with_debug_logging()
            .with_fail_fast(true)
            .with_recursive(false)
            .with_pretty_replies(true)
            .with_vendor("other");

        assert_eq!(config.vendor_id, "other");
        assert!(config.debug_logging);
        assert!(config.fail_fast);
        assert!(!config.recursive);
        assert!(config.pretty_replies);
    }
}
