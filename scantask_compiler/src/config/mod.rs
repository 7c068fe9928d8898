//! Configuration module for the scan task front end
//! Automatically uses generated constants from TOML configuration

// Include generated constants from build.rs
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("SCANTASK_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("SCANTASK_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time;

    #[test]
    fn test_generated_limits_are_positive() {
        assert!(compile_time::task::MAX_ACTIONS > 0);
        assert!(compile_time::task::MAX_VALUES_PER_ATTRIBUTE > 0);
        assert!(compile_time::task::MAX_LITERAL_LENGTH > 0);
        assert!(compile_time::logging::SECURITY_MIN_LOG_LEVEL <= 2);
    }

    #[test]
    fn test_source_info() {
        assert!(super::build_info::source_info().ends_with(".toml"));
    }
}
