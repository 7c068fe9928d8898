// build.rs - TOML-driven constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    task: TaskLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct TaskLimits {
    max_task_bytes: u64,
    max_actions: usize,
    max_streams_per_action: usize,
    max_sources_per_stream: usize,
    max_pixel_formats_per_source: usize,
    max_attributes_per_pixel_format: usize,
    max_values_per_attribute: usize,
    max_literal_length: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SCANTASK_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=SCANTASK_CONFIG_DIR");

    let profile = env::var("SCANTASK_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("SCANTASK_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of scantask_compiler directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_TASK_BYTES: u64 = 64 * 1024 * 1024;
    const ABSOLUTE_MAX_NODES_PER_LEVEL: usize = 100_000;

    if config.task.max_task_bytes > ABSOLUTE_MAX_TASK_BYTES {
        panic!("LIMITS: max_task_bytes exceeds absolute maximum");
    }

    let per_level = [
        ("max_actions", config.task.max_actions),
        ("max_streams_per_action", config.task.max_streams_per_action),
        ("max_sources_per_stream", config.task.max_sources_per_stream),
        (
            "max_pixel_formats_per_source",
            config.task.max_pixel_formats_per_source,
        ),
        (
            "max_attributes_per_pixel_format",
            config.task.max_attributes_per_pixel_format,
        ),
        ("max_values_per_attribute", config.task.max_values_per_attribute),
    ];

    for (name, value) in per_level {
        if value == 0 {
            panic!("LIMITS: {} must be greater than zero", name);
        }
        if value > ABSOLUTE_MAX_NODES_PER_LEVEL {
            panic!("LIMITS: {} exceeds absolute maximum", name);
        }
    }

    if config.logging.security_min_log_level > 2 {
        panic!("LIMITS: security_min_log_level too high (max: 2)");
    }

    if config.logging.log_buffer_size < 100 {
        panic!("LIMITS: log_buffer_size too small (min: 100)");
    }

    if profile == "production" && config.task.max_task_bytes > 4 * 1024 * 1024 {
        panic!("PRODUCTION: max_task_bytes too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod task {{
        pub const MAX_TASK_BYTES: u64 = {};
        pub const MAX_ACTIONS: usize = {};
        pub const MAX_STREAMS_PER_ACTION: usize = {};
        pub const MAX_SOURCES_PER_STREAM: usize = {};
        pub const MAX_PIXEL_FORMATS_PER_SOURCE: usize = {};
        pub const MAX_ATTRIBUTES_PER_PIXEL_FORMAT: usize = {};
        pub const MAX_VALUES_PER_ATTRIBUTE: usize = {};
        pub const MAX_LITERAL_LENGTH: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        config.task.max_task_bytes,
        config.task.max_actions,
        config.task.max_streams_per_action,
        config.task.max_sources_per_stream,
        config.task.max_pixel_formats_per_source,
        config.task.max_attributes_per_pixel_format,
        config.task.max_values_per_attribute,
        config.task.max_literal_length,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
