//! # Scan Task CLI
//!

use clap::Parser;
use serde::Serialize;
use scantask_base::api::{BatchSummary, ProcessResult, ProcessorConfig, TaskProcessor};
use scantask_cli::bridge::{self, LogBackend};
use scantask_compiler::config::runtime::{RuntimeConfig, DEFAULT_VENDOR_ID};
use scantask_compiler::logging::{self, LogLevel};
use scantask_compiler::{log_error, log_info};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Resolve scan tasks into backend arguments
#[derive(Debug, Parser)]
#[command(name = "scantask", version, about)]
struct Cli {
    /// Task file or directory of task files
    path: PathBuf,

    /// Vendor identity to resolve as
    #[arg(long, env = "SCANTASK_ENGINE_VENDOR_ID", default_value = DEFAULT_VENDOR_ID)]
    vendor: String,

    /// Print the full JSON reply instead of the argument string
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON replies
    #[arg(long)]
    pretty: bool,

    /// Stop a directory run at the first failed task
    #[arg(long)]
    fail_fast: bool,

    /// Where log events go
    #[arg(long, value_enum, default_value_t = LogBackend::Console)]
    log_backend: LogBackend,

    /// Log debug events
    #[arg(long)]
    debug: bool,
}

/// Machine-readable totals for a directory run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchReport {
    directory: String,
    total: usize,
    succeeded: usize,
    failed: usize,
    duration_ms: u128,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    log_info!("Scan task resolver starting", "vendor" => &cli.vendor);

    let config = ProcessorConfig::new(cli.vendor.as_str())
        .with_fail_fast(cli.fail_fast)
        .with_pretty_replies(cli.pretty);
    let config = if cli.debug {
        config.with_debug_logging()
    } else {
        config
    };
    let mut processor = TaskProcessor::with_config(config);

    let succeeded = if cli.path.is_file() {
        run_file(&mut processor, &cli)
    } else if cli.path.is_dir() {
        run_directory(&mut processor, &cli)
    } else {
        eprintln!("Error: Input must be a task file or directory");
        eprintln!("  Path: {}", cli.path.display());
        false
    };

    if !succeeded {
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) -> Result<(), String> {
    logging::config::init_runtime_preferences(RuntimeConfig::from_env().logging)?;
    let min_level = if cli.debug {
        LogLevel::Debug
    } else {
        logging::config::get_min_log_level()
    };

    if cli.log_backend == LogBackend::Log {
        let filter = if cli.debug { "debug" } else { "info" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
            .target(env_logger::Target::Stderr)
            .init();
    }

    logging::init_global_logging_with_service(Arc::new(bridge::build_service(
        cli.log_backend,
        min_level,
    )))
}

fn run_file(processor: &mut TaskProcessor, cli: &Cli) -> bool {
    match processor.process_file(&cli.path) {
        Ok(result) => {
            print_result(&result, cli);
            result.is_success()
        }
        Err(e) => {
            log_error!(e.code(), "Task file could not be processed", "error" => e.user_message());
            eprintln!("Error: {}", e.user_message());
            false
        }
    }
}

fn run_directory(processor: &mut TaskProcessor, cli: &Cli) -> bool {
    let start = Instant::now();

    let results = match processor.process_directory(&cli.path) {
        Ok(results) => results,
        Err(e) => {
            log_error!(e.code(), "Directory could not be processed", "error" => e.user_message());
            eprintln!("Error: {}", e.user_message());
            return false;
        }
    };

    if results.is_empty() {
        println!("No task files found in directory: {}", cli.path.display());
        return true;
    }

    for (index, result) in results.iter().enumerate() {
        if !cli.json {
            println!("\n[{}/{}] {}", index + 1, results.len(), result.file_path);
        }
        print_result(result, cli);
    }

    let summary = BatchSummary::from_results(&results);
    if cli.json {
        let report = BatchReport {
            directory: cli.path.display().to_string(),
            total: summary.total,
            succeeded: summary.succeeded,
            failed: summary.failed,
            duration_ms: start.elapsed().as_millis(),
        };
        let rendered = if processor.config().pretty_replies {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        match rendered {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: {}", e),
        }
    } else {
        println!("\n=== Batch Summary ===");
        println!("Directory: {}", cli.path.display());
        println!("Tasks: {}", summary.total);
        println!("Resolved: {}", summary.succeeded);
        println!("Failed: {}", summary.failed);
        println!("Duration: {:.2}s", start.elapsed().as_secs_f64());
    }

    summary.all_succeeded()
}

fn print_result(result: &ProcessResult, cli: &Cli) {
    if cli.json {
        match result.reply_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: {}", e.user_message()),
        }
        return;
    }

    match result.arguments() {
        Some(arguments) => println!("{}", arguments.trim_start()),
        None => eprintln!("  FAILED: {}", result.error_summary()),
    }
}
