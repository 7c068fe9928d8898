//! # Task Processor
//!
//! Main entry point for loading and resolving task documents.
use crate::api::config::ProcessorConfig;
use crate::api::errors::ProcessorError;
use crate::reply::{Reply, ReplyGenerator};
use crate::resolution::{TaskResolution, TaskResolutionEngine};
use chrono::{DateTime, Utc};
use scantask_compiler::loader::{LoadError, TaskLoader};
use scantask_compiler::logging::codes;
use scantask_compiler::task::Task;
use scantask_compiler::{log_error, log_info, log_success};
use std::path::Path;

/// Label used for tasks that did not come from a file
pub const INLINE_SOURCE: &str = "<inline>";

/// Result of processing a single task document
#[derive(Debug)]
pub struct ProcessResult {
    /// Unique identifier for this run
    pub run_id: String,

    /// File path that was processed, or the inline label
    pub file_path: String,

    /// Whether processing succeeded
    pub success: bool,

    /// Resolution output (if successful)
    pub resolution: Option<TaskResolution>,

    /// Failure (if any)
    pub error: Option<ProcessorError>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Processing duration in milliseconds
    pub duration_ms: u64,

    /// Whether `reply_json` pretty-prints, taken from the processor config
    pub pretty_reply: bool,
}

impl ProcessResult {
    fn finish(
        file_path: &str,
        started_at: DateTime<Utc>,
        outcome: Result<TaskResolution, ProcessorError>,
        pretty_reply: bool,
    ) -> Self {
        let finished_at = Utc::now();
        let duration_ms = (finished_at - started_at).num_milliseconds().max(0) as u64;
        let (resolution, error) = match outcome {
            Ok(resolution) => (Some(resolution), None),
            Err(error) => (None, Some(error)),
        };

        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            file_path: file_path.to_string(),
            success: resolution.is_some(),
            resolution,
            error,
            started_at,
            finished_at,
            duration_ms,
            pretty_reply,
        }
    }

    /// Check if processing was successful
    pub fn is_success(&self) -> bool {
        self.success && self.resolution.is_some()
    }

    /// Check if processing failed
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Backend argument string, when resolution succeeded
    pub fn arguments(&self) -> Option<&str> {
        self.resolution.as_ref().map(|r| r.arguments.as_str())
    }

    /// Protocol reply describing this result
    pub fn reply(&self) -> Reply {
        if let Some(resolution) = &self.resolution {
            return Reply::Task(ReplyGenerator::task_reply(resolution));
        }

        Reply::Error(match &self.error {
            Some(ProcessorError::ResolutionError(e)) => ReplyGenerator::error_reply(e),
            Some(ProcessorError::LoadError(e)) => ReplyGenerator::load_error_reply(e),
            Some(other) => ReplyGenerator::internal_error_reply(other.user_message()),
            None => ReplyGenerator::internal_error_reply("no resolution produced"),
        })
    }

    /// Serialize the reply
    pub fn reply_json(&self) -> Result<String, ProcessorError> {
        let reply = self.reply();
        let json = if self.pretty_reply {
            reply.to_json()?
        } else {
            reply.to_json_compact()?
        };
        Ok(json)
    }

    /// Get the error as a user-facing string
    pub fn error_summary(&self) -> String {
        self.error
            .as_ref()
            .map(ProcessorError::user_message)
            .unwrap_or_default()
    }

    /// Create a summary string for logging or display
    pub fn summary(&self) -> String {
        match &self.resolution {
            Some(resolution) => format!(
                "SUCCESS: {} ({} actions, {}ms)",
                self.file_path,
                resolution.task.actions.len(),
                self.duration_ms
            ),
            None => format!(
                "FAILED: {} - {} ({}ms)",
                self.file_path,
                self.error_summary(),
                self.duration_ms
            ),
        }
    }
}

impl std::fmt::Display for ProcessResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Totals for a directory run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[ProcessResult]) -> Self {
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Loads task documents and resolves them with one engine.
///
/// The engine lives as long as the processor, so the last applied resolution
/// carries over between tasks processed here and nowhere else.
pub struct TaskProcessor {
    loader: TaskLoader,
    engine: TaskResolutionEngine,
    config: ProcessorConfig,
}

impl Default for TaskProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskProcessor {
    /// Create a new processor with default configuration
    pub fn new() -> Self {
        Self::with_config(ProcessorConfig::default())
    }

    /// Create a new processor with custom configuration
    pub fn with_config(config: ProcessorConfig) -> Self {
        if config.debug_logging {
            log_info!("Task processor initialized", "vendor" => &config.vendor_id);
        }

        Self {
            loader: config.loader(),
            engine: TaskResolutionEngine::new(config.vendor_id.as_str()),
            config,
        }
    }

    /// Resolve a task held in a string
    pub fn process_str(&mut self, json: &str) -> ProcessResult {
        let started_at = Utc::now();
        let outcome = self.load_and_resolve(INLINE_SOURCE, |loader| loader.load_str(json));
        ProcessResult::finish(INLINE_SOURCE, started_at, outcome, self.config.pretty_replies)
    }

    /// Resolve an already-built task tree
    pub fn process_task(&mut self, task: &Task) -> ProcessResult {
        let started_at = Utc::now();
        let outcome = self
            .engine
            .resolve_task(task)
            .map_err(ProcessorError::from);
        ProcessResult::finish(INLINE_SOURCE, started_at, outcome, self.config.pretty_replies)
    }

    /// Resolve a single task file
    pub fn process_file(&mut self, path: &Path) -> Result<ProcessResult, ProcessorError> {
        if !path.exists() {
            return Err(ProcessorError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let label = path.display().to_string();
        if self.config.debug_logging {
            log_info!("Processing task file", "path" => &label);
        }

        let started_at = Utc::now();
        let outcome = self.load_and_resolve(&label, |loader| loader.load_file(path));
        Ok(ProcessResult::finish(
            &label,
            started_at,
            outcome,
            self.config.pretty_replies,
        ))
    }

    /// Resolve every `.json` task in a directory, in file-name order
    pub fn process_directory(&mut self, path: &Path) -> Result<Vec<ProcessResult>, ProcessorError> {
        if !path.exists() {
            return Err(ProcessorError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        if !path.is_dir() {
            return Err(ProcessorError::ConfigurationError {
                reason: format!("Path is not a directory: {}", path.display()),
            });
        }

        let max_depth = if self.config.recursive { usize::MAX } else { 1 };
        let mut results = Vec::new();

        for entry in walkdir::WalkDir::new(path)
            .max_depth(max_depth)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            let is_task = entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "json");
            if !is_task {
                continue;
            }

            let result = self.process_file(entry.path())?;
            let failed = result.is_failure();
            results.push(result);

            if failed && self.config.fail_fast {
                log_info!("Stopping directory run at first failure",
                    "path" => entry.path().display()
                );
                break;
            }
        }

        let summary = BatchSummary::from_results(&results);
        log_success!(codes::success::DIRECTORY_PROCESSED, "Directory processing completed",
            "path" => path.display(),
            "total_files" => summary.total,
            "successful" => summary.succeeded
        );

        Ok(results)
    }

    /// Get the configuration
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Engine used by this processor
    pub fn engine(&self) -> &TaskResolutionEngine {
        &self.engine
    }

    fn load_and_resolve<F>(&mut self, label: &str, load: F) -> Result<TaskResolution, ProcessorError>
    where
        F: FnOnce(&TaskLoader) -> Result<Task, LoadError>,
    {
        let task = load(&self.loader).map_err(|e| {
            log_error!(e.code(), "Task could not be loaded",
                "source" => label,
                "error" => &e
            );
            ProcessorError::from(e)
        })?;

        Ok(self.engine.resolve_task(&task)?)
    }
}
