use crate::resolution::action::ActionResolver;
use crate::resolution::error::ResolutionError;
use crate::types::ResolvedTask;
use scantask_compiler::config::runtime::EnginePreferences;
use scantask_compiler::logging::codes;
use scantask_compiler::task::{Task, TaskNode};
use scantask_compiler::{log_debug, log_error, log_info, log_success};
use serde::Serialize;

/// Result of one successful resolution pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskResolution {
    pub task: ResolvedTask,

    /// Backend invocation fragments in tree order
    pub arguments: String,

    /// Last resolution applied during this pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<u32>,
}

/// Walks a task tree on behalf of one vendor identity.
///
/// The engine is the session scope for the last applied resolution; each
/// pass reports its own value and the engine keeps the most recent one.
pub struct TaskResolutionEngine {
    vendor_id: String,
    last_resolution: Option<u32>,
}

impl Default for TaskResolutionEngine {
    fn default() -> Self {
        Self::from_preferences(&EnginePreferences::default())
    }
}

impl TaskResolutionEngine {
    pub fn new(vendor_id: impl Into<String>) -> Self {
        let vendor_id = vendor_id.into();
        log_debug!("Creating task resolution engine", "vendor" => &vendor_id);
        Self {
            vendor_id,
            last_resolution: None,
        }
    }

    pub fn from_preferences(preferences: &EnginePreferences) -> Self {
        Self::new(preferences.vendor_id.as_str())
    }

    pub fn vendor(&self) -> &str {
        &self.vendor_id
    }

    /// Most recent resolution applied by any pass of this engine
    pub fn last_resolution(&self) -> Option<u32> {
        self.last_resolution
    }

    pub fn resolve_task(&mut self, task: &Task) -> Result<TaskResolution, ResolutionError> {
        self.resolve(Some(task))
    }

    /// Resolve a task into backend arguments and an outcome tree.
    ///
    /// Nothing is produced unless the whole pass succeeds.
    pub fn resolve(&mut self, task: Option<&Task>) -> Result<TaskResolution, ResolutionError> {
        match self.run(task) {
            Ok(resolution) => {
                if resolution.resolution.is_some() {
                    self.last_resolution = resolution.resolution;
                }

                log_success!(codes::success::TASK_RESOLVED, "Task resolved",
                    "actions" => resolution.task.actions.len(),
                    "capabilities" => resolution.task.count_capabilities(),
                    "arguments" => resolution.arguments.trim_start()
                );
                Ok(resolution)
            }
            Err(error) => {
                log_error!(error.code(), "Task resolution failed",
                    "path" => error.path(),
                    "literal" => error.literal().unwrap_or(""),
                    "severity" => error.severity_code()
                );
                Err(error)
            }
        }
    }

    fn run(&self, task: Option<&Task>) -> Result<TaskResolution, ResolutionError> {
        let task = task.ok_or_else(|| ResolutionError::malformed("no task supplied", ""))?;
        let actions = match task.actions.as_deref() {
            None => return Err(ResolutionError::malformed("task has no actions", "actions")),
            Some([]) => return Err(ResolutionError::malformed("task actions are empty", "actions")),
            Some(actions) => actions,
        };

        log_info!("Resolving task",
            "vendor" => &self.vendor_id,
            "actions" => actions.len()
        );

        let resolver = ActionResolver::new(&self.vendor_id);
        let mut resolved = ResolvedTask::default();
        let mut arguments = String::new();
        let mut resolution = None;

        for action in actions {
            if !action.is_owned_by(&self.vendor_id) {
                log_debug!("Skipping foreign action",
                    "path" => action.path(),
                    "vendor" => action.vendor()
                );
                continue;
            }

            let outcome = resolver.resolve(action)?;
            arguments.push_str(&outcome.arguments);
            if outcome.resolution.is_some() {
                resolution = outcome.resolution;
            }
            resolved.actions.push(outcome.action);
        }

        Ok(TaskResolution {
            task: resolved,
            arguments,
            resolution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActionStatus;
    use assert_matches::assert_matches;
    use scantask_compiler::task::{Action, Attribute, PixelFormat, Source, Stream, Value};

    fn configure_with_resolution(dpi: &str) -> Task {
        Task::new(vec![Action::configure(vec![Stream::new(vec![Source::new(
            "flatbed",
            vec![PixelFormat::new(
                "rgb24",
                vec![Attribute::new("resolution", vec![Value::new(dpi)])],
            )],
        )])])])
    }

    #[test]
    fn test_absent_and_empty_tasks_are_malformed() {
        let mut engine = TaskResolutionEngine::new("acme");

        assert_matches!(engine.resolve(None), Err(ResolutionError::MalformedInput { .. }));
        assert_matches!(
            engine.resolve_task(&Task::default()),
            Err(ResolutionError::MalformedInput { .. })
        );
        assert_matches!(
            engine.resolve_task(&Task::new(vec![])),
            Err(ResolutionError::MalformedInput { .. })
        );
    }

    #[test]
    fn test_arguments_follow_tree_order() {
        let task = Task::new(vec![Action::configure(vec![Stream::new(vec![Source::new(
            "feeder",
            vec![PixelFormat::new(
                "gray8",
                vec![
                    Attribute::new("contrast", vec![Value::new("75")]),
                    Attribute::new("imagecount", vec![Value::new("0")]),
                ],
            )],
        )])])]);

        let resolution = TaskResolutionEngine::new("acme").resolve_task(&task).unwrap();
        assert_eq!(
            resolution.arguments,
            " --source=ADF --duplex=yes --batch=img%06d.pnm --mode=Gray --contrast=50 --batch-count=32767"
        );
        assert_eq!(resolution.task.actions[0].status, ActionStatus::Success);
    }

    #[test]
    fn test_last_resolution_scoped_to_engine() {
        let mut engine = TaskResolutionEngine::new("acme");
        assert_eq!(engine.last_resolution(), None);

        let first = engine.resolve_task(&configure_with_resolution("300")).unwrap();
        assert_eq!(first.resolution, Some(300));
        assert_eq!(engine.last_resolution(), Some(300));

        // A pass without a resolution keeps the previous value
        let second = engine.resolve_task(&Task::new(vec![Action::scan()])).unwrap();
        assert_eq!(second.resolution, None);
        assert_eq!(engine.last_resolution(), Some(300));

        let other = TaskResolutionEngine::new("acme");
        assert_eq!(other.last_resolution(), None);
    }

    #[test]
    fn test_foreign_action_dropped() {
        let task = Task::new(vec![
            Action::configure(vec![]).with_vendor("other"),
            Action::scan(),
        ]);

        let resolution = TaskResolutionEngine::new("acme").resolve_task(&task).unwrap();
        assert_eq!(resolution.task.actions.len(), 1);
        assert_eq!(resolution.task.actions[0].action, "scan");
    }

    #[test]
    fn test_failure_produces_nothing() {
        let mut engine = TaskResolutionEngine::new("acme");
        let task = Task::new(vec![
            Action::scan(),
            Action::new("print", vec![]).with_exception(scantask_compiler::task::ExceptionPolicy::Fail),
        ]);

        assert_matches!(
            engine.resolve_task(&task),
            Err(ResolutionError::UnsupportedValue { .. })
        );
        assert_eq!(engine.last_resolution(), None);
    }
}
