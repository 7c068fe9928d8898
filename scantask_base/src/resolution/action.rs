use super::error::{NodeKind, ResolutionError};
use super::outcome::Outcome;
use super::stream::StreamResolver;
use crate::types::{ActionStatus, ResolvedAction, ResolvedStream};
use scantask_compiler::logging::codes;
use scantask_compiler::task::{Action, ActionKind, ExceptionPolicy, TaskNode};
use scantask_compiler::{log_debug, log_warning};

/// Everything one action contributes to the task result
#[derive(Debug)]
pub(crate) struct ActionResolution {
    pub action: ResolvedAction,
    pub arguments: String,
    pub resolution: Option<u32>,
}

pub struct ActionResolver<'a> {
    vendor_id: &'a str,
    streams: StreamResolver<'a>,
}

impl<'a> ActionResolver<'a> {
    pub fn new(vendor_id: &'a str) -> Self {
        Self {
            vendor_id,
            streams: StreamResolver::new(vendor_id),
        }
    }

    /// Resolve an owned action. Ownership is checked by the caller.
    pub(crate) fn resolve(&self, action: &Action) -> Result<ActionResolution, ResolutionError> {
        match ActionKind::from_token(&action.action) {
            Some(ActionKind::Scan) => Ok(Self::finished(action, ActionStatus::Success)),
            Some(ActionKind::Configure) => self.configure(action),
            None => match action.exception {
                ExceptionPolicy::Fail => Err(ResolutionError::unsupported(
                    NodeKind::Action,
                    "action",
                    action.path(),
                    action.action.as_str(),
                )),
                ExceptionPolicy::Ignore | ExceptionPolicy::NextStream => {
                    log_warning!(code = codes::resolution::VALUE_IGNORED,
                        "Unsupported action retained",
                        "path" => action.path(),
                        "action" => &action.action
                    );
                    Ok(Self::finished(action, ActionStatus::Unsupported))
                }
            },
        }
    }

    /// Streams are alternatives: the first one that is accepted is used.
    fn configure(&self, action: &Action) -> Result<ActionResolution, ResolutionError> {
        let mut owned_streams = 0usize;

        for stream in &action.streams {
            if !stream.is_owned_by(self.vendor_id) {
                log_debug!("Skipping foreign stream", "path" => stream.path());
                continue;
            }
            owned_streams += 1;

            match self.streams.resolve(stream)? {
                Outcome::Accepted(draft) => {
                    let status = if draft.ignored {
                        ActionStatus::SuccessIgnore
                    } else {
                        ActionStatus::Success
                    };

                    log_debug!("Stream accepted",
                        "path" => stream.path(),
                        "sources" => draft.sources.len()
                    );

                    return Ok(ActionResolution {
                        action: ResolvedAction {
                            action: action.action.clone(),
                            status,
                            streams: vec![ResolvedStream {
                                sources: draft.sources,
                            }],
                        },
                        arguments: draft.arguments,
                        resolution: draft.resolution,
                    });
                }
                Outcome::Skip | Outcome::NextAlternative => continue,
            }
        }

        // No owned streams means backend defaults; exhausted alternatives are ignored
        let status = if owned_streams == 0 {
            ActionStatus::Success
        } else {
            log_warning!(code = codes::resolution::ALTERNATIVE_REQUESTED,
                "No stream alternative could be used",
                "path" => action.path(),
                "streams" => owned_streams
            );
            ActionStatus::SuccessIgnore
        };

        Ok(Self::finished(action, status))
    }

    fn finished(action: &Action, status: ActionStatus) -> ActionResolution {
        ActionResolution {
            action: ResolvedAction {
                action: action.action.clone(),
                status,
                streams: Vec::new(),
            },
            arguments: String::new(),
            resolution: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use scantask_compiler::task::{PixelFormat, Source, Stream};

    #[test]
    fn test_scan_needs_no_structure() {
        let resolution = ActionResolver::new("acme").resolve(&Action::scan()).unwrap();
        assert_eq!(resolution.action.status, ActionStatus::Success);
        assert!(resolution.arguments.is_empty());
    }

    #[test]
    fn test_unknown_action_policies() {
        let ignored = Action::new("print", vec![]);
        let resolution = ActionResolver::new("acme").resolve(&ignored).unwrap();
        assert_eq!(resolution.action.status, ActionStatus::Unsupported);

        let failing = Action::new("print", vec![]).with_exception(ExceptionPolicy::Fail);
        assert_matches!(
            ActionResolver::new("acme").resolve(&failing),
            Err(ResolutionError::UnsupportedValue { kind: NodeKind::Action, .. })
        );
    }

    #[test]
    fn test_configure_without_streams() {
        let resolution = ActionResolver::new("acme")
            .resolve(&Action::configure(vec![]))
            .unwrap();
        assert_eq!(resolution.action.status, ActionStatus::Success);
        assert!(resolution.action.streams.is_empty());
    }

    #[test]
    fn test_exhausted_alternatives() {
        let action = Action::configure(vec![Stream::new(vec![Source::new(
            "camera",
            vec![],
        )
        .with_exception(ExceptionPolicy::NextStream)])]);

        let resolution = ActionResolver::new("acme").resolve(&action).unwrap();
        assert_eq!(resolution.action.status, ActionStatus::SuccessIgnore);
        assert!(resolution.action.streams.is_empty());
        assert!(resolution.arguments.is_empty());
    }

    #[test]
    fn test_foreign_stream_dropped() {
        let action = Action::configure(vec![
            Stream::new(vec![Source::new("feeder", vec![])]).with_vendor("other"),
            Stream::new(vec![Source::new("flatbed", vec![PixelFormat::new("bw1", vec![])])]),
        ]);

        let resolution = ActionResolver::new("acme").resolve(&action).unwrap();
        assert_eq!(resolution.action.streams.len(), 1);
        assert_eq!(resolution.action.streams[0].sources[0].source, "flatbed");
        assert!(!resolution.arguments.contains("ADF"));
    }
}
