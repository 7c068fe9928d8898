use super::error::ResolutionError;
use super::outcome::Outcome;
use super::source::SourceResolver;
use crate::types::ResolvedSource;
use scantask_compiler::task::{Stream, TaskNode};
use scantask_compiler::{log_debug, log_warning};

/// Output of one stream, held back until the stream is accepted
#[derive(Debug, Default)]
pub(crate) struct StreamDraft {
    pub arguments: String,
    pub sources: Vec<ResolvedSource>,
    pub ignored: bool,
    pub resolution: Option<u32>,
}

pub struct StreamResolver<'a> {
    vendor_id: &'a str,
    sources: SourceResolver<'a>,
}

impl<'a> StreamResolver<'a> {
    pub fn new(vendor_id: &'a str) -> Self {
        Self {
            vendor_id,
            sources: SourceResolver::new(vendor_id),
        }
    }

    /// Try every owned source in order.
    ///
    /// Zero sources is accepted and means backend defaults.
    pub(crate) fn resolve(&self, stream: &Stream) -> Result<Outcome<StreamDraft>, ResolutionError> {
        let mut draft = StreamDraft::default();

        for (index, source) in stream.sources.iter().enumerate() {
            if !source.is_owned_by(self.vendor_id) {
                log_debug!("Skipping foreign source", "path" => source.path());
                continue;
            }

            log_debug!("Trying source", "index" => index, "source" => &source.source);

            match self.sources.resolve(source, &mut draft)? {
                Outcome::Accepted(resolved) => draft.sources.push(resolved),
                Outcome::Skip => {}
                Outcome::NextAlternative => {
                    log_warning!("Stream abandoned", "path" => stream.path());
                    return Ok(Outcome::NextAlternative);
                }
            }
        }

        Ok(Outcome::Accepted(draft))
    }
}
