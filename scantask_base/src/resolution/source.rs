use super::error::{NodeKind, ResolutionError};
use super::outcome::Outcome;
use super::pixel_format::PixelFormatResolver;
use super::stream::StreamDraft;
use super::translators::{source_fragments, tokens, IMAGE_NAMING_PATTERN};
use crate::types::{Capability, CapabilityValue, ResolvedSource};
use scantask_compiler::logging::codes;
use scantask_compiler::task::{ExceptionPolicy, Source, SourceKind, TaskNode};
use scantask_compiler::{log_debug, log_warning};

/// Resolves source addressing and then every pixel format of the source.
pub struct SourceResolver<'a> {
    vendor_id: &'a str,
    pixel_formats: PixelFormatResolver<'a>,
}

impl<'a> SourceResolver<'a> {
    pub fn new(vendor_id: &'a str) -> Self {
        Self {
            vendor_id,
            pixel_formats: PixelFormatResolver::new(vendor_id),
        }
    }

    pub(crate) fn resolve(
        &self,
        source: &Source,
        draft: &mut StreamDraft,
    ) -> Result<Outcome<ResolvedSource>, ResolutionError> {
        let kind = match SourceKind::from_token(&source.source) {
            Some(kind) => kind,
            None => return self.unrecognized(source, draft),
        };

        let fragments = source_fragments(kind);
        let mut resolved = ResolvedSource::new(source.source.as_str());

        // Source selection is staged before duplex
        let slots = [
            (fragments.automatic_sense, "automaticSense", &mut resolved.automatic_sense),
            (fragments.feeder_enabled, "feederEnabled", &mut resolved.feeder_enabled),
            (fragments.duplex_enabled, "duplexEnabled", &mut resolved.duplex_enabled),
        ];
        for (fragment, name, slot) in slots {
            if let Some(token) = fragment {
                draft.arguments.push_str(token);
                *slot = Some(Capability::single(CapabilityValue::for_node(
                    source,
                    token,
                    name,
                    source.source.as_str(),
                )));
            }
        }
        draft.arguments.push_str(IMAGE_NAMING_PATTERN);

        for format in &source.pixel_formats {
            if !format.is_owned_by(self.vendor_id) {
                log_debug!("Skipping foreign pixel format", "path" => format.path());
                continue;
            }

            match self.pixel_formats.resolve(format, draft)? {
                Outcome::Accepted(pixel_format) => resolved.pixel_formats.push(pixel_format),
                Outcome::Skip => {}
                Outcome::NextAlternative => return Ok(Outcome::NextAlternative),
            }
        }

        Ok(Outcome::Accepted(resolved))
    }

    fn unrecognized(
        &self,
        source: &Source,
        draft: &mut StreamDraft,
    ) -> Result<Outcome<ResolvedSource>, ResolutionError> {
        match source.exception {
            ExceptionPolicy::Fail => Err(ResolutionError::unsupported(
                NodeKind::Source,
                "source",
                source.path(),
                source.source.as_str(),
            )),
            ExceptionPolicy::NextStream => {
                log_warning!(code = codes::resolution::ALTERNATIVE_REQUESTED,
                    "Unrecognized source requests next stream",
                    "path" => source.path()
                );
                Ok(Outcome::NextAlternative)
            }
            ExceptionPolicy::Ignore => {
                // Staged so the backend rejects the invocation itself
                draft.arguments.push_str(tokens::SOURCE_INVALID);
                draft.ignored = true;
                log_warning!(code = codes::resolution::VALUE_IGNORED,
                    "Unrecognized source ignored",
                    "path" => source.path(),
                    "source" => &source.source
                );
                Ok(Outcome::Skip)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use scantask_compiler::task::PixelFormat;

    fn resolve(source: &Source) -> (Result<Outcome<ResolvedSource>, ResolutionError>, StreamDraft) {
        let mut draft = StreamDraft::default();
        let result = SourceResolver::new("acme").resolve(source, &mut draft);
        (result, draft)
    }

    #[test]
    fn test_feeder_addressing() {
        let (result, draft) = resolve(&Source::new("feeder", vec![]));

        let resolved = match result.unwrap() {
            Outcome::Accepted(resolved) => resolved,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(
            draft.arguments,
            " --source=ADF --duplex=yes --batch=img%06d.pnm"
        );
        assert!(resolved.feeder_enabled.is_some());
        assert!(resolved.duplex_enabled.is_some());
        assert!(resolved.automatic_sense.is_none());
        assert!(resolved.pixel_formats.is_empty());
    }

    #[test]
    fn test_any_uses_automatic_sense() {
        let (result, draft) = resolve(&Source::new("any", vec![PixelFormat::new("bw1", vec![])]));

        let resolved = match result.unwrap() {
            Outcome::Accepted(resolved) => resolved,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(
            draft.arguments,
            " --source=Auto --batch=img%06d.pnm --mode=Lineart"
        );
        assert_eq!(resolved.capabilities().count(), 1);
        assert_eq!(resolved.pixel_formats.len(), 1);
    }

    #[test]
    fn test_unknown_source_is_staged_invalid() {
        let (result, draft) = resolve(&Source::new("camera", vec![PixelFormat::new("rgb24", vec![])]));

        assert_eq!(result.unwrap(), Outcome::Skip);
        assert_eq!(draft.arguments, tokens::SOURCE_INVALID);
        assert!(draft.ignored);
    }

    #[test]
    fn test_unknown_source_fail_and_next() {
        let failing = Source::new("camera", vec![]).with_exception(ExceptionPolicy::Fail);
        let (result, _) = resolve(&failing);
        assert_matches!(
            result,
            Err(ResolutionError::UnsupportedValue { kind: NodeKind::Source, .. })
        );

        let next = Source::new("camera", vec![]).with_exception(ExceptionPolicy::NextStream);
        let (result, _) = resolve(&next);
        assert!(result.unwrap().is_next_alternative());
    }

    #[test]
    fn test_foreign_pixel_format_skipped() {
        let source = Source::new(
            "flatbed",
            vec![PixelFormat::new("rgb24", vec![]).with_vendor("other")],
        );
        let (result, draft) = resolve(&source);

        assert_matches!(result, Ok(Outcome::Accepted(ref s)) if s.pixel_formats.is_empty());
        assert!(!draft.arguments.contains("--mode"));
    }
}
