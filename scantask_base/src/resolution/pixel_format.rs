use super::error::{NodeKind, ResolutionError};
use super::outcome::Outcome;
use super::stream::StreamDraft;
use super::translators::{parse_resolution, pixel_type, Translation};
use super::value_resolver::{AttributeResolution, ValueResolver};
use crate::types::{Capability, CapabilityValue, ResolvedPixelFormat};
use scantask_compiler::logging::codes;
use scantask_compiler::task::{AttributeKind, ExceptionPolicy, PixelFormat, TaskNode};
use scantask_compiler::{log_debug, log_warning};

/// Resolves one pixel format: its pixel type, then each attribute in order.
pub struct PixelFormatResolver<'a> {
    vendor_id: &'a str,
    values: ValueResolver<'a>,
}

impl<'a> PixelFormatResolver<'a> {
    pub fn new(vendor_id: &'a str) -> Self {
        Self {
            vendor_id,
            values: ValueResolver::new(vendor_id),
        }
    }

    /// Tokens go straight into the stream draft, which is discarded as a
    /// whole if the stream is abandoned.
    pub(crate) fn resolve(
        &self,
        format: &PixelFormat,
        draft: &mut StreamDraft,
    ) -> Result<Outcome<ResolvedPixelFormat>, ResolutionError> {
        let token = match pixel_type(&format.pixel_format) {
            Translation::Recognized(token) => token,
            Translation::Unrecognized(_) => {
                return self.unrecognized(format, draft);
            }
        };

        let mut resolved = ResolvedPixelFormat::new(format.pixel_format.as_str());
        draft.arguments.push_str(&token);
        resolved.pixel_type = Some(Capability::single(CapabilityValue::for_node(
            format,
            token,
            "pixelType",
            format.pixel_format.as_str(),
        )));

        for attribute in &format.attributes {
            if !attribute.is_owned_by(self.vendor_id) {
                log_debug!("Skipping foreign attribute", "path" => attribute.path());
                continue;
            }

            let kind = match AttributeKind::from_token(&attribute.attribute) {
                Some(kind) => kind,
                None => match attribute.exception {
                    ExceptionPolicy::Fail => {
                        return Err(ResolutionError::unsupported(
                            NodeKind::Attribute,
                            "attribute",
                            attribute.path(),
                            attribute.attribute.as_str(),
                        ));
                    }
                    ExceptionPolicy::NextStream => return Ok(Outcome::NextAlternative),
                    ExceptionPolicy::Ignore => {
                        log_warning!(code = codes::resolution::VALUE_IGNORED,
                            "Unrecognized attribute ignored",
                            "path" => attribute.path(),
                            "attribute" => &attribute.attribute
                        );
                        draft.ignored = true;
                        continue;
                    }
                },
            };

            match self.values.resolve(kind, attribute)? {
                Outcome::Accepted(AttributeResolution { capability, ignored }) => {
                    draft.ignored |= ignored;
                    let Some(capability) = capability else {
                        continue;
                    };

                    draft.arguments.push_str(capability.chosen());
                    if kind == AttributeKind::Resolution {
                        if let Some(dpi) = capability
                            .chosen_value()
                            .and_then(|v| parse_resolution(v.literal()))
                        {
                            draft.resolution = Some(dpi);
                        }
                    }
                    resolved.set(kind, capability);
                }
                Outcome::Skip => draft.ignored = true,
                Outcome::NextAlternative => return Ok(Outcome::NextAlternative),
            }
        }

        Ok(Outcome::Accepted(resolved))
    }

    fn unrecognized(
        &self,
        format: &PixelFormat,
        draft: &mut StreamDraft,
    ) -> Result<Outcome<ResolvedPixelFormat>, ResolutionError> {
        match format.exception {
            ExceptionPolicy::Fail => Err(ResolutionError::unsupported(
                NodeKind::PixelFormat,
                "pixelFormat",
                format.path(),
                format.pixel_format.as_str(),
            )),
            ExceptionPolicy::NextStream => {
                log_warning!(code = codes::resolution::ALTERNATIVE_REQUESTED,
                    "Unrecognized pixel format requests next stream",
                    "path" => format.path()
                );
                Ok(Outcome::NextAlternative)
            }
            ExceptionPolicy::Ignore => {
                log_warning!(code = codes::resolution::VALUE_IGNORED,
                    "Unrecognized pixel format ignored",
                    "path" => format.path(),
                    "pixel_format" => &format.pixel_format
                );
                draft.ignored = true;
                Ok(Outcome::Skip)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use scantask_compiler::task::{Attribute, Value};

    fn resolve(format: &PixelFormat) -> (Result<Outcome<ResolvedPixelFormat>, ResolutionError>, StreamDraft) {
        let mut draft = StreamDraft::default();
        let result = PixelFormatResolver::new("acme").resolve(format, &mut draft);
        (result, draft)
    }

    #[test]
    fn test_pixel_type_precedes_attributes() {
        let format = PixelFormat::new(
            "gray8",
            vec![
                Attribute::new("resolution", vec![Value::new("200")]),
                Attribute::new("autocrop", vec![Value::new("yes")]),
            ],
        );

        let (result, draft) = resolve(&format);
        assert!(result.unwrap().is_accepted());
        assert_eq!(
            draft.arguments,
            " --mode=Gray --resolution=200 --autocrop=yes"
        );
        assert_eq!(draft.resolution, Some(200));
        assert!(!draft.ignored);
    }

    #[test]
    fn test_unknown_pixel_format_ignored() {
        let format = PixelFormat::new("cmyk32", vec![Attribute::new("resolution", vec![Value::new("300")])]);

        let (result, draft) = resolve(&format);
        assert_eq!(result.unwrap(), Outcome::Skip);
        assert!(draft.arguments.is_empty());
        assert!(draft.ignored);
    }

    #[test]
    fn test_unknown_pixel_format_fail() {
        let format = PixelFormat::new("cmyk32", vec![])
            .with_exception(ExceptionPolicy::Fail)
            .with_path("pf");

        let (result, _) = resolve(&format);
        assert_matches!(
            result,
            Err(ResolutionError::UnsupportedValue { kind: NodeKind::PixelFormat, .. })
        );
    }

    #[test]
    fn test_unknown_attribute_policies() {
        let ignored = PixelFormat::new("bw1", vec![Attribute::new("gamma", vec![Value::new("2")])]);
        let (result, draft) = resolve(&ignored);
        assert!(result.unwrap().is_accepted());
        assert!(draft.ignored);
        assert_eq!(draft.arguments, " --mode=Lineart");

        let next = PixelFormat::new(
            "bw1",
            vec![Attribute::new("gamma", vec![Value::new("2")])
                .with_exception(ExceptionPolicy::NextStream)],
        );
        let (result, _) = resolve(&next);
        assert!(result.unwrap().is_next_alternative());
    }

    #[test]
    fn test_unknown_attribute_fail_reports_attribute_path() {
        let path = "actions[0].streams[0].sources[0].pixelFormats[0].attributes[0]";
        let format = PixelFormat::new(
            "rgb24",
            vec![Attribute::new("gamma", vec![Value::new("2")])
                .with_exception(ExceptionPolicy::Fail)
                .with_path(path)],
        );

        let (result, _) = resolve(&format);
        let error = result.unwrap_err();
        assert_matches!(
            error,
            ResolutionError::UnsupportedValue { kind: NodeKind::Attribute, .. }
        );
        assert_eq!(error.path(), path);
        assert_eq!(error.literal(), Some("gamma"));
    }

    #[test]
    fn test_ignored_candidate_before_chosen_marks_stream() {
        let format = PixelFormat::new(
            "rgb24",
            vec![Attribute::new(
                "autocrop",
                vec![Value::new("maybe"), Value::new("no")],
            )],
        );

        let (result, draft) = resolve(&format);
        let resolved = match result.unwrap() {
            Outcome::Accepted(resolved) => resolved,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert!(draft.ignored);
        assert_eq!(draft.arguments, " --mode=Color --autocrop=no");

        let auto_crop = resolved.slot(AttributeKind::AutoCrop).unwrap();
        assert_eq!(auto_crop.values.len(), 1);
        assert!(!auto_crop.values.iter().any(|v| v.literal() == "maybe"));
    }

    #[test]
    fn test_duplicate_attribute_last_slot_wins() {
        let format = PixelFormat::new(
            "rgb24",
            vec![
                Attribute::new("resolution", vec![Value::new("200")]),
                Attribute::new("resolution", vec![Value::new("300")]),
            ],
        );

        let (result, draft) = resolve(&format);
        let resolved = match result.unwrap() {
            Outcome::Accepted(resolved) => resolved,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(
            resolved.slot(AttributeKind::Resolution).map(Capability::chosen),
            Some(" --resolution=300")
        );
        assert_eq!(
            draft.arguments,
            " --mode=Color --resolution=200 --resolution=300"
        );
        assert_eq!(draft.resolution, Some(300));
    }
}
