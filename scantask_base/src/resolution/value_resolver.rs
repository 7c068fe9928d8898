//! Picks one concrete value per setting from an ordered candidate list.
//!
//! Emission is first-match-wins. Every owned candidate offered after the
//! decision is still recorded; candidates dropped under the ignore policy
//! are not.

use super::error::{NodeKind, ResolutionError};
use super::outcome::Outcome;
use super::translators::{translate, Translation};
use crate::types::{Capability, CapabilityValue};
use scantask_compiler::logging::codes;
use scantask_compiler::task::{Attribute, AttributeKind, ExceptionPolicy, TaskNode};
use scantask_compiler::{log_debug, log_warning};

/// Setting chosen for one attribute
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeResolution {
    /// `None` when no owned candidate was offered
    pub capability: Option<Capability>,
    /// Some candidate was dropped under the ignore policy
    pub ignored: bool,
}

pub struct ValueResolver<'a> {
    vendor_id: &'a str,
}

impl<'a> ValueResolver<'a> {
    pub fn new(vendor_id: &'a str) -> Self {
        Self { vendor_id }
    }

    /// Resolve the candidates of one attribute.
    ///
    /// An accepted resolution without a capability is a request for backend
    /// defaults rather than an ignored setting.
    pub fn resolve(
        &self,
        kind: AttributeKind,
        attribute: &Attribute,
    ) -> Result<Outcome<AttributeResolution>, ResolutionError> {
        let mut values = Vec::with_capacity(attribute.values.len());
        let mut chosen: Option<String> = None;
        let mut next_alternative = false;
        let mut ignored = false;

        for value in &attribute.values {
            if !value.is_owned_by(self.vendor_id) {
                log_debug!("Skipping foreign value",
                    "path" => value.path(),
                    "vendor" => value.vendor()
                );
                continue;
            }

            let translation = translate(kind, &value.value);
            let record = CapabilityValue::for_node(
                value,
                translation.token(),
                kind.as_str(),
                value.value.as_str(),
            );

            if chosen.is_some() || next_alternative {
                values.push(record);
                continue;
            }

            match translation {
                Translation::Recognized(token) => {
                    values.push(record);
                    chosen = Some(token);
                }
                Translation::Unrecognized(_) => match value.exception {
                    ExceptionPolicy::Fail => {
                        return Err(ResolutionError::unsupported(
                            NodeKind::Value,
                            kind.as_str(),
                            value.path(),
                            value.value.as_str(),
                        ));
                    }
                    ExceptionPolicy::NextStream => {
                        log_warning!(code = codes::resolution::ALTERNATIVE_REQUESTED,
                            "Unrecognized value requests next stream",
                            "path" => value.path(),
                            "literal" => &value.value
                        );
                        values.push(record);
                        next_alternative = true;
                    }
                    ExceptionPolicy::Ignore => {
                        log_warning!(code = codes::resolution::VALUE_IGNORED,
                            "Unrecognized value ignored",
                            "path" => value.path(),
                            "literal" => &value.value
                        );
                        ignored = true;
                    }
                },
            }
        }

        if next_alternative {
            return Ok(Outcome::NextAlternative);
        }

        Ok(match chosen {
            Some(token) => Outcome::Accepted(AttributeResolution {
                capability: Some(Capability::new(values, token)),
                ignored,
            }),
            None if ignored => Outcome::Skip,
            None => Outcome::Accepted(AttributeResolution::default()),
        })
    }
}
