//! Capability records
//!
//! A capability is one negotiated setting: every candidate that was offered
//! for it, in offer order, plus the backend token that was chosen.

use scantask_compiler::task::{ExceptionPolicy, TaskNode};
use serde::Serialize;

/// One candidate considered for a setting. Fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityValue {
    token: String,
    name: String,
    literal: String,
    exception: ExceptionPolicy,
    path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    vendor: String,
}

impl CapabilityValue {
    pub fn new(
        token: impl Into<String>,
        name: impl Into<String>,
        literal: impl Into<String>,
        exception: ExceptionPolicy,
        path: impl Into<String>,
        vendor: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            name: name.into(),
            literal: literal.into(),
            exception,
            path: path.into(),
            vendor: vendor.into(),
        }
    }

    /// Build a record for a task node, copying its policy, path and vendor
    pub fn for_node<N: TaskNode>(
        node: &N,
        token: impl Into<String>,
        name: impl Into<String>,
        literal: impl Into<String>,
    ) -> Self {
        Self::new(
            token,
            name,
            literal,
            node.exception(),
            node.path(),
            node.vendor(),
        )
    }

    /// Backend argument fragment, always space-prefixed
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn exception(&self) -> ExceptionPolicy {
        self.exception
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }
}

/// A resolved setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    /// Every candidate considered, in offer order
    pub values: Vec<CapabilityValue>,

    /// Token of the chosen candidate
    pub chosen: String,
}

impl Capability {
    pub fn new(values: Vec<CapabilityValue>, chosen: impl Into<String>) -> Self {
        Self {
            values,
            chosen: chosen.into(),
        }
    }

    /// Capability with exactly one candidate, which is also the choice
    pub fn single(value: CapabilityValue) -> Self {
        let chosen = value.token().to_string();
        Self {
            values: vec![value],
            chosen,
        }
    }

    pub fn chosen(&self) -> &str {
        &self.chosen
    }

    /// The candidate whose token was chosen
    pub fn chosen_value(&self) -> Option<&CapabilityValue> {
        self.values.iter().find(|v| v.token() == self.chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scantask_compiler::task::Value;

    #[test]
    fn test_value_copies_node_fields() {
        let node = Value::new("300")
            .with_exception(ExceptionPolicy::Fail)
            .with_vendor("acme")
            .with_path("actions[0].streams[0]");

        let value = CapabilityValue::for_node(&node, " --resolution=300", "resolution", "300");

        assert_eq!(value.token(), " --resolution=300");
        assert_eq!(value.exception(), ExceptionPolicy::Fail);
        assert_eq!(value.vendor(), "acme");
        assert_eq!(value.path(), "actions[0].streams[0]");
    }

    #[test]
    fn test_chosen_value_lookup() {
        let first = CapabilityValue::new(
            " --autocrop=invalid",
            "autocrop",
            "maybe",
            ExceptionPolicy::Ignore,
            "a",
            "",
        );
        let second = CapabilityValue::new(
            " --autocrop=yes",
            "autocrop",
            "yes",
            ExceptionPolicy::Ignore,
            "b",
            "",
        );
        let capability = Capability::new(vec![first, second], " --autocrop=yes");

        assert_eq!(capability.chosen_value().map(|v| v.literal()), Some("yes"));
    }

    #[test]
    fn test_empty_vendor_not_serialized() {
        let value = CapabilityValue::new(" --mode=Gray", "pixelType", "gray8", ExceptionPolicy::Ignore, "p", "");
        let json = serde_json::to_value(&value).unwrap();
        assert!(json.get("vendor").is_none());
        assert_eq!(json["exception"], "ignore");
    }
}
