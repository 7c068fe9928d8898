//! Output tree produced by one resolution pass
//!
//! Mirrors the retained part of the input task. Only the engine grows it;
//! callers receive it by value once resolution is complete.

use super::capability::Capability;
use scantask_compiler::task::AttributeKind;
use serde::Serialize;

/// Per-action outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionStatus {
    /// Everything requested was applied
    Success,
    /// The action ran but something requested was skipped
    SuccessIgnore,
    /// Unrecognized command kind retained under a non-fail policy
    Unsupported,
}

impl ActionStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::SuccessIgnore => "successIgnore",
            Self::Unsupported => "unsupported",
        }
    }

    pub fn is_success(self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedTask {
    pub actions: Vec<ResolvedAction>,
}

impl ResolvedTask {
    pub fn count_capabilities(&self) -> usize {
        self.actions
            .iter()
            .flat_map(|a| &a.streams)
            .flat_map(|s| &s.sources)
            .map(|s| {
                s.capabilities().count()
                    + s.pixel_formats
                        .iter()
                        .map(|p| p.capabilities().count())
                        .sum::<usize>()
            })
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAction {
    pub action: String,
    pub status: ActionStatus,
    pub streams: Vec<ResolvedStream>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedStream {
    pub sources: Vec<ResolvedSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSource {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automatic_sense: Option<Capability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplex_enabled: Option<Capability>,
    /// Feeder on/off switch; a flatbed selection is its off position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feeder_enabled: Option<Capability>,
    pub pixel_formats: Vec<ResolvedPixelFormat>,
}

impl ResolvedSource {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            automatic_sense: None,
            duplex_enabled: None,
            feeder_enabled: None,
            pixel_formats: Vec::new(),
        }
    }

    /// Addressing capabilities that are present, in fixed order
    pub fn capabilities(&self) -> impl Iterator<Item = (&'static str, &Capability)> {
        [
            ("automaticSense", &self.automatic_sense),
            ("duplexEnabled", &self.duplex_enabled),
            ("feederEnabled", &self.feeder_enabled),
        ]
        .into_iter()
        .filter_map(|(name, slot)| slot.as_ref().map(|c| (name, c)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPixelFormat {
    pub pixel_format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_type: Option<Capability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_crop: Option<Capability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<Capability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<Capability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_count: Option<Capability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Capability>,
}

impl ResolvedPixelFormat {
    pub fn new(pixel_format: impl Into<String>) -> Self {
        Self {
            pixel_format: pixel_format.into(),
            pixel_type: None,
            auto_crop: None,
            brightness: None,
            contrast: None,
            image_count: None,
            resolution: None,
        }
    }

    /// Slot holding the capability for an attribute
    pub fn slot(&self, kind: AttributeKind) -> Option<&Capability> {
        match kind {
            AttributeKind::AutoCrop => self.auto_crop.as_ref(),
            AttributeKind::Brightness => self.brightness.as_ref(),
            AttributeKind::Contrast => self.contrast.as_ref(),
            AttributeKind::ImageCount => self.image_count.as_ref(),
            AttributeKind::Resolution => self.resolution.as_ref(),
        }
    }

    /// Store a capability, replacing whatever an earlier attribute left there
    pub fn set(&mut self, kind: AttributeKind, capability: Capability) {
        let slot = match kind {
            AttributeKind::AutoCrop => &mut self.auto_crop,
            AttributeKind::Brightness => &mut self.brightness,
            AttributeKind::Contrast => &mut self.contrast,
            AttributeKind::ImageCount => &mut self.image_count,
            AttributeKind::Resolution => &mut self.resolution,
        };
        *slot = Some(capability);
    }

    /// Present capabilities in fixed order, pixel type first
    pub fn capabilities(&self) -> impl Iterator<Item = (&'static str, &Capability)> {
        [
            ("pixelType", &self.pixel_type),
            ("autocrop", &self.auto_crop),
            ("brightness", &self.brightness),
            ("contrast", &self.contrast),
            ("imagecount", &self.image_count),
            ("resolution", &self.resolution),
        ]
        .into_iter()
        .filter_map(|(name, slot)| slot.as_ref().map(|c| (name, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::capability::CapabilityValue;
    use scantask_compiler::task::ExceptionPolicy;

    fn capability(token: &str) -> Capability {
        Capability::single(CapabilityValue::new(
            token,
            "resolution",
            "300",
            ExceptionPolicy::Ignore,
            "p",
            "",
        ))
    }

    #[test]
    fn test_set_replaces_slot() {
        let mut format = ResolvedPixelFormat::new("rgb24");
        format.set(AttributeKind::Resolution, capability(" --resolution=200"));
        format.set(AttributeKind::Resolution, capability(" --resolution=300"));

        assert_eq!(
            format.slot(AttributeKind::Resolution).map(Capability::chosen),
            Some(" --resolution=300")
        );
        assert_eq!(format.capabilities().count(), 1);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ActionStatus::SuccessIgnore).unwrap();
        assert_eq!(json, "\"successIgnore\"");
        assert!(!ActionStatus::Unsupported.is_success());
    }

    #[test]
    fn test_count_capabilities() {
        let mut source = ResolvedSource::new("flatbed");
        source.feeder_enabled = Some(capability(" --source=Flatbed"));
        let mut format = ResolvedPixelFormat::new("gray8");
        format.pixel_type = Some(capability(" --mode=Gray"));
        source.pixel_formats.push(format);

        let task = ResolvedTask {
            actions: vec![ResolvedAction {
                action: "configure".to_string(),
                status: ActionStatus::Success,
                streams: vec![ResolvedStream {
                    sources: vec![source],
                }],
            }],
        };

        assert_eq!(task.count_capabilities(), 2);
    }
}
