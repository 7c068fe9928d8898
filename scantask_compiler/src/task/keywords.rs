//! Recognized token vocabularies for each level of a task
//!
//! Anything outside these vocabularies is an unrecognized token and is routed
//! through the node's exception policy by the resolution engine.
use serde::{Deserialize, Serialize};

/// Top-level command kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Configure,
    Scan,
}

impl ActionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configure => "configure",
            Self::Scan => "scan",
        }
    }

    /// Parse with exact case matching
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "configure" => Some(Self::Configure),
            "scan" => Some(Self::Scan),
            _ => None,
        }
    }
}

/// Source topology requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Any,
    Feeder,
    FeederFront,
    Flatbed,
}

impl SourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Feeder => "feeder",
            Self::FeederFront => "feederfront",
            Self::Flatbed => "flatbed",
        }
    }

    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "any" => Some(Self::Any),
            "feeder" => Some(Self::Feeder),
            "feederfront" => Some(Self::FeederFront),
            "flatbed" => Some(Self::Flatbed),
            _ => None,
        }
    }
}

/// Color/encoding modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormatKind {
    Bw1,
    Gray8,
    Rgb24,
}

impl PixelFormatKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bw1 => "bw1",
            Self::Gray8 => "gray8",
            Self::Rgb24 => "rgb24",
        }
    }

    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "bw1" => Some(Self::Bw1),
            "gray8" => Some(Self::Gray8),
            "rgb24" => Some(Self::Rgb24),
            _ => None,
        }
    }
}

/// Tunable settings under a pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    AutoCrop,
    Brightness,
    Contrast,
    ImageCount,
    Resolution,
}

impl AttributeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AutoCrop => "autocrop",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::ImageCount => "imagecount",
            Self::Resolution => "resolution",
        }
    }

    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "autocrop" => Some(Self::AutoCrop),
            "brightness" => Some(Self::Brightness),
            "contrast" => Some(Self::Contrast),
            "imagecount" => Some(Self::ImageCount),
            "resolution" => Some(Self::Resolution),
            _ => None,
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),+) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }
        )+
    };
}

impl_display!(ActionKind, SourceKind, PixelFormatKind, AttributeKind);
