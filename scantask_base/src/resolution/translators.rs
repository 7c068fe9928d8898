//! Backend token vocabulary
//!
//! Every token is a space-prefixed command-line fragment so that fragments
//! can be concatenated in tree order.

use scantask_compiler::task::{AttributeKind, PixelFormatKind, SourceKind};

/// Largest batch count the backend accepts; "0" images means "as many as possible"
pub const MAX_BATCH_COUNT: u32 = 32767;

/// Naming pattern for staged image files
pub const IMAGE_NAMING_PATTERN: &str = " --batch=img%06d.pnm";

/// Neutral point of the 0..100 brightness and contrast scale
const DEFAULT_LEVEL: i64 = 50;

pub mod tokens {
    pub const MODE_LINEART: &str = " --mode=Lineart";
    pub const MODE_GRAY: &str = " --mode=Gray";
    pub const MODE_COLOR: &str = " --mode=Color";
    pub const MODE_INVALID: &str = " --mode=invalid";

    pub const AUTOCROP_YES: &str = " --autocrop=yes";
    pub const AUTOCROP_NO: &str = " --autocrop=no";
    pub const AUTOCROP_INVALID: &str = " --autocrop=invalid";

    pub const RESOLUTION_INVALID: &str = " --resolution=invalid";

    pub const SOURCE_AUTO: &str = " --source=Auto";
    pub const SOURCE_ADF: &str = " --source=ADF";
    pub const SOURCE_FLATBED: &str = " --source=Flatbed";
    pub const SOURCE_INVALID: &str = " --source=invalid";

    pub const DUPLEX_YES: &str = " --duplex=yes";
    pub const DUPLEX_NO: &str = " --duplex=no";
}

/// Result of translating one literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Known-good backend token
    Recognized(String),
    /// Deliberately invalid placeholder token
    Unrecognized(String),
}

impl Translation {
    pub fn token(&self) -> &str {
        match self {
            Self::Recognized(token) | Self::Unrecognized(token) => token,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Recognized(_))
    }
}

/// Translate a candidate literal for a recognized attribute
pub fn translate(kind: AttributeKind, literal: &str) -> Translation {
    match kind {
        AttributeKind::AutoCrop => auto_crop(literal),
        AttributeKind::Brightness => Translation::Recognized(format!(
            " --brightness={}",
            scale_level(literal)
        )),
        AttributeKind::Contrast => {
            Translation::Recognized(format!(" --contrast={}", scale_level(literal)))
        }
        AttributeKind::ImageCount => image_count(literal),
        AttributeKind::Resolution => resolution(literal),
    }
}

/// Pixel type is driven by the pixel format's own token
pub fn pixel_type(token: &str) -> Translation {
    match PixelFormatKind::from_token(token) {
        Some(PixelFormatKind::Bw1) => Translation::Recognized(tokens::MODE_LINEART.to_string()),
        Some(PixelFormatKind::Gray8) => Translation::Recognized(tokens::MODE_GRAY.to_string()),
        Some(PixelFormatKind::Rgb24) => Translation::Recognized(tokens::MODE_COLOR.to_string()),
        None => Translation::Unrecognized(tokens::MODE_INVALID.to_string()),
    }
}

fn auto_crop(literal: &str) -> Translation {
    match literal {
        "yes" => Translation::Recognized(tokens::AUTOCROP_YES.to_string()),
        "no" => Translation::Recognized(tokens::AUTOCROP_NO.to_string()),
        _ => Translation::Unrecognized(tokens::AUTOCROP_INVALID.to_string()),
    }
}

fn image_count(literal: &str) -> Translation {
    if literal == "0" {
        Translation::Recognized(format!(" --batch-count={}", MAX_BATCH_COUNT))
    } else {
        Translation::Recognized(format!(" --batch-count={}", literal))
    }
}

fn resolution(literal: &str) -> Translation {
    match parse_resolution(literal) {
        Some(_) => Translation::Recognized(format!(" --resolution={}", literal)),
        None => Translation::Unrecognized(tokens::RESOLUTION_INVALID.to_string()),
    }
}

/// Numeric DPI of a resolution literal
pub fn parse_resolution(literal: &str) -> Option<u32> {
    literal.parse().ok()
}

/// Map a 0..100 level onto the backend's signed -100..100 range.
/// Unparsable input is treated as the neutral level.
pub fn scale_level(literal: &str) -> i64 {
    let level = literal.trim().parse::<i64>().unwrap_or(DEFAULT_LEVEL);

    level.saturating_mul(2).saturating_sub(100)
}

/// Addressing fragments for a source topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFragments {
    pub automatic_sense: Option<&'static str>,
    pub feeder_enabled: Option<&'static str>,
    pub duplex_enabled: Option<&'static str>,
}

pub fn source_fragments(kind: SourceKind) -> SourceFragments {
    match kind {
        SourceKind::Any => SourceFragments {
            automatic_sense: Some(tokens::SOURCE_AUTO),
            feeder_enabled: None,
            duplex_enabled: None,
        },
        SourceKind::Feeder => SourceFragments {
            automatic_sense: None,
            feeder_enabled: Some(tokens::SOURCE_ADF),
            duplex_enabled: Some(tokens::DUPLEX_YES),
        },
        SourceKind::FeederFront => SourceFragments {
            automatic_sense: None,
            feeder_enabled: Some(tokens::SOURCE_ADF),
            duplex_enabled: Some(tokens::DUPLEX_NO),
        },
        SourceKind::Flatbed => SourceFragments {
            automatic_sense: None,
            feeder_enabled: Some(tokens::SOURCE_FLATBED),
            duplex_enabled: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_scaling() {
        assert_eq!(scale_level("0"), -100);
        assert_eq!(scale_level("50"), 0);
        assert_eq!(scale_level("100"), 100);
        assert_eq!(scale_level("bright"), 0);
        assert_eq!(scale_level(" 75 "), 50);
        assert_eq!(scale_level("25.4"), 0);
        assert_eq!(scale_level("-10"), -120);
    }

    #[test]
    fn test_brightness_and_contrast_tokens() {
        assert_eq!(
            translate(AttributeKind::Brightness, "0").token(),
            " --brightness=-100"
        );
        assert_eq!(
            translate(AttributeKind::Contrast, "100").token(),
            " --contrast=100"
        );
        assert!(translate(AttributeKind::Contrast, "junk").is_recognized());
    }

    #[test]
    fn test_image_count() {
        assert_eq!(
            translate(AttributeKind::ImageCount, "0").token(),
            " --batch-count=32767"
        );
        assert_eq!(
            translate(AttributeKind::ImageCount, "5").token(),
            " --batch-count=5"
        );
    }

    #[test]
    fn test_resolution_is_verbatim() {
        assert_eq!(
            translate(AttributeKind::Resolution, "300"),
            Translation::Recognized(" --resolution=300".to_string())
        );
        assert_eq!(
            translate(AttributeKind::Resolution, "high"),
            Translation::Unrecognized(tokens::RESOLUTION_INVALID.to_string())
        );
        assert_eq!(parse_resolution("600"), Some(600));
    }

    #[test]
    fn test_auto_crop() {
        assert_eq!(translate(AttributeKind::AutoCrop, "yes").token(), tokens::AUTOCROP_YES);
        assert_eq!(translate(AttributeKind::AutoCrop, "no").token(), tokens::AUTOCROP_NO);
        assert!(!translate(AttributeKind::AutoCrop, "Yes").is_recognized());
    }

    #[test]
    fn test_pixel_type() {
        assert_eq!(pixel_type("bw1").token(), tokens::MODE_LINEART);
        assert_eq!(pixel_type("gray8").token(), tokens::MODE_GRAY);
        assert_eq!(pixel_type("rgb24").token(), tokens::MODE_COLOR);
        assert_eq!(
            pixel_type("cmyk32"),
            Translation::Unrecognized(tokens::MODE_INVALID.to_string())
        );
    }

    #[test]
    fn test_source_fragments() {
        let feeder = source_fragments(SourceKind::Feeder);
        assert_eq!(feeder.feeder_enabled, Some(tokens::SOURCE_ADF));
        assert_eq!(feeder.duplex_enabled, Some(tokens::DUPLEX_YES));

        let any = source_fragments(SourceKind::Any);
        assert_eq!(any.automatic_sense, Some(tokens::SOURCE_AUTO));
        assert_eq!(any.feeder_enabled, None);
    }
}
