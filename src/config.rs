//! Host configuration for a signature pad.
//!
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! height = 300
//! signature_color = "#1A237E"
//!
//! [guideline]
//! dash_intervals = [8, 4]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::render::{Guideline, RenderOptions, StrokeStyle, DEFAULT_THICKNESS_SCALE};
use crate::types::Color;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    /// Surface size in pixels.
    pub width: u32,
    pub height: u32,

    pub signature_color: Color,
    pub signature_thickness: f32,
    /// Multiplier on `signature_thickness` for the drawn stroke width.
    pub thickness_scale: f32,

    pub pad_color: Color,
    /// Completion image keeps a transparent background when true,
    /// otherwise it is filled with `pad_color`.
    pub has_alpha: bool,

    pub show_guideline: bool,
    pub guideline: Guideline,

    pub hint_text: String,
    pub hint_color: Color,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 250,
            signature_color: Color::BLACK,
            signature_thickness: 5.0,
            thickness_scale: DEFAULT_THICKNESS_SCALE,
            pad_color: Color::WHITE,
            has_alpha: true,
            show_guideline: true,
            guideline: Guideline::default(),
            hint_text: "Sign within this area".to_string(),
            hint_color: Color::GRAY,
        }
    }
}

impl PadConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "pad size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.signature_thickness.is_finite() && self.signature_thickness > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "signature_thickness must be positive, got {}",
                self.signature_thickness
            )));
        }
        if !(self.thickness_scale.is_finite() && self.thickness_scale > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "thickness_scale must be positive, got {}",
                self.thickness_scale
            )));
        }
        if !self.guideline.padding.is_finite() || self.guideline.padding < 0.0 {
            return Err(Error::InvalidConfig("guideline padding must be >= 0".into()));
        }
        Ok(())
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.signature_color,
            thickness: self.signature_thickness,
            thickness_scale: self.thickness_scale,
        }
    }

    /// What the user sees while signing: pad color, guideline, strokes.
    pub fn preview_options(&self) -> RenderOptions {
        RenderOptions {
            stroke: self.stroke_style(),
            background: Some(self.pad_color),
            guideline: self.show_guideline.then(|| self.guideline.clone()),
        }
    }

    /// What `complete` hands back: strokes, over the pad color unless `has_alpha`.
    pub fn completion_options(&self) -> RenderOptions {
        RenderOptions {
            stroke: self.stroke_style(),
            background: (!self.has_alpha).then_some(self.pad_color),
            guideline: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_stock_pad() {
        let c = PadConfig::default();
        assert_eq!(c.height, 250);
        assert_eq!(c.stroke_style().effective_width(), 15.0);
        assert_eq!(c.guideline.dash_intervals, vec![16.0, 16.0]);
        assert_eq!(c.hint_text, "Sign within this area");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let c = PadConfig::from_toml_str(
            r##"
            height = 300
            signature_color = "#1A237E"
            has_alpha = false

            [guideline]
            dash_intervals = [8, 4]
            "##,
        )
        .unwrap();
        assert_eq!(c.height, 300);
        assert_eq!(c.width, 600);
        assert_eq!(c.signature_color, Color::rgb(0x1A, 0x23, 0x7E));
        assert_eq!(c.guideline.dash_intervals, vec![8.0, 4.0]);
        assert_eq!(c.guideline.padding, 16.0);
        assert_eq!(c.completion_options().background, Some(Color::WHITE));
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let err = PadConfig::from_toml_str(r#"pad_color = "white""#).unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(PadConfig::from_toml_str("height = 0"), Err(Error::InvalidConfig(_))));
        assert!(matches!(
            PadConfig::from_toml_str("signature_thickness = -1.0"),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn guideline_only_in_preview() {
        let c = PadConfig::default();
        assert!(c.preview_options().guideline.is_some());
        assert!(c.completion_options().guideline.is_none());
        assert!(c.completion_options().background.is_none());

        let hidden = PadConfig { show_guideline: false, ..PadConfig::default() };
        assert!(hidden.preview_options().guideline.is_none());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width = 320\nhint_text = \"Sign here\"").unwrap();
        let c = PadConfig::load(file.path()).unwrap();
        assert_eq!(c.width, 320);
        assert_eq!(c.hint_text, "Sign here");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(PadConfig::load(dir.path().join("nope.toml")), Err(Error::Io(_))));
    }
}
