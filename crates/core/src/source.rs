//! UFO font sources and output naming.

use std::path::Path;

use log::debug;
use norad::Font;

use crate::error::{Error, Result};

/// Family and style metadata of a loaded UFO package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSource {
    family_name: String,
    style_name: String,
}

impl FontSource {
    /// Load the UFO package at `path`.
    ///
    /// Fails with [`Error::Load`] if the path is not a readable UFO, and with
    /// [`Error::MissingInfo`] if `fontinfo.plist` lacks a family or style name.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let font = Font::load(path).map_err(|source| Error::Load { path: path.into(), source })?;
        debug!("Loaded {} ({} glyphs)", path.display(), font.default_layer().len());
        Self::from_font(path, &font)
    }

    /// Extract naming metadata from an already loaded font.
    pub fn from_font(path: impl AsRef<Path>, font: &Font) -> Result<Self> {
        let missing = |field| Error::MissingInfo { path: path.as_ref().to_path_buf(), field };
        let info = &font.font_info;

        let family_name = info.family_name.clone().ok_or_else(|| missing("familyName"))?;
        let style_name = info.style_name.clone().ok_or_else(|| missing("styleName"))?;

        Ok(Self { family_name, style_name })
    }

    /// Output file stem for this source, e.g. `TestFont-Regular`.
    pub fn resolve_name(&self) -> String {
        resolve_name(&self.family_name, &self.style_name)
    }
}

/// Join a family and style name into an output file stem.
///
/// Spaces are removed from the family name only; the style name is used
/// verbatim.
pub fn resolve_name(family_name: &str, style_name: &str) -> String {
    format!("{}-{style_name}", family_name.replace(' ', ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_spaces_from_family() {
        assert_eq!(resolve_name("Test Font", "Regular"), "TestFont-Regular");
    }

    #[test]
    fn keeps_style_verbatim() {
        assert_eq!(resolve_name("Test Font", "Bold Italic"), "TestFont-Bold Italic");
    }

    #[test]
    fn only_spaces_are_stripped() {
        assert_eq!(resolve_name("Söhne\tMono_X", "W3"), "Söhne\tMono_X-W3");
    }

    #[test]
    fn reads_names_from_fontinfo() {
        let mut font = Font::new();
        font.font_info.family_name = Some("Test Font".into());
        font.font_info.style_name = Some("Regular".into());

        let source = FontSource::from_font("Test.ufo", &font).unwrap();
        assert_eq!(source.resolve_name(), "TestFont-Regular");
    }

    #[test]
    fn missing_family_name_is_an_error() {
        let mut font = Font::new();
        font.font_info.style_name = Some("Regular".into());

        let err = FontSource::from_font("Test.ufo", &font).unwrap_err();
        assert!(matches!(err, Error::MissingInfo { field: "familyName", .. }));
    }

    #[test]
    fn missing_style_name_is_an_error() {
        let mut font = Font::new();
        font.font_info.family_name = Some("Test Font".into());

        let err = FontSource::from_font("Test.ufo", &font).unwrap_err();
        assert!(matches!(err, Error::MissingInfo { field: "styleName", .. }));
    }
}
