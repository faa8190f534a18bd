//! WOFF2 re-flavoring of compiled fonts.
//!
//! A compiled OTF or TTF is re-wrapped as WOFF2 without recompiling it. The
//! sfnt is parsed once to learn its flavor: TrueType fonts go to the
//! `ttf2woff2` encoder, CFF fonts are stored untransformed by [`container`].
//!
//! # Example
//!
//! ```no_run
//! use ufo_convert_woff2::{SfntFlavor, convert_to_woff2};
//!
//! let otf_data: &[u8] = &[];
//! assert_eq!(SfntFlavor::detect(otf_data).unwrap(), SfntFlavor::Cff);
//! let woff2_data = convert_to_woff2(otf_data).unwrap();
//! ```

pub mod container;

use std::fmt;

use anyhow::{Context, Result, anyhow, bail};
use log::debug;
use read_fonts::FontRef;
use ttf2woff2::{BrotliQuality, encode};

/// WOFF2 file signature (`wOF2`).
pub const WOFF2_SIGNATURE: u32 = 0x774F_4632;

/// sfnt version of fonts with TrueType outlines.
pub const TRUETYPE_SFNT_VERSION: u32 = 0x0001_0000;

/// Legacy Apple sfnt version for TrueType outlines (`true`).
pub const APPLE_TRUETYPE_SFNT_VERSION: u32 = 0x7472_7565;

/// sfnt version of fonts with CFF outlines (`OTTO`).
pub const CFF_SFNT_VERSION: u32 = 0x4F54_544F;

/// Outline flavor of a compiled sfnt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SfntFlavor {
    /// `glyf`/`loca` outlines.
    TrueType,
    /// `CFF `/`CFF2` outlines.
    Cff,
}

impl SfntFlavor {
    /// Detect the flavor of raw sfnt data.
    pub fn detect(data: &[u8]) -> Result<Self> {
        let font = FontRef::new(data).context("Failed to parse font")?;
        Self::from_sfnt_version(font.table_directory.sfnt_version())
    }

    pub fn from_sfnt_version(version: u32) -> Result<Self> {
        match version {
            TRUETYPE_SFNT_VERSION | APPLE_TRUETYPE_SFNT_VERSION => Ok(Self::TrueType),
            CFF_SFNT_VERSION => Ok(Self::Cff),
            other => Err(anyhow!("Unknown sfnt version 0x{other:08X}")),
        }
    }
}

impl fmt::Display for SfntFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrueType => f.write_str("TrueType"),
            Self::Cff => f.write_str("CFF"),
        }
    }
}

/// Returns true if `data` starts with the WOFF2 signature.
pub fn is_woff2(data: &[u8]) -> bool {
    data.get(..4)
        .map(|sig| u32::from_be_bytes([sig[0], sig[1], sig[2], sig[3]]) == WOFF2_SIGNATURE)
        .unwrap_or(false)
}

/// Re-flavor compiled sfnt data (OTF or TTF) as WOFF2.
///
/// The input must be a parseable sfnt; already-compressed WOFF2 data is
/// rejected rather than wrapped twice.
pub fn convert_to_woff2(data: &[u8]) -> Result<Vec<u8>> {
    if is_woff2(data) {
        bail!("Font data is already WOFF2");
    }
    let flavor = SfntFlavor::detect(data)?;

    let woff2 = match flavor {
        SfntFlavor::TrueType => encode(data, BrotliQuality::default())
            .map_err(|e| anyhow!("WOFF2 encoding failed: {e:?}"))?,
        SfntFlavor::Cff => container::encode_untransformed(data)?,
    };

    debug!("Encoded {flavor} font as WOFF2: {} -> {} bytes", data.len(), woff2.len());
    Ok(woff2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_truetype_flavor() {
        let flavor = SfntFlavor::detect(font_test_data::VAZIRMATN_VAR).unwrap();
        assert_eq!(flavor, SfntFlavor::TrueType);
    }

    #[test]
    fn detects_cff_flavor() {
        let flavor = SfntFlavor::detect(font_test_data::CANTARELL_VF_TRIMMED).unwrap();
        assert_eq!(flavor, SfntFlavor::Cff);
    }

    #[test]
    fn rejects_unknown_sfnt_version() {
        assert!(SfntFlavor::from_sfnt_version(0xDEAD_BEEF).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(convert_to_woff2(b"not a font at all").is_err());
    }

    #[test]
    fn rejects_woff2_input() {
        let mut data = WOFF2_SIGNATURE.to_be_bytes().to_vec();
        data.extend_from_slice(&[0; 44]);
        assert!(is_woff2(&data));
        let err = convert_to_woff2(&data).unwrap_err();
        assert!(err.to_string().contains("already WOFF2"));
    }

    #[test]
    fn converts_cff_font() {
        let woff2 = convert_to_woff2(font_test_data::CANTARELL_VF_TRIMMED).unwrap();

        assert!(is_woff2(&woff2));
        assert_eq!(&woff2[4..8], &CFF_SFNT_VERSION.to_be_bytes());
    }

    #[test]
    fn converts_truetype_font() {
        let data = font_test_data::VAZIRMATN_VAR;
        let woff2 = convert_to_woff2(data).unwrap();

        assert!(is_woff2(&woff2));
        // WOFF2 header stores the original sfnt version as its flavor.
        assert_eq!(&woff2[4..8], &TRUETYPE_SFNT_VERSION.to_be_bytes());
    }
}
