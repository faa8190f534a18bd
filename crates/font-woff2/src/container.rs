//! WOFF2 container with every table stored untransformed.
//!
//! Used for CFF-flavored fonts, which the `ttf2woff2` encoder rejects. CFF
//! outlines have no WOFF2 transform, so the font's tables are concatenated
//! in directory order and Brotli-compressed as one stream.

use anyhow::{Context, Result};
use brotli::{BrotliCompress, enc::BrotliEncoderParams};
use read_fonts::FontRef;

use crate::WOFF2_SIGNATURE;

/// Size of the fixed WOFF2 header.
pub const HEADER_SIZE: usize = 48;

/// Flag value meaning an explicit 4-byte tag follows the flags byte.
const ARBITRARY_TAG: u8 = 0x3F;

/// Transform version marking `glyf`/`loca` as untransformed.
const NULL_TRANSFORM_GLYF: u8 = 3;

/// Tags with a one-byte index in the WOFF2 table directory.
pub const KNOWN_TAGS: [&[u8; 4]; 63] = [
    b"cmap", b"head", b"hhea", b"hmtx", b"maxp", b"name", b"OS/2", b"post", b"cvt ", b"fpgm",
    b"glyf", b"loca", b"prep", b"CFF ", b"VORG", b"EBDT", b"EBLC", b"gasp", b"hdmx", b"kern",
    b"LTSH", b"PCLT", b"VDMX", b"vhea", b"vmtx", b"BASE", b"GDEF", b"GPOS", b"GSUB", b"EBSC",
    b"JSTF", b"MATH", b"CBDT", b"CBLC", b"COLR", b"CPAL", b"SVG ", b"sbix", b"acnt", b"avar",
    b"bdat", b"bloc", b"bsln", b"cvar", b"fdsc", b"feat", b"fmtx", b"fvar", b"gvar", b"hsty",
    b"just", b"lcar", b"mort", b"morx", b"opbd", b"prop", b"trak", b"Zapf", b"Silf", b"Glat",
    b"Gloc", b"Feat", b"Sill",
];

/// Encode sfnt data as WOFF2 without table transforms.
pub fn encode_untransformed(data: &[u8]) -> Result<Vec<u8>> {
    let font = FontRef::new(data).context("Failed to parse font")?;
    let records = font.table_directory.table_records();

    let mut directory = Vec::new();
    let mut stream = Vec::new();
    let mut sfnt_size = 12 + 16 * records.len();

    for record in records {
        let tag = record.tag();
        let bytes = font
            .table_data(tag)
            .with_context(|| format!("Failed to read {tag} table"))?
            .as_bytes();
        let tag_bytes = tag.to_be_bytes();

        // Null transform is version 3 for glyf/loca and 0 for everything else.
        let transform = if &tag_bytes == b"glyf" || &tag_bytes == b"loca" {
            NULL_TRANSFORM_GLYF << 6
        } else {
            0
        };
        match KNOWN_TAGS.iter().position(|known| **known == tag_bytes) {
            Some(index) => directory.push(transform | index as u8),
            None => {
                directory.push(transform | ARBITRARY_TAG);
                directory.extend_from_slice(&tag_bytes);
            }
        }
        write_base128(&mut directory, bytes.len() as u32);

        stream.extend_from_slice(bytes);
        sfnt_size += padded(bytes.len());
    }

    let mut params = BrotliEncoderParams::default();
    params.quality = 11;
    let mut compressed = Vec::new();
    BrotliCompress(&mut stream.as_slice(), &mut compressed, &params)
        .context("Brotli compression failed")?;

    let length = padded(HEADER_SIZE + directory.len() + compressed.len());

    let mut out = Vec::with_capacity(length);
    out.extend_from_slice(&WOFF2_SIGNATURE.to_be_bytes());
    out.extend_from_slice(&font.table_directory.sfnt_version().to_be_bytes());
    out.extend_from_slice(&(length as u32).to_be_bytes());
    out.extend_from_slice(&(records.len() as u16).to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes()); // reserved
    out.extend_from_slice(&(sfnt_size as u32).to_be_bytes());
    out.extend_from_slice(&(compressed.len() as u32).to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes()); // majorVersion
    out.extend_from_slice(&0u16.to_be_bytes()); // minorVersion
    // metaOffset, metaLength, metaOrigLength, privOffset, privLength
    out.extend_from_slice(&[0; 20]);
    out.extend_from_slice(&directory);
    out.extend_from_slice(&compressed);
    out.resize(length, 0);
    Ok(out)
}

fn padded(len: usize) -> usize {
    (len + 3) & !3
}

/// Append `value` as a WOFF2 UIntBase128.
fn write_base128(out: &mut Vec<u8>, value: u32) {
    let mut groups = [0u8; 5];
    let mut count = 0;
    let mut rest = value;
    loop {
        groups[count] = (rest & 0x7F) as u8;
        count += 1;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }
    for i in (0..count).rev() {
        let continuation = if i > 0 { 0x80 } else { 0 };
        out.push(groups[i] | continuation);
    }
}

#[cfg(test)]
mod tests {
    use brotli::BrotliDecompress;
    use read_fonts::types::Tag;

    use super::*;

    fn u32_at(data: &[u8], offset: usize) -> u32 {
        u32::from_be_bytes(data[offset..offset + 4].try_into().unwrap())
    }

    fn u16_at(data: &[u8], offset: usize) -> u16 {
        u16::from_be_bytes(data[offset..offset + 2].try_into().unwrap())
    }

    fn read_base128(data: &[u8], pos: &mut usize) -> u32 {
        let mut value = 0u32;
        loop {
            let byte = data[*pos];
            *pos += 1;
            value = (value << 7) | u32::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                return value;
            }
        }
    }

    /// Parse the table directory into (tag, transform, length) entries.
    fn parse_directory(woff2: &[u8]) -> (Vec<(Tag, u8, u32)>, usize) {
        let num_tables = u16_at(woff2, 12) as usize;
        let mut pos = HEADER_SIZE;
        let mut entries = Vec::new();
        for _ in 0..num_tables {
            let flags = woff2[pos];
            pos += 1;
            let tag = if flags & 0x3F == ARBITRARY_TAG {
                let tag = Tag::new(&woff2[pos..pos + 4].try_into().unwrap());
                pos += 4;
                tag
            } else {
                Tag::new(KNOWN_TAGS[(flags & 0x3F) as usize])
            };
            let length = read_base128(woff2, &mut pos);
            entries.push((tag, flags >> 6, length));
        }
        (entries, pos)
    }

    #[test]
    fn base128_encoding() {
        let mut out = Vec::new();
        write_base128(&mut out, 0);
        write_base128(&mut out, 127);
        write_base128(&mut out, 128);
        write_base128(&mut out, 63_000);
        assert_eq!(out, [0x00, 0x7F, 0x81, 0x00, 0x83, 0xEC, 0x18]);
    }

    #[test]
    fn known_tags_cover_cff() {
        assert_eq!(KNOWN_TAGS.iter().position(|t| *t == b"CFF "), Some(13));
        assert_eq!(KNOWN_TAGS.iter().position(|t| *t == b"Sill"), Some(62));
    }

    #[test]
    fn header_describes_cff_font() {
        let data = font_test_data::CANTARELL_VF_TRIMMED;
        let font = FontRef::new(data).unwrap();
        let woff2 = encode_untransformed(data).unwrap();

        assert_eq!(u32_at(&woff2, 0), WOFF2_SIGNATURE);
        assert_eq!(&woff2[4..8], b"OTTO");
        assert_eq!(u32_at(&woff2, 8) as usize, woff2.len());
        assert_eq!(woff2.len() % 4, 0);
        assert_eq!(u16_at(&woff2, 12) as usize, font.table_directory.table_records().len());
    }

    #[test]
    fn stream_decompresses_to_original_tables() {
        let data = font_test_data::CANTARELL_VF_TRIMMED;
        let font = FontRef::new(data).unwrap();
        let woff2 = encode_untransformed(data).unwrap();

        let (entries, stream_start) = parse_directory(&woff2);
        let compressed_len = u32_at(&woff2, 20) as usize;
        let mut compressed = &woff2[stream_start..stream_start + compressed_len];
        let mut stream = Vec::new();
        BrotliDecompress(&mut compressed, &mut stream).unwrap();

        let mut offset = 0;
        for (tag, transform, length) in entries {
            assert_eq!(transform, 0, "{tag} should be untransformed");
            let original = font.table_data(tag).unwrap();
            assert_eq!(&stream[offset..offset + length as usize], original.as_bytes());
            offset += length as usize;
        }
        assert_eq!(offset, stream.len());
    }

    #[test]
    fn glyf_and_loca_use_null_transform() {
        let woff2 = encode_untransformed(font_test_data::VAZIRMATN_VAR).unwrap();
        let (entries, _) = parse_directory(&woff2);

        for (tag, transform, _) in entries {
            let expected = if tag == Tag::new(b"glyf") || tag == Tag::new(b"loca") { 3 } else { 0 };
            assert_eq!(transform, expected, "{tag}");
        }
    }
}
