//! Apple icon container (`.icns`) built from pre-encoded PNG payloads.
//!
//! Layout: `"icns"` + BE u32 total length, then per entry the 4-byte type
//! code + BE u32 (payload length + 8) + payload.

use crate::{CartoonizerError, Result};
use log::{debug, info};
use std::fs;
use std::path::Path;

pub const ICNS_MAGIC: [u8; 4] = *b"icns";
const HEADER_LEN: usize = 8;

/// One (pixel size, scale) slot of the iconset and its container type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSlot {
    pub code: [u8; 4],
    pub size: u32,
    pub scale: u32,
}

impl IconSlot {
    const fn new(code: &[u8; 4], size: u32, scale: u32) -> Self {
        Self { code: *code, size, scale }
    }

    /// Actual raster side in pixels.
    pub fn pixels(&self) -> u32 {
        self.size * self.scale
    }

    /// `icon_<size>x<size>[@2x].png`
    pub fn file_name(&self) -> String {
        let suffix = if self.scale > 1 { format!("@{}x", self.scale) } else { String::new() };
        format!("icon_{0}x{0}{1}.png", self.size, suffix)
    }
}

/// Entries in container order, highest density first.
pub const ICON_SLOTS: [IconSlot; 10] = [
    IconSlot::new(b"ic10", 512, 2),
    IconSlot::new(b"ic09", 512, 1),
    IconSlot::new(b"ic14", 256, 2),
    IconSlot::new(b"ic08", 256, 1),
    IconSlot::new(b"ic13", 128, 2),
    IconSlot::new(b"ic07", 128, 1),
    IconSlot::new(b"ic12", 32, 2),
    IconSlot::new(b"ic11", 16, 2),
    IconSlot::new(b"ic05", 32, 1),
    IconSlot::new(b"ic04", 16, 1),
];

/// Serialize entries in the given order.
pub fn encode_icns(entries: &[([u8; 4], Vec<u8>)]) -> Result<Vec<u8>> {
    let total = entries
        .iter()
        .try_fold(HEADER_LEN, |acc, (_, data)| acc.checked_add(data.len() + HEADER_LEN))
        .filter(|&total| total <= u32::MAX as usize)
        .ok_or_else(|| CartoonizerError::Icns("container exceeds 4 GiB".into()))?;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&ICNS_MAGIC);
    out.extend_from_slice(&(total as u32).to_be_bytes());
    for (code, data) in entries {
        out.extend_from_slice(code);
        out.extend_from_slice(&((data.len() + HEADER_LEN) as u32).to_be_bytes());
        out.extend_from_slice(data);
    }
    Ok(out)
}

/// Split a container back into `(type code, payload)` pairs.
pub fn parse_icns(bytes: &[u8]) -> Result<Vec<([u8; 4], &[u8])>> {
    if bytes.len() < HEADER_LEN || bytes[..4] != ICNS_MAGIC {
        return Err(CartoonizerError::Icns("missing icns signature".into()));
    }
    let total = read_u32(&bytes[4..8]) as usize;
    if total != bytes.len() {
        return Err(CartoonizerError::Icns(format!(
            "declared length {} but file has {} bytes",
            total,
            bytes.len()
        )));
    }

    let mut entries = Vec::new();
    let mut rest = &bytes[HEADER_LEN..];
    while !rest.is_empty() {
        if rest.len() < HEADER_LEN {
            return Err(CartoonizerError::Icns("truncated entry header".into()));
        }
        let code: [u8; 4] = [rest[0], rest[1], rest[2], rest[3]];
        let len = read_u32(&rest[4..8]) as usize;
        if len < HEADER_LEN || len > rest.len() {
            return Err(CartoonizerError::Icns(format!(
                "entry {} has bad length {}",
                String::from_utf8_lossy(&code),
                len
            )));
        }
        entries.push((code, &rest[HEADER_LEN..len]));
        rest = &rest[len..];
    }
    Ok(entries)
}

/// Read every slot's PNG from `iconset_dir` and write the container to `out`.
pub fn write_icns(iconset_dir: impl AsRef<Path>, out: impl AsRef<Path>) -> Result<()> {
    let iconset_dir = iconset_dir.as_ref();
    let mut entries = Vec::with_capacity(ICON_SLOTS.len());
    for slot in &ICON_SLOTS {
        let path = iconset_dir.join(slot.file_name());
        let data = fs::read(&path).map_err(|source| CartoonizerError::MissingAsset { path, source })?;
        debug!("{} <- {} bytes", String::from_utf8_lossy(&slot.code), data.len());
        entries.push((slot.code, data));
    }

    let bytes = encode_icns(&entries)?;
    fs::write(out.as_ref(), &bytes)?;
    info!("Wrote {} ({} bytes)", out.as_ref().display(), bytes.len());
    Ok(())
}

fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_entries() -> Vec<([u8; 4], Vec<u8>)> {
        ICON_SLOTS
            .iter()
            .enumerate()
            .map(|(i, slot)| (slot.code, vec![i as u8; i * 3 + 1]))
            .collect()
    }

    #[test]
    fn slot_table_covers_every_size_and_scale() {
        let mut pairs: Vec<(u32, u32)> = ICON_SLOTS.iter().map(|s| (s.size, s.scale)).collect();
        pairs.sort();
        let mut expected = Vec::new();
        for size in [16, 32, 128, 256, 512] {
            expected.push((size, 1));
            expected.push((size, 2));
        }
        expected.sort();
        assert_eq!(pairs, expected);
        assert_eq!(ICON_SLOTS[0].code, *b"ic10");
        assert_eq!(ICON_SLOTS[9].code, *b"ic04");
    }

    #[test]
    fn file_names() {
        assert_eq!(ICON_SLOTS[0].file_name(), "icon_512x512@2x.png");
        assert_eq!(ICON_SLOTS[9].file_name(), "icon_16x16.png");
        assert_eq!(ICON_SLOTS[0].pixels(), 1024);
    }

    #[test]
    fn declared_lengths_match_payloads() {
        let entries = synthetic_entries();
        let bytes = encode_icns(&entries).unwrap();
        assert_eq!(&bytes[..4], b"icns");

        let expected_total = 8 + entries.iter().map(|(_, d)| d.len() + 8).sum::<usize>();
        assert_eq!(read_u32(&bytes[4..8]) as usize, expected_total);
        assert_eq!(bytes.len(), expected_total);

        let mut offset = 8;
        for (code, data) in &entries {
            assert_eq!(&bytes[offset..offset + 4], code);
            assert_eq!(read_u32(&bytes[offset + 4..offset + 8]) as usize, data.len() + 8);
            assert_eq!(&bytes[offset + 8..offset + 8 + data.len()], data.as_slice());
            offset += data.len() + 8;
        }
    }

    #[test]
    fn parse_recovers_entries_in_order() {
        let entries = synthetic_entries();
        let bytes = encode_icns(&entries).unwrap();
        let parsed = parse_icns(&bytes).unwrap();
        assert_eq!(parsed.len(), entries.len());
        for ((code, data), (pcode, pdata)) in entries.iter().zip(&parsed) {
            assert_eq!(code, pcode);
            assert_eq!(data.as_slice(), *pdata);
        }
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(parse_icns(b"icn").is_err());
        assert!(parse_icns(b"abcd\0\0\0\x08").is_err());
        // Length field disagrees with file size.
        assert!(parse_icns(b"icns\0\0\0\x09").is_err());
        // Entry length smaller than its own header.
        assert!(parse_icns(b"icns\0\0\0\x10ic04\0\0\0\x02").is_err());
    }

    #[test]
    fn missing_png_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_icns(dir.path(), dir.path().join("out.icns")).unwrap_err();
        match err {
            CartoonizerError::MissingAsset { path, .. } => {
                assert!(path.ends_with("icon_512x512@2x.png"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
