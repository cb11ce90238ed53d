//! Minimal PNG writer: RGBA8, no filtering, no interlacing.

use crate::Result;
use image::RgbaImage;
use log::debug;
use std::fs;
use std::path::Path;

pub const PNG_SIGNATURE: [u8; 8] = *b"\x89PNG\r\n\x1a\n";

const BIT_DEPTH: u8 = 8;
const COLOR_TYPE_RGBA: u8 = 6;
const FILTER_NONE: u8 = 0;
const ZLIB_LEVEL: u8 = 6;

/// Encode `image` as signature + IHDR + single IDAT + IEND.
pub fn encode_png(image: &RgbaImage) -> Vec<u8> {
    let (width, height) = image.dimensions();

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    // compression, filter and interlace methods are all 0
    ihdr.extend_from_slice(&[BIT_DEPTH, COLOR_TYPE_RGBA, 0, 0, 0]);

    let idat = miniz_oxide::deflate::compress_to_vec_zlib(&scanlines(image), ZLIB_LEVEL);

    let mut png = Vec::with_capacity(PNG_SIGNATURE.len() + idat.len() + 3 * 12 + ihdr.len());
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr);
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);
    png
}

/// Encode and write to `path`, creating missing parent directories.
pub fn write_png(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let bytes = encode_png(image);
    fs::write(path, &bytes)?;
    debug!("Wrote {} ({}x{}, {} bytes)", path.display(), image.width(), image.height(), bytes.len());
    Ok(())
}

/// Raw image data: each row prefixed with filter type 0.
fn scanlines(image: &RgbaImage) -> Vec<u8> {
    let stride = image.width() as usize * 4;
    let mut raw = Vec::with_capacity((stride + 1) * image.height() as usize);
    if stride == 0 {
        raw.resize(image.height() as usize, FILTER_NONE);
        return raw;
    }
    for row in image.as_raw().chunks_exact(stride) {
        raw.push(FILTER_NONE);
        raw.extend_from_slice(row);
    }
    raw
}

/// length (BE u32) + tag + payload + CRC-32(tag ‖ payload)
fn write_chunk(out: &mut Vec<u8>, tag: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(data);

    let mut crc = crc32fast::Hasher::new();
    crc.update(tag);
    crc.update(data);
    out.extend_from_slice(&crc.finalize().to_be_bytes());
}
