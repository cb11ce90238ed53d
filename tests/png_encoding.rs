use cartoonizer::png::{encode_png, write_png, PNG_SIGNATURE};
use image::{Rgba, RgbaImage};

/// (tag, payload, stored crc) for every chunk after the signature.
fn chunks(png: &[u8]) -> Vec<([u8; 4], &[u8], u32)> {
    let mut out = Vec::new();
    let mut rest = &png[PNG_SIGNATURE.len()..];
    while !rest.is_empty() {
        let len = u32::from_be_bytes(rest[..4].try_into().unwrap()) as usize;
        let tag: [u8; 4] = rest[4..8].try_into().unwrap();
        let data = &rest[8..8 + len];
        let crc = u32::from_be_bytes(rest[8 + len..12 + len].try_into().unwrap());
        out.push((tag, data, crc));
        rest = &rest[12 + len..];
    }
    out
}

fn quad() -> RgbaImage {
    let mut img = RgbaImage::new(2, 2);
    img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    img.put_pixel(1, 0, Rgba([0, 255, 0, 128]));
    img.put_pixel(0, 1, Rgba([0, 0, 255, 0]));
    img.put_pixel(1, 1, Rgba([12, 34, 56, 78]));
    img
}

#[test]
fn standard_decoder_reads_back_pixels() {
    let img = quad();
    let decoded = image::load_from_memory_with_format(&encode_png(&img), image::ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 2));
    assert_eq!(decoded, img);
}

#[test]
fn three_chunks_in_order() {
    let png = encode_png(&quad());
    let tags: Vec<[u8; 4]> = chunks(&png).iter().map(|c| c.0).collect();
    assert_eq!(tags, vec![*b"IHDR", *b"IDAT", *b"IEND"]);
}

#[test]
fn every_chunk_crc_covers_tag_and_payload() {
    let img = RgbaImage::from_fn(17, 17, |x, y| Rgba([x as u8 * 15, y as u8 * 15, 99, 255]));
    let png = encode_png(&img);
    for (tag, data, crc) in chunks(&png) {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&tag);
        hasher.update(data);
        assert_eq!(hasher.finalize(), crc, "chunk {}", String::from_utf8_lossy(&tag));
    }
}

#[test]
fn ihdr_crc_matches_known_value() {
    let png = encode_png(&RgbaImage::new(1, 1));
    let (tag, data, crc) = chunks(&png)[0];
    assert_eq!(&tag, b"IHDR");
    assert_eq!(data, &[0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0]);
    assert_eq!(crc, 0x1F15_C489);
}

#[test]
fn write_png_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/out.png");
    write_png(&quad(), &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    assert_eq!(image::open(&path).unwrap().to_rgba8(), quad());
}
