#![allow(dead_code)]

/// Build a 24-bit BMP whose stored row `y`, column `x` holds `pattern(x, y)`
/// in on-disk B, G, R order. Row padding is zero.
pub fn bmp(width: i32, height: i32, pattern: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
    let w = width.unsigned_abs() as usize;
    let h = height.unsigned_abs() as usize;
    let pad = (4 - (w * 3) % 4) % 4;
    let image_size = (w * 3 + pad) * h;

    let mut out = Vec::with_capacity(54 + image_size);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((54 + image_size) as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&(image_size as u32).to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    for y in 0..h as u32 {
        for x in 0..w as u32 {
            out.extend_from_slice(&pattern(x, y));
        }
        out.extend(std::iter::repeat_n(0u8, pad));
    }
    out
}

pub fn checkerboard(x: u32, y: u32) -> [u8; 3] {
    if (x + y) % 2 == 0 {
        [200, 220, 240]
    } else {
        [10, 40, 70]
    }
}

/// Distinct color per coordinate (for images up to 256 wide/tall).
pub fn coords(x: u32, y: u32) -> [u8; 3] {
    [x as u8, y as u8, (x ^ y) as u8 | 0x80]
}

pub fn noise(width: i32, height: i32) -> Vec<u8> {
    let mut state: u32 = 0xDEAD_BEEF;
    let w = width.unsigned_abs();
    let table: Vec<[u8; 3]> = (0..w * height.unsigned_abs())
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            [state as u8, (state >> 8) as u8, (state >> 16) as u8]
        })
        .collect();
    bmp(width, height, |x, y| table[(y * w + x) as usize])
}

pub fn set_u16(data: &mut [u8], off: usize, v: u16) {
    data[off..off + 2].copy_from_slice(&v.to_le_bytes());
}

pub fn set_u32(data: &mut [u8], off: usize, v: u32) {
    data[off..off + 4].copy_from_slice(&v.to_le_bytes());
}

pub fn u32_at(data: &[u8], off: usize) -> u32 {
    u32::from_le_bytes(data[off..off + 4].try_into().unwrap())
}

pub fn i32_at(data: &[u8], off: usize) -> i32 {
    i32::from_le_bytes(data[off..off + 4].try_into().unwrap())
}

/// Decode with the `image` crate as an independent reader.
pub fn decode(data: &[u8]) -> image::RgbImage {
    image::load_from_memory_with_format(data, image::ImageFormat::Bmp)
        .expect("output must decode as BMP")
        .to_rgb8()
}
