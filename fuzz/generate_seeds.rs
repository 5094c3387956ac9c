#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs
//!
//! Each seed starts with the scale-factor byte consumed by `fuzz_resize`.

fn bmp(width: i32, height: i32) -> Vec<u8> {
    let w = width.unsigned_abs() as usize;
    let h = height.unsigned_abs() as usize;
    let pad = (4 - (w * 3) % 4) % 4;
    let image_size = (w * 3 + pad) * h;
    let mut bmp = vec![0u8; 54 + image_size];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&((54 + image_size) as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[34..38].copy_from_slice(&(image_size as u32).to_le_bytes());
    for (i, b) in bmp[54..].iter_mut().enumerate() {
        *b = (i * 37) as u8;
    }
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_resize";
    fs::create_dir_all(dir).unwrap();

    let seed = |name: &str, n: u8, body: &[u8]| {
        let mut data = vec![n];
        data.extend_from_slice(body);
        fs::write(format!("{dir}/{name}"), data).unwrap();
    };

    seed("bmp_1x1_x2.bin", 2, &bmp(1, 1));
    seed("bmp_4x2_x2.bin", 2, &bmp(4, 2));
    seed("bmp_3x3_topdown_x3.bin", 3, &bmp(3, -3));
    seed("bmp_5x2_x0.bin", 0, &bmp(5, 2));
    seed("bmp_2x2_x1.bin", 1, &bmp(2, 2));

    // Truncated/malformed seeds for edge coverage
    seed("empty.bin", 2, b"");
    seed("bm_short.bin", 2, b"BM\x00\x00");
    let full = bmp(4, 4);
    seed("pixels_cut.bin", 2, &full[..full.len() - 7]);
    let mut eight_bit = bmp(2, 2);
    eight_bit[28] = 8;
    seed("eight_bit.bin", 2, &eight_bit);

    println!("Generated seed corpus in {dir}/");
}
