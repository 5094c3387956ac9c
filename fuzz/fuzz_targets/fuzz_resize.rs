#![no_main]
use libfuzzer_sys::fuzz_target;
use bmpscale::*;

fuzz_target!(|data: &[u8]| {
    // First byte picks the factor; small factors keep outputs bounded.
    let Some((&n, bmp)) = data.split_first() else {
        return;
    };
    let Ok(factor) = ScaleFactor::new(u32::from(n % 8)) else {
        return;
    };
    let request = ResizeRequest::new(factor).with_limits(Limits {
        max_height: Some(1 << 12),
        max_output_bytes: Some(1 << 24),
        ..Limits::default()
    });

    // Must never panic
    let Ok(out) = request.resize_bytes(bmp, enough::Unstoppable) else {
        return;
    };

    // Any success is a well-formed BMP whose size fields match its length
    let info = probe(&out[..]).expect("output headers must validate");
    assert_eq!(info.file_size as usize, out.len());
    assert_eq!(info.image_size as usize + 54, out.len());

    // Both read strategies agree
    let mut reseek = Vec::new();
    request
        .resize_reseek(std::io::Cursor::new(bmp), &mut reseek, enough::Unstoppable)
        .expect("reseek must succeed where buffered did");
    assert_eq!(out, reseek);
});
