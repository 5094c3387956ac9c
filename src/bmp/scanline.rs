//! Nearest-neighbor scanline replication.
//!
//! Each source row becomes `n` output rows, each source pixel `n` output
//! pixels. Two read strategies produce byte-identical output:
//! [`transcode_buffered`] reads every source row once, [`transcode_reseek`]
//! re-reads it from the stream for every vertical repetition.

use std::io::{self, Read, Seek, SeekFrom, Write};

use enough::Stop;
use log::trace;

use super::header::Geometry;
use crate::error::ResizeError;
use crate::pixel::Pixel;

/// Map a pixel-phase read error; running out of input is truncation.
fn pixel_read_error(err: io::Error, row: u32) -> ResizeError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        ResizeError::TruncatedPixelData { row }
    } else {
        ResizeError::Read(err)
    }
}

/// Consume the source row padding.
fn skip_padding<R: Read + ?Sized>(
    reader: &mut R,
    padding: usize,
    row: u32,
) -> Result<(), ResizeError> {
    let mut scratch = [0u8; 3];
    reader
        .read_exact(&mut scratch[..padding])
        .map_err(|e| pixel_read_error(e, row))
}

/// Read one source row (padding excluded) into `buf`.
///
/// `take` keeps a bogus header width from forcing a huge allocation before
/// the data is known to exist.
fn read_row<R: Read + ?Sized>(
    reader: &mut R,
    len: usize,
    row: u32,
    buf: &mut Vec<u8>,
) -> Result<(), ResizeError> {
    buf.clear();
    let read = (&mut *reader)
        .take(len as u64)
        .read_to_end(buf)
        .map_err(ResizeError::Read)?;
    if read < len {
        return Err(ResizeError::TruncatedPixelData { row });
    }
    Ok(())
}

/// Append `src` with every pixel repeated `n` times, then `padding` zeros.
pub(crate) fn replicate_row(src: &[u8], n: usize, padding: usize, out: &mut Vec<u8>) {
    for px in src.chunks_exact(Pixel::BYTES) {
        for _ in 0..n {
            out.extend_from_slice(px);
        }
    }
    out.extend(core::iter::repeat_n(0u8, padding));
}

/// Read each source row once and write the replicated row `n` times.
pub(crate) fn transcode_buffered<R, W>(
    reader: &mut R,
    writer: &mut W,
    geometry: &Geometry,
    stop: &dyn Stop,
) -> Result<(), ResizeError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let n = geometry.factor.get() as usize;
    if n == 0 {
        return Ok(());
    }

    let mut src_row = Vec::new();
    let mut out_row = Vec::new();
    for row in 0..geometry.src_rows {
        stop.check()?;
        trace!("source row {row}");

        read_row(reader, geometry.src_row_bytes, row, &mut src_row)?;
        skip_padding(reader, geometry.in_padding, row)?;

        out_row.clear();
        replicate_row(&src_row, n, geometry.out_padding, &mut out_row);
        debug_assert_eq!(out_row.len(), geometry.out_row_bytes);
        for _ in 0..n {
            writer.write_all(&out_row).map_err(ResizeError::Write)?;
        }
    }
    Ok(())
}

/// Re-read each source row from the stream for every vertical repetition,
/// seeking back before all but the last.
pub(crate) fn transcode_reseek<R, W>(
    reader: &mut R,
    writer: &mut W,
    geometry: &Geometry,
    stop: &dyn Stop,
) -> Result<(), ResizeError>
where
    R: Read + Seek + ?Sized,
    W: Write + ?Sized,
{
    let n = geometry.factor.get();
    if n == 0 {
        return Ok(());
    }

    let rewind = -i64::try_from(geometry.src_row_bytes).map_err(|_| {
        ResizeError::DimensionOverflow {
            width: geometry.src_width,
            height: geometry.src_height,
            factor: n,
        }
    })?;
    let mut src_row = Vec::new();
    let mut out_row = Vec::new();
    for row in 0..geometry.src_rows {
        stop.check()?;
        trace!("source row {row}");

        for rep in 0..n {
            read_row(reader, geometry.src_row_bytes, row, &mut src_row)?;
            out_row.clear();
            replicate_row(&src_row, n as usize, geometry.out_padding, &mut out_row);
            writer.write_all(&out_row).map_err(ResizeError::Write)?;

            if rep + 1 != n {
                reader
                    .seek(SeekFrom::Current(rewind))
                    .map_err(ResizeError::Read)?;
            }
        }
        skip_padding(reader, geometry.in_padding, row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use enough::Unstoppable;

    use super::*;
    use crate::bmp::header::{BmpHeaders, HEADERS_LEN};
    use crate::scale::ScaleFactor;

    /// Minimal BMP: headers followed by rows of `pattern(x, y)` pixels.
    fn bmp(width: i32, height: i32, pattern: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
        let w = width.unsigned_abs();
        let h = height.unsigned_abs();
        let pad = crate::bmp::header::row_padding(w);
        let image_size = (w as usize * 3 + pad) * h as usize;
        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&((HEADERS_LEN + image_size) as u32).to_le_bytes());
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(&54u32.to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&24u16.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&(image_size as u32).to_le_bytes());
        out.extend_from_slice(&[0u8; 16]);
        for y in 0..h {
            for x in 0..w {
                out.extend_from_slice(&pattern(x, y));
            }
            out.extend(core::iter::repeat_n(0xAAu8, pad));
        }
        out
    }

    fn geometry(data: &[u8], n: u32) -> Geometry {
        let mut headers = [0u8; HEADERS_LEN];
        headers.copy_from_slice(&data[..HEADERS_LEN]);
        let headers = BmpHeaders::from_bytes(&headers);
        Geometry::compute(&headers, ScaleFactor::new(n).unwrap()).unwrap()
    }

    fn run_buffered(data: &[u8], n: u32) -> Result<Vec<u8>, ResizeError> {
        let g = geometry(data, n);
        let mut reader = &data[HEADERS_LEN..];
        let mut out = Vec::new();
        transcode_buffered(&mut reader, &mut out, &g, &Unstoppable)?;
        Ok(out)
    }

    fn run_reseek(data: &[u8], n: u32) -> Result<Vec<u8>, ResizeError> {
        let g = geometry(data, n);
        let mut reader = Cursor::new(data);
        reader.set_position(HEADERS_LEN as u64);
        let mut out = Vec::new();
        transcode_reseek(&mut reader, &mut out, &g, &Unstoppable)?;
        Ok(out)
    }

    #[test]
    fn replicate_row_repeats_pixels_and_pads() {
        let mut out = Vec::new();
        replicate_row(&[1, 2, 3, 4, 5, 6], 2, 0, &mut out);
        assert_eq!(out, [1, 2, 3, 1, 2, 3, 4, 5, 6, 4, 5, 6]);

        out.clear();
        replicate_row(&[9, 8, 7], 3, 3, &mut out);
        assert_eq!(out, [9, 8, 7, 9, 8, 7, 9, 8, 7, 0, 0, 0]);
    }

    #[test]
    fn two_by_two_block_replication() {
        // width 4, row bytes 12, no padding
        let data = bmp(4, 2, |x, y| [x as u8, y as u8, 0x40]);
        let out = run_buffered(&data, 2).unwrap();
        assert_eq!(out.len(), 24 * 4);
        for (oy, row) in out.chunks_exact(24).enumerate() {
            for (ox, px) in row.chunks_exact(3).enumerate() {
                assert_eq!(px, [(ox / 2) as u8, (oy / 2) as u8, 0x40]);
            }
        }
    }

    #[test]
    fn input_padding_is_skipped_and_output_padding_is_zero() {
        // width 1: input pad 1 (filled with 0xAA), scaled width 3: output pad 3
        let data = bmp(1, 2, |_, y| [y as u8 + 1, 0, 0]);
        let out = run_buffered(&data, 3).unwrap();
        assert_eq!(out.len(), 12 * 6);
        for (oy, row) in out.chunks_exact(12).enumerate() {
            let v = (oy / 3) as u8 + 1;
            assert_eq!(&row[..9], &[v, 0, 0, v, 0, 0, v, 0, 0]);
            assert_eq!(&row[9..], &[0, 0, 0]);
        }
    }

    #[test]
    fn strategies_agree() {
        for width in 1..=6 {
            for n in [1, 2, 3, 5] {
                let data = bmp(width, -3, |x, y| [x as u8 * 17, y as u8 * 31, 0x5A]);
                assert_eq!(
                    run_buffered(&data, n).unwrap(),
                    run_reseek(&data, n).unwrap(),
                    "width {width} factor {n}"
                );
            }
        }
    }

    /// Records the length of every `write` call.
    struct WriteLog(Vec<usize>);

    impl Write for WriteLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.push(buf.len());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn reseek_writes_whole_rows() {
        // width 3 by 3: 27 pixel bytes + 1 padding per output row
        let data = bmp(3, 2, |x, y| [x as u8, y as u8, 9]);
        let g = geometry(&data, 3);
        let mut reader = Cursor::new(&data[..]);
        reader.set_position(HEADERS_LEN as u64);
        let mut log = WriteLog(Vec::new());
        transcode_reseek(&mut reader, &mut log, &g, &Unstoppable).unwrap();
        assert_eq!(log.0, vec![28; 6]);
    }

    #[test]
    fn zero_factor_reads_nothing() {
        let data = bmp(3, 3, |_, _| [1, 2, 3]);
        // Even a headers-only stream is fine: no pixel is read.
        assert!(run_buffered(&data[..HEADERS_LEN], 0).unwrap().is_empty());
        assert!(run_reseek(&data[..HEADERS_LEN], 0).unwrap().is_empty());
    }

    #[test]
    fn identity_passes_pixels_through() {
        // width 5: 15 pixel bytes + 1 padding byte per row
        let data = bmp(5, 4, |x, y| [x as u8, y as u8, (x * y) as u8]);
        let mut expected = data[HEADERS_LEN..].to_vec();
        for row in expected.chunks_exact_mut(16) {
            row[15] = 0;
        }
        assert_eq!(run_buffered(&data, 1).unwrap(), expected);
    }

    #[test]
    fn truncation_names_the_row() {
        let data = bmp(2, 3, |_, _| [7, 7, 7]);
        // Row stride 8; cut inside the third row.
        let cut = &data[..HEADERS_LEN + 8 * 2 + 4];
        for result in [run_buffered(cut, 2), run_reseek(cut, 2)] {
            match result {
                Err(ResizeError::TruncatedPixelData { row }) => assert_eq!(row, 2),
                other => panic!("expected TruncatedPixelData, got {other:?}"),
            }
        }
    }

    #[test]
    fn missing_final_padding_is_truncation() {
        let data = bmp(1, 1, |_, _| [1, 2, 3]);
        let cut = &data[..data.len() - 1];
        assert!(matches!(
            run_buffered(cut, 1),
            Err(ResizeError::TruncatedPixelData { row: 0 })
        ));
        assert!(matches!(
            run_reseek(cut, 2),
            Err(ResizeError::TruncatedPixelData { row: 0 })
        ));
    }
}
