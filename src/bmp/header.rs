//! BMP file and info headers (BITMAPFILEHEADER + BITMAPINFOHEADER).
//!
//! Both records are decoded and encoded field by field in little-endian
//! order; the in-memory struct layout never has to match the disk layout.

use std::io::{self, Read, Write};

use crate::error::ResizeError;
use crate::limits::Limits;
use crate::scale::ScaleFactor;

/// "BM" read as a little-endian u16.
pub(crate) const BMP_SIGNATURE: u16 = 0x4D42;
pub(crate) const FILE_HEADER_LEN: usize = 14;
pub(crate) const INFO_HEADER_LEN: u32 = 40;
/// Both headers; also the only pixel offset this subset accepts.
pub(crate) const HEADERS_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN as usize;

const BYTES_PER_PIXEL: u64 = 3;

// ── Little-endian field access ──────────────────────────────────────

fn u16_at(b: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([b[off], b[off + 1]])
}

fn u32_at(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

fn i32_at(b: &[u8], off: usize) -> i32 {
    i32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

fn put(out: &mut [u8], off: usize, bytes: &[u8]) {
    out[off..off + bytes.len()].copy_from_slice(bytes);
}

// ── Records ─────────────────────────────────────────────────────────

/// BITMAPFILEHEADER (14 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FileHeader {
    pub signature: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub pixel_offset: u32,
}

impl FileHeader {
    fn from_bytes(b: &[u8; FILE_HEADER_LEN]) -> Self {
        Self {
            signature: u16_at(b, 0),
            file_size: u32_at(b, 2),
            reserved1: u16_at(b, 6),
            reserved2: u16_at(b, 8),
            pixel_offset: u32_at(b, 10),
        }
    }

    fn write_bytes(&self, out: &mut [u8; FILE_HEADER_LEN]) {
        put(out, 0, &self.signature.to_le_bytes());
        put(out, 2, &self.file_size.to_le_bytes());
        put(out, 6, &self.reserved1.to_le_bytes());
        put(out, 8, &self.reserved2.to_le_bytes());
        put(out, 10, &self.pixel_offset.to_le_bytes());
    }
}

/// BITMAPINFOHEADER (40 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Negative means rows are stored top-down.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl InfoHeader {
    fn from_bytes(b: &[u8; INFO_HEADER_LEN as usize]) -> Self {
        Self {
            header_size: u32_at(b, 0),
            width: i32_at(b, 4),
            height: i32_at(b, 8),
            planes: u16_at(b, 12),
            bit_count: u16_at(b, 14),
            compression: u32_at(b, 16),
            image_size: u32_at(b, 20),
            x_pixels_per_meter: i32_at(b, 24),
            y_pixels_per_meter: i32_at(b, 28),
            colors_used: u32_at(b, 32),
            colors_important: u32_at(b, 36),
        }
    }

    fn write_bytes(&self, out: &mut [u8; INFO_HEADER_LEN as usize]) {
        put(out, 0, &self.header_size.to_le_bytes());
        put(out, 4, &self.width.to_le_bytes());
        put(out, 8, &self.height.to_le_bytes());
        put(out, 12, &self.planes.to_le_bytes());
        put(out, 14, &self.bit_count.to_le_bytes());
        put(out, 16, &self.compression.to_le_bytes());
        put(out, 20, &self.image_size.to_le_bytes());
        put(out, 24, &self.x_pixels_per_meter.to_le_bytes());
        put(out, 28, &self.y_pixels_per_meter.to_le_bytes());
        put(out, 32, &self.colors_used.to_le_bytes());
        put(out, 36, &self.colors_important.to_le_bytes());
    }
}

/// The two headers as read from (or about to be written to) a stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BmpHeaders {
    pub file: FileHeader,
    pub info: InfoHeader,
}

impl BmpHeaders {
    pub(crate) fn from_bytes(b: &[u8; HEADERS_LEN]) -> Self {
        let mut file = [0u8; FILE_HEADER_LEN];
        let mut info = [0u8; INFO_HEADER_LEN as usize];
        file.copy_from_slice(&b[..FILE_HEADER_LEN]);
        info.copy_from_slice(&b[FILE_HEADER_LEN..]);
        Self {
            file: FileHeader::from_bytes(&file),
            info: InfoHeader::from_bytes(&info),
        }
    }

    pub(crate) fn to_bytes(&self) -> [u8; HEADERS_LEN] {
        let mut file = [0u8; FILE_HEADER_LEN];
        let mut info = [0u8; INFO_HEADER_LEN as usize];
        self.file.write_bytes(&mut file);
        self.info.write_bytes(&mut info);
        let mut out = [0u8; HEADERS_LEN];
        put(&mut out, 0, &file);
        put(&mut out, FILE_HEADER_LEN, &info);
        out
    }

    /// Read the file header then the info header, back to back.
    pub(crate) fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<Self, ResizeError> {
        let mut buf = [0u8; HEADERS_LEN];
        let read = read_full(reader, &mut buf).map_err(ResizeError::Read)?;
        if read < HEADERS_LEN {
            return Err(ResizeError::TruncatedHeader {
                needed: HEADERS_LEN,
                read,
            });
        }
        Ok(Self::from_bytes(&buf))
    }

    pub(crate) fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), ResizeError> {
        writer
            .write_all(&self.to_bytes())
            .map_err(ResizeError::Write)
    }

    /// Accept only uncompressed 24-bit BMPs with a plain 40-byte info header.
    pub(crate) fn validate(&self) -> Result<(), ResizeError> {
        let unsupported =
            |msg: String| -> Result<(), ResizeError> { Err(ResizeError::UnsupportedFormat(msg)) };
        if self.file.signature != BMP_SIGNATURE {
            return unsupported(format!(
                "signature {:#06x} (expected \"BM\")",
                self.file.signature
            ));
        }
        if self.file.pixel_offset != HEADERS_LEN as u32 {
            return unsupported(format!(
                "pixel data offset {} (expected {HEADERS_LEN})",
                self.file.pixel_offset
            ));
        }
        if self.info.header_size != INFO_HEADER_LEN {
            return unsupported(format!(
                "info header size {} (expected {INFO_HEADER_LEN})",
                self.info.header_size
            ));
        }
        if self.info.bit_count != 24 {
            return unsupported(format!(
                "bit depth {} (expected 24)",
                self.info.bit_count
            ));
        }
        if self.info.compression != 0 {
            return unsupported(format!(
                "compression {} (expected 0)",
                self.info.compression
            ));
        }
        Ok(())
    }

    /// Headers describing the scaled image. Untouched fields are copied as-is.
    pub(crate) fn scaled(&self, geometry: &Geometry) -> Self {
        let mut out = *self;
        out.file.file_size = geometry.out_file_size;
        out.file.pixel_offset = HEADERS_LEN as u32;
        out.info.width = geometry.out_width;
        out.info.height = geometry.out_height;
        out.info.image_size = geometry.out_image_size;
        out
    }

    pub(crate) fn summary(&self) -> BmpInfo {
        BmpInfo {
            width: self.info.width,
            height: self.info.height,
            top_down: self.info.height < 0,
            file_size: self.file.file_size,
            image_size: self.info.image_size,
        }
    }
}

/// Fill `buf` as far as the stream allows; returns the byte count read.
fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

// ── Public header summary ───────────────────────────────────────────

/// Header summary of a validated 24-bit BMP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfo {
    pub width: i32,
    /// Signed as stored; negative for top-down images.
    pub height: i32,
    pub top_down: bool,
    /// File size as recorded in the header.
    pub file_size: u32,
    /// Pixel data size as recorded in the header.
    pub image_size: u32,
}

// ── Derived geometry ────────────────────────────────────────────────

/// Zero bytes needed to pad a row of `width` pixels to a 4-byte boundary.
pub(crate) fn row_padding(width: u32) -> usize {
    let row = u64::from(width) * BYTES_PER_PIXEL;
    ((4 - row % 4) % 4) as usize
}

/// Everything the scanline transcoder needs, derived once from the headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Geometry {
    pub factor: ScaleFactor,
    pub src_width: i32,
    pub src_height: i32,
    /// |src_height|: number of stored source rows.
    pub src_rows: u32,
    /// |src_width| * 3, padding excluded.
    pub src_row_bytes: usize,
    pub in_padding: usize,
    pub out_width: i32,
    pub out_height: i32,
    /// |out_width| * 3 + out_padding.
    pub out_row_bytes: usize,
    pub out_padding: usize,
    pub out_image_size: u32,
    pub out_file_size: u32,
}

impl Geometry {
    /// Scale the source dimensions by `factor`, checking every field fits
    /// its on-disk type.
    pub(crate) fn compute(headers: &BmpHeaders, factor: ScaleFactor) -> Result<Self, ResizeError> {
        let src_width = headers.info.width;
        let src_height = headers.info.height;
        let overflow = || ResizeError::DimensionOverflow {
            width: src_width,
            height: src_height,
            factor: factor.get(),
        };
        let n = i64::from(factor.get());

        // Signed multiply keeps a top-down height negative.
        let out_width = i32::try_from(i64::from(src_width) * n).map_err(|_| overflow())?;
        let out_height = i32::try_from(i64::from(src_height) * n).map_err(|_| overflow())?;

        let out_w = out_width.unsigned_abs();
        let out_h = u64::from(out_height.unsigned_abs());
        let out_padding = row_padding(out_w);
        let out_row = u64::from(out_w) * BYTES_PER_PIXEL + out_padding as u64;
        let image_size = out_row.checked_mul(out_h).ok_or_else(overflow)?;
        let out_image_size = u32::try_from(image_size).map_err(|_| overflow())?;
        let out_file_size = out_image_size
            .checked_add(HEADERS_LEN as u32)
            .ok_or_else(overflow)?;

        let src_w = src_width.unsigned_abs();
        let src_row_bytes = usize::try_from(u64::from(src_w) * BYTES_PER_PIXEL)
            .map_err(|_| overflow())?;
        let out_row_bytes = usize::try_from(out_row).map_err(|_| overflow())?;

        Ok(Self {
            factor,
            src_width,
            src_height,
            src_rows: src_height.unsigned_abs(),
            src_row_bytes,
            in_padding: row_padding(src_w),
            out_width,
            out_height,
            out_row_bytes,
            out_padding,
            out_image_size,
            out_file_size,
        })
    }

    pub(crate) fn check_limits(&self, limits: &Limits) -> Result<(), ResizeError> {
        limits.check(self.out_width.unsigned_abs(), self.out_height.unsigned_abs())?;
        limits.check_output(u64::from(self.out_file_size))
    }
}
