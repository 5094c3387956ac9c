//! 24-bit uncompressed BMP header processing and scanline transcoding (internal).
//!
//! Use the top-level [`crate::resize`], [`crate::probe`], etc.

pub(crate) mod header;
mod scanline;

use std::io::{Read, Seek, Write};

use enough::Stop;
use log::debug;

use crate::error::ResizeError;
use crate::limits::Limits;
use crate::scale::ScaleFactor;
use header::{BmpHeaders, BmpInfo, Geometry};

/// Read and validate the source headers, then derive the output geometry.
///
/// Nothing is written; every header-phase failure happens here.
pub(crate) fn plan<R: Read + ?Sized>(
    reader: &mut R,
    factor: ScaleFactor,
    limits: Option<&Limits>,
) -> Result<(BmpHeaders, Geometry), ResizeError> {
    let headers = BmpHeaders::read_from(reader)?;
    headers.validate()?;
    debug!(
        "source BMP {}x{} ({} bytes of pixel data)",
        headers.info.width, headers.info.height, headers.info.image_size
    );

    let geometry = Geometry::compute(&headers, factor)?;
    if let Some(limits) = limits {
        geometry.check_limits(limits)?;
    }
    debug!(
        "scaled by {}: {}x{}, padding {} -> {}, {} bytes total",
        factor.get(),
        geometry.out_width,
        geometry.out_height,
        geometry.in_padding,
        geometry.out_padding,
        geometry.out_file_size
    );
    Ok((headers, geometry))
}

/// Write the scaled headers, then the buffered scanlines.
pub(crate) fn emit<R, W>(
    headers: &BmpHeaders,
    geometry: &Geometry,
    reader: &mut R,
    writer: &mut W,
    stop: &dyn Stop,
) -> Result<(), ResizeError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    headers.scaled(geometry).write_to(writer)?;
    scanline::transcode_buffered(reader, writer, geometry, stop)
}

/// Write the scaled headers, then the scanlines via per-row re-seeking.
pub(crate) fn emit_reseek<R, W>(
    headers: &BmpHeaders,
    geometry: &Geometry,
    reader: &mut R,
    writer: &mut W,
    stop: &dyn Stop,
) -> Result<(), ResizeError>
where
    R: Read + Seek + ?Sized,
    W: Write + ?Sized,
{
    headers.scaled(geometry).write_to(writer)?;
    scanline::transcode_reseek(reader, writer, geometry, stop)
}

/// Validate headers and summarize them without touching pixel data.
pub(crate) fn probe<R: Read + ?Sized>(reader: &mut R) -> Result<BmpInfo, ResizeError> {
    let headers = BmpHeaders::read_from(reader)?;
    headers.validate()?;
    Ok(headers.summary())
}
