//! # bmpscale
//!
//! Streaming nearest-neighbor integer upscaler for uncompressed 24-bit BMP
//! images.
//!
//! Every source pixel becomes an `n`x`n` block in the output, for a
//! [`ScaleFactor`] `n` in `0..=100`. Headers are validated and rewritten
//! before any pixel byte moves; pixel data then streams through one row at a
//! time, so memory use is bounded by a single output row regardless of image
//! height.
//!
//! ## Supported Input
//!
//! - `BM` signature, 54-byte pixel data offset
//! - 40-byte BITMAPINFOHEADER
//! - 24 bits per pixel, compression 0 (BI_RGB)
//! - Bottom-up (positive height) or top-down (negative height) row order;
//!   the sign carries through to the output
//!
//! Anything else is rejected with [`ResizeError::UnsupportedFormat`].
//!
//! ## Non-Goals
//!
//! - Compressed, palette-based, or non-24-bit BMPs
//! - Interpolating (non-integer or smoothing) resamplers
//! - Other image formats
//!
//! ## Usage
//!
//! ```no_run
//! use bmpscale::{ScaleFactor, Unstoppable};
//!
//! let data: &[u8] = &[]; // your 24-bit BMP bytes
//!
//! // Probe without touching pixel data
//! let info = bmpscale::probe(data)?;
//! println!("{}x{}", info.width, info.height);
//!
//! // Scale 3x in memory
//! let scaled = bmpscale::resize_bytes(data, ScaleFactor::new(3)?, Unstoppable)?;
//! assert_eq!(bmpscale::probe(&scaled[..])?.width, info.width * 3);
//!
//! // Or file to file; a failed run leaves no partial output behind
//! bmpscale::resize_file(ScaleFactor::new(2)?, "in.bmp", "out.bmp", Unstoppable)?;
//! # Ok::<(), bmpscale::ResizeError>(())
//! ```
//!
//! Log records go through the [`log`] facade; the crate never installs a
//! logger.

#![forbid(unsafe_code)]

mod bmp;
mod error;
mod limits;
mod pixel;
mod resize;
mod scale;

use std::io::{Read, Write};
use std::path::Path;

// Re-exports
pub use bmp::header::BmpInfo;
pub use enough::{Stop, Unstoppable};
pub use error::ResizeError;
pub use limits::Limits;
pub use pixel::Pixel;
pub use resize::{ResizeOutput, ResizeRequest};
pub use scale::ScaleFactor;

/// Scale a BMP stream by `factor`. See [`ResizeRequest::resize`].
pub fn resize<R: Read, W: Write>(
    factor: ScaleFactor,
    input: R,
    output: W,
    stop: impl Stop,
) -> Result<ResizeOutput, ResizeError> {
    ResizeRequest::new(factor).resize(input, output, stop)
}

/// Scale an in-memory BMP by `factor`.
pub fn resize_bytes(
    data: &[u8],
    factor: ScaleFactor,
    stop: impl Stop,
) -> Result<Vec<u8>, ResizeError> {
    ResizeRequest::new(factor).resize_bytes(data, stop)
}

/// Scale the BMP file at `input` into `output`. See [`ResizeRequest::resize_file`].
pub fn resize_file(
    factor: ScaleFactor,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    stop: impl Stop,
) -> Result<ResizeOutput, ResizeError> {
    ResizeRequest::new(factor).resize_file(input, output, stop)
}

/// Read and validate the 54 header bytes of a 24-bit BMP.
pub fn probe<R: Read>(mut input: R) -> Result<BmpInfo, ResizeError> {
    bmp::probe(&mut input)
}
