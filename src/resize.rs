use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use enough::Stop;
use log::{debug, warn};

use crate::bmp;
use crate::error::ResizeError;
use crate::limits::Limits;
use crate::scale::ScaleFactor;

/// Dimensions and size of a finished output BMP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeOutput {
    pub width: i32,
    /// Signed like the source height; negative for top-down images.
    pub height: i32,
    /// Total bytes written, headers included.
    pub file_size: u32,
}

/// Builder for a BMP scaling operation.
///
/// ```no_run
/// use bmpscale::{Limits, ResizeRequest, ScaleFactor, Unstoppable};
///
/// let input: &[u8] = &[]; // 24-bit BMP bytes
/// let mut output = Vec::new();
/// let resized = ResizeRequest::new(ScaleFactor::new(4)?)
///     .with_limits(Limits {
///         max_pixels: Some(64_000_000),
///         ..Limits::default()
///     })
///     .resize(input, &mut output, Unstoppable)?;
/// assert_eq!(resized.file_size as usize, output.len());
/// # Ok::<(), bmpscale::ResizeError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ResizeRequest {
    factor: ScaleFactor,
    limits: Option<Limits>,
}

impl ResizeRequest {
    pub fn new(factor: ScaleFactor) -> Self {
        Self {
            factor,
            limits: None,
        }
    }

    /// Reject outputs exceeding `limits` before writing anything.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn factor(&self) -> ScaleFactor {
        self.factor
    }

    /// Scale `input` into `output`, reading each source row once.
    ///
    /// The output stream receives nothing unless the headers validate.
    pub fn resize<R: Read, W: Write>(
        &self,
        mut input: R,
        mut output: W,
        stop: impl Stop,
    ) -> Result<ResizeOutput, ResizeError> {
        let (headers, geometry) = bmp::plan(&mut input, self.factor, self.limits.as_ref())?;
        stop.check()?;
        bmp::emit(&headers, &geometry, &mut input, &mut output, &stop)?;
        output.flush().map_err(ResizeError::Write)?;
        Ok(output_summary(&geometry))
    }

    /// Like [`resize`](Self::resize), but re-reads each source row from the
    /// stream by seeking back instead of buffering it.
    ///
    /// Output is byte-identical to [`resize`](Self::resize).
    pub fn resize_reseek<R: Read + Seek, W: Write>(
        &self,
        mut input: R,
        mut output: W,
        stop: impl Stop,
    ) -> Result<ResizeOutput, ResizeError> {
        let (headers, geometry) = bmp::plan(&mut input, self.factor, self.limits.as_ref())?;
        stop.check()?;
        bmp::emit_reseek(&headers, &geometry, &mut input, &mut output, &stop)?;
        output.flush().map_err(ResizeError::Write)?;
        Ok(output_summary(&geometry))
    }

    /// Scale an in-memory BMP.
    pub fn resize_bytes(&self, data: &[u8], stop: impl Stop) -> Result<Vec<u8>, ResizeError> {
        let mut out = Vec::new();
        self.resize(data, &mut out, stop)?;
        Ok(out)
    }

    /// Scale the BMP at `input` into a new file at `output`.
    ///
    /// The output file is only created once the input headers validate. If
    /// writing pixel data fails, the partial output file is removed before
    /// the error is returned.
    pub fn resize_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        stop: impl Stop,
    ) -> Result<ResizeOutput, ResizeError> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let mut reader = BufReader::new(File::open(input).map_err(ResizeError::Read)?);
        let (headers, geometry) = bmp::plan(&mut reader, self.factor, self.limits.as_ref())?;
        stop.check()?;

        let mut writer = BufWriter::new(File::create(output).map_err(ResizeError::Write)?);
        let written = bmp::emit(&headers, &geometry, &mut reader, &mut writer, &stop)
            .and_then(|()| writer.flush().map_err(ResizeError::Write));
        drop(writer);

        if let Err(err) = written {
            match fs::remove_file(output) {
                Ok(()) => warn!("removed partial output {}: {err}", output.display()),
                Err(rm) => warn!(
                    "failed to remove partial output {}: {rm}",
                    output.display()
                ),
            }
            return Err(err);
        }
        debug!("wrote {} ({} bytes)", output.display(), geometry.out_file_size);
        Ok(output_summary(&geometry))
    }
}

fn output_summary(geometry: &bmp::header::Geometry) -> ResizeOutput {
    ResizeOutput {
        width: geometry.out_width,
        height: geometry.out_height,
        file_size: geometry.out_file_size,
    }
}
