/// Resource limits applied to the scaled output before anything is written.
///
/// Every check runs against the output dimensions and file size after
/// scaling, never the source's. All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum output file size in bytes, headers included.
    pub max_output_bytes: Option<u64>,
}

impl Limits {
    /// Check scaled output dimensions (magnitudes) against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), crate::ResizeError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(crate::ResizeError::LimitExceeded(format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(crate::ResizeError::LimitExceeded(format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(crate::ResizeError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that the output file size is within limits.
    pub(crate) fn check_output(&self, bytes: u64) -> Result<(), crate::ResizeError> {
        if let Some(max_bytes) = self.max_output_bytes {
            if bytes > max_bytes {
                return Err(crate::ResizeError::LimitExceeded(format!(
                    "output of {bytes} bytes exceeds limit {max_bytes}"
                )));
            }
        }
        Ok(())
    }
}
