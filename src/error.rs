use enough::StopReason;
use std::io;

/// Errors from BMP header processing and scanline transcoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ResizeError {
    #[error("scale factor {0} is outside 0..=100")]
    InvalidScaleFactor(u32),

    #[error("unsupported BMP variant: {0}")]
    UnsupportedFormat(String),

    #[error("truncated BMP header: need {needed} bytes, got {read}")]
    TruncatedHeader { needed: usize, read: usize },

    #[error("truncated pixel data in source row {row}")]
    TruncatedPixelData { row: u32 },

    #[error("scaled dimensions overflow: {width}x{height} by {factor}")]
    DimensionOverflow { width: i32, height: i32, factor: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),

    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl ResizeError {
    /// Distinct nonzero process exit status for each error kind.
    ///
    /// Codes 1 through 4 follow the classic `resize` tool: usage error,
    /// unreadable input, unwritable output, unsupported format.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidScaleFactor(_) => 1,
            Self::Read(_) => 2,
            Self::Write(_) => 3,
            Self::UnsupportedFormat(_) => 4,
            Self::TruncatedHeader { .. } => 5,
            Self::TruncatedPixelData { .. } => 6,
            Self::DimensionOverflow { .. } => 7,
            Self::LimitExceeded(_) => 8,
            Self::Cancelled(_) => 9,
        }
    }
}

impl From<StopReason> for ResizeError {
    fn from(r: StopReason) -> Self {
        ResizeError::Cancelled(r)
    }
}
