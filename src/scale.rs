use crate::error::ResizeError;

/// Integer scale factor in `0..=100`.
///
/// Factor 0 produces a valid, empty (0x0) BMP; factor 1 copies pixel data
/// unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScaleFactor(u8);

impl ScaleFactor {
    pub const MAX: u32 = 100;

    /// Identity scale.
    pub const ONE: ScaleFactor = ScaleFactor(1);

    /// Returns [`ResizeError::InvalidScaleFactor`] if `n > 100`.
    pub fn new(n: u32) -> Result<Self, ResizeError> {
        if n > Self::MAX {
            return Err(ResizeError::InvalidScaleFactor(n));
        }
        Ok(Self(n as u8))
    }

    pub fn get(self) -> u32 {
        u32::from(self.0)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u32> for ScaleFactor {
    type Error = ResizeError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}
