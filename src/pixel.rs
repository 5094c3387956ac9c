/// One 24-bit BMP pixel, kept in on-disk blue, green, red order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl Pixel {
    /// Bytes per pixel on disk.
    pub const BYTES: usize = 3;

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { blue, green, red }
    }

    /// Build from the on-disk byte order (B, G, R).
    pub const fn from_bgr(bytes: [u8; 3]) -> Self {
        Self {
            blue: bytes[0],
            green: bytes[1],
            red: bytes[2],
        }
    }

    /// Bytes in on-disk order (B, G, R).
    pub const fn to_bgr(self) -> [u8; 3] {
        [self.blue, self.green, self.red]
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::RGB8 {
    fn from(p: Pixel) -> Self {
        rgb::RGB8::new(p.red, p.green, p.blue)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for Pixel {
    fn from(p: rgb::RGB8) -> Self {
        Pixel::new(p.r, p.g, p.b)
    }
}
