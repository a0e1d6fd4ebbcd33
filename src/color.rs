use anyhow::anyhow;
use std::fmt::{Display, Formatter, UpperHex};

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

/// Color data represented as red, green, blue and alpha channels each having a depth of 8 bits
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Hash)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    /// Construct a fully opaque color from its red, green and blue channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b, 0xFF)
    }

    /// The fully transparent color which the pipeline writes for cleared background cells
    pub const TRANSPARENT: Self = Self(0, 0, 0, 0);

    /// The alpha channel of this color
    pub const fn alpha(&self) -> u8 {
        self.3
    }

    /// Whether this color is fully transparent
    pub const fn is_transparent(&self) -> bool {
        self.3 == 0
    }
}

impl From<[u8; 4]> for Color {
    fn from(data: [u8; 4]) -> Self {
        Self(data[0], data[1], data[2], data[3])
    }
}

impl From<Color> for [u8; 4] {
    fn from(value: Color) -> Self {
        [value.0, value.1, value.2, value.3]
    }
}

impl From<u32> for Color {
    fn from(src: u32) -> Self {
        let b = src.to_be_bytes();
        Self(b[0], b[1], b[2], b[3])
    }
}

impl From<Color> for u32 {
    fn from(value: Color) -> Self {
        u32::from_be_bytes([value.0, value.1, value.2, value.3])
    }
}

impl TryFrom<&[u8]> for Color {
    type Error = anyhow::Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        match value.len() {
            4 => Ok(Self(value[0], value[1], value[2], value[3])),
            _ => Err(anyhow!(
                "cannot convert slices of more or less than four elements to color"
            )),
        }
    }
}

impl From<Color> for Vec<u8> {
    fn from(value: Color) -> Self {
        vec![value.0, value.1, value.2, value.3]
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "#{:02X}{:02X}{:02X}{:02X}",
            self.0, self.1, self.2, self.3
        ))
    }
}

impl UpperHex for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // format each byte as hex string with at least two characters and leading zeroes
        f.write_fmt(format_args!(
            "{:02X}{:02X}{:02X}{:02X}",
            self.0, self.1, self.2, self.3
        ))
    }
}

#[cfg(test)]
impl Arbitrary for Color {
    fn arbitrary(g: &mut Gen) -> Self {
        u32::arbitrary(g).into()
    }
}

#[cfg(test)]
quickcheck! {
    fn test_u32_conversion(color: Color) -> bool {
        let c_enc: u32 = color.into();
        let c_dec: Color = Color::from(c_enc);
        c_dec == color
    }
}
