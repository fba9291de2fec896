use std::{fmt, str::FromStr};

use image::Rgb;

use crate::error::Error;

/// An 8-bit color parsed from `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    pub const fn white() -> Color {
        Color::rgb(255, 255, 255)
    }

    /// Value parser for the command line.
    pub fn from_arg(s: &str) -> Result<Color, String> {
        s.parse::<Color>().map_err(|e| e.to_string())
    }

    /// The color as an opaque canvas. Alpha is dropped, the background has no
    /// transparency of its own.
    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidColor(s.to_string());

        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Color {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digits() {
        let color: Color = "#1a2B3c".parse().unwrap();
        assert_eq!(color, Color::rgb(0x1a, 0x2b, 0x3c));
    }

    #[test]
    fn parses_eight_digits() {
        let color: Color = "#00000080".parse().unwrap();
        assert_eq!(color, Color { r: 0, g: 0, b: 0, a: 0x80 });
        assert_eq!(color.to_rgb(), Rgb([0, 0, 0]));
    }

    #[test]
    fn rejects_malformed_colors() {
        for input in ["000000", "#00000", "#0000000", "#gg0000", "#", "", "#ééé", "#+12345"] {
            let result = input.parse::<Color>();
            assert!(
                matches!(result, Err(Error::InvalidColor(ref s)) if s == input),
                "{input:?} parsed as {result:?}"
            );
        }
    }

    #[test]
    fn displays_as_hex() {
        assert_eq!(Color::white().to_string(), "#ffffff");
        assert_eq!(Color { r: 1, g: 2, b: 3, a: 4 }.to_string(), "#01020304");
    }

    #[test]
    fn from_arg_reports_message() {
        assert_eq!(Color::from_arg("red").unwrap_err(), "Invalid color: red");
    }
}
