use std::{fmt, str::FromStr};

use crate::error::Error;

/// How much of the foreground shows through, always within `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Opacity(f64);

impl Opacity {
    pub const TRANSPARENT: Opacity = Opacity(0.0);
    pub const OPAQUE: Opacity = Opacity(1.0);

    /// Out of range values are clamped, not rejected. NaN counts as transparent.
    pub fn new(value: f64) -> Opacity {
        if value.is_nan() {
            return Opacity::TRANSPARENT;
        }
        Opacity(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Value parser for the command line.
    pub fn from_arg(s: &str) -> Result<Opacity, String> {
        s.parse::<Opacity>().map_err(|e| e.to_string())
    }
}

impl FromStr for Opacity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<f64>() {
            Ok(value) if !value.is_nan() => Ok(Opacity::new(value)),
            _ => Err(Error::InvalidOpacity(s.to_string())),
        }
    }
}

impl fmt::Display for Opacity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
