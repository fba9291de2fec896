pub mod codec;
pub mod color;
pub mod config;
pub mod error;
pub mod imageutils;
pub mod opacity;

pub use color::Color;
pub use error::{Error, Result};
pub use opacity::Opacity;
