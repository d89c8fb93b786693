//! Swatch server
//!
//! Extracts representative color swatches from images. The palette core
//! (`quantize`, `profile`, `contrast`, `builder`) is pure and synchronous;
//! `source` and `server` fetch images and expose the core over HTTP.

pub mod buffer;
pub mod builder;
pub mod color;
pub mod config;
pub mod contrast;
pub mod error;
pub mod profile;
pub mod quantize;
pub mod server;
pub mod source;
pub mod swatch;

pub use buffer::PixelBuffer;
pub use builder::PaletteBuilder;
pub use color::Rgb;
pub use error::{AppError, SourceError};
pub use profile::SwatchName;
pub use swatch::{NamedSwatches, Swatch};
