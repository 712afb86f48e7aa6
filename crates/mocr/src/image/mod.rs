//! Pixel formats and raw-buffer marshaling.

mod format;
mod marshal;

pub use format::PixelFormat;
pub(crate) use marshal::build_image;
