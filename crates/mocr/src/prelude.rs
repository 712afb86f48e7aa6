//! Prelude for the mocr crate
//!
//! This module re-exports the most commonly used types and functions from
//! the crate to provide a convenient single import for users.

pub use crate::error::{Error, Result};
pub use crate::image::PixelFormat;
pub use crate::reader::{DEFAULT_MODEL, Reader, ReaderConfig};
pub use crate::runtime::{ensure_ready, finalize};
