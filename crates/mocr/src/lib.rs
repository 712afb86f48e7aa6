#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for interpreter lifecycle and lock operations.
///
/// Use this target for logging interpreter startup, finalization, and
/// garbage-collection passes.
pub const TRACING_TARGET_RUNTIME: &str = "mocr::runtime";

/// Tracing target for OCR reader operations.
pub const TRACING_TARGET_READER: &str = "mocr::reader";

/// Tracing target for pixel-buffer marshaling.
pub const TRACING_TARGET_IMAGE: &str = "mocr::image";

pub mod error;
pub mod image;
#[doc(hidden)]
pub mod prelude;
pub mod reader;
pub mod runtime;

pub use crate::error::{Error, Result};
pub use crate::image::PixelFormat;
pub use crate::reader::{DEFAULT_MODEL, Reader, ReaderConfig};
pub use crate::runtime::{ensure_ready, finalize};
