//! OCR reader and its configuration.

mod ocr_config;
mod ocr_reader;

pub use ocr_config::{DEFAULT_MODEL, ReaderConfig};
pub use ocr_reader::Reader;
