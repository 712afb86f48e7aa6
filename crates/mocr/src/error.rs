//! Error types for mocr
//!
//! This module provides comprehensive error handling for the embedded OCR
//! pipeline.

use pyo3::PyErr;

/// Result type for all OCR operations in this crate.
///
/// This is a convenience type alias that defaults to using [`Error`] as the error type.
/// Most functions in this crate return this type for consistent error handling.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for embedded OCR operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A Python module could not be imported
    #[error("failed to import Python module '{module}'")]
    Import {
        /// Name of the module that failed to import
        module: &'static str,
        #[source]
        source: PyErr,
    },

    /// An attribute lookup on an imported Python module failed
    #[error("failed to resolve '{attribute}' in Python module '{module}'")]
    Resolve {
        /// Module the attribute was looked up on
        module: &'static str,
        /// Attribute that could not be resolved
        attribute: &'static str,
        #[source]
        source: PyErr,
    },

    /// The OCR model object could not be constructed
    #[error("failed to construct OCR model '{model}'")]
    ModelInit {
        /// Model identifier that was passed to the constructor
        model: String,
        #[source]
        source: PyErr,
    },

    /// The supplied pixel buffer is shorter than its dimensions require
    #[error("pixel buffer holds {actual} bytes but {expected} are required for {width}x{height} '{mode}'")]
    BufferTooSmall {
        /// Bytes required for the declared dimensions and format
        expected: u64,
        /// Bytes actually supplied
        actual: usize,
        /// Declared width in pixels
        width: u32,
        /// Declared height in pixels
        height: u32,
        /// Pixel format identifier
        mode: &'static str,
    },

    /// The embedded image constructor rejected the pixel buffer
    #[error("failed to build an image object from the pixel buffer")]
    ImageBuild {
        #[source]
        source: PyErr,
    },

    /// The OCR model call raised an exception
    #[error("OCR model call failed")]
    Call {
        #[source]
        source: PyErr,
    },

    /// The OCR model returned a value that is not text
    #[error("OCR model returned a non-text value")]
    Text {
        #[source]
        source: PyErr,
    },

    /// The embedded interpreter has already been finalized
    #[error("the Python interpreter has been finalized")]
    RuntimeFinalized,

    /// Interpreter shutdown reported an error
    #[error("Python interpreter shutdown reported an error")]
    ShutdownFailed,
}

impl Error {
    /// Create an import error
    pub fn import(module: &'static str, source: PyErr) -> Self {
        Self::Import { module, source }
    }

    /// Create an attribute resolution error
    pub fn resolve(module: &'static str, attribute: &'static str, source: PyErr) -> Self {
        Self::Resolve {
            module,
            attribute,
            source,
        }
    }

    /// Create a model construction error
    pub fn model_init(model: impl Into<String>, source: PyErr) -> Self {
        Self::ModelInit {
            model: model.into(),
            source,
        }
    }

    /// Create a buffer underflow error
    pub fn buffer_too_small(
        expected: u64,
        actual: usize,
        width: u32,
        height: u32,
        mode: &'static str,
    ) -> Self {
        Self::BufferTooSmall {
            expected,
            actual,
            width,
            height,
            mode,
        }
    }

    /// Create an image construction error
    pub fn image_build(source: PyErr) -> Self {
        Self::ImageBuild { source }
    }

    /// Create a model call error
    pub fn call(source: PyErr) -> Self {
        Self::Call { source }
    }

    /// Create a text extraction error
    pub fn text(source: PyErr) -> Self {
        Self::Text { source }
    }

    /// Check if this error occurred while resolving the model package
    ///
    /// Resolution failures happen during [`Reader`](crate::Reader) construction:
    /// the module import, the class lookup, or the model constructor failed.
    /// No reader exists after such a failure.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            Error::Import { .. } | Error::Resolve { .. } | Error::ModelInit { .. }
        )
    }

    /// Check if this error occurred during a read call
    ///
    /// Call failures are local to one read: the reader that produced them
    /// remains usable for subsequent calls.
    pub fn is_call_failure(&self) -> bool {
        matches!(
            self,
            Error::BufferTooSmall { .. }
                | Error::ImageBuild { .. }
                | Error::Call { .. }
                | Error::Text { .. }
        )
    }

    /// Get the error category for metrics/logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Import { .. } => "import",
            Error::Resolve { .. } => "resolve",
            Error::ModelInit { .. } => "model_init",
            Error::BufferTooSmall { .. } => "buffer_too_small",
            Error::ImageBuild { .. } => "image_build",
            Error::Call { .. } => "call",
            Error::Text { .. } => "text",
            Error::RuntimeFinalized => "runtime_finalized",
            Error::ShutdownFailed => "shutdown_failed",
        }
    }

    /// Get the underlying Python exception, if this error carries one
    pub fn py_source(&self) -> Option<&PyErr> {
        match self {
            Error::Import { source, .. }
            | Error::Resolve { source, .. }
            | Error::ModelInit { source, .. }
            | Error::ImageBuild { source }
            | Error::Call { source }
            | Error::Text { source } => Some(source),
            Error::BufferTooSmall { .. } | Error::RuntimeFinalized | Error::ShutdownFailed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pyo3::exceptions::PyValueError;

    use super::*;

    fn py_err() -> PyErr {
        PyValueError::new_err("boom")
    }

    #[test]
    fn test_resolution_failures() {
        assert!(Error::import("manga_ocr", py_err()).is_resolution_failure());
        assert!(Error::resolve("manga_ocr", "MangaOcr", py_err()).is_resolution_failure());
        assert!(Error::model_init("some/model", py_err()).is_resolution_failure());

        assert!(!Error::call(py_err()).is_resolution_failure());
        assert!(!Error::RuntimeFinalized.is_resolution_failure());
    }

    #[test]
    fn test_call_failures() {
        assert!(Error::buffer_too_small(48, 10, 4, 4, "RGB").is_call_failure());
        assert!(Error::image_build(py_err()).is_call_failure());
        assert!(Error::call(py_err()).is_call_failure());
        assert!(Error::text(py_err()).is_call_failure());

        assert!(!Error::import("manga_ocr", py_err()).is_call_failure());
        assert!(!Error::ShutdownFailed.is_call_failure());
    }

    #[test]
    fn test_categories() {
        assert_eq!(Error::import("PIL.Image", py_err()).category(), "import");
        assert_eq!(Error::call(py_err()).category(), "call");
        assert_eq!(Error::RuntimeFinalized.category(), "runtime_finalized");
        assert_eq!(Error::ShutdownFailed.category(), "shutdown_failed");
    }

    #[test]
    fn test_display() {
        let err = Error::buffer_too_small(48, 10, 4, 4, "RGB");
        assert_eq!(
            err.to_string(),
            "pixel buffer holds 10 bytes but 48 are required for 4x4 'RGB'"
        );

        let err = Error::import("manga_ocr", py_err());
        assert_eq!(err.to_string(), "failed to import Python module 'manga_ocr'");
    }

    #[test]
    fn test_py_source() {
        assert!(Error::call(py_err()).py_source().is_some());
        assert!(Error::buffer_too_small(1, 0, 1, 1, "L").py_source().is_none());
        assert!(Error::RuntimeFinalized.py_source().is_none());
    }
}
