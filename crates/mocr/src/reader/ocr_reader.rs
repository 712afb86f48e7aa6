//! OCR reader implementation.
//!
//! A [`Reader`] owns one loaded instance of the manga-ocr model inside the
//! embedded interpreter, together with the image constructor used to turn
//! raw pixel buffers into something the model accepts.

use std::path::Path;

use pyo3::prelude::*;
use pyo3::types::PyString;

use super::ReaderConfig;
use crate::runtime::{self, collect_cycles, render_py_err, with_runtime};
use crate::{Error, PixelFormat, Result, TRACING_TARGET_READER, image};

/// Python package shipping the OCR model.
const OCR_MODULE: &str = "manga_ocr";
/// Model class inside [`OCR_MODULE`].
const OCR_CLASS: &str = "MangaOcr";
/// Python module providing the image constructor.
const IMAGE_MODULE: &str = "PIL.Image";
/// Constructor attribute used to build images from raw buffers.
const IMAGE_CONSTRUCTOR: &str = "frombytes";

/// One loaded instance of the manga-ocr model.
///
/// Readers are independent of each other: any number may coexist in one
/// process, each may be used from any number of threads, and closing one
/// never affects another. Calls into the interpreter are serialized on the
/// global interpreter lock, so concurrent reads queue rather than overlap.
///
/// # Examples
///
/// ```rust,ignore
/// use mocr::{Reader, ReaderConfig};
///
/// let reader = Reader::new(ReaderConfig::default())?;
/// let text = reader.read_path("panel.jpg")?;
/// println!("{text}");
/// reader.close()?;
/// ```
pub struct Reader {
    model: Py<PyAny>,
    frombytes: Py<PyAny>,
    config: ReaderConfig,
}

impl Reader {
    /// Load the configured model and resolve the image constructor.
    ///
    /// Starts the embedded interpreter when this is the first call into it.
    /// Loading downloads the model on first use unless the identifier names
    /// a local path, so construction can take a while.
    ///
    /// # Errors
    ///
    /// Returns a resolution failure (see
    /// [`Error::is_resolution_failure`]) when the OCR package cannot be
    /// imported or the model cannot be constructed, and
    /// [`Error::RuntimeFinalized`] after [`finalize`](crate::finalize) has
    /// run. No reader exists in either case.
    pub fn new(config: ReaderConfig) -> Result<Self> {
        runtime::ensure_ready();

        tracing::debug!(
            target: TRACING_TARGET_READER,
            model = config.model(),
            force_cpu = config.force_cpu(),
            "Loading OCR model"
        );

        let (model, frombytes) = with_runtime(|py| {
            let module = py.import(OCR_MODULE).map_err(|err| {
                log_py_failure(py, "Failed to import the OCR module", &err);
                Error::import(OCR_MODULE, err)
            })?;

            let class = module.getattr(OCR_CLASS).map_err(|err| {
                log_py_failure(py, "OCR module has no model class", &err);
                Error::resolve(OCR_MODULE, OCR_CLASS, err)
            })?;

            let model = class
                .call1((config.model(), config.force_cpu()))
                .map_err(|err| {
                    log_py_failure(py, "Failed to construct the OCR model", &err);
                    Error::model_init(config.model(), err)
                })?;

            let image_module = py.import(IMAGE_MODULE).map_err(|err| {
                log_py_failure(py, "Failed to import the image module", &err);
                Error::import(IMAGE_MODULE, err)
            })?;

            let frombytes = image_module.getattr(IMAGE_CONSTRUCTOR).map_err(|err| {
                log_py_failure(py, "Image module has no buffer constructor", &err);
                Error::resolve(IMAGE_MODULE, IMAGE_CONSTRUCTOR, err)
            })?;

            Ok((model.unbind(), frombytes.unbind()))
        })?;

        tracing::info!(
            target: TRACING_TARGET_READER,
            model = config.model(),
            "OCR model ready"
        );

        Ok(Self {
            model,
            frombytes,
            config,
        })
    }

    /// Load the default manga-ocr model with default settings.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ReaderConfig::default())
    }

    /// Get the configuration this reader was constructed with.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Recognize text in a raw pixel buffer.
    ///
    /// `data` must hold at least [`PixelFormat::byte_len`] bytes for the
    /// declared dimensions; surplus bytes are ignored. Rows run top to
    /// bottom with no padding between them.
    ///
    /// # Errors
    ///
    /// Returns a call failure (see [`Error::is_call_failure`]) when the
    /// buffer is too short, the image cannot be constructed, or the model
    /// call raises. The reader stays usable after any of these.
    pub fn read_buffer(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<String> {
        tracing::debug!(
            target: TRACING_TARGET_READER,
            width,
            height,
            mode = format.mode(),
            len = data.len(),
            "Reading text from a pixel buffer"
        );

        with_runtime(|py| {
            let frombytes = self.frombytes.bind(py);
            let image = image::build_image(py, frombytes, data, width, height, format)?;
            self.recognize(py, image)
        })
    }

    /// Recognize text in an image file.
    ///
    /// The file is opened and decoded by the model package, so every format
    /// its image codec understands is accepted.
    ///
    /// # Errors
    ///
    /// Returns a call failure when the file is missing, cannot be decoded,
    /// or the model call raises. The reader stays usable after any of
    /// these.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();

        tracing::debug!(
            target: TRACING_TARGET_READER,
            path = %path.display(),
            "Reading text from an image file"
        );

        with_runtime(|py| {
            let arg = PyString::new(py, &path.to_string_lossy());
            self.recognize(py, arg.into_any())
        })
    }

    /// Release the model and constructor references held by this reader.
    ///
    /// Runs one garbage-collection pass afterwards so objects freed by the
    /// release are reclaimed promptly. Dropping a reader without calling
    /// `close` is also safe; the releases are then deferred until the next
    /// time any thread attaches to the interpreter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RuntimeFinalized`] when the interpreter was torn
    /// down before this call; nothing can be released then.
    pub fn close(self) -> Result<()> {
        tracing::debug!(
            target: TRACING_TARGET_READER,
            model = self.config.model(),
            "Closing OCR reader"
        );

        with_runtime(|py| {
            self.model.drop_ref(py);
            self.frombytes.drop_ref(py);
            collect_cycles(py);
            Ok(())
        })
    }

    /// Calls the model with a single argument and extracts the text.
    fn recognize<'py>(&self, py: Python<'py>, input: Bound<'py, PyAny>) -> Result<String> {
        let value = self.model.bind(py).call1((input,)).map_err(|err| {
            log_py_failure(py, "OCR model call failed", &err);
            Error::call(err)
        })?;

        let text = value.extract::<String>().map_err(|err| {
            log_py_failure(py, "OCR model returned a non-text value", &err);
            Error::text(err)
        })?;

        tracing::debug!(
            target: TRACING_TARGET_READER,
            chars = text.chars().count(),
            "Recognized text"
        );

        Ok(text)
    }
}

impl std::fmt::Debug for Reader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn log_py_failure(py: Python<'_>, context: &str, err: &PyErr) {
    tracing::error!(
        target: TRACING_TARGET_READER,
        error = %render_py_err(py, err),
        "{context}"
    );
}
