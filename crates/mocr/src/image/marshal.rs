//! Raw pixel buffer to image object conversion.

use pyo3::prelude::*;
use pyo3::types::PyBytes;

use super::PixelFormat;
use crate::runtime::render_py_err;
use crate::{Error, Result, TRACING_TARGET_IMAGE};

/// Builds an image object from a raw pixel buffer.
///
/// The first [`PixelFormat::byte_len`] bytes of `data` are handed to the
/// `frombytes` constructor; surplus bytes are ignored. Pixel rows run
/// top to bottom with no padding between them.
pub(crate) fn build_image<'py>(
    py: Python<'py>,
    frombytes: &Bound<'py, PyAny>,
    data: &[u8],
    width: u32,
    height: u32,
    format: PixelFormat,
) -> Result<Bound<'py, PyAny>> {
    let required = format.byte_len(width, height);
    if (data.len() as u64) < required {
        return Err(Error::buffer_too_small(
            required,
            data.len(),
            width,
            height,
            format.mode(),
        ));
    }

    let mode = format.mode();
    let raw = PyBytes::new(py, &data[..required as usize]);

    frombytes
        .call1((mode, (width, height), raw, "raw", mode, 0, 1))
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_IMAGE,
                width,
                height,
                mode,
                error = %render_py_err(py, &err),
                "Image construction failed"
            );
            Error::image_build(err)
        })
}
