//! Scoped access to the embedded interpreter.

use pyo3::ffi;
use pyo3::prelude::*;

use super::interpreter;
use crate::{Error, Result, TRACING_TARGET_RUNTIME};

/// Runs `f` with the current thread attached to the interpreter.
///
/// Acquires the global interpreter lock for the duration of `f` and
/// releases it on every exit path, including early returns through `?`.
/// Fails fast with [`Error::RuntimeFinalized`] once the interpreter has
/// been torn down; that check is best-effort and does not synchronize with
/// a finalize that is concurrently in flight.
pub(crate) fn with_runtime<T>(f: impl for<'py> FnOnce(Python<'py>) -> Result<T>) -> Result<T> {
    if interpreter::is_finalized() {
        return Err(Error::RuntimeFinalized);
    }

    interpreter::ensure_ready();
    Python::attach(f)
}

/// Runs one pass of the interpreter's cyclic garbage collector.
pub(crate) fn collect_cycles(_py: Python<'_>) {
    // SAFETY: the `_py` token proves this thread is attached.
    let collected = unsafe { ffi::PyGC_Collect() };

    tracing::trace!(
        target: TRACING_TARGET_RUNTIME,
        collected,
        "Cycle collection pass"
    );
}

/// Formats a Python exception, traceback included, for diagnostics.
pub(crate) fn render_py_err(py: Python<'_>, err: &PyErr) -> String {
    match err.traceback(py).map(|tb| tb.format()) {
        Some(Ok(traceback)) => format!("{traceback}{err}"),
        _ => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pyo3::exceptions::PyTypeError;

    use super::*;

    #[test]
    fn test_with_runtime_releases_the_lock_on_error() {
        let result: Result<()> = with_runtime(|_py| Err(Error::RuntimeFinalized));
        assert!(matches!(result.unwrap_err(), Error::RuntimeFinalized));

        // A second acquisition succeeding proves the first released.
        let value = with_runtime(|_py| Ok(7)).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_render_py_err_without_traceback() {
        let rendered = with_runtime(|py| {
            let err = PyTypeError::new_err("unexpected operand");
            Ok(render_py_err(py, &err))
        })
        .unwrap();

        assert!(rendered.contains("unexpected operand"));
    }

    #[test]
    fn test_render_py_err_includes_the_traceback() {
        let rendered = with_runtime(|py| {
            let err = py
                .run(c"raise ValueError('bad pixel data')", None, None)
                .unwrap_err();
            Ok(render_py_err(py, &err))
        })
        .unwrap();

        assert!(rendered.contains("Traceback"));
        assert!(rendered.contains("bad pixel data"));
    }
}
