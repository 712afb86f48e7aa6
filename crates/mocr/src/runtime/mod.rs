//! Embedded interpreter lifecycle and scoped lock management.
//!
//! Everything unsafe about hosting CPython is confined to this module; the
//! rest of the crate goes through the scoped guard and pyo3's safe API.

#[allow(unsafe_code)]
mod guard;
#[allow(unsafe_code)]
mod interpreter;

pub(crate) use guard::{collect_cycles, render_py_err, with_runtime};
pub use interpreter::{ensure_ready, finalize};
