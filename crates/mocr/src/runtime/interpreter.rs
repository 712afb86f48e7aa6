//! Process-wide CPython lifecycle management.
//!
//! CPython can be started and torn down at most once per process in any
//! configuration manga-ocr survives; the state here is therefore a process
//! singleton.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, Once, PoisonError};

use pyo3::{Python, ffi};

use crate::{Error, Result, TRACING_TARGET_RUNTIME};

/// Thread-state handle surrendered by the initializing thread.
///
/// Consumed exactly once by [`finalize`] to reclaim the interpreter lock
/// before teardown.
struct MainThreadState(*mut ffi::PyThreadState);

// SAFETY: the pointer is never dereferenced on the Rust side; it is only
// handed back to `PyEval_RestoreThread`, which accepts it from any thread.
unsafe impl Send for MainThreadState {}

/// Process-wide interpreter state.
struct InterpreterState {
    init: Once,
    finalized: AtomicBool,
    main_thread: Mutex<Option<MainThreadState>>,
}

static INTERPRETER: InterpreterState = InterpreterState {
    init: Once::new(),
    finalized: AtomicBool::new(false),
    main_thread: Mutex::new(None),
};

fn lock_main_thread() -> MutexGuard<'static, Option<MainThreadState>> {
    INTERPRETER
        .main_thread
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Starts the embedded Python interpreter if it is not already running.
///
/// The first call initializes CPython without installing signal handlers
/// and, when the calling thread ends up holding the global interpreter
/// lock, releases it so any thread can attach afterwards. Subsequent calls
/// are no-ops, as are calls made after [`finalize`].
///
/// [`Reader::new`](crate::Reader::new) calls this on its own; calling it
/// earlier only moves the startup cost to a place of your choosing.
pub fn ensure_ready() {
    INTERPRETER.init.call_once(|| {
        // SAFETY: `Py_InitializeEx` is a documented no-op on an already
        // initialized interpreter, and the thread state is only saved when
        // this thread actually holds the lock it surrenders.
        unsafe {
            ffi::Py_InitializeEx(0);
            if ffi::PyGILState_Check() == 1 {
                let state = MainThreadState(ffi::PyEval_SaveThread());
                *lock_main_thread() = Some(state);
            }
        }

        tracing::info!(
            target: TRACING_TARGET_RUNTIME,
            "Python interpreter started"
        );
    });
}

/// True once [`finalize`] has torn the interpreter down.
pub(crate) fn is_finalized() -> bool {
    INTERPRETER.finalized.load(Ordering::Acquire)
}

/// Shuts the embedded Python interpreter down.
///
/// Returns `Ok` without doing anything when the interpreter was never
/// started by this process or has already been finalized. Otherwise the
/// saved main-thread state is restored and CPython is torn down for good:
/// there is no way to bring it back up, and later
/// [`Reader`](crate::Reader) constructions fail with
/// [`Error::RuntimeFinalized`].
///
/// Many Python libraries, torch among them, do not survive interpreter
/// re-initialization, so only call this once no reader will ever be
/// created again. Every reader must be closed and no read may be in
/// flight; finalizing under a live reader leaves the Python side in an
/// undefined state.
///
/// # Errors
///
/// Returns [`Error::ShutdownFailed`] when CPython reports an error while
/// flushing and tearing down.
pub fn finalize() -> Result<()> {
    let Some(state) = lock_main_thread().take() else {
        return Ok(());
    };

    INTERPRETER.finalized.store(true, Ordering::Release);

    // Drain reference releases queued by `Py` values that were dropped
    // while no thread was attached; after teardown they could never run.
    Python::attach(|_py| {});

    tracing::info!(
        target: TRACING_TARGET_RUNTIME,
        "Finalizing Python interpreter"
    );

    // SAFETY: `state` came from `PyEval_SaveThread` in `ensure_ready` and
    // is consumed exactly once; the caller guarantees no other thread is
    // attached or waiting to attach.
    let status = unsafe {
        ffi::PyEval_RestoreThread(state.0);
        ffi::Py_FinalizeEx()
    };

    if status < 0 {
        tracing::error!(
            target: TRACING_TARGET_RUNTIME,
            "Python interpreter shutdown reported an error"
        );
        return Err(Error::ShutdownFailed);
    }

    tracing::debug!(
        target: TRACING_TARGET_RUNTIME,
        "Python interpreter finalized"
    );
    Ok(())
}
