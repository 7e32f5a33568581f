//! Synchronous bridge to asynchronous work
//!
//! UI callbacks and plain `fn main` are synchronous, while the completion
//! call is a future. [`run_to_completion`] drives one future to completion
//! from such a caller and hands back its output, whatever scheduler (if
//! any) already owns the calling thread.
//!
//! | Calling context          | What the bridge does                                      |
//! |--------------------------|-----------------------------------------------------------|
//! | no runtime               | builds a current-thread runtime, drives, drops it         |
//! | multi-thread runtime     | `block_in_place` + `Handle::block_on` on the active one   |
//! | current-thread runtime   | drives on a scoped helper thread with a private runtime   |
//!
//! A runtime is never built on a thread that already has one entered, so
//! the "Cannot start a runtime from within a runtime" panic cannot occur.
//!
//! In the current-thread case the caller's runtime is blocked until the
//! helper thread finishes. The future must not depend on tasks, timers, or
//! I/O owned by that runtime (a spawned task, a channel fed by one, or a
//! pooled connection whose driver task lives there), or it stalls.
//! [`GeminiProvider`](crate::mt::GeminiProvider) keeps no idle connections
//! for this reason.
//!
//! # Example
//!
//! ```ignore
//! use urdu_translator::mt::bridge::run_to_completion;
//!
//! fn on_click() -> String {
//!     run_to_completion(async { "done".to_string() }).unwrap()
//! }
//! ```

use std::future::Future;
use tokio::runtime::{Builder, Handle, RuntimeFlavor};
use tracing::{debug, trace};

/// Failures of the bridge itself, never of the wrapped future
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// A private runtime could not be built
    RuntimeBuild(String),
    /// The helper thread driving the future panicked
    WorkerPanicked,
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BridgeError::RuntimeBuild(msg) => write!(f, "failed to build runtime: {}", msg),
            BridgeError::WorkerPanicked => write!(f, "bridge worker thread panicked"),
        }
    }
}

impl std::error::Error for BridgeError {}

/// The kind of scheduler that owns the calling thread, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerContext {
    /// No tokio runtime is entered on this thread
    None,
    /// Inside a multi-thread runtime (worker or `block_on` thread)
    MultiThread,
    /// Inside a current-thread runtime, which cannot be re-entered
    CurrentThread,
}

impl SchedulerContext {
    /// Inspect the calling thread
    pub fn detect() -> Self {
        match Handle::try_current() {
            Err(_) => SchedulerContext::None,
            Ok(handle) => match handle.runtime_flavor() {
                RuntimeFlavor::CurrentThread => SchedulerContext::CurrentThread,
                _ => SchedulerContext::MultiThread,
            },
        }
    }
}

/// Drive `future` to completion from a synchronous caller
///
/// The future's output is returned untouched: if it is a `Result`, its
/// error comes back exactly as produced. `Err(BridgeError)` only reports
/// that the bridge could not run the future at all.
///
/// # Panics
///
/// Panics raised by the future itself are propagated when it runs on the
/// calling thread. On the helper-thread path they surface as
/// [`BridgeError::WorkerPanicked`].
pub fn run_to_completion<F>(future: F) -> Result<F::Output, BridgeError>
where
    F: Future + Send,
    F::Output: Send,
{
    match SchedulerContext::detect() {
        SchedulerContext::None => {
            debug!("no active runtime; driving on a private runtime");
            drive_on_private_runtime(future)
        }
        SchedulerContext::CurrentThread => {
            debug!("current-thread runtime active; driving on a helper thread");
            std::thread::scope(|scope| {
                scope
                    .spawn(move || drive_on_private_runtime(future))
                    .join()
                    .unwrap_or(Err(BridgeError::WorkerPanicked))
            })
        }
        SchedulerContext::MultiThread => {
            debug!("multi-thread runtime active; reusing it");
            let handle = Handle::current();
            Ok(tokio::task::block_in_place(move || handle.block_on(future)))
        }
    }
}

/// Build a runtime, drive the future on it, and tear the runtime down
fn drive_on_private_runtime<F: Future>(future: F) -> Result<F::Output, BridgeError> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| BridgeError::RuntimeBuild(e.to_string()))?;

    let output = runtime.block_on(future);
    drop(runtime);
    trace!("private runtime shut down");

    Ok(output)
}
