//! Per-generation progress reporting.

use std::error::Error;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use tracing::warn;

/// Boxed error an observer may return to signal a reporting failure.
pub type ObserverError = Box<dyn Error + Send + Sync>;

/// Snapshot handed to a [`ProgressObserver`] once per generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationProgress {
    /// 1-based index of the generation just completed.
    pub generation: usize,
    /// Generation budget of the run.
    pub total_generations: usize,
    /// Best fitness observed so far in the run.
    pub best_fitness: f64,
    /// Wall-clock time since seeding.
    pub elapsed: Duration,
}

/// Receives progress updates from the evolutionary loop.
///
/// Invoked synchronously on the evolving thread. Failures, whether
/// returned as `Err` or raised as a panic, are logged and discarded; they
/// never interrupt evolution.
///
/// Any `FnMut(&GenerationProgress)` closure is an observer:
///
/// ```
/// use u_timetable::ga::{GenerationProgress, ProgressObserver};
///
/// let mut seen = Vec::new();
/// let mut observer = |p: &GenerationProgress| seen.push(p.generation);
/// # let p = GenerationProgress {
/// #     generation: 1, total_generations: 1, best_fitness: 1.0,
/// #     elapsed: std::time::Duration::ZERO,
/// # };
/// # observer.on_progress(&p).unwrap();
/// ```
pub trait ProgressObserver {
    /// Handles one progress update.
    fn on_progress(&mut self, progress: &GenerationProgress) -> Result<(), ObserverError>;
}

impl<F> ProgressObserver for F
where
    F: FnMut(&GenerationProgress),
{
    fn on_progress(&mut self, progress: &GenerationProgress) -> Result<(), ObserverError> {
        self(progress);
        Ok(())
    }
}

/// Calls the observer, swallowing both error returns and panics.
///
/// Returns `true` when the observer completed successfully.
pub(crate) fn notify(observer: &mut dyn ProgressObserver, progress: &GenerationProgress) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(|| observer.on_progress(progress))) {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            warn!(
                generation = progress.generation,
                error = %err,
                "progress observer failed; continuing evolution"
            );
            false
        }
        Err(_) => {
            warn!(
                generation = progress.generation,
                "progress observer panicked; continuing evolution"
            );
            false
        }
    }
}
