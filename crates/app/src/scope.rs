//! View-lifetime tasks.
//!
//! A [`ViewScope`] owns the network calls started by one view. Results are
//! handed back to whoever owns the [`Session`](crate::session::Session), which
//! applies them. Dropping the scope aborts whatever is still running, so a
//! late response is never applied.

use std::{fmt, future::Future};

use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Tasks started by a single view.
pub struct ViewScope<T: 'static> {
    view: &'static str,
    tasks: JoinSet<T>,
}

impl<T: Send + 'static> ViewScope<T> {
    /// Opens a scope for `view`.
    pub fn new(view: &'static str) -> Self {
        Self {
            view,
            tasks: JoinSet::new(),
        }
    }

    /// Name of the owning view.
    pub fn view(&self) -> &'static str {
        self.view
    }

    /// Starts a task owned by this scope.
    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.tasks.spawn(task);
    }

    /// Waits for the next completed task. `None` once nothing is running.
    ///
    /// Tasks that panicked or were aborted are logged and skipped.
    pub async fn next(&mut self) -> Option<T> {
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(output) => return Some(output),
                Err(error) => warn!(view = self.view, %error, "view task failed"),
            }
        }

        None
    }

    /// Returns a completed result without waiting, if one is ready.
    pub fn try_next(&mut self) -> Option<T> {
        while let Some(joined) = self.tasks.try_join_next() {
            match joined {
                Ok(output) => return Some(output),
                Err(error) => warn!(view = self.view, %error, "view task failed"),
            }
        }

        None
    }

    /// Number of tasks not yet collected.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }
}

impl<T: 'static> Drop for ViewScope<T> {
    fn drop(&mut self) {
        if !self.tasks.is_empty() {
            debug!(view = self.view, tasks = self.tasks.len(), "aborting view tasks");
        }

        self.tasks.abort_all();
    }
}

impl<T: 'static> fmt::Debug for ViewScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewScope")
            .field("view", &self.view)
            .field("pending", &self.tasks.len())
            .finish()
    }
}
