//! Navigation sink.
//!
//! Session operations and the HTTP client's 401 handler request navigation
//! (to the home or login route) through a [`Navigator`]. The front end
//! decides what a navigation means; [`History`] records pushed paths in order.

use parking_lot::Mutex;

/// Receives navigation requests.
pub trait Navigator: Send + Sync + std::fmt::Debug {
    /// Request navigation to a path.
    fn push(&self, path: &str);
}

/// Ordered record of pushed paths.
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<String>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pushed path, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Most recently pushed path.
    pub fn current(&self) -> Option<String> {
        self.entries.lock().last().cloned()
    }

    /// Number of pushes to `path`.
    pub fn count(&self, path: &str) -> usize {
        self.entries.lock().iter().filter(|p| *p == path).count()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Navigator for History {
    fn push(&self, path: &str) {
        tracing::debug!(path, "Navigation requested");
        self.entries.lock().push(path.to_string());
    }
}
