// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Progress tracking with cancellation listeners.
//!
//! A [`ProgressMonitor`] is shared between the thread running a long
//! operation and the thread that may cancel it. [`attach_cancel`] ties a
//! running query to a monitor so that cancelling the monitor aborts the
//! query.

use crate::connection::Cancellable;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Handle returned when registering a cancel listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    cancelled: bool,
    entries: Vec<(ListenerId, Listener)>,
}

/// Step counter with a cancellation flag.
///
/// Listeners run once, on the first call to [`ProgressMonitor::cancel`].
/// A listener added after cancellation runs immediately.
pub struct ProgressMonitor {
    step_count: usize,
    steps_done: AtomicUsize,
    cancelled: AtomicBool,
    listeners: Mutex<Listeners>,
}

impl ProgressMonitor {
    pub fn new(step_count: usize) -> Self {
        Self {
            step_count,
            steps_done: AtomicUsize::new(0),
            cancelled: AtomicBool::new(false),
            listeners: Mutex::new(Listeners::default()),
        }
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Mark one step as done. Extra calls past the step count are ignored.
    pub fn end_step(&self) {
        let _ = self
            .steps_done
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |done| {
                (done < self.step_count).then_some(done + 1)
            });
    }

    /// Fraction of steps done, in `[0, 1]`.
    pub fn progression(&self) -> f64 {
        if self.step_count == 0 {
            return 1.0;
        }
        self.steps_done.load(Ordering::SeqCst) as f64 / self.step_count as f64
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Flag the operation as cancelled and notify the listeners.
    pub fn cancel(&self) {
        let to_notify: Vec<Listener> = {
            let mut listeners = self.lock_listeners();
            if listeners.cancelled {
                return;
            }
            listeners.cancelled = true;
            self.cancelled.store(true, Ordering::SeqCst);
            listeners
                .entries
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        };
        debug!("Progress cancelled, notifying {} listeners", to_notify.len());
        for listener in to_notify {
            listener();
        }
    }

    /// Register a callback run when the monitor is cancelled.
    pub fn add_cancel_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(listener);
        let (id, already_cancelled) = {
            let mut listeners = self.lock_listeners();
            let id = ListenerId(listeners.next_id);
            listeners.next_id += 1;
            listeners.entries.push((id, Arc::clone(&listener)));
            (id, listeners.cancelled)
        };
        if already_cancelled {
            listener();
        }
        id
    }

    /// Unregister a listener. Returns false if it was not registered.
    pub fn remove_cancel_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.lock_listeners();
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry_id, _)| *entry_id != id);
        listeners.entries.len() != before
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Listeners> {
        // Listeners never run under the lock.
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProgressMonitor {
    fn default() -> Self {
        Self::new(1)
    }
}

impl std::fmt::Debug for ProgressMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressMonitor")
            .field("step_count", &self.step_count)
            .field("steps_done", &self.steps_done.load(Ordering::SeqCst))
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Cancel `statement` when `monitor` is cancelled.
///
/// Failures of the cancel request are logged and ignored. Remove the
/// listener with [`ProgressMonitor::remove_cancel_listener`] once the query
/// is done.
pub fn attach_cancel(statement: Arc<dyn Cancellable>, monitor: &ProgressMonitor) -> ListenerId {
    monitor.add_cancel_listener(move || {
        if let Err(e) = statement.cancel() {
            warn!("Failed to cancel running query: {}", e);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{H2gisErrorHelper, Result};
    use crate::testing::CancelCounter;

    #[test]
    fn test_progression() {
        let monitor = ProgressMonitor::new(4);
        assert_eq!(monitor.progression(), 0.0);
        monitor.end_step();
        assert_eq!(monitor.progression(), 0.25);
        for _ in 0..10 {
            monitor.end_step();
        }
        assert_eq!(monitor.progression(), 1.0);
        assert_eq!(ProgressMonitor::new(0).progression(), 1.0);
    }

    #[test]
    fn test_cancel_notifies_listeners_once() {
        let monitor = ProgressMonitor::new(1);
        let counter = Arc::new(CancelCounter::default());
        attach_cancel(counter.clone(), &monitor);

        assert!(!monitor.is_cancelled());
        monitor.cancel();
        monitor.cancel();
        assert!(monitor.is_cancelled());
        assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_removed_listener_is_not_called() {
        let monitor = ProgressMonitor::new(1);
        let counter = Arc::new(CancelCounter::default());
        let id = attach_cancel(counter.clone(), &monitor);
        assert!(monitor.remove_cancel_listener(id));
        assert!(!monitor.remove_cancel_listener(id));

        monitor.cancel();
        assert_eq!(counter.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_attach_after_cancel_cancels_immediately() {
        let monitor = ProgressMonitor::new(1);
        monitor.cancel();
        let counter = Arc::new(CancelCounter::default());
        attach_cancel(counter.clone(), &monitor);
        assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
    }

    struct FailingCancel;

    impl Cancellable for FailingCancel {
        fn cancel(&self) -> Result<()> {
            Err(H2gisErrorHelper::io().message("statement already closed"))
        }
    }

    #[test]
    fn test_cancel_errors_are_ignored() {
        let monitor = ProgressMonitor::new(1);
        let counter = Arc::new(CancelCounter::default());
        attach_cancel(Arc::new(FailingCancel), &monitor);
        attach_cancel(counter.clone(), &monitor);
        monitor.cancel();
        assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let monitor = Arc::new(ProgressMonitor::new(1));
        let counter = Arc::new(CancelCounter::default());
        attach_cancel(counter.clone(), &monitor);

        let remote = Arc::clone(&monitor);
        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(monitor.is_cancelled());
        assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
    }
}
