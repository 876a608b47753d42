//! Cancellable timer tasks.
//!
//! Every timer-driven effect on the page (carousel autoplay, typewriter
//! reveal, cursor blink, status reset) is started through a [`Scheduler`]
//! and owned through the returned [`TaskHandle`]. Dropping the handle
//! cancels the task, so a component that drops its state can never be
//! called back afterwards.

use std::fmt;
use std::time::Duration;

pub struct TaskHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TaskHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle for a task that was never scheduled (no timer source).
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("live", &self.cancel.is_some())
            .finish()
    }
}

pub trait Scheduler: Clone + 'static {
    /// Runs `task` once after `delay`.
    fn after<F>(&self, delay: Duration, task: F) -> TaskHandle
    where
        F: FnOnce() + 'static;

    /// Runs `task` every `period` until the handle is dropped.
    fn every<F>(&self, period: Duration, task: F) -> TaskHandle
    where
        F: FnMut() + 'static;
}


#[cfg(test)]
mod tests {
    use super::manual::ManualScheduler;
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn tasks_fire_in_due_order_then_registration_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let _late = {
            let log = log.clone();
            scheduler.after(Duration::from_millis(30), move || log.borrow_mut().push("late"))
        };
        let _first = {
            let log = log.clone();
            scheduler.after(Duration::from_millis(10), move || log.borrow_mut().push("first"))
        };
        let _second = {
            let log = log.clone();
            scheduler.after(Duration::from_millis(10), move || log.borrow_mut().push("second"))
        };

        scheduler.advance_ms(30);
        assert_eq!(*log.borrow(), vec!["first", "second", "late"]);
    }

    #[test]
    fn dropped_handle_never_fires() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(RefCell::new(0));

        let handle = {
            let fired = fired.clone();
            scheduler.every(Duration::from_millis(5), move || *fired.borrow_mut() += 1)
        };

        scheduler.advance_ms(12);
        assert_eq!(*fired.borrow(), 2);

        drop(handle);
        scheduler.advance_ms(100);
        assert_eq!(*fired.borrow(), 2);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn task_may_schedule_follow_up_work() {
        let scheduler = ManualScheduler::new();
        let slot: Rc<RefCell<Option<TaskHandle>>> = Rc::new(RefCell::new(None));
        let fired_at = Rc::new(RefCell::new(None));

        let _outer = {
            let scheduler_inner = scheduler.clone();
            let slot = slot.clone();
            let fired_at = fired_at.clone();
            scheduler.after(Duration::from_millis(10), move || {
                let probe = scheduler_inner.clone();
                let handle = scheduler_inner.after(Duration::from_millis(5), move || {
                    *fired_at.borrow_mut() = Some(probe.now());
                });
                *slot.borrow_mut() = Some(handle);
            })
        };

        scheduler.advance_ms(20);
        assert_eq!(*fired_at.borrow(), Some(Duration::from_millis(15)));
    }
}
