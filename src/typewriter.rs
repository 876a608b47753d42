use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    time::Duration,
};

use crate::{
    mode::PerformanceMode,
    profile::Profile,
    schedule::{Scheduler, TaskHandle},
};

pub const CURSOR_GLYPH: &str = "|";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypewriterTiming {
    pub char_interval: Duration,
    pub start_delay: Duration,
    pub blink_interval: Duration,
    /// How long the cursor keeps blinking once the text is complete.
    pub cursor_linger: Duration,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            char_interval: Duration::from_millis(100),
            start_delay: Duration::from_millis(500),
            blink_interval: Duration::from_millis(500),
            cursor_linger: Duration::from_millis(5_000),
        }
    }
}

impl TypewriterTiming {
    /// Slower reveal used for the hero name.
    pub fn hero() -> Self {
        Self {
            char_interval: Duration::from_millis(150),
            start_delay: Duration::from_millis(800),
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypewriterProfile {
    pub animate: bool,
}

impl Profile for TypewriterProfile {
    fn resolve(mode: PerformanceMode) -> Self {
        Self {
            animate: mode.is_full(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Typewriter {
    text: String,
    revealed: usize,
    total: usize,
    complete: bool,
    cursor_shown: bool,
    cursor_on: bool,
}

impl Typewriter {
    /// Nothing revealed yet, steady cursor.
    pub fn animated(text: impl Into<String>) -> Self {
        let text = text.into();
        let total = text.chars().count();
        Self {
            text,
            revealed: 0,
            total,
            complete: false,
            cursor_shown: true,
            cursor_on: true,
        }
    }

    /// Whole text, no cursor.
    pub fn settled(text: impl Into<String>) -> Self {
        let text = text.into();
        let total = text.chars().count();
        Self {
            text,
            revealed: total,
            total,
            complete: true,
            cursor_shown: false,
            cursor_on: false,
        }
    }

    pub fn displayed(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(self.revealed)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len());
        &self.text[..end]
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// `None` when no cursor is rendered, otherwise whether it is lit.
    pub fn cursor(&self) -> Option<bool> {
        self.cursor_shown.then_some(self.cursor_on)
    }

    /// Reveals one more character. Returns `true` once the text is complete.
    pub fn reveal_next(&mut self) -> bool {
        if self.revealed < self.total {
            self.revealed += 1;
        }
        if self.revealed == self.total {
            self.complete = true;
        }
        self.complete
    }

    pub fn blink(&mut self) {
        if self.complete && self.cursor_shown {
            self.cursor_on = !self.cursor_on;
        }
    }

    pub fn retire_cursor(&mut self) {
        self.cursor_shown = false;
    }
}

struct DriverState {
    typewriter: Typewriter,
    start: Option<TaskHandle>,
    reveal: Option<TaskHandle>,
    blink: Option<TaskHandle>,
    retire: Option<TaskHandle>,
}

struct Core<S> {
    state: RefCell<DriverState>,
    scheduler: S,
    timing: TypewriterTiming,
    on_change: Box<dyn Fn(Typewriter)>,
}

/// Plays a [`Typewriter`] with real timers. Built fresh for every text or
/// mode change; dropping it cancels whatever is still pending.
pub struct TypewriterDriver<S: Scheduler> {
    core: Rc<Core<S>>,
}

impl<S: Scheduler> TypewriterDriver<S> {
    pub fn start(
        text: impl Into<String>,
        timing: TypewriterTiming,
        mode: PerformanceMode,
        scheduler: S,
        on_change: impl Fn(Typewriter) + 'static,
    ) -> Self {
        let profile = TypewriterProfile::resolve(mode);
        let typewriter = if profile.animate {
            Typewriter::animated(text)
        } else {
            Typewriter::settled(text)
        };

        let core = Rc::new(Core {
            state: RefCell::new(DriverState {
                typewriter,
                start: None,
                reveal: None,
                blink: None,
                retire: None,
            }),
            scheduler,
            timing,
            on_change: Box::new(on_change),
        });

        if profile.animate {
            let weak = Rc::downgrade(&core);
            let handle = core.scheduler.after(timing.start_delay, move || {
                if let Some(core) = weak.upgrade() {
                    begin_reveal(&core);
                }
            });
            core.state.borrow_mut().start = Some(handle);
        }

        Self { core }
    }

    pub fn snapshot(&self) -> Typewriter {
        self.core.state.borrow().typewriter.clone()
    }
}

fn begin_reveal<S: Scheduler>(core: &Rc<Core<S>>) {
    if core.state.borrow().typewriter.total == 0 {
        core.state.borrow_mut().typewriter.reveal_next();
        finish_typing(core);
        notify(core);
        return;
    }

    let weak = Rc::downgrade(core);
    let handle = core.scheduler.every(core.timing.char_interval, move || {
        let Some(core) = weak.upgrade() else {
            return;
        };
        let done = core.state.borrow_mut().typewriter.reveal_next();
        if done {
            finish_typing(&core);
        }
        notify(&core);
    });
    core.state.borrow_mut().reveal = Some(handle);
}

fn finish_typing<S: Scheduler>(core: &Rc<Core<S>>) {
    let blink = {
        let weak: Weak<Core<S>> = Rc::downgrade(core);
        core.scheduler.every(core.timing.blink_interval, move || {
            if let Some(core) = weak.upgrade() {
                core.state.borrow_mut().typewriter.blink();
                notify(&core);
            }
        })
    };

    let retire = {
        let weak: Weak<Core<S>> = Rc::downgrade(core);
        core.scheduler.after(core.timing.cursor_linger, move || {
            let Some(core) = weak.upgrade() else {
                return;
            };
            {
                let mut state = core.state.borrow_mut();
                state.typewriter.retire_cursor();
                state.blink = None;
            }
            notify(&core);
        })
    };

    let mut state = core.state.borrow_mut();
    // Cancelled outside the borrow: the handle may still be mid-tick.
    let finished_reveal = state.reveal.take();
    state.blink = Some(blink);
    state.retire = Some(retire);
    drop(state);
    if let Some(handle) = finished_reveal {
        handle.cancel();
    }
}

fn notify<S: Scheduler>(core: &Rc<Core<S>>) {
    let snapshot = core.state.borrow().typewriter.clone();
    (core.on_change)(snapshot);
}
