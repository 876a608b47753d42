//! Project carousel: slide index state machine plus the timer driver that
//! runs autoplay, the post-interaction cooldown and transition settling.

use std::{
    cell::RefCell,
    num::NonZeroUsize,
    rc::{Rc, Weak},
    time::Duration,
};

use tracing::{debug, trace};

use crate::{
    mode::PerformanceMode,
    profile::Profile,
    schedule::{Scheduler, TaskHandle},
};

pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(8_000);
pub const RESUME_AFTER: Duration = Duration::from_millis(10_000);
pub const TRANSITION_DURATION: Duration = Duration::from_millis(400);
pub const DRAG_THRESHOLD_PX: f64 = 50.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    Backward,
    #[default]
    None,
    Forward,
}

impl Direction {
    pub fn sign(self) -> i8 {
        match self {
            Self::Backward => -1,
            Self::None => 0,
            Self::Forward => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Autoplaying,
    Paused,
    Transitioning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideRole {
    Outgoing,
    Current,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleSlide {
    pub index: usize,
    pub role: SlideRole,
    /// Stacking order; the incoming slide is always on top.
    pub layer: u8,
}

impl VisibleSlide {
    /// Animation class selecting the enter/exit vector for `direction`.
    pub fn motion_class(&self, direction: Direction) -> &'static str {
        match (self.role, direction) {
            (SlideRole::Current, Direction::None) => "slide-still",
            (SlideRole::Current, Direction::Forward) => "slide-enter-from-right",
            (SlideRole::Current, Direction::Backward) => "slide-enter-from-left",
            (SlideRole::Outgoing, Direction::Backward) => "slide-exit-to-right",
            (SlideRole::Outgoing, _) => "slide-exit-to-left",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Carousel {
    len: NonZeroUsize,
    index: usize,
    direction: Direction,
    paused: bool,
    outgoing: Option<usize>,
}

impl Carousel {
    pub fn new(len: NonZeroUsize) -> Self {
        Self {
            len,
            index: 0,
            direction: Direction::None,
            paused: false,
            outgoing: None,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.len.get()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn phase(&self) -> Phase {
        if self.outgoing.is_some() {
            Phase::Transitioning
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Autoplaying
        }
    }

    pub fn next(&mut self) {
        let target = (self.index + 1) % self.slide_count();
        self.move_to(target, Direction::Forward);
        self.paused = true;
    }

    pub fn previous(&mut self) {
        let target = (self.index + self.slide_count() - 1) % self.slide_count();
        self.move_to(target, Direction::Backward);
        self.paused = true;
    }

    /// Jumps to `index` (taken modulo the slide count). Selecting the slide
    /// already shown changes nothing and returns `false`.
    pub fn select(&mut self, index: usize) -> bool {
        let target = index % self.slide_count();
        if target == self.index {
            return false;
        }

        let direction = if target > self.index {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.move_to(target, direction);
        self.paused = true;
        true
    }

    /// Advances one slide unless a manual interaction paused autoplay.
    pub fn autoplay_tick(&mut self) -> bool {
        if self.paused {
            return false;
        }

        let target = (self.index + 1) % self.slide_count();
        self.move_to(target, Direction::Forward);
        true
    }

    /// Horizontal drag released `offset_px` from where it started. Dragging
    /// the content left reveals the next slide.
    pub fn release_drag(&mut self, offset_px: f64) -> Option<Direction> {
        if !offset_px.is_finite() || offset_px.abs() < DRAG_THRESHOLD_PX {
            return None;
        }

        if offset_px < 0.0 {
            self.next();
            Some(Direction::Forward)
        } else {
            self.previous();
            Some(Direction::Backward)
        }
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Ends the enter/exit animation; only the current slide remains.
    pub fn settle(&mut self) {
        self.outgoing = None;
    }

    pub fn visible_slides(&self) -> Vec<VisibleSlide> {
        let current = VisibleSlide {
            index: self.index,
            role: SlideRole::Current,
            layer: 1,
        };

        match self.outgoing {
            Some(index) => vec![
                VisibleSlide {
                    index,
                    role: SlideRole::Outgoing,
                    layer: 0,
                },
                current,
            ],
            None => vec![current],
        }
    }

    fn move_to(&mut self, target: usize, direction: Direction) {
        let previous = self.index;
        self.index = target;
        self.direction = direction;
        self.outgoing = (previous != target).then_some(previous);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarouselProfile {
    pub autoplay: Option<Duration>,
    pub drag: bool,
    pub transition: Option<Duration>,
}

impl CarouselProfile {
    pub fn slide_style(&self) -> String {
        match self.transition {
            Some(duration) => format!("animation-duration: {}ms;", duration.as_millis()),
            None => "animation: none;".to_string(),
        }
    }
}

impl Profile for CarouselProfile {
    fn resolve(mode: PerformanceMode) -> Self {
        match mode {
            PerformanceMode::Full => Self {
                autoplay: Some(AUTOPLAY_INTERVAL),
                drag: true,
                transition: Some(TRANSITION_DURATION),
            },
            PerformanceMode::Light => Self {
                autoplay: None,
                drag: false,
                transition: None,
            },
        }
    }
}

struct DriverState {
    carousel: Carousel,
    profile: CarouselProfile,
    autoplay: Option<TaskHandle>,
    resume: Option<TaskHandle>,
    settle: Option<TaskHandle>,
}

struct Core<S> {
    state: RefCell<DriverState>,
    scheduler: S,
    on_change: Box<dyn Fn(Carousel)>,
}

/// Runs a [`Carousel`] against a [`Scheduler`].
///
/// Owns every timer it starts. Timer callbacks hold weak references, so
/// dropping the driver cancels autoplay, the cooldown and any pending
/// settle, and nothing fires afterwards.
pub struct CarouselDriver<S: Scheduler> {
    core: Rc<Core<S>>,
}

impl<S: Scheduler> CarouselDriver<S> {
    pub fn new(
        len: NonZeroUsize,
        mode: PerformanceMode,
        scheduler: S,
        on_change: impl Fn(Carousel) + 'static,
    ) -> Self {
        let core = Rc::new(Core {
            state: RefCell::new(DriverState {
                carousel: Carousel::new(len),
                profile: CarouselProfile::resolve(mode),
                autoplay: None,
                resume: None,
                settle: None,
            }),
            scheduler,
            on_change: Box::new(on_change),
        });
        start_autoplay(&core);

        Self { core }
    }

    pub fn snapshot(&self) -> Carousel {
        self.core.state.borrow().carousel.clone()
    }

    /// Applies a new performance mode. Switching to light stops autoplay
    /// and any running transition immediately.
    pub fn set_mode(&self, mode: PerformanceMode) {
        let profile = CarouselProfile::resolve(mode);
        {
            let mut state = self.core.state.borrow_mut();
            if state.profile == profile {
                return;
            }
            state.profile = profile;
            state.autoplay = None;
            if profile.transition.is_none() {
                state.settle = None;
                state.carousel.settle();
            }
        }

        debug!(%mode, "carousel profile changed");
        start_autoplay(&self.core);
        notify(&self.core);
    }

    pub fn next(&self) {
        self.navigate(|carousel| {
            carousel.next();
            true
        });
    }

    pub fn previous(&self) {
        self.navigate(|carousel| {
            carousel.previous();
            true
        });
    }

    pub fn select(&self, index: usize) {
        self.navigate(|carousel| carousel.select(index));
    }

    /// Ignored entirely when the current profile has no drag support.
    pub fn release_drag(&self, offset_px: f64) -> Option<Direction> {
        if !self.core.state.borrow().profile.drag {
            return None;
        }

        let mut moved = None;
        self.navigate(|carousel| {
            moved = carousel.release_drag(offset_px);
            moved.is_some()
        });
        moved
    }

    fn navigate(&self, step: impl FnOnce(&mut Carousel) -> bool) {
        {
            let mut state = self.core.state.borrow_mut();
            if !step(&mut state.carousel) {
                return;
            }
            state.autoplay = None;
        }

        trace!(index = self.snapshot().index(), "carousel moved manually");
        schedule_resume(&self.core);
        begin_transition(&self.core);
        notify(&self.core);
    }
}

fn start_autoplay<S: Scheduler>(core: &Rc<Core<S>>) {
    let (period, paused) = {
        let state = core.state.borrow();
        (state.profile.autoplay, state.carousel.is_paused())
    };
    let Some(period) = period else {
        return;
    };
    if paused {
        return;
    }

    let weak = Rc::downgrade(core);
    let handle = core.scheduler.every(period, move || {
        let Some(core) = weak.upgrade() else {
            return;
        };
        let advanced = core.state.borrow_mut().carousel.autoplay_tick();
        if advanced {
            begin_transition(&core);
            notify(&core);
        }
    });
    core.state.borrow_mut().autoplay = Some(handle);
}

fn schedule_resume<S: Scheduler>(core: &Rc<Core<S>>) {
    let weak: Weak<Core<S>> = Rc::downgrade(core);
    let handle = core.scheduler.after(RESUME_AFTER, move || {
        let Some(core) = weak.upgrade() else {
            return;
        };
        core.state.borrow_mut().carousel.resume();
        debug!("carousel autoplay resumed after cooldown");
        start_autoplay(&core);
        notify(&core);
    });
    // Replacing the slot cancels the previous cooldown.
    core.state.borrow_mut().resume = Some(handle);
}

fn begin_transition<S: Scheduler>(core: &Rc<Core<S>>) {
    let transition = core.state.borrow().profile.transition;
    let Some(duration) = transition else {
        let mut state = core.state.borrow_mut();
        state.settle = None;
        state.carousel.settle();
        return;
    };

    let weak = Rc::downgrade(core);
    let handle = core.scheduler.after(duration, move || {
        let Some(core) = weak.upgrade() else {
            return;
        };
        core.state.borrow_mut().carousel.settle();
        notify(&core);
    });
    core.state.borrow_mut().settle = Some(handle);
}

fn notify<S: Scheduler>(core: &Rc<Core<S>>) {
    let snapshot = core.state.borrow().carousel.clone();
    (core.on_change)(snapshot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::manual::ManualScheduler;
    use std::cell::Cell;

    fn slides(count: usize) -> NonZeroUsize {
        NonZeroUsize::new(count).expect("non-zero slide count")
    }

    fn driver(
        count: usize,
        mode: PerformanceMode,
    ) -> (CarouselDriver<ManualScheduler>, ManualScheduler, Rc<Cell<usize>>) {
        let scheduler = ManualScheduler::new();
        let renders = Rc::new(Cell::new(0));
        let counter = renders.clone();
        let driver = CarouselDriver::new(slides(count), mode, scheduler.clone(), move |_| {
            counter.set(counter.get() + 1)
        });
        (driver, scheduler, renders)
    }

    #[test]
    fn index_stays_in_range_under_mixed_operations() {
        for count in 1..=6 {
            let mut carousel = Carousel::new(slides(count));
            let mut seed: u64 = 0x2545_f491;

            for _ in 0..500 {
                seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                match seed >> 61 {
                    0 | 1 => carousel.next(),
                    2 | 3 => carousel.previous(),
                    4 => {
                        carousel.autoplay_tick();
                    }
                    _ => {
                        carousel.select((seed >> 20) as usize);
                    }
                }
                assert!(carousel.index() < count);
            }
        }
    }

    #[test]
    fn select_lands_on_requested_index() {
        let mut carousel = Carousel::new(slides(5));

        assert!(carousel.select(3));
        assert_eq!(carousel.index(), 3);
        assert_eq!(carousel.direction(), Direction::Forward);

        assert!(carousel.select(1));
        assert_eq!(carousel.index(), 1);
        assert_eq!(carousel.direction().sign(), -1);

        assert!(carousel.select(7));
        assert_eq!(carousel.index(), 2);
    }

    #[test]
    fn selecting_current_slide_is_a_no_op() {
        let mut carousel = Carousel::new(slides(3));

        assert!(!carousel.select(0));
        assert_eq!(carousel.direction(), Direction::None);
        assert!(!carousel.is_paused());
    }

    #[test]
    fn full_lap_of_next_returns_to_start() {
        for start in 0..4 {
            let mut carousel = Carousel::new(slides(4));
            carousel.select(start);

            for _ in 0..4 {
                carousel.next();
            }
            assert_eq!(carousel.index(), start);
        }
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let mut carousel = Carousel::new(slides(3));

        carousel.previous();
        assert_eq!(carousel.index(), 2);
        assert_eq!(carousel.direction(), Direction::Backward);
        assert!(carousel.is_paused());
    }

    #[test]
    fn paused_carousel_ignores_autoplay() {
        let mut carousel = Carousel::new(slides(3));
        carousel.next();

        assert!(!carousel.autoplay_tick());
        assert_eq!(carousel.index(), 1);

        carousel.resume();
        assert!(carousel.autoplay_tick());
        assert_eq!(carousel.index(), 2);
    }

    #[test]
    fn short_drags_are_ignored() {
        let mut carousel = Carousel::new(slides(3));

        assert_eq!(carousel.release_drag(-49.0), None);
        assert_eq!(carousel.release_drag(f64::NAN), None);
        assert_eq!(carousel.index(), 0);

        assert_eq!(carousel.release_drag(-120.0), Some(Direction::Forward));
        assert_eq!(carousel.index(), 1);
        assert_eq!(carousel.release_drag(80.0), Some(Direction::Backward));
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn incoming_slide_is_layered_above_outgoing() {
        let mut carousel = Carousel::new(slides(3));
        carousel.next();

        let visible = carousel.visible_slides();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].role, SlideRole::Outgoing);
        assert_eq!(visible[0].index, 0);
        assert!(visible[1].layer > visible[0].layer);
        assert_eq!(visible[1].motion_class(carousel.direction()), "slide-enter-from-right");
        assert_eq!(visible[0].motion_class(carousel.direction()), "slide-exit-to-left");

        carousel.settle();
        assert_eq!(carousel.visible_slides().len(), 1);
        assert_eq!(carousel.phase(), Phase::Paused);
    }

    #[test]
    fn autoplay_advances_every_interval_in_full_mode() {
        let (driver, scheduler, _) = driver(3, PerformanceMode::Full);

        scheduler.advance(AUTOPLAY_INTERVAL - Duration::from_millis(1));
        assert_eq!(driver.snapshot().index(), 0);

        scheduler.advance_ms(1);
        assert_eq!(driver.snapshot().index(), 1);
        assert_eq!(driver.snapshot().direction(), Direction::Forward);

        scheduler.advance(AUTOPLAY_INTERVAL * 2);
        assert_eq!(driver.snapshot().index(), 0);
    }

    #[test]
    fn light_mode_runs_no_timers() {
        let (driver, scheduler, _) = driver(3, PerformanceMode::Light);
        assert_eq!(scheduler.pending(), 0);

        scheduler.advance(AUTOPLAY_INTERVAL * 5);
        assert_eq!(driver.snapshot().index(), 0);

        driver.next();
        assert_eq!(driver.snapshot().visible_slides().len(), 1);
        assert_eq!(driver.release_drag(-200.0), None);
        assert_eq!(driver.snapshot().index(), 1);
    }

    #[test]
    fn switching_to_light_stops_pending_autoplay() {
        let (driver, scheduler, _) = driver(3, PerformanceMode::Full);

        scheduler.advance_ms(7_999);
        driver.set_mode(PerformanceMode::Light);
        scheduler.advance(AUTOPLAY_INTERVAL * 10);
        assert_eq!(driver.snapshot().index(), 0);

        driver.set_mode(PerformanceMode::Full);
        scheduler.advance(AUTOPLAY_INTERVAL);
        assert_eq!(driver.snapshot().index(), 1);
    }

    #[test]
    fn manual_navigation_pauses_for_cooldown() {
        let (driver, scheduler, _) = driver(4, PerformanceMode::Full);

        driver.next();
        assert_eq!(driver.snapshot().phase(), Phase::Transitioning);

        scheduler.advance(TRANSITION_DURATION);
        assert_eq!(driver.snapshot().phase(), Phase::Paused);

        scheduler.advance(RESUME_AFTER - TRANSITION_DURATION - Duration::from_millis(1));
        assert_eq!(driver.snapshot().index(), 1);
        assert!(driver.snapshot().is_paused());

        scheduler.advance_ms(1);
        assert!(!driver.snapshot().is_paused());

        scheduler.advance(AUTOPLAY_INTERVAL);
        assert_eq!(driver.snapshot().index(), 2);
    }

    #[test]
    fn repeated_interaction_restarts_cooldown() {
        let (driver, scheduler, _) = driver(5, PerformanceMode::Full);

        driver.next();
        scheduler.advance_ms(9_000);
        driver.select(4);
        scheduler.advance_ms(9_000);
        assert!(driver.snapshot().is_paused());

        scheduler.advance_ms(1_000);
        assert!(!driver.snapshot().is_paused());
        assert_eq!(driver.snapshot().index(), 4);
    }

    #[test]
    fn drag_in_full_mode_navigates_and_pauses() {
        let (driver, _scheduler, renders) = driver(3, PerformanceMode::Full);

        assert_eq!(driver.release_drag(10.0), None);
        assert_eq!(renders.get(), 0);

        assert_eq!(driver.release_drag(75.0), Some(Direction::Backward));
        assert_eq!(driver.snapshot().index(), 2);
        assert!(driver.snapshot().is_paused());
        assert_eq!(renders.get(), 1);
    }

    #[test]
    fn dropping_driver_cancels_every_timer() {
        let (driver, scheduler, renders) = driver(3, PerformanceMode::Full);
        driver.next();
        assert!(scheduler.pending() > 0);

        drop(driver);
        assert_eq!(scheduler.pending(), 0);

        let before = renders.get();
        scheduler.advance(RESUME_AFTER + AUTOPLAY_INTERVAL * 3);
        assert_eq!(renders.get(), before);
    }
}
