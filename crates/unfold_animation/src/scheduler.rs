//! Animation scheduler
//!
//! Manages all active timing animations and updates them each frame.

use crate::timing::{AnimationOutcome, CompletionCallback, TimingAnimation};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

new_key_type! {
    pub struct TimingId;
}

/// Callbacks released by a frame, invoked after the scheduler is unborrowed
type Completions = SmallVec<[CompletionCallback; 4]>;

/// The animation scheduler that ticks all active animations
pub struct AnimationScheduler {
    timings: SlotMap<TimingId, TimingAnimation>,
    last_frame: Instant,
    elapsed_ms: f64,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            timings: SlotMap::with_key(),
            last_frame: Instant::now(),
            elapsed_ms: 0.0,
        }
    }

    pub fn add_timing(&mut self, timing: TimingAnimation) -> TimingId {
        self.timings.insert(timing)
    }

    pub fn get_timing(&self, id: TimingId) -> Option<&TimingAnimation> {
        self.timings.get(id)
    }

    pub fn remove_timing(&mut self, id: TimingId) -> Option<TimingAnimation> {
        self.timings.remove(id)
    }

    pub fn contains(&self, id: TimingId) -> bool {
        self.timings.contains_key(id)
    }

    /// Advance every timing by `dt_ms`, returning callbacks of the ones
    /// that finished this frame
    fn advance(&mut self, dt_ms: f32) -> Completions {
        self.elapsed_ms += dt_ms as f64;

        let mut finished: SmallVec<[TimingId; 4]> = SmallVec::new();
        for (id, timing) in self.timings.iter_mut() {
            if timing.step(dt_ms) {
                finished.push(id);
            }
        }

        finished
            .into_iter()
            .filter_map(|id| self.timings.remove(id))
            .filter_map(|mut timing| timing.take_callback())
            .collect()
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        !self.timings.is_empty()
    }

    /// Get the number of timings in the scheduler
    pub fn animation_count(&self) -> usize {
        self.timings.len()
    }

    /// Total time advanced since creation
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to a scheduler
///
/// Everything runs on the UI thread, so sharing is `Rc<RefCell<_>>`.
/// Completion callbacks are always invoked with the scheduler unborrowed,
/// which lets them start or stop other animations.
#[derive(Clone, Default)]
pub struct SchedulerHandle {
    inner: Rc<RefCell<AnimationScheduler>>,
}

impl SchedulerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all animations by `dt_ms` milliseconds
    pub fn tick(&self, dt_ms: f32) {
        let completions = self.inner.borrow_mut().advance(dt_ms);
        if !completions.is_empty() {
            tracing::trace!(count = completions.len(), "animations finished");
        }
        for callback in completions {
            callback(AnimationOutcome::Finished);
        }
    }

    /// Advance all animations by the wall-clock time since the last frame
    pub fn tick_frame(&self) {
        let dt_ms = {
            let mut scheduler = self.inner.borrow_mut();
            let now = Instant::now();
            let dt = (now - scheduler.last_frame).as_secs_f32() * 1000.0;
            scheduler.last_frame = now;
            dt
        };
        self.tick(dt_ms);
    }

    pub(crate) fn insert(&self, timing: TimingAnimation) -> TimingId {
        self.inner.borrow_mut().add_timing(timing)
    }

    /// Remove a running timing, handing back its completion callback
    ///
    /// Returns `None` if the timing already finished or was cancelled.
    pub fn cancel(&self, id: TimingId) -> Option<Option<CompletionCallback>> {
        let removed = self.inner.borrow_mut().remove_timing(id);
        removed.map(|mut timing| timing.take_callback())
    }

    pub fn is_running(&self, id: TimingId) -> bool {
        self.inner.borrow().contains(id)
    }

    pub fn has_active_animations(&self) -> bool {
        self.inner.borrow().has_active_animations()
    }

    pub fn animation_count(&self) -> usize {
        self.inner.borrow().animation_count()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.inner.borrow().elapsed_ms()
    }

    /// Read-only access to the scheduler
    pub fn with_scheduler<R>(&self, f: impl FnOnce(&AnimationScheduler) -> R) -> R {
        f(&self.inner.borrow())
    }
}
