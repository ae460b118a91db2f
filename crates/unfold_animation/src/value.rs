//! Animated scalar values
//!
//! [`AnimatedScalar`] is the capability widgets program against: start,
//! stop, read and interpolate a value that changes over time. The
//! scheduler-backed [`AnimatedValue`] is the production implementation;
//! tests can drive widgets with their own.

use crate::interpolation::{AnimatedInterpolation, Interpolation};
use crate::scheduler::{SchedulerHandle, TimingId};
use crate::timing::{AnimationOutcome, CompletionCallback, TimingAnimation, TimingConfig};
use std::cell::Cell;
use std::rc::Rc;

/// Something whose current value can be bound to a style property
pub trait AnimatedNode {
    fn current(&self) -> f32;
}

/// Shared storage for an animated scalar
///
/// The animation writes into it; bindings and interpolations read from it.
#[derive(Clone, Debug, Default)]
pub struct ValueCell(Rc<Cell<f32>>);

impl ValueCell {
    pub fn new(value: f32) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    pub fn get(&self) -> f32 {
        self.0.get()
    }

    pub fn set(&self, value: f32) {
        self.0.set(value);
    }

    /// Whether two cells are the same storage
    pub fn ptr_eq(&self, other: &ValueCell) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl AnimatedNode for ValueCell {
    fn current(&self) -> f32 {
        self.get()
    }
}

/// A scalar that can be animated toward a target
pub trait AnimatedScalar {
    /// Current value
    fn value(&self) -> f32;

    /// The storage this value writes into
    fn source(&self) -> ValueCell;

    /// Animate toward `to`, stopping whatever was running first
    ///
    /// `on_complete` fires once: with [`AnimationOutcome::Finished`] when
    /// the target is reached, or [`AnimationOutcome::Interrupted`] when a
    /// later `stop`/`start` cuts it short.
    fn start(&mut self, to: f32, config: TimingConfig, on_complete: Option<CompletionCallback>);

    /// Stop the running animation where it is
    fn stop(&mut self);

    fn is_animating(&self) -> bool;

    /// Jump to `value` without animating
    fn set_value(&mut self, value: f32) {
        self.stop();
        self.source().set(value);
    }

    /// A derived value that maps this one through `interpolation`
    fn interpolate(&self, interpolation: Interpolation) -> AnimatedInterpolation {
        AnimatedInterpolation::new(self.source(), interpolation)
    }
}

/// Creates animated scalars
pub trait AnimationDriver {
    type Value: AnimatedScalar;

    fn create_value(&self, initial: f32) -> Self::Value;
}

/// A scheduler-driven animated value
pub struct AnimatedValue {
    cell: ValueCell,
    scheduler: SchedulerHandle,
    active: Option<TimingId>,
}

impl AnimatedValue {
    pub fn new(scheduler: SchedulerHandle, initial: f32) -> Self {
        Self {
            cell: ValueCell::new(initial),
            scheduler,
            active: None,
        }
    }

    /// Target of the running animation, if any
    pub fn target(&self) -> Option<f32> {
        let id = self.active?;
        self.scheduler
            .with_scheduler(|s| s.get_timing(id).map(|t| t.to_value()))
    }
}

impl AnimatedScalar for AnimatedValue {
    fn value(&self) -> f32 {
        self.cell.get()
    }

    fn source(&self) -> ValueCell {
        self.cell.clone()
    }

    fn start(&mut self, to: f32, config: TimingConfig, on_complete: Option<CompletionCallback>) {
        self.stop();

        if config.duration_ms == 0 {
            self.cell.set(to);
            if let Some(callback) = on_complete {
                callback(AnimationOutcome::Finished);
            }
            return;
        }

        let timing = TimingAnimation::new(self.cell.clone(), to, config, on_complete);
        self.active = Some(self.scheduler.insert(timing));
    }

    fn stop(&mut self) {
        let Some(id) = self.active.take() else {
            return;
        };
        if let Some(Some(callback)) = self.scheduler.cancel(id) {
            callback(AnimationOutcome::Interrupted);
        }
    }

    fn is_animating(&self) -> bool {
        self.active
            .map(|id| self.scheduler.is_running(id))
            .unwrap_or(false)
    }
}

impl Drop for AnimatedValue {
    fn drop(&mut self) {
        // An orphaned timing would keep writing into a cell nobody reads
        if let Some(id) = self.active.take() {
            let _ = self.scheduler.cancel(id);
        }
    }
}

impl std::fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("value", &self.cell.get())
            .field("animating", &self.is_animating())
            .finish()
    }
}

impl AnimationDriver for SchedulerHandle {
    type Value = AnimatedValue;

    fn create_value(&self, initial: f32) -> AnimatedValue {
        AnimatedValue::new(self.clone(), initial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use std::cell::RefCell;

    fn linear(ms: u32) -> TimingConfig {
        TimingConfig::new(ms, Easing::LINEAR)
    }

    #[test]
    fn test_start_runs_to_target() {
        let scheduler = SchedulerHandle::new();
        let mut value = scheduler.create_value(0.0);

        value.start(100.0, linear(100), None);
        assert!(value.is_animating());
        assert_eq!(value.target(), Some(100.0));

        scheduler.tick(40.0);
        assert!((value.value() - 40.0).abs() < 1e-4);

        scheduler.tick(60.0);
        assert_eq!(value.value(), 100.0);
        assert!(!value.is_animating());
        assert_eq!(value.target(), None);
    }

    #[test]
    fn test_restart_interrupts_previous() {
        let scheduler = SchedulerHandle::new();
        let mut value = scheduler.create_value(0.0);
        let outcomes = Rc::new(RefCell::new(Vec::new()));

        let log = outcomes.clone();
        value.start(100.0, linear(100), Some(Box::new(move |o| log.borrow_mut().push(("first", o)))));
        scheduler.tick(50.0);

        let log = outcomes.clone();
        value.start(0.0, linear(100), Some(Box::new(move |o| log.borrow_mut().push(("second", o)))));
        assert_eq!(scheduler.animation_count(), 1);
        assert_eq!(
            outcomes.borrow().as_slice(),
            &[("first", AnimationOutcome::Interrupted)]
        );

        // Second animation starts from where the first was cut off
        scheduler.tick(50.0);
        assert!((value.value() - 25.0).abs() < 1e-4);
        scheduler.tick(50.0);
        assert_eq!(value.value(), 0.0);
        assert_eq!(
            outcomes.borrow().last(),
            Some(&("second", AnimationOutcome::Finished))
        );
    }

    #[test]
    fn test_stop_without_animation_is_noop() {
        let scheduler = SchedulerHandle::new();
        let mut value = scheduler.create_value(3.0);
        value.stop();
        assert_eq!(value.value(), 3.0);
    }

    #[test]
    fn test_zero_duration_completes_synchronously() {
        let scheduler = SchedulerHandle::new();
        let mut value = scheduler.create_value(0.0);
        let finished = Rc::new(Cell::new(false));
        let flag = finished.clone();

        value.start(5.0, linear(0), Some(Box::new(move |o| flag.set(o.is_finished()))));
        assert_eq!(value.value(), 5.0);
        assert!(finished.get());
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_drop_cancels_timing() {
        let scheduler = SchedulerHandle::new();
        {
            let mut value = scheduler.create_value(0.0);
            value.start(1.0, linear(100), None);
            assert_eq!(scheduler.animation_count(), 1);
        }
        assert_eq!(scheduler.animation_count(), 0);
    }

    #[test]
    fn test_interpolate_tracks_value() {
        let scheduler = SchedulerHandle::new();
        let mut value = scheduler.create_value(0.0);
        let offset = value.interpolate(Interpolation::new((0.0, 100.0), (-100.0, 0.0)));

        value.set_value(100.0);
        assert_eq!(offset.current(), 0.0);
        value.set_value(50.0);
        assert_eq!(offset.current(), -50.0);
    }
}
