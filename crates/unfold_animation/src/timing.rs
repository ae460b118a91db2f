//! Duration-based animations toward a target value

use crate::easing::Easing;
use crate::value::ValueCell;

/// How an animation ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// Ran for its full duration
    Finished,
    /// Stopped before reaching the target
    Interrupted,
}

impl AnimationOutcome {
    pub fn is_finished(self) -> bool {
        self == AnimationOutcome::Finished
    }
}

/// Called once when an animation ends, either way
pub type CompletionCallback = Box<dyn FnOnce(AnimationOutcome)>;

/// Duration and easing of a timing animation
#[derive(Clone, Debug, PartialEq)]
pub struct TimingConfig {
    pub duration_ms: u32,
    pub easing: Easing,
}

impl TimingConfig {
    pub fn new(duration_ms: u32, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::new(300, Easing::default())
    }
}

/// A running animation from the value's position at start toward `to`
pub struct TimingAnimation {
    target: ValueCell,
    from: f32,
    to: f32,
    config: TimingConfig,
    elapsed_ms: f32,
    on_complete: Option<CompletionCallback>,
}

impl TimingAnimation {
    pub fn new(
        target: ValueCell,
        to: f32,
        config: TimingConfig,
        on_complete: Option<CompletionCallback>,
    ) -> Self {
        let from = target.get();
        Self {
            target,
            from,
            to,
            config,
            elapsed_ms: 0.0,
            on_complete,
        }
    }

    pub fn to_value(&self) -> f32 {
        self.to
    }

    pub fn from_value(&self) -> f32 {
        self.from
    }

    pub fn progress(&self) -> f32 {
        if self.config.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms / self.config.duration_ms as f32).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed_ms >= self.config.duration_ms as f32
    }

    /// Advance by `dt_ms` and write the new value to the target
    ///
    /// Returns true once the animation has reached `to`. The final frame
    /// writes `to` exactly, without going through the easing.
    pub fn step(&mut self, dt_ms: f32) -> bool {
        self.elapsed_ms += dt_ms;

        if self.is_complete() {
            self.elapsed_ms = self.config.duration_ms as f32;
            self.target.set(self.to);
            return true;
        }

        let eased = self.config.easing.apply(self.progress());
        self.target.set(self.from + (self.to - self.from) * eased);
        false
    }

    /// Detach the completion callback, if it hasn't been taken yet
    pub fn take_callback(&mut self) -> Option<CompletionCallback> {
        self.on_complete.take()
    }
}

impl std::fmt::Debug for TimingAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimingAnimation")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration_ms", &self.config.duration_ms)
            .field("elapsed_ms", &self.elapsed_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_steps() {
        let cell = ValueCell::new(0.0);
        let mut anim = TimingAnimation::new(
            cell.clone(),
            100.0,
            TimingConfig::new(100, Easing::LINEAR),
            None,
        );

        assert!(!anim.step(25.0));
        assert!((cell.get() - 25.0).abs() < 1e-4);
        assert!(!anim.step(50.0));
        assert!((cell.get() - 75.0).abs() < 1e-4);
        assert!(anim.step(50.0));
        assert_eq!(cell.get(), 100.0);
        assert_eq!(anim.progress(), 1.0);
    }

    #[test]
    fn test_starts_from_current_value() {
        let cell = ValueCell::new(40.0);
        let anim = TimingAnimation::new(cell, 0.0, TimingConfig::default(), None);
        assert_eq!(anim.from_value(), 40.0);
        assert_eq!(anim.to_value(), 0.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let cell = ValueCell::new(0.0);
        let mut anim = TimingAnimation::new(
            cell.clone(),
            10.0,
            TimingConfig::new(0, Easing::LINEAR),
            None,
        );
        assert!(anim.is_complete());
        assert!(anim.step(0.0));
        assert_eq!(cell.get(), 10.0);
    }
}
