//! Unfold Animation System
//!
//! Timing animations over scalar values, driven by a frame scheduler.
//!
//! # Features
//!
//! - **Easing**: the named curve registry plus `In`/`Out`/`InOut` composition,
//!   resolvable from symbolic names such as `"easeOutCubic"`
//! - **Timing**: duration-based animations toward a target value
//! - **Scheduler**: advances every running animation per frame and fires
//!   completion callbacks
//! - **Interruptible**: starting a new animation on a value stops the old one
//! - **Interpolation**: derived values mapped live from an animated source

pub mod easing;
pub mod interpolation;
pub mod scheduler;
pub mod timing;
pub mod value;

pub use easing::{Curve, CustomEasing, Direction, Easing, EasingError, EasingSpec};
pub use interpolation::{AnimatedInterpolation, Extrapolate, Interpolation};
pub use scheduler::{AnimationScheduler, SchedulerHandle, TimingId};
pub use timing::{AnimationOutcome, CompletionCallback, TimingAnimation, TimingConfig};
pub use value::{AnimatedNode, AnimatedScalar, AnimatedValue, AnimationDriver, ValueCell};
