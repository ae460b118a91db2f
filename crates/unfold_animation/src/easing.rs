//! Easing functions for animations
//!
//! Curves come from a small named registry (`linear`, `quad`, `cubic`, ...)
//! and can be composed with a [`Direction`]. Symbolic names such as
//! `"easeOutCubic"` are parsed into that structured form by
//! [`EasingSpec::resolve`], so nothing downstream ever deals with strings.

use serde::Deserialize;
use std::f32::consts::PI;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Direction prefixes, in match order. `easeInOut` must come before
/// `easeIn` and `easeOut` since it starts with both.
const DIRECTION_PREFIXES: [(&str, Direction); 3] = [
    ("easeInOut", Direction::InOut),
    ("easeOut", Direction::Out),
    ("easeIn", Direction::In),
];

/// Curve used when a direction prefix has no remainder (`"easeIn"`)
const DEFAULT_CURVE_NAME: &str = "ease";

/// Default easing for collapsing transitions
pub const DEFAULT_EASING: &str = "easeOutCubic";

/// Errors raised while resolving an easing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EasingError {
    #[error("Invalid easing type \"{spec}\"")]
    InvalidEasing { spec: String },
}

/// Base curve shapes, as found in the easing registry
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
    /// 0 until any progress, then 1
    Step0,
    /// 0 until complete, then 1
    Step1,
    Linear,
    /// Cubic bezier (0.42, 0, 1, 1)
    Ease,
    Quad,
    Cubic,
    /// `t^n`
    Poly(i32),
    Sin,
    Circle,
    Exp,
    /// Spring-like oscillation with the given bounciness
    Elastic(f32),
    /// Overshoot with the given strength
    Back(f32),
    Bounce,
    Bezier(f32, f32, f32, f32),
}

impl Curve {
    /// Look a curve up by its registry name
    ///
    /// Parameterised curves resolve with their default parameters.
    pub fn from_name(name: &str) -> Option<Curve> {
        let curve = match name {
            "step0" => Curve::Step0,
            "step1" => Curve::Step1,
            "linear" => Curve::Linear,
            "ease" => Curve::Ease,
            "quad" => Curve::Quad,
            "cubic" => Curve::Cubic,
            "sin" => Curve::Sin,
            "circle" => Curve::Circle,
            "exp" => Curve::Exp,
            "elastic" => Curve::Elastic(1.0),
            "back" => Curve::Back(1.70158),
            "bounce" => Curve::Bounce,
            _ => return None,
        };
        Some(curve)
    }

    /// Registry name of this curve
    pub fn name(&self) -> &'static str {
        match self {
            Curve::Step0 => "step0",
            Curve::Step1 => "step1",
            Curve::Linear => "linear",
            Curve::Ease => "ease",
            Curve::Quad => "quad",
            Curve::Cubic => "cubic",
            Curve::Poly(_) => "poly",
            Curve::Sin => "sin",
            Curve::Circle => "circle",
            Curve::Exp => "exp",
            Curve::Elastic(_) => "elastic",
            Curve::Back(_) => "back",
            Curve::Bounce => "bounce",
            Curve::Bezier(..) => "bezier",
        }
    }

    /// Apply the curve to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match *self {
            Curve::Step0 => {
                if t > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Curve::Step1 => {
                if t >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Curve::Linear => t,
            Curve::Ease => cubic_bezier_ease(t, 0.42, 0.0, 1.0, 1.0),
            Curve::Quad => t * t,
            Curve::Cubic => t * t * t,
            Curve::Poly(n) => t.powi(n),
            Curve::Sin => 1.0 - (t * PI / 2.0).cos(),
            Curve::Circle => 1.0 - (1.0 - t * t).sqrt(),
            Curve::Exp => 2.0_f32.powf(10.0 * (t - 1.0)),
            Curve::Elastic(bounciness) => {
                let p = bounciness * PI;
                1.0 - (t * PI / 2.0).cos().powi(3) * (t * p).cos()
            }
            Curve::Back(s) => t * t * ((s + 1.0) * t - s),
            Curve::Bounce => bounce(t),
            Curve::Bezier(x1, y1, x2, y2) => cubic_bezier_ease(t, x1, y1, x2, y2),
        }
    }
}

/// How a base curve is oriented in time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Runs the curve forwards
    In,
    /// Runs the curve backwards
    Out,
    /// Forwards for the first half, backwards for the second
    InOut,
}

impl Direction {
    /// Compose this direction with a base curve at progress `t`
    pub fn apply(self, curve: impl Fn(f32) -> f32, t: f32) -> f32 {
        match self {
            Direction::In => curve(t),
            Direction::Out => 1.0 - curve(1.0 - t),
            Direction::InOut => {
                if t < 0.5 {
                    curve(t * 2.0) / 2.0
                } else {
                    1.0 - curve((1.0 - t) * 2.0) / 2.0
                }
            }
        }
    }
}

/// An opaque, caller-provided easing function
#[derive(Clone)]
pub struct CustomEasing(Arc<dyn Fn(f32) -> f32 + Send + Sync>);

impl CustomEasing {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn apply(&self, t: f32) -> f32 {
        (self.0)(t)
    }
}

impl fmt::Debug for CustomEasing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomEasing(..)")
    }
}

impl PartialEq for CustomEasing {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A resolved easing, ready for the animation engine
#[derive(Clone, Debug, PartialEq)]
pub enum Easing {
    Curve {
        direction: Option<Direction>,
        curve: Curve,
    },
    Custom(CustomEasing),
}

impl Easing {
    pub const LINEAR: Easing = Easing::Curve {
        direction: None,
        curve: Curve::Linear,
    };

    /// A base curve composed with a direction
    pub fn directed(direction: Direction, curve: Curve) -> Self {
        Easing::Curve {
            direction: Some(direction),
            curve,
        }
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Curve {
                direction: Some(direction),
                curve,
            } => direction.apply(|x| curve.apply(x), t),
            Easing::Curve {
                direction: None,
                curve,
            } => curve.apply(t),
            Easing::Custom(custom) => custom.apply(t),
        }
    }

    /// Direction component, if this is a directed curve
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Easing::Curve { direction, .. } => *direction,
            Easing::Custom(_) => None,
        }
    }

    /// Base curve, unless this is a custom function
    pub fn curve(&self) -> Option<Curve> {
        match self {
            Easing::Curve { curve, .. } => Some(*curve),
            Easing::Custom(_) => None,
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::directed(Direction::Out, Curve::Cubic)
    }
}

impl From<Curve> for Easing {
    fn from(curve: Curve) -> Self {
        Easing::Curve {
            direction: None,
            curve,
        }
    }
}

/// Easing as it appears in configuration: a symbolic name or a function
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "String")]
pub enum EasingSpec {
    Named(String),
    Custom(CustomEasing),
}

impl EasingSpec {
    pub fn named(name: impl Into<String>) -> Self {
        EasingSpec::Named(name.into())
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        EasingSpec::Custom(CustomEasing::new(f))
    }

    /// Resolve into a concrete easing
    ///
    /// Custom functions pass through untouched. Names are matched against the
    /// direction prefixes first, then looked up whole in the curve registry.
    pub fn resolve(&self) -> Result<Easing, EasingError> {
        match self {
            EasingSpec::Custom(custom) => Ok(Easing::Custom(custom.clone())),
            EasingSpec::Named(name) => resolve_name(name),
        }
    }
}

impl Default for EasingSpec {
    fn default() -> Self {
        EasingSpec::Named(DEFAULT_EASING.to_string())
    }
}

impl From<String> for EasingSpec {
    fn from(name: String) -> Self {
        EasingSpec::Named(name)
    }
}

impl From<&str> for EasingSpec {
    fn from(name: &str) -> Self {
        EasingSpec::Named(name.to_string())
    }
}

impl From<CustomEasing> for EasingSpec {
    fn from(custom: CustomEasing) -> Self {
        EasingSpec::Custom(custom)
    }
}

fn resolve_name(name: &str) -> Result<Easing, EasingError> {
    let invalid = || EasingError::InvalidEasing {
        spec: name.to_string(),
    };

    for (prefix, direction) in DIRECTION_PREFIXES {
        if let Some(rest) = name.strip_prefix(prefix) {
            let curve_name = if rest.is_empty() {
                DEFAULT_CURVE_NAME.to_string()
            } else {
                lowercase_first(rest)
            };
            let curve = Curve::from_name(&curve_name).ok_or_else(invalid)?;
            return Ok(Easing::directed(direction, curve));
        }
    }

    Curve::from_name(name).map(Easing::from).ok_or_else(invalid)
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn bounce(t: f32) -> f32 {
    if t < 1.0 / 2.75 {
        return 7.5625 * t * t;
    }
    if t < 2.0 / 2.75 {
        let t2 = t - 1.5 / 2.75;
        return 7.5625 * t2 * t2 + 0.75;
    }
    if t < 2.5 / 2.75 {
        let t2 = t - 2.25 / 2.75;
        return 7.5625 * t2 * t2 + 0.9375;
    }
    let t2 = t - 2.625 / 2.75;
    7.5625 * t2 * t2 + 0.984375
}

/// Cubic bezier easing calculation (same curve as CSS `cubic-bezier()`).
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
/// Computes in f64 internally to avoid f32 precision jitter.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Endpoints are always exact
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    // Binary search fallback (always converges)
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2) as f32
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³, in Horner form
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_ease_out_cubic_decomposes() {
        let easing = EasingSpec::named("easeOutCubic").resolve().unwrap();
        assert_eq!(easing.direction(), Some(Direction::Out));
        assert_eq!(easing.curve(), Some(Curve::Cubic));
    }

    #[test]
    fn test_in_out_matched_before_in_and_out() {
        let easing = EasingSpec::named("easeInOutQuad").resolve().unwrap();
        assert_eq!(easing.direction(), Some(Direction::InOut));
        assert_eq!(easing.curve(), Some(Curve::Quad));

        let easing = EasingSpec::named("easeInQuad").resolve().unwrap();
        assert_eq!(easing.direction(), Some(Direction::In));
    }

    #[test]
    fn test_bare_prefix_defaults_to_ease() {
        let easing = EasingSpec::named("easeIn").resolve().unwrap();
        assert_eq!(easing, Easing::directed(Direction::In, Curve::Ease));

        let easing = EasingSpec::named("easeInOut").resolve().unwrap();
        assert_eq!(easing, Easing::directed(Direction::InOut, Curve::Ease));
    }

    #[test]
    fn test_direct_lookup_without_prefix() {
        let easing = EasingSpec::named("linear").resolve().unwrap();
        assert_eq!(easing.direction(), None);
        assert_eq!(easing.curve(), Some(Curve::Linear));

        let easing = EasingSpec::named("bounce").resolve().unwrap();
        assert_eq!(easing.curve(), Some(Curve::Bounce));
    }

    #[test]
    fn test_unknown_name_is_invalid() {
        let err = EasingSpec::named("bogusName").resolve().unwrap_err();
        assert_eq!(
            err,
            EasingError::InvalidEasing {
                spec: "bogusName".to_string()
            }
        );
        assert_eq!(err.to_string(), "Invalid easing type \"bogusName\"");
    }

    #[test]
    fn test_unknown_curve_after_prefix_is_invalid() {
        let err = EasingSpec::named("easeOutWobble").resolve().unwrap_err();
        assert_eq!(
            err,
            EasingError::InvalidEasing {
                spec: "easeOutWobble".to_string()
            }
        );
    }

    #[test]
    fn test_custom_passes_through() {
        let custom = CustomEasing::new(|t| t * 0.5);
        let easing = EasingSpec::Custom(custom.clone()).resolve().unwrap();
        assert_eq!(easing, Easing::Custom(custom));
        assert!(approx(easing.apply(1.0), 0.5));
    }

    #[test]
    fn test_directions_hit_endpoints() {
        for direction in [Direction::In, Direction::Out, Direction::InOut] {
            let easing = Easing::directed(direction, Curve::Cubic);
            assert!(approx(easing.apply(0.0), 0.0));
            assert!(approx(easing.apply(1.0), 1.0));
        }
    }

    #[test]
    fn test_out_cubic_matches_closed_form() {
        let easing = Easing::default();
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!(approx(easing.apply(t), 1.0 - (1.0 - t).powi(3)));
        }
    }

    #[test]
    fn test_in_out_is_symmetric() {
        let easing = Easing::directed(Direction::InOut, Curve::Quad);
        assert!(approx(easing.apply(0.5), 0.5));
        assert!(approx(easing.apply(0.25) + easing.apply(0.75), 1.0));
    }

    #[test]
    fn test_bounce_lands_on_one() {
        assert!(approx(Curve::Bounce.apply(1.0), 1.0));
        assert!(approx(Curve::Bounce.apply(0.0), 0.0));
    }

    #[test]
    fn test_ease_curve_midpoint() {
        // cubic-bezier(.42, 0, 1, 1) at x = 0.5
        assert!((Curve::Ease.apply(0.5) - 0.3154).abs() < 1e-3);
        assert!(Curve::Ease.apply(0.25) < Curve::Ease.apply(0.5));
    }

    #[test]
    fn test_bezier_symmetric_and_diagonal_curves() {
        assert!(approx(Curve::Bezier(0.42, 0.0, 0.58, 1.0).apply(0.5), 0.5));

        // Control points on the diagonal give the identity
        let diagonal = Curve::Bezier(0.25, 0.25, 0.75, 0.75);
        for t in [0.1, 0.3, 0.6, 0.9] {
            assert!(approx(diagonal.apply(t), t));
        }
    }

    #[test]
    fn test_named_easing_deserializes_from_string() {
        let spec: EasingSpec = serde_json::from_str("\"easeInOutCubic\"").unwrap();
        assert_eq!(spec, EasingSpec::named("easeInOutCubic"));
    }
}
