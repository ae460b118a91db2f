//! Collapsible container
//!
//! Animates its height between [`ALMOST_ZERO`] and the measured height of
//! its content. The height is a single animated value; a transition toward
//! the target for the current `collapsed` flag is started whenever the flag
//! changes, interrupting any transition still in flight.
//!
//! Content height comes from layout events on the content wrapper. Those
//! are ignored while a transition runs, since the transition itself moves
//! the layout; outside a transition a measurement replaces the animated
//! value with a fresh one at the right height, without animating.
//!
//! # Example
//!
//! ```ignore
//! use unfold_widgets::prelude::*;
//!
//! let scheduler = SchedulerHandle::new();
//! let mut details = Collapsible::new(scheduler.clone(), CollapsibleConfig::default())?;
//!
//! let tree = details.render(text("Hidden until expanded"));
//! details.apply_layout(&compute_layout(&tree)?);
//!
//! details.set_collapsed(false)?;
//! scheduler.tick(16.0);
//! ```

use crate::config::{Align, CollapsibleConfig};
use crate::error::Result;
use std::cell::Cell;
use std::rc::Rc;
use unfold_animation::{
    AnimatedInterpolation, AnimatedNode, AnimatedScalar, AnimationDriver, Interpolation,
    SchedulerHandle, TimingConfig,
};
use unfold_layout::{view, LayoutKey, LayoutReport, PointerEvents, StyleValue, View};

/// Height used instead of 0 for a fully collapsed container; some hosts
/// measure a zero-height clipped view incorrectly.
pub const ALMOST_ZERO: f32 = 0.000_000_01;

/// A container whose height animates open and closed
pub struct Collapsible<D: AnimationDriver = SchedulerHandle> {
    driver: D,
    config: CollapsibleConfig,
    height: D::Value,
    content_height: f32,
    animating: Rc<Cell<bool>>,
    layout_key: LayoutKey,
}

impl<D: AnimationDriver> Collapsible<D> {
    /// Create a collapsible
    ///
    /// The height starts at `ALMOST_ZERO` with no content measured yet; the
    /// first layout pass brings an expanded collapsible to full height.
    /// Fails if the configured easing does not resolve.
    pub fn new(driver: D, config: CollapsibleConfig) -> Result<Self> {
        config.resolve_easing()?;
        let height = driver.create_value(ALMOST_ZERO);
        Ok(Self {
            driver,
            config,
            height,
            content_height: 0.0,
            animating: Rc::new(Cell::new(false)),
            layout_key: LayoutKey::next(),
        })
    }

    pub fn config(&self) -> &CollapsibleConfig {
        &self.config
    }

    pub fn is_collapsed(&self) -> bool {
        self.config.collapsed
    }

    /// True between the start of a transition and its natural completion
    pub fn is_animating(&self) -> bool {
        self.animating.get()
    }

    /// Last accepted content measurement
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Current container height
    pub fn height(&self) -> f32 {
        self.height.value()
    }

    pub fn animated_height(&self) -> &D::Value {
        &self.height
    }

    /// Height the container settles at for the current flag
    pub fn target_height(&self) -> f32 {
        if self.config.collapsed {
            ALMOST_ZERO
        } else {
            self.content_height
        }
    }

    /// Key of the content wrapper's layout events
    pub fn layout_key(&self) -> LayoutKey {
        self.layout_key
    }

    /// Start a transition toward the target for `collapsed`
    ///
    /// Callers invoke this when the flag changes; calling it again with the
    /// same flag restarts a transition toward the same target. A transition
    /// still in flight is stopped first.
    pub fn set_collapsed(&mut self, collapsed: bool) -> Result<()> {
        let easing = self.config.resolve_easing()?;

        self.config.collapsed = collapsed;
        let target = self.target_height();
        tracing::debug!(
            collapsed,
            from = self.height.value(),
            target,
            duration_ms = self.config.duration,
            "collapsible transition"
        );

        self.height.stop();
        self.animating.set(true);

        let animating = Rc::clone(&self.animating);
        self.height.start(
            target,
            TimingConfig::new(self.config.duration, easing),
            Some(Box::new(move |outcome| {
                if outcome.is_finished() {
                    animating.set(false);
                }
            })),
        );
        Ok(())
    }

    /// Replace the configuration
    ///
    /// A change of `collapsed` starts a transition; other fields apply to
    /// the next transition.
    pub fn update(&mut self, config: CollapsibleConfig) -> Result<()> {
        config.resolve_easing()?;

        let next = config.collapsed;
        let changed = next != self.config.collapsed;
        self.config = CollapsibleConfig {
            collapsed: self.config.collapsed,
            ..config
        };

        if changed {
            self.set_collapsed(next)?;
        }
        Ok(())
    }

    /// Layout callback for the content wrapper
    ///
    /// Returns whether the measurement was applied.
    pub fn on_content_measured(&mut self, height: f32) -> bool {
        if self.animating.get() {
            tracing::trace!(height, "ignoring content measurement during transition");
            return false;
        }

        self.content_height = height;
        self.height = self.driver.create_value(self.target_height());
        tracing::trace!(height, collapsed = self.config.collapsed, "content measured");
        true
    }

    /// Deliver this collapsible's event from a layout pass, if present
    pub fn apply_layout(&mut self, report: &LayoutReport) -> bool {
        match report.event_for(self.layout_key) {
            Some(event) => self.on_content_measured(event.height),
            None => false,
        }
    }

    /// Collapsed containers never take touches, even mid-transition
    pub fn pointer_events(&self) -> PointerEvents {
        if self.config.collapsed {
            PointerEvents::None
        } else {
            PointerEvents::Auto
        }
    }

    /// Vertical offset of the content, bound to the animated height
    ///
    /// `None` for top alignment.
    pub fn content_translation(&self) -> Option<AnimatedInterpolation> {
        let output = self.config.align.offset_range(self.content_height)?;
        Some(
            self.height
                .interpolate(Interpolation::new((0.0, self.content_height), output)),
        )
    }

    /// Current vertical offset of the content
    pub fn content_offset(&self) -> f32 {
        self.content_translation()
            .map(|translation| translation.current())
            .unwrap_or(0.0)
    }

    /// Render the container around `children`
    ///
    /// The returned tree is bound to the current animated height. A
    /// measurement replaces that value, so render again after one is applied.
    pub fn render(&self, children: View) -> View {
        let listener = (!self.animating.get()).then_some(self.layout_key);

        let mut content = view().on_layout(listener).child(children);
        if let Some(translation) = self.content_translation() {
            content = content.translate_y(StyleValue::animated(translation));
        }

        view()
            .overflow_hidden()
            .height(StyleValue::animated(self.height.source()))
            .pointer_events(self.pointer_events())
            .child(content)
    }
}

impl Collapsible<SchedulerHandle> {
    /// Collapsible driven by `scheduler` with default configuration
    pub fn with_scheduler(scheduler: SchedulerHandle) -> Result<Self> {
        Self::new(scheduler, CollapsibleConfig::default())
    }
}

/// Offset for a given animated height, as rendered by a collapsible
pub fn content_offset_at(align: Align, height: f32, content_height: f32) -> f32 {
    align
        .offset_range(content_height)
        .map(|output| Interpolation::new((0.0, content_height), output).map(height))
        .unwrap_or(0.0)
}
