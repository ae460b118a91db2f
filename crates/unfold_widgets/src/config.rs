//! Widget configuration
//!
//! Both configs deserialize with camelCase keys and fall back to defaults
//! for anything missing, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! align = "center"
//! duration = 450
//! easing = "easeInOutQuad"
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use unfold_animation::{Easing, EasingSpec};

/// Where content sits while its container is partially open
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Content is clipped from the bottom as the container shrinks
    #[default]
    Top,
    /// Content emerges from the middle
    Center,
    /// Content emerges from the bottom edge
    Bottom,
}

impl Align {
    /// Output range of the content offset for a given content height
    ///
    /// The offset is interpolated from the animated height over
    /// `[0, content_height]` into this range. `None` for top alignment,
    /// which never offsets.
    pub fn offset_range(self, content_height: f32) -> Option<(f32, f32)> {
        match self {
            Align::Top => None,
            Align::Center => Some((-content_height / 2.0, 0.0)),
            Align::Bottom => Some((-content_height, 0.0)),
        }
    }
}

/// Configuration of a single [`Collapsible`](crate::Collapsible)
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollapsibleConfig {
    pub align: Align,
    pub collapsed: bool,
    /// Transition length in milliseconds
    pub duration: u32,
    pub easing: EasingSpec,
}

impl Default for CollapsibleConfig {
    fn default() -> Self {
        Self {
            align: Align::Top,
            collapsed: true,
            duration: 300,
            easing: EasingSpec::default(),
        }
    }
}

impl CollapsibleConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(Error::from)
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn duration(mut self, duration_ms: u32) -> Self {
        self.duration = duration_ms;
        self
    }

    pub fn easing(mut self, easing: impl Into<EasingSpec>) -> Self {
        self.easing = easing.into();
        self
    }

    /// Resolve the configured easing
    pub fn resolve_easing(&self) -> Result<Easing> {
        Ok(self.easing.resolve()?)
    }
}

/// Configuration of an [`Accordion`](crate::Accordion)
///
/// `align`, `duration` and `easing` are handed to every section's
/// collapsible; whether a section is collapsed is always derived from the
/// active section.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccordionConfig {
    pub align: Align,
    pub duration: u32,
    pub easing: EasingSpec,
    pub initially_active_section: Option<usize>,
    /// Highlight shown by section headers while pressed
    pub underlay_color: String,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        let collapsible = CollapsibleConfig::default();
        Self {
            align: collapsible.align,
            duration: collapsible.duration,
            easing: collapsible.easing,
            initially_active_section: None,
            underlay_color: "black".to_string(),
        }
    }
}

impl AccordionConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(Error::from)
    }

    /// Collapsible configuration for one section
    pub fn section_config(&self, collapsed: bool) -> CollapsibleConfig {
        CollapsibleConfig {
            align: self.align,
            collapsed,
            duration: self.duration,
            easing: self.easing.clone(),
        }
    }
}
