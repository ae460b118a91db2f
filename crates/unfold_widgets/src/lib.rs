//! Unfold Widgets
//!
//! Height-animated containers built on `unfold_animation` and
//! `unfold_layout`:
//!
//! - [`Collapsible`]: animates between a near-zero height and the measured
//!   height of its content, with top/center/bottom alignment
//! - [`Accordion`]: a list of header/content sections, at most one open
//!
//! # Example
//!
//! ```ignore
//! use unfold_widgets::prelude::*;
//!
//! let scheduler = SchedulerHandle::new();
//! let mut faq = accordion(scheduler.clone(), vec!["What is it?", "Is it fast?"])
//!     .header(|title, _, _| text(*title))
//!     .content(|_, index, _| text(format!("Answer {index}")))
//!     .on_change(|active| println!("open section: {active:?}"))
//!     .build()?;
//!
//! faq.toggle_section(1)?;
//! scheduler.tick(16.0);
//! ```

pub mod accordion;
pub mod collapsible;
pub mod config;
pub mod error;
pub mod props;

pub use accordion::{accordion, Accordion, AccordionBuilder};
pub use collapsible::{Collapsible, ALMOST_ZERO};
pub use config::{AccordionConfig, Align, CollapsibleConfig};
pub use error::{Error, Result};
pub use props::{partition_props, PartitionedProps};

pub mod prelude {
    pub use crate::accordion::{accordion, Accordion, AccordionBuilder};
    pub use crate::collapsible::{Collapsible, ALMOST_ZERO};
    pub use crate::config::{AccordionConfig, Align, CollapsibleConfig};
    pub use crate::error::{Error, Result};
    pub use unfold_animation::{EasingSpec, SchedulerHandle};
    pub use unfold_layout::{compute_layout, text, touchable, view, View};
}
