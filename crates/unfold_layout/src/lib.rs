//! Unfold Layout
//!
//! A retained snapshot of the view hierarchy plus a measurement pass over it.
//!
//! Widgets render into [`View`] trees whose style values may be bound to
//! animated nodes, so a single snapshot stays live while animations run.
//! [`compute_layout`] lays a snapshot out with Taffy and reports the
//! measured height of every view that asked for layout events, which is how
//! widgets learn the natural size of their content.

pub mod tree;
pub mod view;

pub use tree::{compute_layout, LayoutError, LayoutEvent, LayoutNodeId, LayoutReport, LayoutTree};
pub use view::{
    text, touchable, view, LayoutKey, Overflow, PointerEvents, StyleValue, View, ViewKind,
    ViewStyle,
};
