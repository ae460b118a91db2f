//! Layout tree management
//!
//! Mirrors a [`View`] snapshot into Taffy, computes layout, and reports the
//! measured height of every view that registered a [`LayoutKey`].

use crate::view::{LayoutKey, Overflow, View, ViewKind};
use slotmap::{new_key_type, SlotMap};
use taffy::geometry::Point;
use taffy::prelude::*;
use taffy::style::Overflow as TaffyOverflow;
use taffy::TaffyError;
use thiserror::Error;

new_key_type! {
    pub struct LayoutNodeId;
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout engine failure: {0:?}")]
    Engine(TaffyError),
    #[error("unknown layout node")]
    UnknownNode,
}

impl From<TaffyError> for LayoutError {
    fn from(err: TaffyError) -> Self {
        LayoutError::Engine(err)
    }
}

/// Layout callback payload for one view
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutEvent {
    pub key: LayoutKey,
    pub height: f32,
}

/// Result of a layout pass
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutReport {
    /// Height of the root view
    pub root_height: f32,
    /// One event per view that requested layout events, in document order
    pub events: Vec<LayoutEvent>,
}

impl LayoutReport {
    pub fn event_for(&self, key: LayoutKey) -> Option<&LayoutEvent> {
        self.events.iter().find(|event| event.key == key)
    }
}

/// Maps between Unfold node IDs and Taffy node IDs
pub struct LayoutTree {
    taffy: TaffyTree,
    node_map: SlotMap<LayoutNodeId, NodeId>,
    listeners: Vec<(LayoutKey, LayoutNodeId)>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            node_map: SlotMap::with_key(),
            listeners: Vec::new(),
        }
    }

    /// Create a new layout node with the given style
    pub fn create_node(&mut self, style: Style) -> Result<LayoutNodeId, LayoutError> {
        let taffy_node = self.taffy.new_leaf(style)?;
        Ok(self.node_map.insert(taffy_node))
    }

    /// Add a child to a parent node
    pub fn add_child(&mut self, parent: LayoutNodeId, child: LayoutNodeId) -> Result<(), LayoutError> {
        let (Some(&parent_node), Some(&child_node)) =
            (self.node_map.get(parent), self.node_map.get(child))
        else {
            return Err(LayoutError::UnknownNode);
        };
        self.taffy.add_child(parent_node, child_node)?;
        Ok(())
    }

    /// Mirror a view subtree, returning the id of its root
    pub fn build(&mut self, view: &View) -> Result<LayoutNodeId, LayoutError> {
        let id = self.create_node(style_for(view))?;
        if let Some(key) = view.layout_key {
            self.listeners.push((key, id));
        }
        for child in &view.children {
            let child_id = self.build(child)?;
            self.add_child(id, child_id)?;
        }
        Ok(id)
    }

    /// Compute layout for a tree rooted at the given node
    pub fn compute_layout(
        &mut self,
        root: LayoutNodeId,
        available_space: Size<AvailableSpace>,
    ) -> Result<(), LayoutError> {
        let taffy_node = *self.node_map.get(root).ok_or(LayoutError::UnknownNode)?;
        self.taffy.compute_layout(taffy_node, available_space)?;
        Ok(())
    }

    /// Get the computed layout for a node
    pub fn get_layout(&self, id: LayoutNodeId) -> Option<&Layout> {
        self.node_map
            .get(id)
            .and_then(|&taffy_node| self.taffy.layout(taffy_node).ok())
    }

    /// Layout events for every registered listener
    pub fn events(&self) -> Vec<LayoutEvent> {
        self.listeners
            .iter()
            .filter_map(|&(key, id)| {
                self.get_layout(id).map(|layout| LayoutEvent {
                    key,
                    height: layout.size.height,
                })
            })
            .collect()
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay out a view snapshot and collect its layout events
///
/// Animated heights are sampled at call time.
pub fn compute_layout(view: &View) -> Result<LayoutReport, LayoutError> {
    let mut tree = LayoutTree::new();
    let root = tree.build(view)?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;

    let root_height = tree
        .get_layout(root)
        .map(|layout| layout.size.height)
        .ok_or(LayoutError::UnknownNode)?;
    let events = tree.events();
    tracing::trace!(root_height, events = events.len(), "layout pass");

    Ok(LayoutReport {
        root_height,
        events,
    })
}

/// Every view stacks its children vertically and never shrinks, so a
/// content wrapper keeps its natural height inside a clipped parent.
fn style_for(view: &View) -> Style {
    let height = match (&view.style.height, &view.kind) {
        (Some(value), _) => Dimension::Length(value.resolve().max(0.0)),
        (None, ViewKind::Text { content, line_height }) => {
            let lines = content.lines().count().max(1);
            Dimension::Length(lines as f32 * line_height)
        }
        (None, _) => Dimension::Auto,
    };
    let overflow_y = match view.style.overflow {
        Overflow::Visible => TaffyOverflow::Visible,
        Overflow::Hidden => TaffyOverflow::Hidden,
    };

    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        flex_shrink: 0.0,
        overflow: Point {
            x: TaffyOverflow::Visible,
            y: overflow_y,
        },
        size: Size {
            width: Dimension::Auto,
            height,
        },
        ..Default::default()
    }
}
