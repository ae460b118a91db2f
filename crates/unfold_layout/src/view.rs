//! Retained view tree
//!
//! A `View` is what widgets render into: a container, a touchable wrapper,
//! or a text leaf, with a handful of style properties. Heights and
//! translations can be bound to an [`AnimatedNode`] so they follow an
//! animation without re-rendering.
//!
//! # Example
//!
//! ```ignore
//! use unfold_layout::{text, view};
//!
//! view()
//!     .overflow_hidden()
//!     .h(120.0)
//!     .child(text("Hello"))
//! ```

use serde_json::{Map, Value};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use unfold_animation::AnimatedNode;

/// Identifies a view that wants layout events
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayoutKey(u64);

impl LayoutKey {
    /// Allocate a process-unique key
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for LayoutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layout-{}", self.0)
    }
}

/// A style value that is either fixed or follows an animated node
#[derive(Clone)]
pub enum StyleValue {
    Px(f32),
    Animated(Rc<dyn AnimatedNode>),
}

impl StyleValue {
    pub fn animated(node: impl AnimatedNode + 'static) -> Self {
        StyleValue::Animated(Rc::new(node))
    }

    /// Current value
    pub fn resolve(&self) -> f32 {
        match self {
            StyleValue::Px(px) => *px,
            StyleValue::Animated(node) => node.current(),
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, StyleValue::Animated(_))
    }
}

impl fmt::Debug for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Px(px) => write!(f, "Px({px})"),
            StyleValue::Animated(node) => write!(f, "Animated({})", node.current()),
        }
    }
}

impl From<f32> for StyleValue {
    fn from(px: f32) -> Self {
        StyleValue::Px(px)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
}

/// Whether a view and its subtree receive touches
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerEvents {
    #[default]
    Auto,
    None,
}

#[derive(Clone, Debug, Default)]
pub struct ViewStyle {
    pub height: Option<StyleValue>,
    pub translate_y: Option<StyleValue>,
    pub overflow: Overflow,
    /// Host props carried through untouched (style objects, accessibility labels, ...)
    pub passthrough: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewKind {
    Container,
    /// Tap target; `target` is handed back to the owner on press
    Touchable {
        target: usize,
        underlay_color: String,
    },
    Text {
        content: String,
        line_height: f32,
    },
}

/// Default line height for text leaves
pub const DEFAULT_LINE_HEIGHT: f32 = 20.0;

/// A node in the retained view tree
#[derive(Clone, Debug)]
pub struct View {
    pub kind: ViewKind,
    pub style: ViewStyle,
    pub pointer_events: PointerEvents,
    pub layout_key: Option<LayoutKey>,
    pub children: Vec<View>,
}

impl View {
    pub fn new(kind: ViewKind) -> Self {
        Self {
            kind,
            style: ViewStyle::default(),
            pointer_events: PointerEvents::Auto,
            layout_key: None,
            children: Vec::new(),
        }
    }

    /// Set a fixed height
    pub fn h(mut self, px: f32) -> Self {
        self.style.height = Some(StyleValue::Px(px));
        self
    }

    /// Set the height from a style value (fixed or animated)
    pub fn height(mut self, value: StyleValue) -> Self {
        self.style.height = Some(value);
        self
    }

    pub fn translate_y(mut self, value: StyleValue) -> Self {
        self.style.translate_y = Some(value);
        self
    }

    pub fn overflow_hidden(mut self) -> Self {
        self.style.overflow = Overflow::Hidden;
        self
    }

    pub fn pointer_events(mut self, pointer_events: PointerEvents) -> Self {
        self.pointer_events = pointer_events;
        self
    }

    pub fn pointer_events_none(self) -> Self {
        self.pointer_events(PointerEvents::None)
    }

    /// Request layout events for this view (`None` detaches the listener)
    pub fn on_layout(mut self, key: Option<LayoutKey>) -> Self {
        self.layout_key = key;
        self
    }

    pub fn passthrough(mut self, props: Map<String, Value>) -> Self {
        self.style.passthrough.extend(props);
        self
    }

    pub fn child(mut self, child: View) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = View>) -> Self {
        self.children.extend(children);
        self
    }

    /// Current height, if one is set
    pub fn resolved_height(&self) -> Option<f32> {
        self.style.height.as_ref().map(StyleValue::resolve)
    }

    /// Current vertical translation (0 when unset)
    pub fn resolved_translate_y(&self) -> f32 {
        self.style
            .translate_y
            .as_ref()
            .map(StyleValue::resolve)
            .unwrap_or(0.0)
    }

    /// Depth-first search for the view carrying `key`
    pub fn find_by_layout_key(&self, key: LayoutKey) -> Option<&View> {
        if self.layout_key == Some(key) {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_by_layout_key(key))
    }

    /// Targets of every touchable that can currently receive a tap
    ///
    /// A view with `PointerEvents::None` disables its whole subtree.
    pub fn interactive_targets(&self) -> Vec<usize> {
        let mut targets = Vec::new();
        self.collect_targets(&mut targets);
        targets
    }

    fn collect_targets(&self, targets: &mut Vec<usize>) {
        if self.pointer_events == PointerEvents::None {
            return;
        }
        if let ViewKind::Touchable { target, .. } = self.kind {
            targets.push(target);
        }
        for child in &self.children {
            child.collect_targets(targets);
        }
    }

    /// All text in the subtree, in document order
    pub fn text_content(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let ViewKind::Text { content, .. } = &self.kind {
            out.push(content);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// Create a container view
pub fn view() -> View {
    View::new(ViewKind::Container)
}

/// Create a text leaf
pub fn text(content: impl Into<String>) -> View {
    View::new(ViewKind::Text {
        content: content.into(),
        line_height: DEFAULT_LINE_HEIGHT,
    })
}

/// Create a touchable wrapper reporting `target` on press
pub fn touchable(target: usize, underlay_color: impl Into<String>) -> View {
    View::new(ViewKind::Touchable {
        target,
        underlay_color: underlay_color.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use unfold_animation::ValueCell;

    #[test]
    fn test_animated_height_resolves_live() {
        let cell = ValueCell::new(10.0);
        let v = view().height(StyleValue::animated(cell.clone()));
        assert_eq!(v.resolved_height(), Some(10.0));
        cell.set(42.0);
        assert_eq!(v.resolved_height(), Some(42.0));
    }

    #[test]
    fn test_pointer_events_none_disables_subtree() {
        let tree = view()
            .child(touchable(0, "black"))
            .child(view().pointer_events_none().child(touchable(1, "black")))
            .child(touchable(2, "black"));
        assert_eq!(tree.interactive_targets(), vec![0, 2]);
    }

    #[test]
    fn test_find_by_layout_key() {
        let key = LayoutKey::next();
        let tree = view().child(view().child(text("inner").on_layout(Some(key))));
        let found = tree.find_by_layout_key(key).unwrap();
        assert_eq!(found.text_content(), vec!["inner"]);
        assert!(tree.find_by_layout_key(LayoutKey::next()).is_none());
    }

    #[test]
    fn test_layout_keys_are_unique() {
        assert_ne!(LayoutKey::next(), LayoutKey::next());
    }
}
