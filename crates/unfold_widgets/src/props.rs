//! Prop distribution for composite widgets
//!
//! An accordion accepts one loose bag of props and splits it: animation keys
//! go to every section's collapsible, view keys go to the outer container,
//! the accordion keeps its own. Anything else is dropped.

use serde_json::{Map, Value};

/// Keys understood by a collapsible
pub const COLLAPSIBLE_PROPS: &[&str] = &["align", "collapsed", "duration", "easing"];

/// Keys owned by the accordion itself
pub const ACCORDION_PROPS: &[&str] = &["initiallyActiveSection", "underlayColor"];

/// Keys passed through to the outer container view
pub const VIEW_PROPS: &[&str] = &[
    "accessibilityActions",
    "accessibilityHint",
    "accessibilityLabel",
    "accessibilityRole",
    "accessibilityState",
    "accessible",
    "collapsable",
    "hitSlop",
    "importantForAccessibility",
    "nativeID",
    "needsOffscreenAlphaCompositing",
    "onLayout",
    "pointerEvents",
    "removeClippedSubviews",
    "renderToHardwareTextureAndroid",
    "shouldRasterizeIOS",
    "style",
    "testID",
];

/// Props split by destination
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartitionedProps {
    pub collapsible: Map<String, Value>,
    pub accordion: Map<String, Value>,
    pub container: Map<String, Value>,
}

/// Split a prop bag by destination, dropping unrecognised keys
pub fn partition_props(props: Map<String, Value>) -> PartitionedProps {
    let mut partitioned = PartitionedProps::default();

    for (key, value) in props {
        let key_str = key.as_str();
        if COLLAPSIBLE_PROPS.contains(&key_str) {
            partitioned.collapsible.insert(key, value);
        } else if ACCORDION_PROPS.contains(&key_str) {
            partitioned.accordion.insert(key, value);
        } else if VIEW_PROPS.contains(&key_str) {
            partitioned.container.insert(key, value);
        } else {
            tracing::trace!(prop = %key, "dropping unrecognised prop");
        }
    }

    partitioned
}
