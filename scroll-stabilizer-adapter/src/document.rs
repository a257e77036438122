use core::fmt;

use scroll_stabilizer::{HostError, Span};

use crate::NodeKey;

/// Where a new child goes inside its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    First,
    Last,
}

/// The DOM-like surface the adapter needs from a UI toolkit.
///
/// Handles are cheap to clone and every method takes `&self`, matching how DOM bindings expose
/// element references. Geometry is reported on the scroll axis in viewport coordinates.
pub trait Document: Clone {
    type Node: Clone + PartialEq + NodeKey + fmt::Debug;

    fn is_element(&self, node: &Self::Node) -> bool;

    fn is_connected(&self, node: &Self::Node) -> bool;

    /// Inclusive: a node contains itself.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    /// `Element.closest`: `node` or its nearest element ancestor matching `selector`.
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;

    /// First descendant of `parent` carrying `class`.
    fn find_descendant_with_class(&self, parent: &Self::Node, class: &str) -> Option<Self::Node>;

    /// Creates an empty, `aria-hidden` block element with `class` inside `container`.
    fn create_spacer(
        &self,
        container: &Self::Node,
        class: &str,
        placement: Placement,
    ) -> Result<Self::Node, HostError>;

    fn has_style(&self, id: &str) -> bool;

    fn insert_style(&self, id: &str, css: &str) -> Result<(), HostError>;

    /// Sets a custom property (`--name: {px}px`) on `node`.
    fn set_custom_property(&self, node: &Self::Node, name: &str, px: u32)
    -> Result<(), HostError>;

    fn set_max_height(&self, node: &Self::Node, px: Option<u32>) -> Result<(), HostError>;

    fn set_class(&self, node: &Self::Node, class: &str, on: bool) -> Result<(), HostError>;

    fn client_height(&self, node: &Self::Node) -> Result<u32, HostError>;

    fn scroll_height(&self, node: &Self::Node) -> Result<u64, HostError>;

    fn scroll_top(&self, node: &Self::Node) -> Result<u64, HostError>;

    /// Writes `scrollTop`; the document clamps it to the scrollable range.
    fn set_scroll_top(&self, node: &Self::Node, offset: u64) -> Result<(), HostError>;

    fn bounding_span(&self, node: &Self::Node) -> Result<Span, HostError>;
}
