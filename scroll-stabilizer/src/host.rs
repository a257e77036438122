use crate::{HostError, Span, TargetRole};

/// The platform side of a stabilized scroll container.
///
/// A host owns the container and its spacer element. The stabilizer reads live geometry through
/// it on every event and is the only code that writes the slack size, the max-height pin, the
/// scrollbar fade flag, and programmatic scroll offsets.
///
/// All spans are reported on the scroll axis in viewport coordinates.
pub trait ScrollHost {
    /// A handle to an element inside the container (pointer targets, anchors).
    type Node: Clone + PartialEq;

    /// Rendered height of the container (`clientHeight`).
    fn viewport_size(&self) -> Result<u32, HostError>;

    /// Total scrollable height including the spacer (`scrollHeight`).
    fn content_size(&self) -> Result<u64, HostError>;

    fn scroll_offset(&self) -> Result<u64, HostError>;

    /// Writes a scroll offset and returns the offset the platform actually applied.
    fn set_scroll_offset(&mut self, offset: u64) -> Result<u64, HostError>;

    fn container_span(&self) -> Result<Span, HostError>;

    fn spacer_span(&self) -> Result<Span, HostError>;

    /// Writes the single variable that drives the spacer's size.
    fn write_slack(&mut self, px: u32) -> Result<(), HostError>;

    /// Pins (`Some`) or releases (`None`) the container's max height.
    fn pin_max_height(&mut self, px: Option<u32>) -> Result<(), HostError>;

    fn set_scrollbar_fade(&mut self, on: bool) -> Result<(), HostError>;

    /// Viewport top offset of `node`.
    fn node_offset(&self, node: &Self::Node) -> Result<i64, HostError>;

    fn is_connected(&self, node: &Self::Node) -> bool;

    fn target_role(&self, node: &Self::Node) -> TargetRole;

    /// The nearest actionable ancestor of `node` (button, link), or `node` itself.
    fn anchor_for(&self, node: &Self::Node) -> Self::Node;
}
