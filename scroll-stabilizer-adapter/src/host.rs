use alloc::string::String;

use scroll_stabilizer::{Edge, HostError, ScrollHost, Span, TargetRole};

use crate::style::{ACTIONABLE_SELECTOR, SCROLLBAR_FADE_CLASS, edge_style};
use crate::Document;

/// [`ScrollHost`] over a [`Document`] container and its spacer element.
#[derive(Clone, Debug)]
pub struct DomHost<D: Document> {
    doc: D,
    container: D::Node,
    spacer: Option<D::Node>,
    edge: Edge,
    tab_selector: String,
}

impl<D: Document> DomHost<D> {
    pub fn new(
        doc: D,
        container: D::Node,
        spacer: Option<D::Node>,
        edge: Edge,
        tab_selector: String,
    ) -> Self {
        Self {
            doc,
            container,
            spacer,
            edge,
            tab_selector,
        }
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn container(&self) -> &D::Node {
        &self.container
    }

    pub fn spacer(&self) -> Option<&D::Node> {
        self.spacer.as_ref()
    }

    fn spacer_node(&self) -> Result<&D::Node, HostError> {
        self.spacer.as_ref().ok_or(HostError::Detached)
    }
}

impl<D: Document> ScrollHost for DomHost<D> {
    type Node = D::Node;

    fn viewport_size(&self) -> Result<u32, HostError> {
        self.doc.client_height(&self.container)
    }

    fn content_size(&self) -> Result<u64, HostError> {
        self.doc.scroll_height(&self.container)
    }

    fn scroll_offset(&self) -> Result<u64, HostError> {
        self.doc.scroll_top(&self.container)
    }

    fn set_scroll_offset(&mut self, offset: u64) -> Result<u64, HostError> {
        self.doc.set_scroll_top(&self.container, offset)?;
        self.doc.scroll_top(&self.container)
    }

    fn container_span(&self) -> Result<Span, HostError> {
        self.doc.bounding_span(&self.container)
    }

    fn spacer_span(&self) -> Result<Span, HostError> {
        self.doc.bounding_span(self.spacer_node()?)
    }

    fn write_slack(&mut self, px: u32) -> Result<(), HostError> {
        self.doc
            .set_custom_property(&self.container, edge_style(self.edge).size_property, px)
    }

    fn pin_max_height(&mut self, px: Option<u32>) -> Result<(), HostError> {
        self.doc.set_max_height(&self.container, px)
    }

    fn set_scrollbar_fade(&mut self, on: bool) -> Result<(), HostError> {
        self.doc.set_class(&self.container, SCROLLBAR_FADE_CLASS, on)
    }

    fn node_offset(&self, node: &D::Node) -> Result<i64, HostError> {
        Ok(self.doc.bounding_span(node)?.start)
    }

    fn is_connected(&self, node: &D::Node) -> bool {
        self.doc.is_connected(node)
    }

    fn target_role(&self, node: &D::Node) -> TargetRole {
        if !self.doc.contains(&self.container, node) {
            return TargetRole::Outside;
        }
        if let Some(spacer) = self.spacer.as_ref() {
            if self.doc.contains(spacer, node) {
                return TargetRole::Spacer;
            }
        }
        if self.doc.closest(node, &self.tab_selector).is_some() {
            return TargetRole::TabControl;
        }
        if self
            .doc
            .closest(node, edge_style(self.edge).opt_out_selector)
            .is_some()
        {
            return TargetRole::OptedOut;
        }
        TargetRole::Content
    }

    fn anchor_for(&self, node: &D::Node) -> D::Node {
        match self.doc.closest(node, ACTIONABLE_SELECTOR) {
            Some(actionable) if self.doc.contains(&self.container, &actionable) => actionable,
            _ => node.clone(),
        }
    }
}
