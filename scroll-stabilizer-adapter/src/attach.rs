use scroll_stabilizer::{Edge, Stabilizer};

use crate::key::NodeMap;
use crate::style::{ensure_spacer, ensure_style};
use crate::{AttachError, AttachOptions, Controller, DomHost, Document, TabForceOffRegistry};

/// Attaches stabilizers for one edge to containers of a document.
///
/// Attaching is idempotent per container: the second call returns the controller created by the
/// first, and creates no second spacer or listener registration.
#[derive(Debug)]
pub struct StabilizerSet<D: Document> {
    doc: D,
    edge: Edge,
    attached: NodeMap<D::Node, Controller<D>>,
}

impl<D: Document> StabilizerSet<D> {
    pub fn new(doc: D, edge: Edge) -> Self {
        Self {
            doc,
            edge,
            attached: NodeMap::new(),
        }
    }

    /// Bottom-slack stabilizers.
    pub fn bottom(doc: D) -> Self {
        Self::new(doc, Edge::End)
    }

    /// Top-slack stabilizers, with anchor compensation.
    pub fn top(doc: D) -> Self {
        Self::new(doc, Edge::Start)
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    pub fn get(&self, container: &D::Node) -> Option<Controller<D>> {
        self.attached.get(container).cloned()
    }

    pub fn attach(
        &mut self,
        container: &D::Node,
        options: &AttachOptions,
        registry: &mut TabForceOffRegistry<D>,
    ) -> Result<Controller<D>, AttachError> {
        if !self.doc.is_element(container) || !self.doc.is_connected(container) {
            return Err(AttachError::NotAnElement { edge: self.edge });
        }
        if let Some(existing) = self.attached.get(container) {
            atrace!(?container, "already attached");
            return Ok(existing.clone());
        }

        ensure_style(&self.doc, self.edge);
        let spacer = ensure_spacer(&self.doc, container, self.edge);
        let host = DomHost::new(
            self.doc.clone(),
            container.clone(),
            spacer,
            self.edge,
            options.tab_selector.clone(),
        );
        let controller = Controller::new(Stabilizer::new(host, self.edge, options.stabilizer));

        if options.enable_force_off_on_tabs {
            match self.doc.closest(container, &options.panel_selector) {
                Some(panel) => registry.register(panel, controller.clone()),
                None => {
                    atrace!(?container, "container is outside any panel");
                }
            }
            registry.install_listener(&options.tab_selector, &options.panel_selector);
        }

        self.attached.insert(container.clone(), controller.clone());
        adebug!(edge = ?self.edge, ?container, "stabilizer attached");
        Ok(controller)
    }

    /// Forgets the controller for `container`. The spacer and style stay in the document.
    pub fn detach(&mut self, container: &D::Node) -> Option<Controller<D>> {
        self.attached.remove(container)
    }
}
