use alloc::string::String;
use alloc::vec::Vec;

use crate::{Controller, Document};

/// Selectors used by the document-level tab click listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabListener {
    pub tab_selector: String,
    pub panel_selector: String,
}

#[derive(Debug)]
struct Registration<D: Document> {
    panel: D::Node,
    controller: Controller<D>,
}

/// Tracks which stabilizers live in which tabbed panels.
///
/// A click on a tab control inside a panel forces every stabilizer registered for that panel back
/// to baseline, so a freshly shown tab never inherits slack from the previous one.
///
/// The UI layer owns one registry per document, installs a capturing click listener when
/// [`TabForceOffRegistry::is_listening`] first becomes true, and forwards clicks to
/// [`TabForceOffRegistry::on_document_click`].
#[derive(Debug)]
pub struct TabForceOffRegistry<D: Document> {
    listener: Option<TabListener>,
    entries: Vec<Registration<D>>,
}

impl<D: Document> TabForceOffRegistry<D> {
    pub fn new() -> Self {
        Self {
            listener: None,
            entries: Vec::new(),
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    pub fn listener(&self) -> Option<&TabListener> {
        self.listener.as_ref()
    }

    /// Installs the listener once. Later calls keep the first selectors and return `false`.
    pub fn install_listener(&mut self, tab_selector: &str, panel_selector: &str) -> bool {
        if self.listener.is_some() {
            return false;
        }
        self.listener = Some(TabListener {
            tab_selector: String::from(tab_selector),
            panel_selector: String::from(panel_selector),
        });
        adebug!(tab_selector, panel_selector, "tab force-off listener installed");
        true
    }

    pub fn register(&mut self, panel: D::Node, controller: Controller<D>) {
        if self
            .entries
            .iter()
            .any(|e| e.panel == panel && e.controller.ptr_eq(&controller))
        {
            return;
        }
        self.entries.push(Registration { panel, controller });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of stabilizers registered for `panel`.
    pub fn registered_in(&self, panel: &D::Node) -> usize {
        self.entries.iter().filter(|e| &e.panel == panel).count()
    }

    /// Handles a document click. Returns how many stabilizers were forced off.
    pub fn on_document_click(&self, doc: &D, target: &D::Node) -> usize {
        let Some(listener) = self.listener.as_ref() else {
            return 0;
        };
        let Some(tab) = doc.closest(target, &listener.tab_selector) else {
            return 0;
        };
        let Some(panel) = doc.closest(&tab, &listener.panel_selector) else {
            return 0;
        };

        let mut forced = 0;
        for entry in self.entries.iter().filter(|e| e.panel == panel) {
            entry.controller.force_off();
            forced += 1;
        }
        adebug!(forced, "tab click forced stabilizers off");
        forced
    }
}

impl<D: Document> Default for TabForceOffRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}
