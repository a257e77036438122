//! An in-memory [`Document`] with simple block layout.
//!
//! Useful for tests, examples and headless runs. Every element stacks its children vertically;
//! an element without children has a fixed height; a scrollable element has a fixed viewport and
//! clamps its `scrollTop`. Style rules are only understood as far as the stabilizer's own rule
//! goes: a `.class{height:var(--prop,...)}` rule binds the height of that class to the custom
//! property, resolved through ancestors.
//!
//! Changes made through the `SimDocument` methods (not through the [`Document`] trait) are
//! counted as mutations; see [`SimDocument::take_mutations`].

mod selector;

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use scroll_stabilizer::{HostError, Span};

use crate::{Document, Placement};

use selector::SelectorList;

/// A node handle into a [`SimDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

const BODY: NodeId = NodeId(0);

#[derive(Clone, Debug, Default)]
pub(crate) struct NodeData {
    /// `None` for text nodes.
    tag: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    height: u32,
    viewport: Option<u32>,
    scroll_top: u64,
    max_height: Option<u32>,
    props: Vec<(String, u32)>,
}

#[derive(Clone, Debug)]
struct StyleSheet {
    id: String,
    binding: Option<HeightBinding>,
}

#[derive(Clone, Debug)]
struct HeightBinding {
    class: String,
    property: String,
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<NodeData>,
    styles: Vec<StyleSheet>,
    mutations: usize,
}

/// A shared handle to an in-memory document. Clones see the same tree.
#[derive(Clone, Debug)]
pub struct SimDocument {
    tree: Rc<RefCell<Tree>>,
}

impl SimDocument {
    pub fn new() -> Self {
        let body = NodeData {
            tag: Some(String::from("body")),
            ..NodeData::default()
        };
        Self {
            tree: Rc::new(RefCell::new(Tree {
                nodes: alloc::vec![body],
                styles: Vec::new(),
                mutations: 0,
            })),
        }
    }

    pub fn body(&self) -> NodeId {
        BODY
    }

    pub fn create_element(&self, tag: &str) -> NodeId {
        self.tree.borrow_mut().push(NodeData {
            tag: Some(tag.to_ascii_lowercase()),
            ..NodeData::default()
        })
    }

    pub fn create_text(&self, height: u32) -> NodeId {
        self.tree.borrow_mut().push(NodeData {
            height,
            ..NodeData::default()
        })
    }

    /// Creates an element of `height` and appends it to `parent`.
    pub fn element(&self, parent: NodeId, tag: &str, height: u32) -> NodeId {
        let id = self.create_element(tag);
        self.set_height(id, height);
        self.append_child(parent, id);
        id
    }

    pub fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut tree = self.tree.borrow_mut();
        let at = tree.nodes[parent.0].children.len();
        tree.insert(parent, child, at);
        tree.mutations += 1;
    }

    /// Inserts `child` at `index` among `parent`'s children (clamped to the end).
    pub fn insert_child(&self, parent: NodeId, index: usize, child: NodeId) {
        let mut tree = self.tree.borrow_mut();
        tree.insert(parent, child, index);
        tree.mutations += 1;
    }

    pub fn remove(&self, node: NodeId) {
        let mut tree = self.tree.borrow_mut();
        tree.detach(node);
        tree.mutations += 1;
    }

    /// Sets the natural height of a leaf element or text node.
    pub fn set_height(&self, node: NodeId, height: u32) {
        let mut tree = self.tree.borrow_mut();
        tree.nodes[node.0].height = height;
        tree.mutations += 1;
    }

    pub fn add_class(&self, node: NodeId, class: &str) {
        let mut tree = self.tree.borrow_mut();
        let data = &mut tree.nodes[node.0];
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(class.to_string());
        }
        tree.mutations += 1;
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        let mut tree = self.tree.borrow_mut();
        let attrs = &mut tree.nodes[node.0].attrs;
        match attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attrs.push((name.to_string(), value.to_string())),
        }
        tree.mutations += 1;
    }

    /// Turns `node` into a scroll container with a fixed viewport height.
    pub fn make_scrollable(&self, node: NodeId, viewport: u32) {
        self.tree.borrow_mut().nodes[node.0].viewport = Some(viewport);
    }

    /// A user scroll. Returns the resulting (clamped) `scrollTop`.
    pub fn scroll_by(&self, node: NodeId, delta: i64) -> u64 {
        let mut tree = self.tree.borrow_mut();
        let current = tree.scroll_top(node) as i64;
        let max = tree.max_scroll(node);
        let next = (current.saturating_add(delta).max(0) as u64).min(max);
        tree.nodes[node.0].scroll_top = next;
        next
    }

    /// Returns the number of mutations since the last call, and resets the count.
    pub fn take_mutations(&self) -> usize {
        core::mem::take(&mut self.tree.borrow_mut().mutations)
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.borrow().nodes[node.0].children.clone()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.tree.borrow().nodes[node.0]
            .classes
            .iter()
            .any(|c| c == class)
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree.borrow().nodes[node.0]
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    pub fn custom_property(&self, node: NodeId, name: &str) -> Option<u32> {
        self.tree.borrow().nodes[node.0]
            .props
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, px)| *px)
    }

    pub fn max_height(&self, node: NodeId) -> Option<u32> {
        self.tree.borrow().nodes[node.0].max_height
    }

    pub fn style_count(&self) -> usize {
        self.tree.borrow().styles.len()
    }

    /// Laid-out height of `node`.
    pub fn outer_height(&self, node: NodeId) -> u64 {
        self.tree.borrow().outer_height(node)
    }

    fn connected(&self, node: NodeId) -> Result<(), HostError> {
        if self.tree.borrow().is_connected(node) {
            Ok(())
        } else {
            Err(HostError::Detached)
        }
    }
}

impl Default for SimDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    fn push(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(data);
        NodeId(self.nodes.len() - 1)
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    fn insert(&mut self, parent: NodeId, child: NodeId, index: usize) {
        self.detach(child);
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    fn is_connected(&self, node: NodeId) -> bool {
        let mut cur = node;
        while let Some(parent) = self.nodes[cur.0].parent {
            cur = parent;
        }
        cur == BODY
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.nodes[id.0].parent;
        }
        false
    }

    fn bound_property(&self, data: &NodeData) -> Option<&str> {
        self.styles
            .iter()
            .filter_map(|s| s.binding.as_ref())
            .find(|b| data.classes.contains(&b.class))
            .map(|b| b.property.as_str())
    }

    fn resolve_property(&self, node: NodeId, name: &str) -> u32 {
        let mut cur = Some(node);
        while let Some(id) = cur {
            let data = &self.nodes[id.0];
            if let Some((_, px)) = data.props.iter().find(|(n, _)| n == name) {
                return *px;
            }
            cur = data.parent;
        }
        0
    }

    fn outer_height(&self, node: NodeId) -> u64 {
        let data = &self.nodes[node.0];
        let natural = if let Some(viewport) = data.viewport {
            u64::from(viewport)
        } else if let Some(property) = self.bound_property(data) {
            u64::from(self.resolve_property(node, property))
        } else if data.children.is_empty() {
            u64::from(data.height)
        } else {
            self.content_height(node)
        };
        match data.max_height {
            Some(max) => natural.min(u64::from(max)),
            None => natural,
        }
    }

    fn content_height(&self, node: NodeId) -> u64 {
        self.nodes[node.0]
            .children
            .iter()
            .map(|c| self.outer_height(*c))
            .sum()
    }

    fn scroll_height(&self, node: NodeId) -> u64 {
        self.content_height(node).max(self.outer_height(node))
    }

    fn max_scroll(&self, node: NodeId) -> u64 {
        if self.nodes[node.0].viewport.is_none() {
            return 0;
        }
        self.scroll_height(node) - self.outer_height(node)
    }

    fn scroll_top(&self, node: NodeId) -> u64 {
        self.nodes[node.0].scroll_top.min(self.max_scroll(node))
    }

    fn top(&self, node: NodeId) -> i64 {
        let Some(parent) = self.nodes[node.0].parent else {
            return 0;
        };
        let mut y = self.top(parent) - self.scroll_top(parent) as i64;
        for sibling in &self.nodes[parent.0].children {
            if *sibling == node {
                break;
            }
            y += self.outer_height(*sibling) as i64;
        }
        y
    }

    fn find_with_class(&self, parent: NodeId, class: &str) -> Option<NodeId> {
        for child in &self.nodes[parent.0].children {
            if self.nodes[child.0].classes.iter().any(|c| c == class) {
                return Some(*child);
            }
            if let Some(found) = self.find_with_class(*child, class) {
                return Some(found);
            }
        }
        None
    }
}

/// Reads the class and custom property out of `.class{height:var(--prop,...)...}`.
fn parse_height_binding(css: &str) -> Option<HeightBinding> {
    const HEIGHT_VAR: &str = "height:var(";
    let rest = css.trim_start().strip_prefix('.')?;
    let brace = rest.find('{')?;
    let body = &rest[brace..];
    let at = body.find(HEIGHT_VAR)?;
    let after = &body[at + HEIGHT_VAR.len()..];
    let end = after.find([',', ')'])?;
    Some(HeightBinding {
        class: rest[..brace].trim().to_string(),
        property: after[..end].trim().to_string(),
    })
}

impl Document for SimDocument {
    type Node = NodeId;

    fn is_element(&self, node: &NodeId) -> bool {
        self.tree.borrow().nodes[node.0].tag.is_some()
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        self.tree.borrow().is_connected(*node)
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.tree.borrow().contains(*ancestor, *node)
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let Some(selector) = SelectorList::parse(selector) else {
            atrace!(selector, "unsupported selector");
            return None;
        };
        let tree = self.tree.borrow();
        let mut cur = Some(*node);
        while let Some(id) = cur {
            let data = &tree.nodes[id.0];
            if selector.matches(data) {
                return Some(id);
            }
            cur = data.parent;
        }
        None
    }

    fn find_descendant_with_class(&self, parent: &NodeId, class: &str) -> Option<NodeId> {
        self.tree.borrow().find_with_class(*parent, class)
    }

    fn create_spacer(
        &self,
        container: &NodeId,
        class: &str,
        placement: Placement,
    ) -> Result<NodeId, HostError> {
        let mut tree = self.tree.borrow_mut();
        if tree.nodes[container.0].tag.is_none() {
            return Err(HostError::Write("spacer parent is not an element"));
        }
        let spacer = tree.push(NodeData {
            tag: Some(String::from("div")),
            classes: alloc::vec![class.to_string()],
            attrs: alloc::vec![(String::from("aria-hidden"), String::from("true"))],
            ..NodeData::default()
        });
        let index = match placement {
            Placement::First => 0,
            Placement::Last => usize::MAX,
        };
        tree.insert(*container, spacer, index);
        Ok(spacer)
    }

    fn has_style(&self, id: &str) -> bool {
        self.tree.borrow().styles.iter().any(|s| s.id == id)
    }

    fn insert_style(&self, id: &str, css: &str) -> Result<(), HostError> {
        self.tree.borrow_mut().styles.push(StyleSheet {
            id: id.to_string(),
            binding: parse_height_binding(css),
        });
        Ok(())
    }

    fn set_custom_property(&self, node: &NodeId, name: &str, px: u32) -> Result<(), HostError> {
        let mut tree = self.tree.borrow_mut();
        let props = &mut tree.nodes[node.0].props;
        match props.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = px,
            None => props.push((name.to_string(), px)),
        }
        Ok(())
    }

    fn set_max_height(&self, node: &NodeId, px: Option<u32>) -> Result<(), HostError> {
        self.tree.borrow_mut().nodes[node.0].max_height = px;
        Ok(())
    }

    fn set_class(&self, node: &NodeId, class: &str, on: bool) -> Result<(), HostError> {
        let mut tree = self.tree.borrow_mut();
        let classes = &mut tree.nodes[node.0].classes;
        let present = classes.iter().any(|c| c == class);
        if on && !present {
            classes.push(class.to_string());
        } else if !on {
            classes.retain(|c| c != class);
        }
        Ok(())
    }

    fn client_height(&self, node: &NodeId) -> Result<u32, HostError> {
        self.connected(*node)?;
        let height = self.tree.borrow().outer_height(*node);
        Ok(u32::try_from(height).unwrap_or(u32::MAX))
    }

    fn scroll_height(&self, node: &NodeId) -> Result<u64, HostError> {
        self.connected(*node)?;
        Ok(self.tree.borrow().scroll_height(*node))
    }

    fn scroll_top(&self, node: &NodeId) -> Result<u64, HostError> {
        self.connected(*node)?;
        Ok(self.tree.borrow().scroll_top(*node))
    }

    fn set_scroll_top(&self, node: &NodeId, offset: u64) -> Result<(), HostError> {
        self.connected(*node)?;
        let mut tree = self.tree.borrow_mut();
        let max = tree.max_scroll(*node);
        tree.nodes[node.0].scroll_top = offset.min(max);
        Ok(())
    }

    fn bounding_span(&self, node: &NodeId) -> Result<Span, HostError> {
        self.connected(*node)?;
        let tree = self.tree.borrow();
        Ok(Span::from_len(tree.top(*node), tree.outer_height(*node)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_spacer_height_to_the_custom_property() {
        let doc = SimDocument::new();
        let list = doc.element(doc.body(), "div", 0);
        doc.make_scrollable(list, 100);
        doc.element(list, "p", 80);
        let spacer = doc.create_spacer(&list, "bottom-slack", Placement::Last).unwrap();
        assert_eq!(doc.outer_height(spacer), 0);

        doc.insert_style(
            "bottom-slack-style",
            ".bottom-slack{height:var(--bottom-slack,0px);flex:0 0 auto;}",
        )
        .unwrap();
        doc.set_custom_property(&list, "--bottom-slack", 400).unwrap();
        assert_eq!(doc.outer_height(spacer), 400);
        assert_eq!(doc.scroll_height(&list).unwrap(), 480);
    }

    #[test]
    fn scroll_top_is_clamped_and_shifts_children() {
        let doc = SimDocument::new();
        let list = doc.element(doc.body(), "div", 0);
        doc.make_scrollable(list, 100);
        let a = doc.element(list, "p", 150);
        let b = doc.element(list, "p", 50);

        doc.set_scroll_top(&list, 500).unwrap();
        assert_eq!(doc.scroll_top(&list).unwrap(), 100);
        assert_eq!(doc.bounding_span(&a).unwrap(), Span::new(-100, 50));
        assert_eq!(doc.bounding_span(&b).unwrap(), Span::new(50, 100));

        doc.set_height(a, 60);
        assert_eq!(doc.scroll_top(&list).unwrap(), 10);
        assert_eq!(doc.scroll_by(list, -50), 0);
    }

    #[test]
    fn max_height_caps_the_viewport() {
        let doc = SimDocument::new();
        let list = doc.element(doc.body(), "div", 0);
        doc.make_scrollable(list, 300);
        doc.element(list, "p", 1000);
        doc.set_max_height(&list, Some(200)).unwrap();
        assert_eq!(doc.client_height(&list).unwrap(), 200);
        doc.set_max_height(&list, None).unwrap();
        assert_eq!(doc.client_height(&list).unwrap(), 300);
    }

    #[test]
    fn detached_nodes_have_no_geometry() {
        let doc = SimDocument::new();
        let orphan = doc.create_element("div");
        assert!(!doc.is_connected(&orphan));
        assert_eq!(doc.bounding_span(&orphan), Err(HostError::Detached));

        let kept = doc.element(doc.body(), "div", 10);
        doc.remove(kept);
        assert_eq!(doc.scroll_top(&kept), Err(HostError::Detached));
    }

    #[test]
    fn closest_walks_up_and_includes_self() {
        let doc = SimDocument::new();
        let panel = doc.element(doc.body(), "div", 0);
        doc.add_class(panel, "admin-panel");
        let button = doc.element(panel, "button", 20);
        let label = doc.create_text(10);
        doc.append_child(button, label);

        assert_eq!(doc.closest(&label, "button"), Some(button));
        assert_eq!(doc.closest(&button, "button"), Some(button));
        assert_eq!(doc.closest(&label, ".admin-panel, .member-panel"), Some(panel));
        assert_eq!(doc.closest(&label, "[role=\"tab\"]"), None);
        assert_eq!(doc.closest(&label, "div p"), None);
    }

    #[test]
    fn counts_only_document_changes_as_mutations() {
        let doc = SimDocument::new();
        let list = doc.element(doc.body(), "div", 0);
        assert_eq!(doc.take_mutations(), 2);
        doc.set_custom_property(&list, "--bottom-slack", 4000).unwrap();
        doc.set_class(&list, "scrollbar-fade", true).unwrap();
        assert_eq!(doc.take_mutations(), 0);
        doc.set_attribute(list, "data-bottom-slack", "false");
        assert_eq!(doc.take_mutations(), 1);
    }
}
