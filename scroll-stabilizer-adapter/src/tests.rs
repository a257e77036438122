use crate::sim::{NodeId, SimDocument};
use crate::style::{SCROLLBAR_FADE_CLASS, edge_style, style_rule};
use crate::*;

use scroll_stabilizer::{Edge, HostError, InputVerdict, SlackSize, Span};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

struct Page {
    doc: SimDocument,
    panel: NodeId,
    registry: TabForceOffRegistry<SimDocument>,
}

impl Page {
    fn new() -> Self {
        let doc = SimDocument::new();
        let panel = doc.element(doc.body(), "div", 0);
        doc.add_class(panel, "admin-panel");
        Self {
            doc,
            panel,
            registry: TabForceOffRegistry::new(),
        }
    }

    fn list_in(&self, parent: NodeId, viewport: u32, rows: &[u32]) -> (NodeId, Vec<NodeId>) {
        let list = self.doc.create_element("div");
        self.doc.make_scrollable(list, viewport);
        self.doc.append_child(parent, list);
        let rows = rows
            .iter()
            .map(|h| self.doc.element(list, "div", *h))
            .collect();
        (list, rows)
    }

    fn list(&self, viewport: u32, rows: &[u32]) -> (NodeId, Vec<NodeId>) {
        self.list_in(self.panel, viewport, rows)
    }
}

fn forward_mutations(doc: &SimDocument, c: &Controller<SimDocument>) {
    if doc.take_mutations() > 0 && c.observes_mutations() {
        c.on_mutation();
    }
}

fn slack(c: &Controller<SimDocument>) -> SlackSize {
    c.snapshot().unwrap().slack
}

#[test]
fn attach_is_idempotent_per_container() {
    let mut page = Page::new();
    let (list, _) = page.list(300, &[600]);
    let mut set = StabilizerSet::bottom(page.doc.clone());
    let opts = AttachOptions::default();

    let a = set.attach(&list, &opts, &mut page.registry).unwrap();
    let b = set.attach(&list, &opts, &mut page.registry).unwrap();
    assert!(a.ptr_eq(&b));
    assert_eq!(set.len(), 1);
    assert_eq!(page.registry.len(), 1);
    assert!(page.registry.is_listening());

    let spacers = page
        .doc
        .children(list)
        .into_iter()
        .filter(|n| page.doc.has_class(*n, "bottom-slack"))
        .count();
    assert_eq!(spacers, 1);
    assert_eq!(page.doc.style_count(), 1);
    assert!(set.get(&list).unwrap().ptr_eq(&a));
}

#[test]
fn attach_rejects_text_and_detached_nodes() {
    let mut page = Page::new();
    let text = page.doc.create_text(10);
    page.doc.append_child(page.panel, text);
    let orphan = page.doc.create_element("div");
    let mut set = StabilizerSet::top(page.doc.clone());
    let opts = AttachOptions::default();

    assert_eq!(
        set.attach(&text, &opts, &mut page.registry).unwrap_err(),
        AttachError::NotAnElement { edge: Edge::Start }
    );
    assert_eq!(
        set.attach(&orphan, &opts, &mut page.registry).unwrap_err(),
        AttachError::NotAnElement { edge: Edge::Start }
    );
    assert!(set.is_empty());
    assert!(page.registry.is_empty());
    assert!(!page.registry.is_listening());
    assert_eq!(page.doc.style_count(), 0);
}

#[test]
fn style_rule_is_shared_across_containers() {
    let mut page = Page::new();
    let (a, _) = page.list(300, &[600]);
    let (b, _) = page.list(300, &[600]);
    let mut set = StabilizerSet::bottom(page.doc.clone());
    let opts = AttachOptions::default();

    set.attach(&a, &opts, &mut page.registry).unwrap();
    set.attach(&b, &opts, &mut page.registry).unwrap();
    assert_eq!(page.doc.style_count(), 1);
    assert_eq!(page.registry.registered_in(&page.panel), 2);
    assert_eq!(
        style_rule(Edge::End),
        ".bottom-slack{height:var(--bottom-slack,0px);flex:0 0 auto;pointer-events:none;transition:none;}"
    );
}

#[test]
fn spacer_goes_at_the_stabilized_edge() {
    let mut page = Page::new();
    let (top_list, _) = page.list(300, &[600]);
    let (bottom_list, _) = page.list(300, &[600]);
    let opts = AttachOptions::default();

    let top = StabilizerSet::top(page.doc.clone())
        .attach(&top_list, &opts, &mut page.registry)
        .unwrap();
    let bottom = StabilizerSet::bottom(page.doc.clone())
        .attach(&bottom_list, &opts, &mut page.registry)
        .unwrap();

    let first = page.doc.children(top_list)[0];
    assert!(page.doc.has_class(first, "top-slack"));
    assert_eq!(top.spacer(), Some(first));
    assert_eq!(page.doc.attribute(first, "aria-hidden").as_deref(), Some("true"));
    assert_eq!(page.doc.custom_property(top_list, "--top-slack"), Some(0));

    let last = *page.doc.children(bottom_list).last().unwrap();
    assert!(page.doc.has_class(last, "bottom-slack"));
    assert_eq!(bottom.spacer(), Some(last));
    assert_eq!(page.doc.custom_property(bottom_list, "--bottom-slack"), Some(0));
}

#[test]
fn existing_spacer_is_reused() {
    let mut page = Page::new();
    let (list, rows) = page.list(300, &[600]);
    let existing = page.doc.create_element("div");
    page.doc.add_class(existing, "bottom-slack");
    page.doc.append_child(rows[0], existing);

    let c = StabilizerSet::bottom(page.doc.clone())
        .attach(&list, &AttachOptions::default(), &mut page.registry)
        .unwrap();
    assert_eq!(c.spacer(), Some(existing));
    assert_eq!(page.doc.children(list).len(), 1);
}

#[test]
fn content_that_fits_never_expands_or_locks() {
    let mut page = Page::new();
    let (list, rows) = page.list(400, &[380]);
    let c = StabilizerSet::bottom(page.doc.clone())
        .attach(&list, &AttachOptions::default(), &mut page.registry)
        .unwrap();

    c.on_pointer_down(&rows[0], 0);
    c.on_click(&rows[0], 0);

    let snap = c.snapshot().unwrap();
    assert_eq!(snap.slack, SlackSize::Collapsed);
    assert_eq!(snap.locked_max_height_px, None);
    assert_eq!(snap.click_hold_until_ms, 0);
    assert_eq!(page.doc.custom_property(list, "--bottom-slack"), Some(0));
    assert_eq!(page.doc.max_height(list), None);
}

#[test]
fn bottom_slack_keeps_the_clicked_header_in_place() {
    let mut page = Page::new();
    let (list, rows) = page.list(400, &[800, 100, 300]);
    let (header, body) = (rows[1], rows[2]);
    assert_eq!(page.doc.scroll_by(list, 800), 800);
    let c = StabilizerSet::bottom(page.doc.clone())
        .attach(&list, &AttachOptions::default(), &mut page.registry)
        .unwrap();

    c.on_pointer_down(&header, 0);
    assert_eq!(slack(&c), SlackSize::Expanded);
    assert!(page.doc.has_class(list, SCROLLBAR_FADE_CLASS));

    c.on_click(&header, 0);
    page.doc.set_height(body, 0);

    // Without slack the offset would clamp to 500 and the header would drop by 300px.
    assert_eq!(page.doc.scroll_top(&list), Ok(800));
    assert_eq!(page.doc.bounding_span(&header), Ok(Span::new(0, 100)));

    // The spacer is visible: scrolling further down is refused, in and after the hold window.
    assert_eq!(c.on_wheel(120, 50), InputVerdict::Block);
    assert_eq!(c.on_key_down("PageDown", 300), InputVerdict::Block);
    assert_eq!(c.on_key_down("a", 300), InputVerdict::Allow);

    // Scrolling back up is fine and pins the height for the burst.
    assert_eq!(c.on_wheel(-500, 300), InputVerdict::Allow);
    assert_eq!(page.doc.scroll_by(list, -500), 300);
    c.on_scroll(300);
    assert_eq!(page.doc.max_height(list), Some(400));
    assert_eq!(c.next_deadline(), Some(160));

    c.tick(160);
    assert!(!page.doc.has_class(list, SCROLLBAR_FADE_CLASS));
    assert_eq!(c.next_deadline(), Some(480));

    // The spacer has left through the bottom edge: the unlock collapses it.
    c.tick(480);
    assert_eq!(slack(&c), SlackSize::Collapsed);
    assert_eq!(page.doc.custom_property(list, "--bottom-slack"), Some(0));
    assert_eq!(page.doc.max_height(list), None);
    assert_eq!(page.doc.scroll_top(&list), Ok(300));

    assert_eq!(c.on_wheel(120, 700), InputVerdict::Allow);
}

#[test]
fn opted_out_sections_collapse_the_slack() {
    let mut page = Page::new();
    let (list, rows) = page.list(300, &[400, 0]);
    let section = rows[1];
    page.doc.set_attribute(section, "data-bottom-slack", "false");
    let quiet = page.doc.element(section, "div", 100);
    let c = StabilizerSet::bottom(page.doc.clone())
        .attach(&list, &AttachOptions::default(), &mut page.registry)
        .unwrap();

    c.on_pointer_down(&rows[0], 0);
    assert_eq!(slack(&c), SlackSize::Expanded);
    c.on_pointer_down(&quiet, 10);
    assert_eq!(slack(&c), SlackSize::Collapsed);
}

#[test]
fn tab_controls_inside_the_container_do_not_hold() {
    let mut page = Page::new();
    let (list, _) = page.list(300, &[600]);
    let tab = page.doc.element(list, "button", 30);
    page.doc.set_attribute(tab, "role", "tab");
    let c = StabilizerSet::bottom(page.doc.clone())
        .attach(&list, &AttachOptions::default(), &mut page.registry)
        .unwrap();

    c.on_pointer_down(&tab, 0);
    c.on_click(&tab, 0);
    assert!(c.snapshot().unwrap().is_baseline());
}

#[test]
fn top_slack_ignores_tab_controls_on_pointer_down() {
    let mut page = Page::new();
    let (list, _) = page.list(300, &[600]);
    let tab = page.doc.element(list, "button", 30);
    page.doc.set_attribute(tab, "role", "tab");
    let c = StabilizerSet::top(page.doc.clone())
        .attach(&list, &AttachOptions::default(), &mut page.registry)
        .unwrap();

    c.on_pointer_down(&tab, 0);
    assert!(!c.observes_mutations());
    c.on_click(&tab, 0);
    assert!(c.snapshot().unwrap().is_baseline());

    c.on_wheel(10, 10);
    assert!(c.snapshot().unwrap().locked_max_height_px.is_some());
}

#[test]
fn tab_click_forces_off_every_stabilizer_in_the_panel() {
    let mut page = Page::new();
    let (a, a_rows) = page.list(200, &[600]);
    let (b, b_rows) = page.list(200, &[600]);
    let tab = page.doc.element(page.panel, "button", 30);
    page.doc.set_attribute(tab, "role", "tab");

    let other_panel = page.doc.element(page.doc.body(), "div", 0);
    page.doc.add_class(other_panel, "member-panel");
    let (c_list, c_rows) = page.list_in(other_panel, 200, &[600]);

    let mut set = StabilizerSet::bottom(page.doc.clone());
    let opts = AttachOptions::default();
    let ca = set.attach(&a, &opts, &mut page.registry).unwrap();
    let cb = set.attach(&b, &opts, &mut page.registry).unwrap();
    let cc = set.attach(&c_list, &opts, &mut page.registry).unwrap();

    ca.on_pointer_down(&a_rows[0], 0);
    cb.on_pointer_down(&b_rows[0], 0);
    cc.on_pointer_down(&c_rows[0], 0);
    assert_eq!(ca.on_wheel(-10, 300), InputVerdict::Allow);
    assert_eq!(page.doc.max_height(a), Some(200));

    assert_eq!(page.registry.on_document_click(&page.doc, &tab), 2);
    assert!(ca.snapshot().unwrap().is_baseline());
    assert!(cb.snapshot().unwrap().is_baseline());
    assert_eq!(page.doc.max_height(a), None);
    assert_eq!(ca.next_deadline(), None);
    assert_eq!(slack(&cc), SlackSize::Expanded);

    // Ordinary clicks in the panel force nothing off.
    assert_eq!(page.registry.on_document_click(&page.doc, &a_rows[0]), 0);
}

#[test]
fn first_installer_selectors_win() {
    let mut page = Page::new();
    let (a, _) = page.list(200, &[600]);
    let (b, _) = page.list(200, &[600]);
    let mut set = StabilizerSet::bottom(page.doc.clone());

    set.attach(&a, &AttachOptions::default(), &mut page.registry).unwrap();
    let custom = AttachOptions::default().with_tab_selector(".tab");
    set.attach(&b, &custom, &mut page.registry).unwrap();
    assert_eq!(
        page.registry.listener().unwrap().tab_selector,
        "[role=\"tab\"]"
    );

    let mut quiet = StabilizerSet::top(page.doc.clone());
    let (c, _) = page.list(200, &[600]);
    let off = AttachOptions::default().with_force_off_on_tabs(false);
    quiet.attach(&c, &off, &mut page.registry).unwrap();
    assert_eq!(page.registry.len(), 2);
}

#[test]
fn top_slack_restores_the_clicked_button_after_content_grows_above() {
    let mut page = Page::new();
    let (list, rows) = page.list(300, &[200, 200, 0, 400]);
    let button = page.doc.create_element("button");
    page.doc.append_child(rows[2], button);
    let label = page.doc.element(button, "span", 100);
    assert_eq!(page.doc.scroll_by(list, 200), 200);

    let c = StabilizerSet::top(page.doc.clone())
        .attach(&list, &AttachOptions::default(), &mut page.registry)
        .unwrap();
    page.doc.take_mutations();

    c.on_pointer_down(&label, 0);
    assert_eq!(slack(&c), SlackSize::Expanded);
    // Growing the top spacer shifted the offset with it; nothing moved on screen.
    assert_eq!(page.doc.scroll_top(&list), Ok(4200));
    assert_eq!(page.doc.bounding_span(&button).unwrap().start, 200);
    assert!(c.observes_mutations());

    page.doc.set_height(rows[0], 350);
    forward_mutations(&page.doc, &c);
    assert!(c.snapshot().unwrap().anchor_dirty);

    c.on_click(&label, 0);
    assert_eq!(page.doc.bounding_span(&button).unwrap().start, 200);
    assert_eq!(page.doc.scroll_top(&list), Ok(4350));
    assert!(!c.observes_mutations());

    // The compensating write comes back as a scroll event and is ignored.
    c.on_scroll(0);
    assert_eq!(c.snapshot().unwrap().last_scroll_offset, 4350);
}

#[test]
fn top_slack_grows_to_make_room_for_compensation() {
    let mut page = Page::new();
    let (list, rows) = page.list(300, &[200, 0, 600]);
    page.doc.set_attribute(rows[1], "data-top-slack", "false");
    let button = page.doc.element(rows[1], "button", 100);

    let c = StabilizerSet::top(page.doc.clone())
        .attach(&list, &AttachOptions::default(), &mut page.registry)
        .unwrap();
    page.doc.take_mutations();

    c.on_pointer_down(&button, 0);
    assert_eq!(slack(&c), SlackSize::Collapsed);
    assert_eq!(page.doc.bounding_span(&button).unwrap().start, 200);

    page.doc.remove(rows[0]);
    forward_mutations(&page.doc, &c);
    c.on_click(&button, 0);

    assert_eq!(slack(&c), SlackSize::Expanded);
    assert_eq!(page.doc.scroll_top(&list), Ok(3800));
    assert_eq!(page.doc.bounding_span(&button).unwrap().start, 200);
}

#[test]
fn mutations_outside_a_click_are_not_observed() {
    let mut page = Page::new();
    let (list, rows) = page.list(300, &[600]);
    let c = StabilizerSet::top(page.doc.clone())
        .attach(&list, &AttachOptions::default(), &mut page.registry)
        .unwrap();

    page.doc.set_height(rows[0], 700);
    assert!(!c.observes_mutations());
    forward_mutations(&page.doc, &c);
    assert!(!c.snapshot().unwrap().anchor_dirty);
}

/// A document whose scroll writes synchronously notify the controller, like a DOM that
/// dispatches `scroll` from inside `scrollTop = ...`.
#[derive(Clone)]
struct EchoingDoc {
    inner: SimDocument,
    listener: Rc<RefCell<Option<Controller<EchoingDoc>>>>,
    nested: Rc<Cell<usize>>,
}

impl Document for EchoingDoc {
    type Node = NodeId;

    fn is_element(&self, node: &NodeId) -> bool {
        self.inner.is_element(node)
    }
    fn is_connected(&self, node: &NodeId) -> bool {
        self.inner.is_connected(node)
    }
    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.inner.contains(ancestor, node)
    }
    fn closest(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        self.inner.closest(node, selector)
    }
    fn find_descendant_with_class(&self, parent: &NodeId, class: &str) -> Option<NodeId> {
        self.inner.find_descendant_with_class(parent, class)
    }
    fn create_spacer(
        &self,
        container: &NodeId,
        class: &str,
        placement: Placement,
    ) -> Result<NodeId, HostError> {
        self.inner.create_spacer(container, class, placement)
    }
    fn has_style(&self, id: &str) -> bool {
        self.inner.has_style(id)
    }
    fn insert_style(&self, id: &str, css: &str) -> Result<(), HostError> {
        self.inner.insert_style(id, css)
    }
    fn set_custom_property(&self, node: &NodeId, name: &str, px: u32) -> Result<(), HostError> {
        self.inner.set_custom_property(node, name, px)
    }
    fn set_max_height(&self, node: &NodeId, px: Option<u32>) -> Result<(), HostError> {
        self.inner.set_max_height(node, px)
    }
    fn set_class(&self, node: &NodeId, class: &str, on: bool) -> Result<(), HostError> {
        self.inner.set_class(node, class, on)
    }
    fn client_height(&self, node: &NodeId) -> Result<u32, HostError> {
        self.inner.client_height(node)
    }
    fn scroll_height(&self, node: &NodeId) -> Result<u64, HostError> {
        self.inner.scroll_height(node)
    }
    fn scroll_top(&self, node: &NodeId) -> Result<u64, HostError> {
        self.inner.scroll_top(node)
    }
    fn set_scroll_top(&self, node: &NodeId, offset: u64) -> Result<(), HostError> {
        self.inner.set_scroll_top(node, offset)?;
        let listener = self.listener.borrow().clone();
        if let Some(c) = listener {
            self.nested.set(self.nested.get() + 1);
            c.on_scroll(0);
        }
        Ok(())
    }
    fn bounding_span(&self, node: &NodeId) -> Result<Span, HostError> {
        self.inner.bounding_span(node)
    }
}

#[test]
fn scroll_events_fired_during_a_programmatic_write_are_dropped() {
    let page = Page::new();
    let (list, rows) = page.list(300, &[600]);
    let doc = EchoingDoc {
        inner: page.doc.clone(),
        listener: Rc::new(RefCell::new(None)),
        nested: Rc::new(Cell::new(0)),
    };
    let mut registry = TabForceOffRegistry::new();
    let c = StabilizerSet::top(doc.clone())
        .attach(&list, &AttachOptions::default(), &mut registry)
        .unwrap();
    *doc.listener.borrow_mut() = Some(c.clone());

    c.on_pointer_down(&rows[0], 0);
    assert_eq!(doc.nested.get(), 1);
    assert_eq!(page.doc.scroll_top(&list), Ok(4000));

    // The platform's own scroll event for that write arrives later and is swallowed.
    c.on_scroll(1000);
    let snap = c.snapshot().unwrap();
    assert_eq!(snap.last_scroll_offset, 4000);
    assert_eq!(snap.locked_max_height_px, None);
    *doc.listener.borrow_mut() = None;
}

#[test]
fn edge_styles_are_distinct() {
    let top = edge_style(Edge::Start);
    let bottom = edge_style(Edge::End);
    assert_eq!(top.size_property, "--top-slack");
    assert_eq!(bottom.opt_out_selector, "[data-bottom-slack=\"false\"]");
    assert_ne!(top.style_id, bottom.style_id);
}

#[test]
fn attach_options_builder() {
    let opts = AttachOptions::new()
        .with_stop_delay_ms(90)
        .with_click_hold_ms(400)
        .with_scrollbar_fade_ms(0)
        .with_panel_selector(".panel");
    assert_eq!(opts.stabilizer.stop_delay_ms, 90);
    assert_eq!(opts.stabilizer.click_hold_ms, 400);
    assert_eq!(opts.stabilizer.scrollbar_fade_ms, 0);
    assert_eq!(opts.panel_selector, ".panel");
    assert!(opts.enable_force_off_on_tabs);
}
