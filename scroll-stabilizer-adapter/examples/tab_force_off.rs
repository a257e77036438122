use scroll_stabilizer_adapter::sim::SimDocument;
use scroll_stabilizer_adapter::{AttachOptions, StabilizerSet, TabForceOffRegistry};

fn main() {
    // Example: two stabilized lists share a tabbed panel. Clicking a tab resets both, so the
    // newly shown tab starts without leftover slack.
    let doc = SimDocument::new();
    let panel = doc.element(doc.body(), "div", 0);
    doc.add_class(panel, "admin-panel");
    let tab = doc.element(panel, "button", 32);
    doc.set_attribute(tab, "role", "tab");

    let mut lists = Vec::new();
    for _ in 0..2 {
        let list = doc.create_element("div");
        doc.make_scrollable(list, 240);
        doc.append_child(panel, list);
        let row = doc.element(list, "div", 900);
        lists.push((list, row));
    }

    let mut registry = TabForceOffRegistry::new();
    let mut set = StabilizerSet::bottom(doc.clone());
    let opts = AttachOptions::default();

    let mut controllers = Vec::new();
    for (list, row) in &lists {
        let c = set
            .attach(list, &opts, &mut registry)
            .expect("list is a live element");
        c.on_pointer_down(row, 0);
        println!("expanded: {:?}", c.snapshot().map(|s| s.slack));
        controllers.push(c);
    }

    let forced = registry.on_document_click(&doc, &tab);
    println!("tab click forced {forced} stabilizer(s) off");
    for c in &controllers {
        println!("baseline: {:?}", c.snapshot().map(|s| s.is_baseline()));
    }
}
