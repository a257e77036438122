use scroll_stabilizer::Edge;
use scroll_stabilizer_adapter::sim::SimDocument;
use scroll_stabilizer_adapter::{AttachOptions, Document, StabilizerSet, TabForceOffRegistry};

fn main() {
    // Example: a "show more" button whose click expands content above it. With top slack the
    // button stays under the cursor.
    //
    // The adapter flow is:
    // 1) forward pointerdown (captures the button's position)
    // 2) forward mutations while `observes_mutations()` is true
    // 3) forward click; the correction runs before the next paint
    let doc = SimDocument::new();
    let list = doc.create_element("div");
    doc.make_scrollable(list, 300);
    doc.append_child(doc.body(), list);
    let details = doc.element(list, "div", 120);
    let button = doc.element(list, "button", 40);
    doc.element(list, "div", 800);
    doc.scroll_by(list, 60);

    let mut registry = TabForceOffRegistry::new();
    let c = StabilizerSet::new(doc.clone(), Edge::Start)
        .attach(&list, &AttachOptions::default(), &mut registry)
        .expect("list is a live element");
    doc.take_mutations();

    let before = doc.bounding_span(&button).map(|s| s.start);
    c.on_pointer_down(&button, 0);

    doc.set_height(details, 520);
    if doc.take_mutations() > 0 && c.observes_mutations() {
        c.on_mutation();
    }
    c.on_click(&button, 0);

    let after = doc.bounding_span(&button).map(|s| s.start);
    println!("button top: before={before:?} after={after:?}");
    println!("scroll_top={:?} {:?}", doc.scroll_top(&list), c.snapshot());
}
