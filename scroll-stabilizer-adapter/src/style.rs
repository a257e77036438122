use alloc::format;
use alloc::string::String;

use scroll_stabilizer::Edge;

use crate::{Document, Placement};

/// Class toggled on the container for a short while after each slack change.
pub const SCROLLBAR_FADE_CLASS: &str = "scrollbar-fade";

/// Pointer targets inside one of these are anchored as a whole.
pub const ACTIONABLE_SELECTOR: &str = "button, [role=\"button\"], a";

/// Document-facing names for one edge's spacer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeStyle {
    pub spacer_class: &'static str,
    /// Custom property holding the spacer height, set on the container.
    pub size_property: &'static str,
    /// Id of the shared style element, inserted once per document.
    pub style_id: &'static str,
    /// Sections matching this never keep slack open.
    pub opt_out_selector: &'static str,
}

const BOTTOM: EdgeStyle = EdgeStyle {
    spacer_class: "bottom-slack",
    size_property: "--bottom-slack",
    style_id: "bottom-slack-style",
    opt_out_selector: "[data-bottom-slack=\"false\"]",
};

const TOP: EdgeStyle = EdgeStyle {
    spacer_class: "top-slack",
    size_property: "--top-slack",
    style_id: "top-slack-style",
    opt_out_selector: "[data-top-slack=\"false\"]",
};

pub fn edge_style(edge: Edge) -> EdgeStyle {
    match edge {
        Edge::Start => TOP,
        Edge::End => BOTTOM,
    }
}

/// The one rule each edge needs: spacer height bound to the size property, no transition.
pub fn style_rule(edge: Edge) -> String {
    let style = edge_style(edge);
    format!(
        ".{}{{height:var({},0px);flex:0 0 auto;pointer-events:none;transition:none;}}",
        style.spacer_class, style.size_property
    )
}

pub(crate) fn placement(edge: Edge) -> Placement {
    match edge {
        Edge::Start => Placement::First,
        Edge::End => Placement::Last,
    }
}

pub(crate) fn ensure_style<D: Document>(doc: &D, edge: Edge) {
    let style = edge_style(edge);
    if doc.has_style(style.style_id) {
        return;
    }
    match doc.insert_style(style.style_id, &style_rule(edge)) {
        Ok(()) => {
            adebug!(id = style.style_id, "style inserted");
        }
        Err(err) => {
            awarn!(error = %err, id = style.style_id, "style insert failed");
        }
    }
}

/// Reuses the container's existing spacer or creates one at the edge.
pub(crate) fn ensure_spacer<D: Document>(doc: &D, container: &D::Node, edge: Edge) -> Option<D::Node> {
    let class = edge_style(edge).spacer_class;
    if let Some(existing) = doc.find_descendant_with_class(container, class) {
        return Some(existing);
    }
    match doc.create_spacer(container, class, placement(edge)) {
        Ok(spacer) => Some(spacer),
        Err(err) => {
            awarn!(error = %err, "spacer creation failed");
            None
        }
    }
}
