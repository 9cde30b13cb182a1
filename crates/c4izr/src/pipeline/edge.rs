//! Edge transformer
//!
//! Maps each connected edge into a C4 "Relationship" object. Edges missing
//! a source or a target are floating and go into the output unchanged.

use tracing::{debug, warn};

use super::cells::Cell;
use super::ids::{IdAllocator, LAYER_ID};
use super::templates::{
    DEFAULT_RELATIONSHIP_DESCRIPTION, DEFAULT_TECHNOLOGY, RELATIONSHIP_LABEL, RELATIONSHIP_STYLE,
    RELATIONSHIP_TYPE,
};
use crate::core::{C4Error, Element, Result};

/// How an edge will be carried into the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Has both endpoints; becomes a relationship
    Connected,
    /// Missing `source` or `target`; passed through verbatim
    Floating,
}

/// Classify an edge by the presence of its endpoint attributes
///
/// An endpoint attribute that is present but empty still counts as present.
pub fn classify(edge: &Cell<'_>) -> EdgeKind {
    if edge.cell().has("source") && edge.cell().has("target") {
        EdgeKind::Connected
    } else {
        EdgeKind::Floating
    }
}

/// Copy of a floating edge for the output tree, wrapper included
pub fn passthrough(edge: &Cell<'_>) -> Element {
    warn!(id = edge.display_id(), "Floating edge (arrow)");
    edge.node().clone()
}

/// Description of a relationship: the edge label, or a placeholder
///
/// A wrapped edge that was translated before keeps its `c4Description`.
pub fn relationship_description<'a>(edge: &Cell<'a>) -> &'a str {
    edge.wrapper()
        .and_then(|wrapper| wrapper.get("c4Description"))
        .or_else(|| edge.label())
        .filter(|label| !label.is_empty())
        .unwrap_or(DEFAULT_RELATIONSHIP_DESCRIPTION)
}

/// Result of translating one edge
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeOutput {
    /// A C4 relationship object
    Relationship(Element),
    /// The original node, unchanged
    Floating(Element),
}

impl EdgeOutput {
    pub fn into_element(self) -> Element {
        match self {
            EdgeOutput::Relationship(element) | EdgeOutput::Floating(element) => element,
        }
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, EdgeOutput::Floating(_))
    }
}

/// Translate one edge
///
/// Connected edges claim an output id and have their endpoints redirected
/// to any renamed vertex. Fails for a cell that is also flagged as a vertex,
/// since the vertex pass has already translated it.
pub fn transform_edge(edge: &Cell<'_>, ids: &mut IdAllocator) -> Result<EdgeOutput> {
    if edge.is_vertex() {
        return Err(C4Error::element(
            edge.display_id(),
            "cell is flagged as both vertex and edge",
        ));
    }
    let (Some(source), Some(target)) = (edge.source(), edge.target()) else {
        return Ok(EdgeOutput::Floating(passthrough(edge)));
    };
    let id = ids.claim(edge.id());
    let source = ids.resolve_endpoint(source).to_string();
    let target = ids.resolve_endpoint(target).to_string();
    Ok(EdgeOutput::Relationship(build_relationship(
        edge, id, &source, &target,
    )))
}

/// Build the `<object>` for a connected edge with resolved endpoint ids
pub fn build_relationship(edge: &Cell<'_>, id: String, source: &str, target: &str) -> Element {
    debug!(id = %id, source, target, "Translating edge");

    let mut cell = Element::new("mxCell")
        .attr("style", RELATIONSHIP_STYLE)
        .attr("edge", "1")
        .attr("parent", LAYER_ID)
        .attr("source", source)
        .attr("target", target);
    for geometry in edge.cell().find_all("mxGeometry") {
        cell.push(geometry.clone());
    }

    Element::new("object")
        .attr("id", id)
        .attr("placeholders", "1")
        .attr("c4Type", RELATIONSHIP_TYPE)
        .attr("c4Technology", DEFAULT_TECHNOLOGY)
        .attr("c4Description", relationship_description(edge))
        .attr("label", RELATIONSHIP_LABEL)
        .child(cell)
}
