//! Read-only diagram summary
//!
//! Reports what a translation would work with, without prompting or
//! building any output.

use super::cells::DiagramCells;
use super::edge::{classify, EdgeKind};
use super::geometry::{analyze, DiagramGeometry};
use super::selector::has_duplicate_labels;
use crate::core::{Element, Result};

/// One vertex as seen by the translator
#[derive(Debug, Clone, PartialEq)]
pub struct VertexSummary {
    pub id: Option<String>,
    pub label: String,
    pub has_geometry: bool,
}

/// Overview of one diagram
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramSummary {
    /// Vertices in encounter order
    pub vertices: Vec<VertexSummary>,
    /// Edge cells, floating ones included
    pub edge_count: usize,
    pub floating_edge_count: usize,
    /// None when the diagram has no vertices
    pub geometry: Option<DiagramGeometry>,
    pub duplicate_labels: bool,
}

impl DiagramSummary {
    /// Summarize an already parsed diagram
    pub fn from_tree(root: &Element) -> Self {
        let cells = DiagramCells::collect(root);
        let vertices: Vec<VertexSummary> = cells
            .vertices
            .iter()
            .map(|cell| VertexSummary {
                id: cell.id().map(str::to_string),
                label: cell.label().unwrap_or("").to_string(),
                has_geometry: cell.geometry().is_some(),
            })
            .collect();
        let labels: Vec<&str> = vertices.iter().map(|v| v.label.as_str()).collect();
        let edges: Vec<_> = cells.edges.iter().filter(|e| !e.is_vertex()).collect();

        Self {
            duplicate_labels: has_duplicate_labels(&labels),
            edge_count: edges.len(),
            floating_edge_count: edges
                .iter()
                .filter(|e| classify(e) == EdgeKind::Floating)
                .count(),
            geometry: analyze(&cells.vertices),
            vertices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Edges that would become relationships
    pub fn relationship_count(&self) -> usize {
        self.edge_count - self.floating_edge_count
    }
}

/// Parse `xml` and summarize it
pub fn inspect(xml: &str) -> Result<DiagramSummary> {
    let root = Element::parse(xml)?;
    Ok(DiagramSummary::from_tree(&root))
}
