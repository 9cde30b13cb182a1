//! Locating vertex and edge cells in an input tree
//!
//! A cell is an `mxCell` flagged with `vertex="1"` or `edge="1"`, found
//! anywhere below the root. Cells carrying custom properties are wrapped by
//! draw.io in an `<object>` or `<UserObject>` element that owns the id and
//! label; [`Cell`] hides that difference from the transformers.

use tracing::trace;

use crate::core::Element;

/// Tag names draw.io uses for property-carrying cell wrappers
const WRAPPER_TAGS: [&str; 2] = ["object", "UserObject"];

/// A view of one input cell together with its optional wrapper
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    cell: &'a Element,
    wrapper: Option<&'a Element>,
}

impl<'a> Cell<'a> {
    /// View a bare `mxCell`
    pub fn new(cell: &'a Element) -> Self {
        Self {
            cell,
            wrapper: None,
        }
    }

    /// View an `mxCell` inside an `<object>`/`<UserObject>` wrapper
    pub fn wrapped(cell: &'a Element, wrapper: &'a Element) -> Self {
        Self {
            cell,
            wrapper: Some(wrapper),
        }
    }

    /// The `mxCell` element itself
    pub fn cell(&self) -> &'a Element {
        self.cell
    }

    /// The outermost element of this cell, which is what a passthrough copies
    pub fn node(&self) -> &'a Element {
        self.wrapper.unwrap_or(self.cell)
    }

    /// The `<object>`/`<UserObject>` wrapper, if any
    pub fn wrapper(&self) -> Option<&'a Element> {
        self.wrapper
    }

    pub fn is_wrapped(&self) -> bool {
        self.wrapper.is_some()
    }

    /// The cell id, taken from the wrapper when there is one
    pub fn id(&self) -> Option<&'a str> {
        match self.wrapper {
            Some(wrapper) => wrapper.get("id").or_else(|| self.cell.get("id")),
            None => self.cell.get("id"),
        }
    }

    /// Id for log messages
    pub fn display_id(&self) -> &'a str {
        self.id().unwrap_or("<no id>")
    }

    /// The label, if the cell has one
    ///
    /// Wrapped cells keep their label on the wrapper; an already translated
    /// C4 object stores the plain name in `c4Name`.
    pub fn label(&self) -> Option<&'a str> {
        match self.wrapper {
            Some(wrapper) => wrapper
                .get("c4Name")
                .or_else(|| wrapper.get("label"))
                .or_else(|| self.cell.get("value")),
            None => self.cell.get("value"),
        }
    }

    /// First `mxGeometry` child of the cell
    pub fn geometry(&self) -> Option<&'a Element> {
        self.cell.find("mxGeometry")
    }

    pub fn source(&self) -> Option<&'a str> {
        self.cell.get("source")
    }

    pub fn target(&self) -> Option<&'a str> {
        self.cell.get("target")
    }

    pub fn is_vertex(&self) -> bool {
        self.cell.get("vertex") == Some("1")
    }

    pub fn is_edge(&self) -> bool {
        self.cell.get("edge") == Some("1")
    }
}

/// Vertex and edge cells of one diagram, in document order
#[derive(Debug, Default)]
pub struct DiagramCells<'a> {
    pub vertices: Vec<Cell<'a>>,
    pub edges: Vec<Cell<'a>>,
}

impl<'a> DiagramCells<'a> {
    /// Collect every flagged cell below `root`
    ///
    /// A cell flagged as both vertex and edge appears in both lists.
    pub fn collect(root: &'a Element) -> Self {
        let mut cells = DiagramCells::default();
        root.walk(&mut |parent, element| {
            if element.name != "mxCell" {
                return;
            }
            let cell = if WRAPPER_TAGS.contains(&parent.name.as_str()) {
                Cell::wrapped(element, parent)
            } else {
                Cell::new(element)
            };
            if cell.is_vertex() {
                cells.vertices.push(cell);
            }
            if cell.is_edge() {
                cells.edges.push(cell);
            }
        });
        trace!(
            vertices = cells.vertices.len(),
            edges = cells.edges.len(),
            "Collected diagram cells"
        );
        cells
    }

    /// Every id carried by any flagged cell
    pub fn ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.vertices
            .iter()
            .chain(self.edges.iter())
            .filter_map(|cell| cell.id())
    }
}
