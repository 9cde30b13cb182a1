//! Geometry analyzer
//!
//! Computes the bounding box and center of all vertices that carry usable
//! numeric geometry. The center is the pivot for rescaling in the vertex
//! transformer.

use tracing::{debug, span, warn, Level};

use super::cells::Cell;
use crate::core::{BoundingBox, C4Error, Element, Point, Rect, Result};

/// Derived geometry of one diagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramGeometry {
    pub bounding_box: BoundingBox,
    pub center: Point,
    /// Number of vertices whose geometry contributed to the box
    pub contributing: usize,
    /// True when no vertex contributed and [`BoundingBox::DEFAULT`] was used
    pub used_default: bool,
}

impl DiagramGeometry {
    fn from_box(bounding_box: BoundingBox, contributing: usize, used_default: bool) -> Self {
        Self {
            bounding_box,
            center: bounding_box.center(),
            contributing,
            used_default,
        }
    }
}

/// Parse a coordinate the way draw.io writes them
///
/// Surrounding whitespace is allowed; NaN and infinities are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read a vertex rectangle from an `mxGeometry` element
///
/// Absent attributes count as 0, since draw.io omits zero coordinates.
pub fn parse_rect(geometry: &Element, id: &str) -> Result<Rect> {
    let read = |name: &str| -> Result<f64> {
        match geometry.get(name) {
            None => Ok(0.0),
            Some(raw) => parse_number(raw).ok_or_else(|| {
                C4Error::element(id, format!("invalid geometry value {}=\"{}\"", name, raw))
            }),
        }
    };
    Ok(Rect::new(read("x")?, read("y")?, read("width")?, read("height")?))
}

/// Bounding box over a set of rectangles, or None when the set is empty
pub fn bounding_box<'r>(rects: impl IntoIterator<Item = &'r Rect>) -> Option<BoundingBox> {
    let mut rects = rects.into_iter();
    let mut bbox = BoundingBox::from_rect(rects.next()?);
    for rect in rects {
        bbox.include(rect);
    }
    Some(bbox)
}

/// Analyze vertex geometry
///
/// Returns None when there are no vertices at all, meaning the diagram has
/// nothing to translate. Vertices with unparsable geometry are skipped with
/// a warning; if none remain the default span is used.
pub fn analyze(vertices: &[Cell<'_>]) -> Option<DiagramGeometry> {
    let analyze_span = span!(Level::DEBUG, "analyze_geometry", vertices = vertices.len());
    let _enter = analyze_span.enter();

    if vertices.is_empty() {
        return None;
    }

    let mut rects = Vec::with_capacity(vertices.len());
    for vertex in vertices {
        let Some(geometry) = vertex.geometry() else {
            debug!(id = vertex.display_id(), "Vertex has no geometry");
            continue;
        };
        match parse_rect(geometry, vertex.display_id()) {
            Ok(rect) => rects.push(rect),
            Err(e) => warn!("{}", e),
        }
    }

    let geometry = match bounding_box(&rects) {
        Some(bbox) => DiagramGeometry::from_box(bbox, rects.len(), false),
        None => {
            warn!("Could not determine diagram bounds, using defaults");
            DiagramGeometry::from_box(BoundingBox::DEFAULT, 0, true)
        }
    };
    debug!(
        bounding_box = %geometry.bounding_box,
        center = %geometry.center,
        contributing = geometry.contributing,
        "Computed diagram geometry"
    );
    Some(geometry)
}
