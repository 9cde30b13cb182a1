//! Vertex transformer
//!
//! Maps each vertex into a C4 "Software System" object: templated label,
//! one of two fixed styles, fixed 240x120 size and a position rescaled
//! around the diagram center.

use tracing::{debug, warn};

use super::cells::Cell;
use super::geometry::parse_number;
use super::ids::LAYER_ID;
use super::templates::{
    system_description, SystemStyle, SYSTEM_HEIGHT, SYSTEM_LABEL, SYSTEM_TYPE, SYSTEM_WIDTH,
};
use crate::core::{Element, Point};

/// Geometry attributes that are recomputed rather than copied
const SIZED_ATTRIBUTES: [&str; 4] = ["x", "y", "width", "height"];

/// Per-diagram inputs shared by every vertex
#[derive(Debug, Clone, Copy)]
pub struct VertexContext<'a> {
    /// Label that marks the main system
    pub main_label: &'a str,
    /// Pivot for rescaling
    pub center: Point,
    pub scaling_factor: f64,
}

/// Move `value` away from `center` by `factor`
pub fn scale_axis(value: f64, center: f64, factor: f64) -> f64 {
    center + (value - center) * factor
}

/// Shortest decimal form of a coordinate
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Build the `<object>` for one vertex under the given output id
pub fn transform_vertex(vertex: &Cell<'_>, id: String, ctx: &VertexContext<'_>) -> Element {
    let name = vertex.label().unwrap_or("");
    let style = SystemStyle::for_label(name, ctx.main_label);
    debug!(id = %id, name, ?style, "Translating vertex");

    let cell = Element::new("mxCell")
        .attr("style", style.style())
        .attr("vertex", "1")
        .attr("parent", LAYER_ID)
        .child(transform_geometry(vertex, ctx));

    Element::new("object")
        .attr("id", id)
        .attr("placeholders", "1")
        .attr("c4Name", name)
        .attr("c4Type", SYSTEM_TYPE)
        .attr("c4Description", system_description(name))
        .attr("label", SYSTEM_LABEL)
        .child(cell)
}

fn transform_geometry(vertex: &Cell<'_>, ctx: &VertexContext<'_>) -> Element {
    let mut geometry = Element::new("mxGeometry");
    let Some(input) = vertex.geometry() else {
        return geometry
            .attr("width", format_number(SYSTEM_WIDTH))
            .attr("height", format_number(SYSTEM_HEIGHT))
            .attr("as", "geometry");
    };

    for (axis, center) in [("x", ctx.center.x), ("y", ctx.center.y)] {
        let Some(raw) = input.get(axis) else {
            warn!(
                id = vertex.display_id(),
                axis,
                "Vertex geometry has no coordinate on this axis"
            );
            continue;
        };
        if ctx.scaling_factor == 1.0 {
            // Identity scale leaves the input text untouched
            geometry.set_attr(axis, raw);
            continue;
        }
        let scaled = parse_number(raw)
            .map(|value| scale_axis(value, center, ctx.scaling_factor))
            .filter(|value| value.is_finite());
        match scaled {
            Some(value) => geometry.set_attr(axis, format_number(value)),
            None => {
                warn!(
                    id = vertex.display_id(),
                    axis,
                    value = raw,
                    "Could not scale coordinate, keeping original value"
                );
                geometry.set_attr(axis, raw);
            }
        }
    }
    geometry.set_attr("width", format_number(SYSTEM_WIDTH));
    geometry.set_attr("height", format_number(SYSTEM_HEIGHT));

    for (key, value) in input.attributes() {
        if !SIZED_ATTRIBUTES.contains(&key.as_str()) {
            geometry.set_attr(key.as_str(), value.as_str());
        }
    }
    geometry
}
