//! Tree assembler
//!
//! Builds the output `mxGraphModel`: the input root attributes, the two
//! reserved scaffold cells, then the translated vertices followed by the
//! translated and floating edges.

use tracing::error;

use super::ids::{LAYER_ID, ROOT_ID};
use crate::core::{Element, Result};

/// Tag name of the output root
pub const MODEL_TAG: &str = "mxGraphModel";

/// An output tree containing only the reserved scaffold cells
pub fn scaffold(root_attributes: &[(String, String)]) -> Element {
    let root = Element::new("root")
        .child(Element::new("mxCell").attr("id", ROOT_ID))
        .child(
            Element::new("mxCell")
                .attr("id", LAYER_ID)
                .attr("parent", ROOT_ID),
        );
    Element::with_attributes(MODEL_TAG, root_attributes).child(root)
}

/// A full output tree: scaffold, then vertices, then edges
pub fn assemble(
    root_attributes: &[(String, String)],
    vertices: Vec<Element>,
    edges: Vec<Element>,
) -> Element {
    let mut model = scaffold(root_attributes);
    if let Some(root) = model.children.first_mut() {
        root.children.extend(vertices);
        root.children.extend(edges);
    }
    model
}

/// Serialize an output tree compactly
pub fn serialize(tree: &Element) -> Result<String> {
    tree.to_xml_string()
}

/// Reformat XML text with indentation for human readers
///
/// The XML declaration is not emitted. If the text cannot be parsed it is
/// returned unchanged.
pub fn pretty_print(xml: &str) -> String {
    match Element::parse(xml).and_then(|tree| tree.to_pretty_string()) {
        Ok(pretty) => pretty,
        Err(e) => {
            error!("Error formatting XML: {}", e);
            xml.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs() -> Vec<(String, String)> {
        vec![
            ("dx".to_string(), "1418".to_string()),
            ("grid".to_string(), "1".to_string()),
        ]
    }

    #[test]
    fn test_scaffold_serialization() {
        let xml = serialize(&scaffold(&attrs())).unwrap();
        assert_eq!(
            xml,
            r#"<mxGraphModel dx="1418" grid="1"><root><mxCell id="0"/><mxCell id="1" parent="0"/></root></mxGraphModel>"#
        );
    }

    #[test]
    fn test_assemble_orders_children() {
        let tree = assemble(
            &[],
            vec![Element::new("object").attr("id", "v")],
            vec![Element::new("mxCell").attr("id", "e")],
        );
        let ids: Vec<_> = tree.children[0]
            .children
            .iter()
            .map(|c| c.get("id").unwrap())
            .collect();
        assert_eq!(ids, vec!["0", "1", "v", "e"]);
    }

    #[test]
    fn test_pretty_print_indents() {
        let pretty = pretty_print(&serialize(&scaffold(&[])).unwrap());
        assert!(pretty.starts_with("<mxGraphModel>"));
        assert!(pretty.contains("\n  <root>"));
        assert!(pretty.contains("\n    <mxCell id=\"0\"/>"));
        assert!(!pretty.contains("<?xml"));
    }

    #[test]
    fn test_pretty_print_preserves_content() {
        let compact = serialize(&scaffold(&attrs())).unwrap();
        let pretty = pretty_print(&compact);
        assert_eq!(
            Element::parse(&pretty).unwrap(),
            Element::parse(&compact).unwrap()
        );
    }

    #[test]
    fn test_pretty_print_falls_back_on_garbage() {
        assert_eq!(pretty_print("<a><b></a>"), "<a><b></a>");
    }
}
