//! draw.io file container handling
//!
//! A `.drawio` file is an `<mxfile>` holding one `<diagram>` per page, or a
//! bare `<mxGraphModel>`. Only uncompressed pages can be translated.

use c4izr::pipeline::ids::generate_id;
use c4izr::{C4Error, Element, Result};

/// Name given to pages that have none
pub const DEFAULT_PAGE_NAME: &str = "Page-1";

/// One diagram page of an input file
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub name: String,
    /// Serialized `mxGraphModel`
    pub model: String,
}

/// Split a file into its diagram pages
pub fn extract_pages(content: &str) -> Result<Vec<Page>> {
    let root = Element::parse(content)?;
    match root.name.as_str() {
        "mxGraphModel" => Ok(vec![Page {
            name: DEFAULT_PAGE_NAME.to_string(),
            model: root.to_xml_string()?,
        }]),
        "mxfile" => {
            let pages = root
                .find_all("diagram")
                .enumerate()
                .map(|(ix, diagram)| page_from_diagram(ix, diagram))
                .collect::<Result<Vec<_>>>()?;
            if pages.is_empty() {
                return Err(C4Error::input_format("no diagrams found in file"));
            }
            Ok(pages)
        }
        other => Err(C4Error::unsupported_input(format!(
            "expected <mxfile> or <mxGraphModel>, found <{}>",
            other
        ))),
    }
}

fn page_from_diagram(ix: usize, diagram: &Element) -> Result<Page> {
    let name = diagram
        .get("name")
        .map(str::to_string)
        .unwrap_or_else(|| format!("Page-{}", ix + 1));

    if let Some(model) = diagram.find("mxGraphModel") {
        return Ok(Page {
            name,
            model: model.to_xml_string()?,
        });
    }
    match diagram.text.as_deref() {
        Some(text) if !text.trim().is_empty() => Err(C4Error::unsupported_input(format!(
            "page '{}' is compressed; save the file uncompressed in draw.io",
            name
        ))),
        _ => Err(C4Error::input_format(format!(
            "no mxGraphModel found in page '{}'",
            name
        ))),
    }
}

/// Wrap translated models into a single `<mxfile>` document
pub fn wrap_pages<'a>(pages: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<String> {
    let mut file = Element::new("mxfile")
        .attr("host", "c4izr")
        .attr("agent", format!("c4izr {}", env!("CARGO_PKG_VERSION")))
        .attr("version", env!("CARGO_PKG_VERSION"))
        .attr("type", "device");
    for (name, model) in pages {
        let diagram = Element::new("diagram")
            .attr("id", generate_id())
            .attr("name", name)
            .child(Element::parse(model)?);
        file.push(diagram);
    }
    file.to_xml_string()
}
