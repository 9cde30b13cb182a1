//! Translation pipeline
//!
//! Turns a draw.io `mxGraphModel` into a C4 software-system context diagram.
//! The stages run in a fixed order: collect cells, analyze geometry, select
//! the main system, translate vertices, translate edges, assemble.

pub mod assembler;
pub mod cells;
pub mod edge;
pub mod geometry;
pub mod ids;
pub mod selector;
pub mod summary;
pub mod templates;
pub mod vertex;

use std::collections::HashSet;

use tracing::{debug, error, info, span, warn, Level};

use crate::core::{Element, Result, TranslateOptions};
use cells::DiagramCells;
use edge::{classify, transform_edge, EdgeKind};
use ids::IdAllocator;
use selector::{select_main_system, ConsolePrompt, Prompt};
use summary::DiagramSummary;
use vertex::{transform_vertex, VertexContext};

pub use assembler::{assemble, pretty_print, scaffold};
pub use summary::inspect;

/// Converts draw.io diagrams into C4 context diagrams
///
/// The prompt is only consulted when [`TranslateOptions::interactive`] is
/// set and the diagram has at least one vertex.
pub struct Translator {
    options: TranslateOptions,
    prompt: Box<dyn Prompt>,
}

impl Translator {
    /// Translator that prompts on the process console
    pub fn new(options: TranslateOptions) -> Self {
        Self::with_prompt(options, Box::new(ConsolePrompt::stdio()))
    }

    /// Translator with a caller-supplied prompt
    pub fn with_prompt(options: TranslateOptions, prompt: Box<dyn Prompt>) -> Self {
        Self { options, prompt }
    }

    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    /// Translate one serialized diagram
    ///
    /// Fails only when the input is not well-formed XML or the output cannot
    /// be written. Problems with single elements are logged and the element
    /// is skipped or passed through.
    pub fn translate(&mut self, xml: &str) -> Result<String> {
        let translate_span = span!(
            Level::INFO,
            "translate",
            scaling_factor = self.options.scaling_factor,
            interactive = self.options.interactive
        );
        let _enter = translate_span.enter();

        let input = Element::parse(xml)?;
        let output = self.translate_tree(&input);
        assembler::serialize(&output)
    }

    /// Translate several diagrams in order, one result per input
    pub fn translate_many<S: AsRef<str>>(&mut self, inputs: &[S]) -> Vec<Result<String>> {
        inputs
            .iter()
            .enumerate()
            .map(|(ix, xml)| {
                debug!(page = ix + 1, total = inputs.len(), "Translating diagram");
                self.translate(xml.as_ref())
            })
            .collect()
    }

    /// Summarize a diagram without translating it
    pub fn inspect(&self, xml: &str) -> Result<DiagramSummary> {
        inspect(xml)
    }

    /// Translate an already parsed diagram
    pub fn translate_tree(&mut self, input: &Element) -> Element {
        let root_attributes = input.attributes();
        let cells = DiagramCells::collect(input);

        let Some(geometry) = geometry::analyze(&cells.vertices) else {
            warn!("No elements found in the diagram");
            return scaffold(root_attributes);
        };
        info!(
            center = %geometry.center,
            bounding_box = %geometry.bounding_box,
            "Diagram center"
        );

        let labels: Vec<&str> = cells
            .vertices
            .iter()
            .map(|cell| cell.label().unwrap_or(""))
            .collect();
        let main_label =
            select_main_system(&labels, self.options.interactive, self.prompt.as_mut())
                .map(|selection| selection.label)
                .unwrap_or_default();

        let mut ids = IdAllocator::new(cells.ids());
        // Floating edges keep their ids verbatim, so nothing else may take them.
        // One whose id is already owned cannot be emitted without a duplicate.
        let mut colliding = HashSet::new();
        for (index, edge) in cells.edges.iter().enumerate() {
            if edge.is_vertex() || classify(edge) != EdgeKind::Floating {
                continue;
            }
            if let Some(id) = edge.id() {
                if ids.is_taken(id) {
                    colliding.insert(index);
                } else {
                    ids.reserve(id);
                }
            }
        }

        let ctx = VertexContext {
            main_label: &main_label,
            center: geometry.center,
            scaling_factor: self.options.scaling_factor,
        };
        let vertices: Vec<Element> = cells
            .vertices
            .iter()
            .map(|cell| {
                let id = ids.claim_vertex(cell.id());
                transform_vertex(cell, id, &ctx)
            })
            .collect();

        let mut edges = Vec::with_capacity(cells.edges.len());
        let mut floating = 0;
        for (index, cell) in cells.edges.iter().enumerate() {
            if colliding.contains(&index) {
                error!(
                    id = cell.display_id(),
                    "Floating edge id is already used in the output, dropping the edge"
                );
                continue;
            }
            match transform_edge(cell, &mut ids) {
                Ok(output) => {
                    if output.is_floating() {
                        floating += 1;
                    }
                    edges.push(output.into_element());
                }
                Err(e) => error!("{}", e),
            }
        }

        info!(
            vertices = vertices.len(),
            relationships = edges.len() - floating,
            floating_edges = floating,
            "Translated diagram"
        );
        assemble(root_attributes, vertices, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use selector::ScriptedPrompt;

    fn translator(answers: &[&str]) -> Translator {
        Translator::with_prompt(
            TranslateOptions::default(),
            Box::new(ScriptedPrompt::new(answers.iter().copied())),
        )
    }

    const TWO_SYSTEMS: &str = r#"<mxGraphModel dx="800"><root>
        <mxCell id="0"/><mxCell id="1" parent="0"/>
        <mxCell id="a" value="Shop" vertex="1" parent="1"><mxGeometry x="0" y="0" width="100" height="100" as="geometry"/></mxCell>
        <mxCell id="b" value="Bank" vertex="1" parent="1"><mxGeometry x="200" y="0" width="100" height="100" as="geometry"/></mxCell>
        <mxCell id="e" value="pays" edge="1" source="a" target="b" parent="1"><mxGeometry relative="1" as="geometry"/></mxCell>
    </root></mxGraphModel>"#;

    fn object_by_name<'a>(tree: &'a Element, name: &str) -> &'a Element {
        tree.find("root")
            .unwrap()
            .find_all("object")
            .find(|o| o.get("c4Name") == Some(name))
            .unwrap()
    }

    #[test]
    fn test_translate_tree_uses_prompt_choice() {
        let input = Element::parse(TWO_SYSTEMS).unwrap();
        let output = translator(&["2"]).translate_tree(&input);
        let bank = object_by_name(&output, "Bank").find("mxCell").unwrap();
        let shop = object_by_name(&output, "Shop").find("mxCell").unwrap();
        assert!(bank.get("style").unwrap().contains("fillColor=#1061B0"));
        assert!(shop.get("style").unwrap().contains("fillColor=#8C8496"));
    }

    #[test]
    fn test_translate_keeps_root_attributes_and_order() {
        let input = Element::parse(TWO_SYSTEMS).unwrap();
        let output = translator(&[""]).translate_tree(&input);
        assert_eq!(output.get("dx"), Some("800"));
        let ids: Vec<_> = output
            .find("root")
            .unwrap()
            .children
            .iter()
            .map(|c| c.get("id").unwrap())
            .collect();
        assert_eq!(ids, vec!["0", "1", "a", "b", "e"]);
    }

    #[test]
    fn test_reserved_vertex_id_is_remapped_for_edges() {
        let xml = r#"<mxGraphModel><root>
            <mxCell id="1" value="Core" vertex="1" parent="0"><mxGeometry x="0" y="0" width="10" height="10" as="geometry"/></mxCell>
            <mxCell id="2" value="Other" vertex="1" parent="0"><mxGeometry x="50" y="0" width="10" height="10" as="geometry"/></mxCell>
            <mxCell id="3" edge="1" source="1" target="2"/>
        </root></mxGraphModel>"#;
        let output = translator(&[]).translate_tree(&Element::parse(xml).unwrap());
        let core = object_by_name(&output, "Core");
        let core_id = core.get("id").unwrap();
        assert_ne!(core_id, "1");
        let relationship = output
            .find("root")
            .unwrap()
            .find_all("object")
            .find(|o| o.get("c4Type") == Some("Relationship"))
            .unwrap();
        assert_eq!(relationship.find("mxCell").unwrap().get("source"), Some(core_id));
    }

    #[test]
    fn test_floating_edge_id_is_not_reused() {
        let xml = r#"<mxGraphModel><root>
            <mxCell value="A" vertex="1"><mxGeometry x="0" y="0" width="10" height="10" as="geometry"/></mxCell>
            <mxCell id="f" edge="1" source="x"/>
            <mxCell id="f" value="B" vertex="1"><mxGeometry x="20" y="0" width="10" height="10" as="geometry"/></mxCell>
        </root></mxGraphModel>"#;
        let output = translator(&[]).translate_tree(&Element::parse(xml).unwrap());
        let b = object_by_name(&output, "B");
        assert_ne!(b.get("id"), Some("f"));
    }

    #[test]
    fn test_floating_edge_with_taken_id_is_dropped() {
        let xml = r#"<mxGraphModel><root>
            <mxCell id="a" value="A" vertex="1"><mxGeometry x="0" y="0" width="10" height="10" as="geometry"/></mxCell>
            <mxCell id="1" edge="1" source="a"/>
            <mxCell id="g" edge="1" target="a"/>
            <mxCell id="g" edge="1"/>
        </root></mxGraphModel>"#;
        let output = translator(&[]).translate_tree(&Element::parse(xml).unwrap());
        let ids: Vec<_> = output
            .find("root")
            .unwrap()
            .children
            .iter()
            .map(|c| c.get("id").unwrap())
            .collect();
        assert_eq!(ids, vec!["0", "1", "a", "g"]);
    }

    #[test]
    fn test_translate_many_keeps_order_and_errors() {
        let inputs = [TWO_SYSTEMS, "<broken", "<mxGraphModel><root/></mxGraphModel>"];
        let mut translator = Translator::with_prompt(
            TranslateOptions::non_interactive(),
            Box::new(ScriptedPrompt::default()),
        );
        let results = translator.translate_many(&inputs);
        assert_eq!(results.len(), 3);
        assert!(results[0].as_ref().unwrap().contains("Shop"));
        assert!(results[1].as_ref().unwrap_err().is_input_format());
        assert!(results[2].as_ref().unwrap().ends_with("</root></mxGraphModel>"));
    }

    #[test]
    fn test_non_interactive_never_prompts() {
        let mut translator = Translator::with_prompt(
            TranslateOptions::non_interactive(),
            Box::new(ScriptedPrompt::new(["2"])),
        );
        let output = translator.translate(TWO_SYSTEMS).unwrap();
        let tree = Element::parse(&output).unwrap();
        let shop = object_by_name(&tree, "Shop").find("mxCell").unwrap();
        assert!(shop.get("style").unwrap().contains("fillColor=#1061B0"));
    }
}
