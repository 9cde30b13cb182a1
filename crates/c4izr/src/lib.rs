//! c4izr - Convert draw.io diagrams into C4 context diagrams
//!
//! A library for restyling any draw.io `mxGraphModel` as a C4 software
//! system context diagram: vertices become "Software System" blocks,
//! connected edges become "Relationship" arrows.
//!
//! # Quick Start
//!
//! ```rust
//! use c4izr::{translate, TranslateOptions};
//!
//! let input = r#"<mxGraphModel><root>
//!   <mxCell id="0"/><mxCell id="1" parent="0"/>
//!   <mxCell id="2" value="Shop" vertex="1" parent="1">
//!     <mxGeometry x="40" y="40" width="120" height="60" as="geometry"/>
//!   </mxCell>
//! </root></mxGraphModel>"#;
//!
//! let c4 = translate(input, TranslateOptions::non_interactive()).unwrap();
//! assert!(c4.contains(r#"c4Name="Shop""#));
//! ```
//!
//! # Advanced Usage
//!
//! [`Translator`] takes a [`Prompt`](prelude::Prompt), so the main-system
//! choice can be scripted:
//!
//! ```rust
//! use c4izr::prelude::*;
//!
//! let input = r#"<mxGraphModel><root>
//!   <mxCell id="a" value="Shop" vertex="1"/>
//!   <mxCell id="b" value="Bank" vertex="1"/>
//! </root></mxGraphModel>"#;
//!
//! let prompt = ScriptedPrompt::new(["2"]);
//! let mut translator = Translator::with_prompt(TranslateOptions::new(), Box::new(prompt));
//!
//! let summary = translator.inspect(input).unwrap();
//! assert_eq!(summary.vertex_count(), 2);
//!
//! let c4 = translator.translate(input).unwrap();
//! println!("{}", pretty_print(&c4));
//! ```

pub mod core;
pub mod pipeline;

pub use core::*;
pub use pipeline::{inspect, pretty_print, Translator};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{C4Error, Element, Result, TranslateOptions};
    pub use crate::pipeline::selector::{ConsolePrompt, Prompt, ScriptedPrompt};
    pub use crate::pipeline::summary::{DiagramSummary, VertexSummary};
    pub use crate::pipeline::{inspect, pretty_print, Translator};
}

/// Translate one draw.io diagram into a C4 context diagram
///
/// In interactive mode the main system is chosen on the process console.
///
/// # Arguments
/// * `input` - a serialized `mxGraphModel`
/// * `options` - scaling factor and interactivity
///
/// # Returns
/// * `Ok(String)` - the compact output `mxGraphModel`
/// * `Err` - if the input is not well-formed XML
///
/// # Example
/// ```rust
/// use c4izr::{translate, TranslateOptions};
///
/// let empty = "<mxGraphModel><root/></mxGraphModel>";
/// let out = translate(empty, TranslateOptions::non_interactive()).unwrap();
/// assert_eq!(
///     out,
///     r#"<mxGraphModel><root><mxCell id="0"/><mxCell id="1" parent="0"/></root></mxGraphModel>"#
/// );
/// ```
pub fn translate(input: &str, options: TranslateOptions) -> Result<String> {
    Translator::new(options).translate(input)
}
