//! C4 metadata constants, label templates and styles
//!
//! The `%c4...%` tokens in the label templates are substituted by draw.io
//! when it renders a cell with `placeholders="1"`. This crate emits them
//! literally and never expands them.

/// `c4Type` of a translated vertex
pub const SYSTEM_TYPE: &str = "Software System";

/// `c4Type` of a translated edge
pub const RELATIONSHIP_TYPE: &str = "Relationship";

/// Fixed size of every translated system box
pub const SYSTEM_WIDTH: f64 = 240.0;
pub const SYSTEM_HEIGHT: f64 = 120.0;

/// Placeholder technology for relationships
pub const DEFAULT_TECHNOLOGY: &str = "e.g. JSON/HTTP";

/// Placeholder description for unlabeled relationships
pub const DEFAULT_RELATIONSHIP_DESCRIPTION: &str = "e.g. Makes API calls";

/// Label template for systems, using `%c4Name%`, `%c4Type%` and `%c4Description%`
pub const SYSTEM_LABEL: &str = concat!(
    r#"<font style="font-size: 16px"><b>%c4Name%</b></font>"#,
    r#"<div>[%c4Type%]</div><br>"#,
    r#"<div><font style="font-size: 11px">"#,
    r##"<font color="#cccccc">%c4Description%</font></div>"##,
);

/// Label template for relationships, using `%c4Description%` and `%c4Technology%`
pub const RELATIONSHIP_LABEL: &str = concat!(
    r#"<div style="text-align: left">"#,
    r#"<div style="text-align: center"><b>%c4Description%</b></div>"#,
    r#"<div style="text-align: center">[%c4Technology%]</div></div>"#,
);

/// Style of the main system: dark blue fill
pub const MAIN_SYSTEM_STYLE: &str = concat!(
    "rounded=1;whiteSpace=wrap;html=1;labelBackgroundColor=none;fillColor=#1061B0;",
    "fontColor=#ffffff;align=center;arcSize=10;strokeColor=#0D5091;metaEdit=1;resizable=0;",
    "points=[[0.25,0,0],[0.5,0,0],[0.75,0,0],[1,0.25,0],[1,0.5,0],[1,0.75,0],[0.75,1,0],[0.5,1,0],[0.25,1,0],[0,0.75,0],[0,0.5,0],[0,0.25,0]];",
);

/// Style of every other system: grey fill
pub const EXTERNAL_SYSTEM_STYLE: &str = concat!(
    "rounded=1;whiteSpace=wrap;html=1;labelBackgroundColor=none;fillColor=#8C8496;",
    "fontColor=#ffffff;align=center;arcSize=10;strokeColor=#736782;metaEdit=1;resizable=0;",
    "points=[[0.25,0,0],[0.5,0,0],[0.75,0,0],[1,0.25,0],[1,0.5,0],[1,0.75,0],[0.75,1,0],[0.5,1,0],[0.25,1,0],[0,0.75,0],[0,0.5,0],[0,0.25,0]];",
);

/// Orthogonal arrow style shared by all relationships
pub const RELATIONSHIP_STYLE: &str = concat!(
    "endArrow=blockThin;html=1;fontSize=10;fontColor=#404040;strokeWidth=1;endFill=1;",
    "strokeColor=#828282;elbow=vertical;metaEdit=1;endSize=14;startSize=14;jumpStyle=arc;",
    "jumpSize=16;rounded=0;edgeStyle=orthogonalEdgeStyle;",
);

/// Visual variant of a translated system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemStyle {
    /// The system under description
    Main,
    /// A system it interacts with
    External,
}

impl SystemStyle {
    pub fn for_label(label: &str, main_label: &str) -> Self {
        if label == main_label {
            SystemStyle::Main
        } else {
            SystemStyle::External
        }
    }

    pub fn style(&self) -> &'static str {
        match self {
            SystemStyle::Main => MAIN_SYSTEM_STYLE,
            SystemStyle::External => EXTERNAL_SYSTEM_STYLE,
        }
    }
}

/// Placeholder description for a system, meant to be edited by hand
pub fn system_description(name: &str) -> String {
    format!("Description of {}.", name.to_lowercase())
}
