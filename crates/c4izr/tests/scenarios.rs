//! End-to-end translation scenarios

use c4izr::prelude::*;

const MAIN_FILL: &str = "fillColor=#1061B0";
const EXTERNAL_FILL: &str = "fillColor=#8C8496";

fn vertex(id: &str, label: &str, x: f64, y: f64, w: f64, h: f64) -> String {
    format!(
        r#"<mxCell id="{id}" value="{label}" style="rounded=0;whiteSpace=wrap;html=1;" vertex="1" parent="1"><mxGeometry x="{x}" y="{y}" width="{w}" height="{h}" as="geometry"/></mxCell>"#
    )
}

fn model(cells: &[String]) -> String {
    format!(
        r#"<mxGraphModel dx="1426" dy="794" grid="1" gridSize="10"><root><mxCell id="0"/><mxCell id="1" parent="0"/>{}</root></mxGraphModel>"#,
        cells.concat()
    )
}

fn non_interactive() -> Translator {
    Translator::with_prompt(
        TranslateOptions::non_interactive(),
        Box::new(ScriptedPrompt::default()),
    )
}

fn objects(output: &Element) -> Vec<&Element> {
    output.find("root").unwrap().find_all("object").collect()
}

fn system<'a>(output: &'a Element, name: &str) -> &'a Element {
    objects(output)
        .into_iter()
        .find(|o| o.get("c4Name") == Some(name))
        .unwrap_or_else(|| panic!("no system named {name}"))
}

fn style_of(object: &Element) -> &str {
    object.find("mxCell").unwrap().get("style").unwrap()
}

fn scenario_a() -> String {
    model(&[
        vertex("a", "A", 260.0, 170.0, 120.0, 60.0),
        vertex("c", "C", 260.0, 350.0, 120.0, 60.0),
        vertex("b", "B", 600.0, 160.0, 80.0, 80.0),
        vertex("d", "D", 280.0, 490.0, 80.0, 80.0),
    ])
}

#[test]
fn test_scenario_a_bounding_box_and_center() {
    let summary = inspect(&scenario_a()).unwrap();
    let geometry = summary.geometry.unwrap();
    assert_eq!(
        (
            geometry.bounding_box.min_x,
            geometry.bounding_box.min_y,
            geometry.bounding_box.max_x,
            geometry.bounding_box.max_y
        ),
        (260.0, 160.0, 680.0, 570.0)
    );
    assert_eq!((geometry.center.x, geometry.center.y), (470.0, 365.0));
}

#[test]
fn test_scenario_a_main_system_position() {
    let output = non_interactive().translate(&scenario_a()).unwrap();
    let tree = Element::parse(&output).unwrap();

    let a = system(&tree, "A");
    assert!(style_of(a).contains(MAIN_FILL));
    let geometry = a.find("mxCell").unwrap().find("mxGeometry").unwrap();
    assert_eq!(geometry.get("x"), Some("176"));
    assert_eq!(geometry.get("y"), Some("92"));
    assert_eq!(geometry.get("width"), Some("240"));
    assert_eq!(geometry.get("height"), Some("120"));

    for name in ["B", "C", "D"] {
        assert!(style_of(system(&tree, name)).contains(EXTERNAL_FILL));
    }
}

#[test]
fn test_scenario_a_interactive_choice() {
    let mut translator = Translator::with_prompt(
        TranslateOptions::new(),
        Box::new(ScriptedPrompt::new(["abc", "9", "3"])),
    );
    let output = translator.translate(&scenario_a()).unwrap();
    let tree = Element::parse(&output).unwrap();
    // Third in encounter order is B
    assert!(style_of(system(&tree, "B")).contains(MAIN_FILL));
    assert!(style_of(system(&tree, "A")).contains(EXTERNAL_FILL));
}

#[test]
fn test_scenario_b_floating_edge_passthrough() {
    let floating = r#"<mxCell id="f1" value="dangling" style="endArrow=classic;html=1;" edge="1" parent="1" source="a"><mxGeometry width="50" height="50" relative="1" as="geometry"><mxPoint x="400" y="300" as="targetPoint"/></mxGeometry></mxCell>"#;
    let input = model(&[
        vertex("a", "A", 0.0, 0.0, 100.0, 100.0),
        floating.to_string(),
    ]);
    let output = non_interactive().translate(&input).unwrap();

    assert!(output.contains(floating));
    let tree = Element::parse(&output).unwrap();
    assert!(objects(&tree)
        .iter()
        .all(|o| o.get("c4Type") != Some("Relationship")));
}

#[test]
fn test_scenario_c_no_vertices() {
    let input = model(&[r#"<mxCell id="e" edge="1" source="x" target="y" parent="1"/>"#.to_string()]);
    let output = non_interactive().translate(&input).unwrap();
    assert_eq!(
        output,
        r#"<mxGraphModel dx="1426" dy="794" grid="1" gridSize="10"><root><mxCell id="0"/><mxCell id="1" parent="0"/></root></mxGraphModel>"#
    );
}

#[test]
fn test_scenario_d_duplicate_labels_all_main() {
    let input = model(&[
        vertex("x1", "X", 0.0, 0.0, 100.0, 100.0),
        vertex("y", "Y", 200.0, 0.0, 100.0, 100.0),
        vertex("x2", "X", 400.0, 0.0, 100.0, 100.0),
    ]);

    for answer in ["1", "3"] {
        let mut translator = Translator::with_prompt(
            TranslateOptions::new(),
            Box::new(ScriptedPrompt::new([answer])),
        );
        let tree = Element::parse(&translator.translate(&input).unwrap()).unwrap();
        let xs: Vec<_> = objects(&tree)
            .into_iter()
            .filter(|o| o.get("c4Name") == Some("X"))
            .collect();
        assert_eq!(xs.len(), 2);
        assert!(xs.iter().all(|o| style_of(o).contains(MAIN_FILL)));
        assert!(style_of(system(&tree, "Y")).contains(EXTERNAL_FILL));
    }
}
