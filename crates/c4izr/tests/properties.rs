//! Property tests for geometry analysis and scaling

use c4izr::core::Rect;
use c4izr::pipeline::geometry::bounding_box;
use c4izr::pipeline::vertex::scale_axis;
use c4izr::prelude::*;
use proptest::prelude::*;

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (
        -2000.0f64..2000.0,
        -2000.0f64..2000.0,
        0.0f64..500.0,
        0.0f64..500.0,
    )
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn diagram(rects: &[Rect]) -> String {
    let cells: String = rects
        .iter()
        .enumerate()
        .map(|(ix, r)| {
            format!(
                r#"<mxCell id="v{ix}" value="V{ix}" vertex="1" parent="1"><mxGeometry x="{}" y="{}" width="{}" height="{}" as="geometry"/></mxCell>"#,
                r.x, r.y, r.width, r.height
            )
        })
        .collect();
    format!("<mxGraphModel><root><mxCell id=\"0\"/><mxCell id=\"1\" parent=\"0\"/>{cells}</root></mxGraphModel>")
}

proptest! {
    /// Every contributing rectangle lies inside the bounding box
    #[test]
    fn prop_bounding_box_contains_all(rects in prop::collection::vec(rect_strategy(), 1..20)) {
        let bbox = bounding_box(&rects).unwrap();
        for r in &rects {
            prop_assert!(bbox.min_x <= r.x && r.right() <= bbox.max_x);
            prop_assert!(bbox.min_y <= r.y && r.bottom() <= bbox.max_y);
        }
    }

    /// The center is the midpoint of the box
    #[test]
    fn prop_center_is_midpoint(rects in prop::collection::vec(rect_strategy(), 1..20)) {
        let bbox = bounding_box(&rects).unwrap();
        let center = bbox.center();
        prop_assert_eq!(center.x, (bbox.min_x + bbox.max_x) / 2.0);
        prop_assert_eq!(center.y, (bbox.min_y + bbox.max_y) / 2.0);
    }

    /// Translating at scale 1 emits every position exactly as it was written
    #[test]
    fn prop_scale_one_is_identity(rects in prop::collection::vec(rect_strategy(), 1..10)) {
        let mut translator = Translator::with_prompt(
            TranslateOptions::non_interactive().with_scaling_factor(1.0),
            Box::new(ScriptedPrompt::default()),
        );
        let output = Element::parse(&translator.translate(&diagram(&rects)).unwrap()).unwrap();
        let systems: Vec<_> = output.find("root").unwrap().find_all("object").collect();
        prop_assert_eq!(systems.len(), rects.len());

        for (system, rect) in systems.iter().zip(&rects) {
            let geometry = system.find("mxCell").unwrap().find("mxGeometry").unwrap();
            let (x, y) = (rect.x.to_string(), rect.y.to_string());
            prop_assert_eq!(geometry.get("x"), Some(x.as_str()));
            prop_assert_eq!(geometry.get("y"), Some(y.as_str()));
        }
    }

    /// The analyzer agrees with the bounding box over the input rectangles
    #[test]
    fn prop_inspect_matches_bounding_box(rects in prop::collection::vec(rect_strategy(), 1..10)) {
        let summary = inspect(&diagram(&rects)).unwrap();
        let geometry = summary.geometry.unwrap();
        prop_assert_eq!(geometry.bounding_box, bounding_box(&rects).unwrap());
        prop_assert_eq!(geometry.contributing, rects.len());
    }

    /// Output positions follow c + (v - c) * s and the size is fixed
    #[test]
    fn prop_translated_positions_follow_scaling(
        rects in prop::collection::vec(rect_strategy(), 1..10),
        factor in (0.1f64..5.0).prop_filter("scale 1 copies the input text", |f| *f != 1.0),
    ) {
        let mut translator = Translator::with_prompt(
            TranslateOptions::non_interactive().with_scaling_factor(factor),
            Box::new(ScriptedPrompt::default()),
        );
        let output = Element::parse(&translator.translate(&diagram(&rects)).unwrap()).unwrap();
        let center = bounding_box(&rects).unwrap().center();
        let systems: Vec<_> = output.find("root").unwrap().find_all("object").collect();
        prop_assert_eq!(systems.len(), rects.len());

        for (system, rect) in systems.iter().zip(&rects) {
            let geometry = system.find("mxCell").unwrap().find("mxGeometry").unwrap();
            let x: f64 = geometry.get("x").unwrap().parse().unwrap();
            let y: f64 = geometry.get("y").unwrap().parse().unwrap();
            prop_assert_eq!(x, scale_axis(rect.x, center.x, factor));
            prop_assert_eq!(y, scale_axis(rect.y, center.y, factor));
            prop_assert_eq!(geometry.get("width"), Some("240"));
            prop_assert_eq!(geometry.get("height"), Some("120"));
        }
    }
}
