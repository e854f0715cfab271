use super::*;

const DOC: &str = r##"{
    "id": "match-42",
    "canvasWidth": 960,
    "canvasHeight": 540,
    "clips": [{ "id": "c1", "name": "Corner", "startTime": 5, "endTime": 30 }],
    "annotations": [
        { "id": "a1", "type": "circle", "clipId": "c1", "startTime": 10, "endTime": 13,
          "x": 100, "y": 50, "radius": 12, "stroke": "#ff0", "strokeWidth": 3,
          "isPauseScene": true, "pauseSceneDuration": 3 },
        { "id": "a2", "type": "arrow", "startTime": 1, "endTime": 4,
          "points": [0, 0, 40, 20], "keyframes": [{ "time": 1, "x": 0, "y": 0 }] },
        { "id": "a3", "type": "text", "startTime": 2, "endTime": 6, "text": "Press!",
          "fontSize": 18, "opacity": 0.5 }
    ]
}"##;

fn doc() -> AnalysisDocument {
    serde_json::from_str(DOC).unwrap()
}

#[test]
fn parses_tagged_shapes_and_defaults() {
    let d = doc();
    assert_eq!(d.canvas_size(), Size::new(960.0, 540.0));
    assert_eq!(d.annotations.len(), 3);

    let a1 = &d.annotations[0];
    assert_eq!(a1.kind(), AnnotationKind::Circle);
    assert!(a1.is_pause_scene);
    assert_eq!(a1.clip_id.as_deref(), Some("c1"));
    assert_eq!(a1.scale_x, 1.0);
    assert_eq!(a1.opacity, 1.0);
    match &a1.shape {
        AnnotationShape::Circle {
            radius,
            stroke_width,
            stroke,
            ..
        } => {
            assert_eq!(*radius, 12.0);
            assert_eq!(*stroke_width, 3.0);
            assert_eq!(stroke.as_deref(), Some("#ff0"));
        }
        other => panic!("unexpected shape {other:?}"),
    }

    let a2 = &d.annotations[1];
    assert_eq!(a2.kind(), AnnotationKind::Arrow);
    assert_eq!(a2.keyframes.len(), 1);
    match &a2.shape {
        AnnotationShape::Arrow {
            points,
            stroke_width,
            ..
        } => {
            assert_eq!(points, &vec![0.0, 0.0, 40.0, 20.0]);
            assert_eq!(*stroke_width, 2.0);
        }
        other => panic!("unexpected shape {other:?}"),
    }

    let a3 = &d.annotations[2];
    assert_eq!(a3.opacity, 0.5);
    assert!(matches!(
        &a3.shape,
        AnnotationShape::Text { text, font_size, .. } if text == "Press!" && *font_size == 18.0
    ));
}

#[test]
fn serializes_back_with_type_tag() {
    let d = doc();
    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["annotations"][0]["type"], "circle");
    assert_eq!(json["annotations"][0]["strokeWidth"], 3.0);
    assert_eq!(json["annotations"][2]["fontSize"], 18.0);
    let again: AnalysisDocument = serde_json::from_value(json).unwrap();
    assert_eq!(again, d);
}

#[test]
fn validate_accepts_inverted_windows() {
    let mut d = doc();
    d.annotations[2].start_time = 9.0;
    d.annotations[2].end_time = 3.0;
    d.validate().unwrap();
}

#[test]
fn validate_rejects_duplicate_and_empty_ids() {
    let mut d = doc();
    d.annotations[1].id = "a1".to_owned();
    assert!(matches!(d.validate(), Err(TelestratorError::Validation(_))));

    let mut d = doc();
    d.clips[0].id = " ".to_owned();
    assert!(d.validate().is_err());

    let mut d = doc();
    d.id.clear();
    assert!(d.validate().is_err());
}

#[test]
fn validate_rejects_non_finite_times_and_canvas() {
    let mut d = doc();
    d.annotations[0].end_time = f64::INFINITY;
    assert!(d.validate().is_err());

    let mut d = doc();
    d.canvas_width = -1.0;
    assert!(d.validate().is_err());
}

#[test]
fn pause_countdown_rounds_up() {
    let mut a = Annotation::new(
        "p",
        AnnotationShape::Spotlight {
            radius: 30.0,
            fill: None,
            stroke: None,
            stroke_width: 2.0,
            shadow_blur: Some(12.0),
        },
        10.0,
        13.0,
    );
    assert_eq!(a.pause_countdown_secs(), 3);
    a.end_time = 12.2;
    assert_eq!(a.pause_countdown_secs(), 3);
    a.end_time = 9.0;
    assert_eq!(a.pause_countdown_secs(), 0);
}
