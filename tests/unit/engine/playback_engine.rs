use std::time::Duration;

use super::*;
use crate::{
    analysis::model::{AnalysisDocument, AnnotationShape, Clip},
    animation::keyframe::Keyframe,
    foundation::clock::ManualClock,
    foundation::core::Point,
    playback::media::SimulatedPlayer,
    render::descriptor::Geometry,
    store::analysis_store::MemoryStore,
};

type Engine = PlaybackEngine<SimulatedPlayer, ManualClock>;

fn circle(id: &str, start: f64, end: f64) -> Annotation {
    let mut a = Annotation::new(
        id,
        AnnotationShape::Circle {
            radius: 10.0,
            fill: None,
            stroke: Some("#fff".to_owned()),
            stroke_width: 2.0,
            shadow_blur: None,
        },
        start,
        end,
    );
    a.x = 100.0;
    a.y = 50.0;
    a
}

fn pause_scene(id: &str, start: f64, end: f64) -> Annotation {
    let mut a = circle(id, start, end);
    a.is_pause_scene = true;
    a
}

fn engine_with(annotations: Vec<Annotation>) -> (Engine, ManualClock) {
    let doc = AnalysisDocument {
        id: "match".to_owned(),
        clips: vec![Clip {
            id: "c".to_owned(),
            name: "First half".to_owned(),
            start_time: 0.0,
            end_time: 60.0,
        }],
        annotations,
        canvas_width: 800.0,
        canvas_height: 450.0,
    };
    let clock = ManualClock::new();
    let engine = PlaybackEngine::create(
        AnalysisSnapshot::new(doc).unwrap(),
        EngineConfig::default(),
        SimulatedPlayer::with_duration(60.0),
        clock.clone(),
    )
    .unwrap();
    (engine, clock)
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

fn assert_scale(scale: DisplayScale, x: f64, y: f64) {
    assert_close(scale.x, x);
    assert_close(scale.y, y);
}

struct RejectingStore;

impl AnalysisStore for RejectingStore {
    fn save(
        &mut self,
        _analysis_id: &str,
        _clips: &[Clip],
        _annotations: &[Annotation],
        _canvas: Size,
    ) -> TelestratorResult<()> {
        Err(TelestratorError::Other(anyhow::anyhow!("backend offline")))
    }
}

#[test]
fn create_rejects_invalid_config() {
    let cfg = EngineConfig {
        smoothing_alpha: 0.0,
        ..EngineConfig::default()
    };
    let snap = AnalysisSnapshot::new(AnalysisDocument {
        id: "x".to_owned(),
        clips: vec![],
        annotations: vec![],
        canvas_width: 0.0,
        canvas_height: 0.0,
    })
    .unwrap();
    let res = PlaybackEngine::create(snap, cfg, SimulatedPlayer::new(), ManualClock::new());
    assert!(matches!(res, Err(TelestratorError::Validation(_))));
}

#[test]
fn annotation_fades_in_and_adopts_first_target() {
    let (mut e, _) = engine_with(vec![circle("a", 10.0, 20.0)]);
    assert!(e.tick(5.0).is_empty());

    // Candidate but fully transparent at the exact start.
    assert!(e.tick(10.0).is_empty());
    assert!(e.smoothed_state("a").is_some());

    e.smoothing.reset();
    let out = e.tick(10.25);
    assert_eq!(out.len(), 1);
    assert!((out[0].opacity - 0.5).abs() < 1e-12);
    assert_eq!(out[0].position, Point::new(100.0, 50.0));
}

#[test]
fn smoothing_moves_a_fraction_toward_the_keyframed_target() {
    let mut a = circle("a", 0.0, 30.0);
    a.keyframes = vec![Keyframe::at(0.0, 0.0, 0.0), Keyframe::at(10.0, 100.0, 0.0)];
    let (mut e, _) = engine_with(vec![a]);

    e.tick(5.0);
    let start = e.smoothed_state("a").unwrap().position;
    assert_eq!(start, Point::new(50.0, 0.0));

    e.tick(10.0);
    let next = e.smoothed_state("a").unwrap().position;
    assert!((next.x - (50.0 + 50.0 * 0.12)).abs() < 1e-9);

    for _ in 0..200 {
        e.animate();
    }
    assert!((e.smoothed_state("a").unwrap().position.x - 100.0).abs() < 1e-6);
}

#[test]
fn frame_does_not_advance_smoothing() {
    let mut a = circle("a", 0.0, 30.0);
    a.keyframes = vec![Keyframe::at(0.0, 0.0, 0.0), Keyframe::at(10.0, 100.0, 0.0)];
    let (mut e, _) = engine_with(vec![a]);
    e.tick(5.0);
    e.on_time_update(10.0);

    let before = *e.smoothed_state("a").unwrap();
    let out = e.frame();
    assert_eq!(out[0].position, before.position);
    assert_eq!(e.smoothed_state("a"), Some(&before));
}

#[test]
fn leaving_the_window_drops_smoothing_state() {
    let (mut e, _) = engine_with(vec![circle("a", 10.0, 20.0), circle("b", 0.0, 60.0)]);
    e.tick(15.0);
    assert!(e.smoothed_state("a").is_some());
    e.tick(25.0);
    assert!(e.smoothed_state("a").is_none());
    assert!(e.smoothed_state("b").is_some());
}

#[test]
fn opacity_at_epsilon_is_not_rendered() {
    let mut faint = circle("faint", 0.0, 60.0);
    faint.opacity = EngineConfig::default().opacity_epsilon;
    let mut visible = circle("visible", 0.0, 60.0);
    visible.opacity = 0.02;
    let (mut e, _) = engine_with(vec![faint, visible]);

    for _ in 0..5 {
        let out = e.tick(30.0);
        let ids: Vec<&str> = out.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["visible"]);
    }
    assert_close(e.smoothed_state("faint").unwrap().opacity, 0.01);
}

#[test]
fn duplicate_ids_never_reach_the_engine() {
    let mut left = circle("a", 0.0, 60.0);
    left.x = 0.0;
    let right = circle("a", 0.0, 60.0);
    let doc = AnalysisDocument {
        id: "match".to_owned(),
        clips: vec![],
        annotations: vec![left, right],
        canvas_width: 800.0,
        canvas_height: 450.0,
    };
    assert!(matches!(
        AnalysisSnapshot::new(doc),
        Err(TelestratorError::Validation(_))
    ));
}

#[test]
fn inverted_windows_are_never_rendered() {
    let (mut e, _) = engine_with(vec![circle("bad", 20.0, 10.0)]);
    for t in [9.0, 10.0, 15.0, 20.0, 21.0] {
        assert!(e.tick(t).is_empty());
    }
}

#[test]
fn output_is_scaled_to_the_display() {
    let (mut e, _) = engine_with(vec![circle("a", 0.0, 60.0)]);
    e.on_resize(Size::new(1600.0, 1200.0));
    e.on_metadata(Size::new(1920.0, 1080.0));
    let display = e.display_size().unwrap();
    assert_close(display.width, 1600.0);
    assert_close(display.height, 900.0);
    assert_scale(e.scale(), 2.0, 2.0);

    let out = e.tick(30.0);
    assert_close(out[0].position.x, 200.0);
    assert_close(out[0].position.y, 100.0);
    let Geometry::Circle(g) = &out[0].geometry else {
        panic!("expected circle geometry");
    };
    assert_close(g.radius, 20.0);
    assert_close(g.stroke_width, 4.0);
}

#[test]
fn significant_rescale_resets_smoothing() {
    let (mut e, _) = engine_with(vec![circle("a", 0.0, 60.0)]);
    e.on_resize(Size::new(800.0, 450.0));
    e.on_metadata(Size::new(1600.0, 900.0));
    e.tick(30.0);
    assert!(e.smoothed_state("a").is_some());

    // Same scale: state survives.
    e.on_resize(Size::new(800.0, 450.0));
    assert!(e.smoothed_state("a").is_some());

    e.on_resize(Size::new(1600.0, 900.0));
    assert!(e.smoothed_state("a").is_none());
}

#[test]
fn degenerate_container_keeps_previous_scale() {
    let (mut e, _) = engine_with(vec![]);
    e.on_resize(Size::new(1600.0, 900.0));
    e.on_metadata(Size::new(1920.0, 1080.0));
    let before = e.scale();
    assert_scale(before, 2.0, 2.0);
    e.on_resize(Size::ZERO);
    assert_eq!(e.scale(), before);
}

#[test]
fn pause_scene_pauses_counts_down_and_resumes_at_end() {
    let (mut e, clock) = engine_with(vec![pause_scene("p", 10.0, 12.5)]);
    e.on_play();
    e.tick(9.9);
    assert!(e.is_playing());

    e.tick(10.1);
    assert!(!e.is_playing());
    assert!(!e.media().is_playing());
    assert_eq!(e.countdown_remaining(), Some(3));
    assert!(e.wants_animation_frame());

    clock.advance(Duration::from_secs(1));
    e.poll_countdown();
    assert_eq!(e.countdown_remaining(), Some(2));

    clock.advance(Duration::from_secs(2));
    e.poll_countdown();
    assert!(e.active_pause_scene().is_none());
    assert!(e.is_playing());
    assert_eq!(e.media().time(), 12.5);
    assert_eq!(e.current_time(), 12.5);
    assert_eq!(
        e.media().history(),
        &[
            PlaybackDirective::Pause,
            PlaybackDirective::SeekTo(12.5),
            PlaybackDirective::Play
        ]
    );
}

#[test]
fn skip_resumes_immediately() {
    let (mut e, _) = engine_with(vec![pause_scene("p", 10.0, 14.0)]);
    assert!(!e.skip_pause_scene());
    e.tick(10.0);
    assert!(e.skip_pause_scene());
    assert_eq!(e.media().time(), 14.0);
    assert!(e.is_playing());
    assert!(e.triggered_ids().contains("p"));
}

#[test]
fn seeking_back_rearms_pause_scenes() {
    let (mut e, _) = engine_with(vec![pause_scene("p", 10.0, 11.0)]);
    e.tick(10.0);
    e.skip_pause_scene();
    e.tick(11.2);
    assert!(e.active_pause_scene().is_none());

    e.seek(4.0);
    assert!(e.triggered_ids().is_empty());
    assert_eq!(e.media().time(), 4.0);

    e.tick(10.05);
    assert_eq!(e.active_pause_scene().unwrap().annotation_id, "p");
}

#[test]
fn seeking_back_during_a_hold_keeps_the_countdown() {
    let (mut e, clock) = engine_with(vec![pause_scene("p", 10.0, 13.0)]);
    e.on_play();
    e.tick(10.1);
    assert_eq!(e.countdown_remaining(), Some(3));

    e.seek(5.0);
    assert!(e.triggered_ids().is_empty());
    assert_eq!(e.active_pause_scene().unwrap().annotation_id, "p");

    clock.advance(Duration::from_secs(3));
    e.poll_countdown();
    assert!(e.active_pause_scene().is_none());
    assert_eq!(e.media().time(), 13.0);
    assert!(e.triggered_ids().is_empty());
    assert!(e.is_playing());
}

#[test]
fn seek_is_clamped_to_known_duration() {
    let (mut e, _) = engine_with(vec![]);
    e.set_duration(30.0);
    e.seek(45.0);
    assert_eq!(e.media().history(), &[PlaybackDirective::SeekTo(30.0)]);
    e.seek(-3.0);
    assert_eq!(e.current_time(), 0.0);
}

#[test]
fn delete_persists_the_remaining_annotations() {
    let (mut e, _) = engine_with(vec![circle("a", 0.0, 5.0), circle("b", 0.0, 5.0)]);
    e.tick(2.0);
    let mut store = MemoryStore::new();
    e.delete_annotation("a", &mut store).unwrap();

    let saved = store.latest().unwrap();
    assert_eq!(saved.id, "match");
    assert_eq!(saved.clips.len(), 1);
    assert_eq!(saved.canvas_size(), Size::new(800.0, 450.0));
    let ids: Vec<&str> = saved.annotations.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["b"]);

    assert!(e.smoothed_state("a").is_none());
    assert_eq!(e.frame().len(), 1);
}

#[test]
fn deleting_the_active_pause_scene_resumes_in_place() {
    let (mut e, _) = engine_with(vec![pause_scene("p", 10.0, 20.0)]);
    e.tick(10.0);
    e.delete_annotation("p", &mut MemoryStore::new()).unwrap();
    assert!(e.active_pause_scene().is_none());
    assert!(e.is_playing());
    assert_eq!(e.media().time(), 0.0);
    assert_eq!(e.media().history().last(), Some(&PlaybackDirective::Play));
    assert!(e.pause_scenes().is_empty());
}

#[test]
fn unknown_id_is_rejected_without_saving() {
    let (mut e, _) = engine_with(vec![circle("a", 0.0, 5.0)]);
    let mut store = MemoryStore::new();
    assert!(matches!(
        e.delete_annotation("zzz", &mut store),
        Err(TelestratorError::Validation(_))
    ));
    assert!(store.saved().is_empty());
}

#[test]
fn failed_save_keeps_local_deletion() {
    let (mut e, _) = engine_with(vec![circle("a", 0.0, 5.0)]);
    let err = e.delete_annotation("a", &mut RejectingStore).unwrap_err();
    assert!(matches!(err, TelestratorError::Persistence(ref m) if m.contains("backend offline")));
    assert!(e.snapshot().annotation("a").is_none());
}

#[test]
fn set_canvas_is_used_for_scale_and_saves() {
    let (mut e, _) = engine_with(vec![circle("a", 0.0, 5.0)]);
    e.on_resize(Size::new(1600.0, 900.0));
    e.on_metadata(Size::new(1600.0, 900.0));
    e.set_canvas(Size::new(400.0, 225.0));
    assert_scale(e.scale(), 4.0, 4.0);

    let mut store = MemoryStore::new();
    e.delete_annotation("a", &mut store).unwrap();
    assert_eq!(store.latest().unwrap().canvas_width, 400.0);
}

#[test]
fn dispose_stops_everything() {
    let (mut e, clock) = engine_with(vec![pause_scene("p", 10.0, 13.0), circle("a", 0.0, 60.0)]);
    e.on_play();
    e.tick(10.0);
    assert!(e.wants_animation_frame());

    e.dispose();
    assert!(e.is_disposed());
    assert!(!e.wants_animation_frame());
    assert!(e.active_pause_scene().is_none());

    clock.advance(Duration::from_secs(10));
    e.poll_countdown();
    e.on_play();
    assert!(e.tick(20.0).is_empty());
    assert!(e.frame().is_empty());
    assert_eq!(e.media().history(), &[PlaybackDirective::Pause]);
    assert!(matches!(
        e.delete_annotation("a", &mut MemoryStore::new()),
        Err(TelestratorError::Playback(_))
    ));
}

#[test]
fn wants_frames_only_while_playing_or_holding() {
    let (mut e, _) = engine_with(vec![]);
    assert!(!e.wants_animation_frame());
    e.on_play();
    assert!(e.wants_animation_frame());
    e.on_pause();
    assert!(!e.wants_animation_frame());
}
