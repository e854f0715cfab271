use super::*;

fn pose(x: f64, y: f64, opacity: f64) -> SmoothedState {
    SmoothedState {
        position: Point::new(x, y),
        opacity,
        rotation: 0.0,
        scale: Vec2::new(1.0, 1.0),
    }
}

#[test]
fn first_sight_adopts_target() {
    let mut f = SmoothingFilter::new(0.12, 0.18);
    let s = f.update("a", pose(100.0, 50.0, 0.3));
    assert_eq!(s, pose(100.0, 50.0, 0.3));
    assert_eq!(f.len(), 1);
}

#[test]
fn converges_by_alpha_per_step() {
    let mut f = SmoothingFilter::new(0.12, 0.18);
    f.update("a", pose(0.0, 0.0, 0.0));
    let s = f.update("a", pose(100.0, -100.0, 1.0));
    assert!((s.position.x - 12.0).abs() < 1e-12);
    assert!((s.position.y + 12.0).abs() < 1e-12);
    assert!((s.opacity - 0.18).abs() < 1e-12);

    let s = f.update("a", pose(100.0, -100.0, 1.0));
    // 12 + 88 * 0.12
    assert!((s.position.x - 22.56).abs() < 1e-9);
}

#[test]
fn opacity_resolves_faster_than_position() {
    let mut f = SmoothingFilter::new(0.12, 0.18);
    f.update("a", pose(0.0, 0.0, 0.0));
    let mut s = pose(0.0, 0.0, 0.0);
    for _ in 0..10 {
        s = f.update("a", pose(1.0, 0.0, 1.0));
    }
    assert!(s.opacity > s.position.x);
    assert!(s.opacity < 1.0);
}

#[test]
fn rotation_and_scale_are_smoothed_too() {
    let mut f = SmoothingFilter::new(0.5, 0.5);
    f.update("a", pose(0.0, 0.0, 1.0));
    let target = SmoothedState {
        rotation: 90.0,
        scale: Vec2::new(3.0, 2.0),
        ..pose(0.0, 0.0, 1.0)
    };
    let s = f.update("a", target);
    assert_eq!(s.rotation, 45.0);
    assert_eq!(s.scale, Vec2::new(2.0, 1.5));
}

#[test]
fn retain_remove_and_reset() {
    let mut f = SmoothingFilter::new(0.12, 0.18);
    f.update("a", pose(0.0, 0.0, 1.0));
    f.update("b", pose(0.0, 0.0, 1.0));
    f.update("c", pose(0.0, 0.0, 1.0));
    f.retain(|id| id != "b");
    assert!(f.get("b").is_none());
    assert!(f.remove("a").is_some());
    assert_eq!(f.len(), 1);
    f.reset();
    assert!(f.is_empty());

    // After a reset the next update snaps again.
    let s = f.update("c", pose(9.0, 9.0, 1.0));
    assert_eq!(s.position, Point::new(9.0, 9.0));
}
