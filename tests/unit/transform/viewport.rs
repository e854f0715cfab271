use super::*;

fn assert_scale(s: DisplayScale, x: f64, y: f64) {
    assert!(
        (s.x - x).abs() < 1e-9 && (s.y - y).abs() < 1e-9,
        "expected ({x}, {y}), got {s:?}"
    );
}

#[test]
fn wide_container_fits_to_height() {
    let d = fit_display(Size::new(2000.0, 500.0), Size::new(1920.0, 1080.0)).unwrap();
    assert_eq!(d.height, 500.0);
    assert!((d.width - 500.0 * 16.0 / 9.0).abs() < 1e-9);
}

#[test]
fn tall_container_fits_to_width() {
    let d = fit_display(Size::new(800.0, 900.0), Size::new(1920.0, 1080.0)).unwrap();
    assert_eq!(d.width, 800.0);
    assert!((d.height - 450.0).abs() < 1e-9);
}

#[test]
fn degenerate_inputs_do_not_fit() {
    assert!(fit_display(Size::new(0.0, 500.0), Size::new(1920.0, 1080.0)).is_none());
    assert!(fit_display(Size::new(800.0, 500.0), Size::ZERO).is_none());
}

#[test]
fn uniform_factor_is_the_smaller_axis() {
    let s = DisplayScale { x: 2.0, y: 1.0 };
    assert_eq!(10.0 * s.uniform(), 10.0);
}

#[test]
fn point_lists_scale_by_axis_parity() {
    let s = DisplayScale { x: 2.0, y: 1.0 };
    assert_eq!(s.points(&[0.0, 0.0, 10.0, 10.0]), vec![0.0, 0.0, 20.0, 10.0]);
    assert_eq!(s.point(Point::new(3.0, 4.0)), Point::new(6.0, 4.0));
}

#[test]
fn threshold_comparison_is_per_axis() {
    let a = DisplayScale { x: 1.0, y: 1.0 };
    assert!(!a.differs_from(DisplayScale { x: 1.005, y: 0.995 }, 0.01));
    assert!(a.differs_from(DisplayScale { x: 1.0, y: 1.02 }, 0.01));
}

#[test]
fn viewport_holds_scale_until_all_inputs_are_known() {
    let mut v = Viewport::with_canvas(Size::new(960.0, 540.0));
    let change = v.set_container(Size::new(1920.0, 1080.0));
    assert_eq!(change.current, DisplayScale::IDENTITY);
    assert!(v.display().is_none());

    let change = v.set_video(Size::new(1280.0, 720.0));
    assert_eq!(change.previous, DisplayScale::IDENTITY);
    assert_scale(change.current, 2.0, 2.0);

    let change = v.set_container(Size::new(960.0, 1000.0));
    assert_scale(change.current, 1.0, 1.0);

    // Degenerate container keeps the last good scale.
    let change = v.set_container(Size::new(0.0, 0.0));
    assert_eq!(change.previous, change.current);
}

#[test]
fn canvas_change_recomputes() {
    let mut v = Viewport::default();
    v.set_container(Size::new(1920.0, 1080.0));
    v.set_video(Size::new(1920.0, 1080.0));
    assert_eq!(v.scale(), DisplayScale::IDENTITY);
    let change = v.set_canvas(Size::new(960.0, 540.0));
    assert_scale(change.current, 2.0, 2.0);
}
