use super::*;

#[test]
fn endpoints_and_midpoint_are_stable() {
    assert_eq!(smootherstep(0.0), 0.0);
    assert_eq!(smootherstep(1.0), 1.0);
    assert_eq!(smootherstep(0.5), 0.5);
}

#[test]
fn clamps_outside_unit_interval() {
    assert_eq!(smootherstep(-2.0), 0.0);
    assert_eq!(smootherstep(3.5), 1.0);
}

#[test]
fn monotonic_on_unit_interval() {
    let mut prev = smootherstep(0.0);
    for i in 1..=200 {
        let v = smootherstep(f64::from(i) / 200.0);
        assert!(v >= prev, "not monotonic at step {i}");
        prev = v;
    }
}

#[test]
fn flat_at_the_edges() {
    // Slope near the ends is far below the linear slope of 1.
    let h = 1e-3;
    assert!(smootherstep(h) / h < 1e-4);
    assert!((1.0 - smootherstep(1.0 - h)) / h < 1e-4);
}

#[test]
fn lerp_blends_endpoints() {
    assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
    assert_eq!(lerp(10.0, 20.0, 1.0), 20.0);
    assert_eq!(lerp(10.0, 20.0, 0.25), 12.5);
}
