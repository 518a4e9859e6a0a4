use approx::assert_relative_eq;
use std::f32::consts::{FRAC_PI_2, PI};
use verlet2d::math::{closest_point_on_segment, Segment, Vector2};

#[test]
fn test_vector2_operations() {
    let v1 = Vector2::new(1.0, 2.0);
    let v2 = Vector2::new(4.0, 5.0);

    // Addition
    let sum = v1 + v2;
    assert_eq!(sum.x, 5.0);
    assert_eq!(sum.y, 7.0);

    // Subtraction
    let diff = v2 - v1;
    assert_eq!(diff.x, 3.0);
    assert_eq!(diff.y, 3.0);

    // Scalar multiplication
    let scaled = v1 * 2.0;
    assert_eq!(scaled.x, 2.0);
    assert_eq!(scaled.y, 4.0);

    // Scalar division
    let halved = v2 / 2.0;
    assert_eq!(halved.x, 2.0);
    assert_eq!(halved.y, 2.5);

    // Dot product
    let dot = v1.dot(&v2);
    assert_eq!(dot, 1.0 * 4.0 + 2.0 * 5.0);

    // Cross product magnitude
    let cross = v1.cross(&v2);
    assert_eq!(cross, 1.0 * 5.0 - 2.0 * 4.0);

    // Length
    let length = v1.length();
    assert_relative_eq!(length, (1.0f32 + 4.0f32).sqrt());

    // Normalize
    let normalized = v1.normalize();
    assert_relative_eq!(normalized.length(), 1.0);
    assert_relative_eq!(normalized.x, v1.x / length);
    assert_relative_eq!(normalized.y, v1.y / length);

    // Negation and compound assignment
    let mut v3 = -v1;
    assert_eq!(v3.x, -1.0);
    v3 += v1;
    assert!(v3.is_zero());
}

#[test]
fn test_vector2_normalize_zero_is_safe() {
    let zero = Vector2::zero();
    let normalized = zero.normalize();
    assert_eq!(normalized, zero);

    let mut in_place = Vector2::zero();
    in_place.normalize_mut();
    assert_eq!(in_place, zero);
}

#[test]
fn test_vector2_angles() {
    assert_relative_eq!(Vector2::unit_x().angle(), 0.0);
    assert_relative_eq!(Vector2::unit_y().angle(), FRAC_PI_2);
    assert_relative_eq!(Vector2::new(-1.0, 0.0).angle().abs(), PI);

    // Signed angle between vectors
    let from = Vector2::unit_x();
    let to = Vector2::new(0.0, 3.0);
    assert_relative_eq!(from.angle_to(&to), FRAC_PI_2);
    assert_relative_eq!(to.angle_to(&from), -FRAC_PI_2);

    // Perpendicular is a quarter turn
    let perp = from.perpendicular();
    assert_relative_eq!(from.dot(&perp), 0.0);
}

#[test]
fn test_vector2_distance_and_lerp() {
    let a = Vector2::new(1.0, 1.0);
    let b = Vector2::new(4.0, 5.0);

    assert_relative_eq!(a.distance(&b), 5.0);
    assert_relative_eq!(a.distance_squared(&b), 25.0);

    let mid = a.lerp(&b, 0.5);
    assert_relative_eq!(mid.x, 2.5);
    assert_relative_eq!(mid.y, 3.0);

    assert_relative_eq!(a.lerp(&b, 0.0).x, a.x);
    assert_relative_eq!(a.lerp(&b, 1.0).y, b.y);
}

#[test]
fn test_vector2_clamp_length() {
    let long = Vector2::new(30.0, 40.0);
    let clamped = long.clamp_length(5.0);
    assert_relative_eq!(clamped.length(), 5.0);
    assert_relative_eq!(clamped.x, 3.0);
    assert_relative_eq!(clamped.y, 4.0);

    // A vector within the limit is untouched
    let short = Vector2::new(1.0, 1.0);
    assert_eq!(short.clamp_length(5.0), short);
}

#[test]
fn test_vector2_nalgebra_round_trip() {
    let v = Vector2::new(3.5, -2.25);
    let na = v.to_nalgebra();
    assert_eq!(na.x, 3.5);
    assert_eq!(na.y, -2.25);
    assert_eq!(Vector2::from_nalgebra(&na), v);
}

#[test]
fn test_scalar_helpers() {
    assert!(verlet2d::math::approx_eq(1.0, 1.0 + 1.0e-8));
    assert!(!verlet2d::math::approx_eq(1.0, 1.01));
    assert!(verlet2d::math::approx_zero(-1.0e-8));

    assert_eq!(verlet2d::math::clamp(5.0, 0.0, 3.0), 3.0);
    assert_eq!(verlet2d::math::clamp(-1.0, 0.0, 3.0), 0.0);
    assert_eq!(verlet2d::math::clamp(2.0, 0.0, 3.0), 2.0);

    assert_relative_eq!(verlet2d::math::lerp(2.0, 6.0, 0.25), 3.0);
}

#[test]
fn test_closest_point_on_segment() {
    let a = Vector2::new(0.0, 0.0);
    let b = Vector2::new(10.0, 0.0);

    // Interior projection
    let (point, t) = closest_point_on_segment(Vector2::new(4.0, 3.0), a, b);
    assert_relative_eq!(point.x, 4.0);
    assert_relative_eq!(point.y, 0.0);
    assert_relative_eq!(t, 0.4);

    // Clamped to the start
    let (point, t) = closest_point_on_segment(Vector2::new(-5.0, 2.0), a, b);
    assert_eq!(point, a);
    assert_eq!(t, 0.0);

    // Clamped to the end
    let (point, t) = closest_point_on_segment(Vector2::new(15.0, -2.0), a, b);
    assert_eq!(point, b);
    assert_eq!(t, 1.0);

    // Degenerate segment yields its start point
    let (point, t) = closest_point_on_segment(Vector2::new(3.0, 3.0), a, a);
    assert_eq!(point, a);
    assert_eq!(t, 0.0);
}

#[test]
fn test_segment_helpers() {
    let segment = Segment::new(Vector2::new(2.0, 2.0), Vector2::new(8.0, 2.0));

    assert_relative_eq!(segment.length(), 6.0);
    assert_eq!(segment.midpoint(), Vector2::new(5.0, 2.0));
    assert!(!segment.is_degenerate());
    assert!(Segment::new(Vector2::one(), Vector2::one()).is_degenerate());

    assert_relative_eq!(segment.distance_to_point(Vector2::new(5.0, 6.0)), 4.0);
    let (closest, t) = segment.closest_point(Vector2::new(5.0, 6.0));
    assert_relative_eq!(closest.x, 5.0);
    assert_relative_eq!(t, 0.5);
}
