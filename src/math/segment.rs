use crate::math::Vector2;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A 2D line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Segment {
    /// The start point of the segment
    pub a: Vector2,

    /// The end point of the segment
    pub b: Vector2,
}

impl Segment {
    /// Creates a new segment between two points
    #[inline]
    pub fn new(a: Vector2, b: Vector2) -> Self {
        Self { a, b }
    }

    /// Returns the direction vector of the segment (not normalized)
    #[inline]
    pub fn direction(&self) -> Vector2 {
        self.b - self.a
    }

    /// Returns the length of the segment
    #[inline]
    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    /// Returns the midpoint of the segment
    #[inline]
    pub fn midpoint(&self) -> Vector2 {
        (self.a + self.b) * 0.5
    }

    /// Returns true if the segment is degenerate (endpoints coincide)
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.direction().length_squared() < crate::math::EPSILON * crate::math::EPSILON
    }

    /// Returns the closest point on the segment to `point`, together with
    /// the clamped projection parameter `t` in `[0, 1]`
    #[inline]
    pub fn closest_point(&self, point: Vector2) -> (Vector2, f32) {
        closest_point_on_segment(point, self.a, self.b)
    }

    /// Distance from `point` to the closest point on the segment
    #[inline]
    pub fn distance_to_point(&self, point: Vector2) -> f32 {
        let (closest, _) = self.closest_point(point);
        point.distance(&closest)
    }
}

/// Returns the closest point to `point` on the segment `a`-`b` and the
/// clamped projection parameter `t` in `[0, 1]` (`0` at `a`, `1` at `b`).
///
/// A degenerate segment yields its start point with `t = 0`.
pub fn closest_point_on_segment(point: Vector2, a: Vector2, b: Vector2) -> (Vector2, f32) {
    let ab = b - a;
    let length_sq = ab.length_squared();
    if length_sq < crate::math::EPSILON * crate::math::EPSILON {
        return (a, 0.0);
    }

    let t = crate::math::clamp((point - a).dot(&ab) / length_sq, 0.0, 1.0);
    (a + ab * t, t)
}
