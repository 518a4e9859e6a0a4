use crate::collision::Contact;
use crate::math::{closest_point_on_segment, Segment, Vector2};

/// A contact between a circle and a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentContact {
    /// Unit normal pointing from the segment toward the circle center
    pub normal: Vector2,

    /// The overlap depth
    pub depth: f32,

    /// The clamped projection parameter of the contact along the segment
    pub t: f32,
}

/// Exact overlap test between two circles.
///
/// Returns a contact whose normal points from the first circle toward the
/// second. Coincident centers are a degenerate case and produce no contact,
/// so the caller skips the pair for this sub-step instead of dividing by a
/// near-zero length.
pub fn circle_circle(
    center_a: Vector2,
    radius_a: f32,
    center_b: Vector2,
    radius_b: f32,
) -> Option<Contact> {
    let delta = center_b - center_a;
    let distance_sq = delta.length_squared();
    let combined = radius_a + radius_b;
    if distance_sq >= combined * combined {
        return None;
    }

    let distance = distance_sq.sqrt();
    if distance <= crate::math::EPSILON {
        return None;
    }

    Some(Contact {
        normal: delta / distance,
        depth: combined - distance,
    })
}

/// Exact overlap test between a circle and a segment.
///
/// Returns a contact whose normal points from the closest point on the
/// segment toward the circle center. Degenerate geometry (circle center on
/// the segment, or a zero-length segment under the center) produces no
/// contact.
pub fn circle_segment(center: Vector2, radius: f32, segment: Segment) -> Option<SegmentContact> {
    let (closest, t) = closest_point_on_segment(center, segment.a, segment.b);
    let delta = center - closest;
    let distance_sq = delta.length_squared();
    if distance_sq >= radius * radius {
        return None;
    }

    let distance = distance_sq.sqrt();
    if distance <= crate::math::EPSILON {
        return None;
    }

    Some(SegmentContact {
        normal: delta / distance,
        depth: radius - distance,
        t,
    })
}
