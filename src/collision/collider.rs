use crate::collision::narrow_phase;
use crate::math::{Segment, Vector2};

/// The closed set of collider kinds the narrow phase understands.
///
/// Dispatch is a match over the pair of kinds; there is no runtime
/// reflection and no open trait to implement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// A circle of the given radius, positioned by its owner
    Circle {
        /// The circle's radius
        radius: f32,
    },

    /// A line segment in world space
    Segment(Segment),
}

/// A resolved overlap between two collider shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the first shape toward the second
    pub normal: Vector2,

    /// The overlap depth
    pub depth: f32,
}

/// Pairwise overlap test between two collider shapes.
///
/// `origin_a`/`origin_b` position circle shapes; segment shapes carry their
/// own world-space endpoints and ignore their origin. Segment-segment pairs
/// are not part of the narrow phase (edges collide through their endpoint
/// nodes) and report no contact.
pub fn collide(
    shape_a: &ColliderShape,
    origin_a: Vector2,
    shape_b: &ColliderShape,
    origin_b: Vector2,
) -> Option<Contact> {
    match (shape_a, shape_b) {
        (ColliderShape::Circle { radius: ra }, ColliderShape::Circle { radius: rb }) => {
            narrow_phase::circle_circle(origin_a, *ra, origin_b, *rb)
        }
        (ColliderShape::Circle { radius }, ColliderShape::Segment(segment)) => {
            narrow_phase::circle_segment(origin_a, *radius, *segment).map(|contact| Contact {
                // Flip so the normal points from the circle toward the segment
                normal: -contact.normal,
                depth: contact.depth,
            })
        }
        (ColliderShape::Segment(segment), ColliderShape::Circle { radius }) => {
            narrow_phase::circle_segment(origin_b, *radius, *segment).map(|contact| Contact {
                normal: contact.normal,
                depth: contact.depth,
            })
        }
        (ColliderShape::Segment(_), ColliderShape::Segment(_)) => None,
    }
}
