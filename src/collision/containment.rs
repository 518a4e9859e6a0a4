use crate::math::{closest_point_on_segment, Vector2};

/// Even-odd ray-casting test for a point against a polygon given as an edge
/// list.
///
/// Casts a horizontal ray in the +x direction and counts edge crossings; an
/// odd count means the point is inside. Edges need not be ordered, only
/// together form the closed perimeter. Used for solid composites to catch
/// fast points that skipped past every edge during one sub-step.
pub fn point_in_polygon(point: Vector2, edges: &[(Vector2, Vector2)]) -> bool {
    let mut inside = false;

    for &(a, b) in edges {
        if (a.y > point.y) != (b.y > point.y) {
            let x_intersect = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x_intersect {
                inside = !inside;
            }
        }
    }

    inside
}

/// Returns the index of the edge closest to `point`, or `None` for an empty
/// edge list
pub fn closest_edge_index(point: Vector2, edges: &[(Vector2, Vector2)]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;

    for (i, &(a, b)) in edges.iter().enumerate() {
        let (closest, _) = closest_point_on_segment(point, a, b);
        let distance_sq = point.distance_squared(&closest);
        match best {
            Some((_, best_distance_sq)) if best_distance_sq <= distance_sq => {}
            _ => best = Some((i, distance_sq)),
        }
    }

    best.map(|(i, _)| i)
}
