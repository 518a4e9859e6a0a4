mod collider;
mod containment;
mod filter;
mod narrow_phase;
mod spatial_grid;

pub use collider::{collide, ColliderShape, Contact};
pub use containment::{closest_edge_index, point_in_polygon};
pub use filter::{CollisionFilter, CollisionGroups};
pub use narrow_phase::{circle_circle, circle_segment, SegmentContact};
pub use spatial_grid::SpatialGrid;
