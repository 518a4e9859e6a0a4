use crate::connections::Connection;
use crate::core::{CompositeHandle, PhysicsWorld};
use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::nodes::{Material, Node};
use crate::Result;
use std::f32::consts::TAU;

/// Factory for a regular polygon: `sides` nodes on a circle, fully
/// connected so the body is rigid, with only the perimeter edges acting as
/// colliders. Registered as a solid shape.
pub struct Polygon {
    /// The composite name
    pub name: String,

    /// The center of the polygon
    pub center: Vector2,

    /// The circumradius of the polygon
    pub radius: f32,

    /// The number of sides
    pub sides: u32,

    /// The radius of each perimeter node
    pub node_radius: f32,

    /// The mass of each perimeter node
    pub node_mass: f32,

    /// The material of each perimeter node
    pub material: Material,
}

impl Polygon {
    /// Creates a polygon factory with default node parameters
    pub fn new(center: Vector2, radius: f32, sides: u32) -> Self {
        Self {
            name: "polygon".to_string(),
            center,
            radius,
            sides,
            node_radius: 2.0,
            node_mass: 1.0,
            material: Material::default(),
        }
    }

    /// Sets the composite name, consuming and returning self
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the perimeter node radius, consuming and returning self
    pub fn with_node_radius(mut self, node_radius: f32) -> Self {
        self.node_radius = node_radius;
        self
    }

    /// Sets the perimeter node mass, consuming and returning self
    pub fn with_node_mass(mut self, node_mass: f32) -> Self {
        self.node_mass = node_mass;
        self
    }

    /// Sets the perimeter node material, consuming and returning self
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Builds the polygon and registers its parts with the world
    pub fn build(self, world: &mut PhysicsWorld) -> Result<CompositeHandle> {
        if self.sides < 3 {
            return Err(PhysicsError::InvalidParameter(format!(
                "polygon needs at least 3 sides, got {}",
                self.sides
            )));
        }
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "polygon radius must be positive and finite, got {}",
                self.radius
            )));
        }

        let count = self.sides as usize;
        let mut nodes = Vec::with_capacity(count);
        for i in 0..count {
            let angle = TAU * (i as f32) / (count as f32);
            let position = self.center + Vector2::new(angle.cos(), angle.sin()) * self.radius;
            let node =
                Node::new(position, self.node_radius, self.node_mass)?.with_material(self.material);
            nodes.push(world.add_node(node));
        }

        // Fully connected for rigidity; only perimeter edges collide
        let mut connections = Vec::new();
        for i in 0..count {
            for j in (i + 1)..count {
                let perimeter = j == i + 1 || (i == 0 && j == count - 1);
                let conn = Connection::new(nodes[i], nodes[j])?.with_collider(perimeter);
                connections.push(world.add_connection(conn)?);
            }
        }

        world.assemble_composite(self.name, nodes, connections, true)
    }
}
