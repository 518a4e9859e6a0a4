use crate::connections::Connection;
use crate::core::{CompositeHandle, PhysicsWorld};
use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::nodes::{Material, Node};
use crate::Result;

/// Factory for a rope: `node_count` nodes spaced evenly between two points,
/// linked by consecutive connections. Not a solid shape.
pub struct Rope {
    /// The composite name
    pub name: String,

    /// The position of the first node
    pub start: Vector2,

    /// The position of the last node
    pub end: Vector2,

    /// The number of nodes along the rope
    pub node_count: u32,

    /// The radius of each node
    pub node_radius: f32,

    /// The mass of each node
    pub node_mass: f32,

    /// The material of each node
    pub material: Material,

    /// Whether the rope's segments act as colliders
    pub collider: bool,

    /// Whether the first node is locked in place
    pub lock_start: bool,

    /// Whether the last node is locked in place
    pub lock_end: bool,
}

impl Rope {
    /// Creates a rope factory with default node parameters
    pub fn new(start: Vector2, end: Vector2, node_count: u32) -> Self {
        Self {
            name: "rope".to_string(),
            start,
            end,
            node_count,
            node_radius: 1.0,
            node_mass: 1.0,
            material: Material::default(),
            collider: true,
            lock_start: false,
            lock_end: false,
        }
    }

    /// Sets the composite name, consuming and returning self
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the node radius, consuming and returning self
    pub fn with_node_radius(mut self, node_radius: f32) -> Self {
        self.node_radius = node_radius;
        self
    }

    /// Sets the node mass, consuming and returning self
    pub fn with_node_mass(mut self, node_mass: f32) -> Self {
        self.node_mass = node_mass;
        self
    }

    /// Sets the node material, consuming and returning self
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Sets whether segments collide, consuming and returning self
    pub fn with_collider(mut self, collider: bool) -> Self {
        self.collider = collider;
        self
    }

    /// Locks the first node in place, consuming and returning self
    pub fn with_locked_start(mut self, lock_start: bool) -> Self {
        self.lock_start = lock_start;
        self
    }

    /// Locks the last node in place, consuming and returning self
    pub fn with_locked_end(mut self, lock_end: bool) -> Self {
        self.lock_end = lock_end;
        self
    }

    /// Builds the rope and registers its parts with the world
    pub fn build(self, world: &mut PhysicsWorld) -> Result<CompositeHandle> {
        if self.node_count < 2 {
            return Err(PhysicsError::InvalidParameter(format!(
                "rope needs at least 2 nodes, got {}",
                self.node_count
            )));
        }

        let count = self.node_count as usize;
        let mut nodes = Vec::with_capacity(count);
        for i in 0..count {
            let t = (i as f32) / ((count - 1) as f32);
            let position = self.start.lerp(&self.end, t);
            let locked =
                (i == 0 && self.lock_start) || (i == count - 1 && self.lock_end);
            let node = Node::new(position, self.node_radius, self.node_mass)?
                .with_material(self.material)
                .with_locked(locked);
            nodes.push(world.add_node(node));
        }

        let mut connections = Vec::with_capacity(count - 1);
        for i in 0..count - 1 {
            let conn = Connection::new(nodes[i], nodes[i + 1])?.with_collider(self.collider);
            connections.push(world.add_connection(conn)?);
        }

        world.assemble_composite(self.name, nodes, connections, false)
    }
}
