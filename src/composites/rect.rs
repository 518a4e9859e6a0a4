use crate::connections::Connection;
use crate::core::{CompositeHandle, PhysicsWorld};
use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::nodes::{Material, Node};
use crate::Result;

/// Factory for a braced rectangle: four corner nodes, four collider
/// perimeter edges and two non-collider diagonal braces, registered as a
/// solid shape.
pub struct Rect {
    /// The composite name
    pub name: String,

    /// The center of the rectangle
    pub center: Vector2,

    /// The width of the rectangle
    pub width: f32,

    /// The height of the rectangle
    pub height: f32,

    /// The radius of each corner node
    pub node_radius: f32,

    /// The mass of each corner node
    pub node_mass: f32,

    /// The material of each corner node
    pub material: Material,

    /// Whether the corner nodes are locked in place
    pub locked: bool,
}

impl Rect {
    /// Creates a rectangle factory with default node parameters
    pub fn new(center: Vector2, width: f32, height: f32) -> Self {
        Self {
            name: "rect".to_string(),
            center,
            width,
            height,
            node_radius: 2.0,
            node_mass: 1.0,
            material: Material::default(),
            locked: false,
        }
    }

    /// Sets the composite name, consuming and returning self
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the corner node radius, consuming and returning self
    pub fn with_node_radius(mut self, node_radius: f32) -> Self {
        self.node_radius = node_radius;
        self
    }

    /// Sets the corner node mass, consuming and returning self
    pub fn with_node_mass(mut self, node_mass: f32) -> Self {
        self.node_mass = node_mass;
        self
    }

    /// Sets the corner node material, consuming and returning self
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Locks the corner nodes in place, consuming and returning self
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Builds the rectangle and registers its parts with the world
    pub fn build(self, world: &mut PhysicsWorld) -> Result<CompositeHandle> {
        if !(self.width > 0.0 && self.width.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "rect width must be positive and finite, got {}",
                self.width
            )));
        }
        if !(self.height > 0.0 && self.height.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "rect height must be positive and finite, got {}",
                self.height
            )));
        }

        let half_w = self.width * 0.5;
        let half_h = self.height * 0.5;
        let corners = [
            self.center + Vector2::new(-half_w, -half_h),
            self.center + Vector2::new(half_w, -half_h),
            self.center + Vector2::new(half_w, half_h),
            self.center + Vector2::new(-half_w, half_h),
        ];

        let mut nodes = Vec::with_capacity(4);
        for corner in corners {
            let node = Node::new(corner, self.node_radius, self.node_mass)?
                .with_material(self.material)
                .with_locked(self.locked);
            nodes.push(world.add_node(node));
        }

        let mut connections = Vec::with_capacity(6);
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            let conn = Connection::new(nodes[a], nodes[b])?;
            connections.push(world.add_connection(conn)?);
        }
        for (a, b) in [(0, 2), (1, 3)] {
            let brace = Connection::new(nodes[a], nodes[b])?.with_collider(false);
            connections.push(world.add_connection(brace)?);
        }

        world.assemble_composite(self.name, nodes, connections, true)
    }
}
