use crate::core::{ConnectionHandle, NodeHandle};
use crate::math::Vector2;

/// An aggregate of nodes and connections forming a rigid or soft body.
///
/// The composite itself is bookkeeping: its nodes and connections are owned
/// and simulated by the world like any others, and the composite records the
/// grouping, whether the perimeter forms a solid shape, and the orientation
/// captured at assembly time for rotation tracking.
pub struct Composite {
    /// A display name for the composite
    name: String,

    /// Handles of the member nodes
    pub(crate) nodes: Vec<NodeHandle>,

    /// Handles of the member connections
    pub(crate) connections: Vec<ConnectionHandle>,

    /// Whether the collider connections form a closed polygon usable for
    /// point-in-polygon containment tests
    solid_shape: bool,

    /// Direction from the first node to the second at assembly time
    reference_orientation: Vector2,
}

impl Composite {
    pub(crate) fn new(
        name: String,
        nodes: Vec<NodeHandle>,
        connections: Vec<ConnectionHandle>,
        solid_shape: bool,
        reference_orientation: Vector2,
    ) -> Self {
        Self {
            name,
            nodes,
            connections,
            solid_shape,
            reference_orientation,
        }
    }

    /// Returns the composite's name
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Returns the handles of the member nodes
    pub fn get_nodes(&self) -> &[NodeHandle] {
        &self.nodes
    }

    /// Returns the handles of the member connections
    pub fn get_connections(&self) -> &[ConnectionHandle] {
        &self.connections
    }

    /// Returns whether the composite is a closed solid shape
    pub fn is_solid_shape(&self) -> bool {
        self.solid_shape
    }

    /// Returns the orientation captured at assembly time
    pub fn get_reference_orientation(&self) -> Vector2 {
        self.reference_orientation
    }

    /// Returns true if the node is a member of this composite
    pub fn contains_node(&self, handle: NodeHandle) -> bool {
        self.nodes.contains(&handle)
    }

    /// Returns true if the connection is a member of this composite
    pub fn contains_connection(&self, handle: ConnectionHandle) -> bool {
        self.connections.contains(&handle)
    }
}
