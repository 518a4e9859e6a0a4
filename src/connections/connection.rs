use crate::core::{CompositeHandle, HandleMap, NodeHandle};
use crate::error::PhysicsError;
use crate::nodes::Node;
use crate::Result;

/// A distance constraint between two nodes.
///
/// `solve` performs a single relaxation pass; the engine calls it once per
/// sub-step rather than iterating to convergence, so chains of connections
/// approach their resting lengths over successive sub-steps.
pub struct Connection {
    /// The first node of the connection
    node_a: NodeHandle,

    /// The second node of the connection
    node_b: NodeHandle,

    /// The separation the connection tries to maintain.
    ///
    /// Zero means "use the distance between the nodes at registration time";
    /// the world resolves it when the connection is added.
    resting_distance: f32,

    /// Whether the connection's segment participates in collision detection
    collider: bool,

    /// The composite this connection belongs to, if any
    pub(crate) parent: Option<CompositeHandle>,
}

impl Connection {
    /// Creates a connection whose resting distance is captured when it is
    /// added to a world
    pub fn new(node_a: NodeHandle, node_b: NodeHandle) -> Result<Self> {
        Self::with_resting_distance(node_a, node_b, 0.0)
    }

    /// Creates a connection with an explicit resting distance
    pub fn with_resting_distance(
        node_a: NodeHandle,
        node_b: NodeHandle,
        resting_distance: f32,
    ) -> Result<Self> {
        if node_a == node_b {
            return Err(PhysicsError::InvalidParameter(
                "connection cannot join a node to itself".to_string(),
            ));
        }
        if !(resting_distance >= 0.0 && resting_distance.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "resting_distance must be non-negative and finite, got {}",
                resting_distance
            )));
        }

        Ok(Self {
            node_a,
            node_b,
            resting_distance,
            collider: true,
            parent: None,
        })
    }

    /// Sets whether the connection is a collider, consuming and returning self
    pub fn with_collider(mut self, collider: bool) -> Self {
        self.collider = collider;
        self
    }

    /// Returns the first node of the connection
    pub fn get_node_a(&self) -> NodeHandle {
        self.node_a
    }

    /// Returns the second node of the connection
    pub fn get_node_b(&self) -> NodeHandle {
        self.node_b
    }

    /// Returns true if the connection is attached to the given node
    pub fn involves_node(&self, handle: NodeHandle) -> bool {
        self.node_a == handle || self.node_b == handle
    }

    /// Returns the resting distance
    pub fn get_resting_distance(&self) -> f32 {
        self.resting_distance
    }

    /// Sets the resting distance
    pub fn set_resting_distance(&mut self, resting_distance: f32) -> Result<()> {
        if !(resting_distance >= 0.0 && resting_distance.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "resting_distance must be non-negative and finite, got {}",
                resting_distance
            )));
        }
        self.resting_distance = resting_distance;
        Ok(())
    }

    /// Resolves a zero resting distance to the current node separation
    pub(crate) fn capture_resting_distance(&mut self, nodes: &HandleMap<NodeHandle, Node>) {
        if self.resting_distance > 0.0 {
            return;
        }
        if let (Some(a), Some(b)) = (nodes.get(self.node_a), nodes.get(self.node_b)) {
            self.resting_distance = a.get_position().distance(&b.get_position());
        }
    }

    /// Returns whether the connection's segment participates in collision detection
    pub fn is_collider(&self) -> bool {
        self.collider
    }

    /// Sets whether the connection's segment participates in collision detection
    pub fn set_collider(&mut self, collider: bool) {
        self.collider = collider;
    }

    /// Returns the composite this connection belongs to, if any
    pub fn get_parent(&self) -> Option<CompositeHandle> {
        self.parent
    }

    /// Performs one relaxation pass on the constraint.
    ///
    /// Half of the length deviation is corrected per pass, split between the
    /// two nodes in proportion to the opposite node's mass, so the lighter
    /// node moves more. A locked node never moves; its whole share lands on
    /// the other node. Coincident nodes are left alone for this pass.
    pub(crate) fn solve(&self, nodes: &mut HandleMap<NodeHandle, Node>) {
        let (pos_a, mass_a, locked_a) = match nodes.get(self.node_a) {
            Some(node) => (node.get_position(), node.get_mass(), node.is_locked()),
            None => return,
        };
        let (pos_b, mass_b, locked_b) = match nodes.get(self.node_b) {
            Some(node) => (node.get_position(), node.get_mass(), node.is_locked()),
            None => return,
        };

        if locked_a && locked_b {
            return;
        }

        let delta = pos_b - pos_a;
        let distance = delta.length();
        if distance <= crate::math::EPSILON {
            return;
        }

        let direction = delta / distance;
        let half_error = 0.5 * (distance - self.resting_distance);

        // A locked node behaves as infinitely heavy: the other side absorbs
        // the full half-deviation.
        let (share_a, share_b) = if locked_a {
            (0.0, half_error)
        } else if locked_b {
            (half_error, 0.0)
        } else {
            let total_mass = mass_a + mass_b;
            (
                half_error * (mass_b / total_mass),
                half_error * (mass_a / total_mass),
            )
        };

        if let Some(node) = nodes.get_mut(self.node_a) {
            node.displace(direction * share_a);
        }
        if let Some(node) = nodes.get_mut(self.node_b) {
            node.displace(-direction * share_b);
        }
    }
}
