use crate::core::{CompositeHandle, ConnectionHandle, NodeHandle};
use std::collections::VecDeque;

/// The boundary wall a node collided with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryWall {
    /// The left wall (x = 0)
    Left,

    /// The right wall (x = area width)
    Right,

    /// The top wall (y = 0)
    Top,

    /// The bottom wall (y = area height)
    Bottom,
}

/// A collision observed during an update, reported to the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionEvent {
    /// Two nodes overlapped and were separated
    NodeNode {
        /// The first node in the collision
        node_a: NodeHandle,

        /// The second node in the collision
        node_b: NodeHandle,

        /// The overlap depth before resolution
        depth: f32,
    },

    /// A node overlapped a connection segment and was pushed away
    NodeConnection {
        /// The colliding node
        node: NodeHandle,

        /// The connection it overlapped
        connection: ConnectionHandle,

        /// The overlap depth before resolution
        depth: f32,
    },

    /// A node was found inside a solid composite and ejected
    ShapeContainment {
        /// The contained node
        node: NodeHandle,

        /// The solid composite it was inside
        composite: CompositeHandle,
    },

    /// A node hit a simulation boundary wall
    Boundary {
        /// The colliding node
        node: NodeHandle,

        /// The wall that was hit
        wall: BoundaryWall,
    },
}

/// A structural change in the physics world
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEvent {
    /// A node has been added to the world
    NodeAdded(NodeHandle),

    /// A node has been removed from the world
    NodeRemoved(NodeHandle),

    /// A connection has been added to the world
    ConnectionAdded(ConnectionHandle),

    /// A connection has been removed from the world
    ConnectionRemoved(ConnectionHandle),

    /// A composite has been added to the world
    CompositeAdded(CompositeHandle),

    /// A composite has been removed from the world
    CompositeRemoved(CompositeHandle),

    /// The spatial grid was reallocated at a larger cell size
    GridResized {
        /// The new cell size
        cell_size: f32,
    },
}

/// A queue of physics events, drained by the host after each update
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Collision events
    collision_events: VecDeque<CollisionEvent>,

    /// Structural world events
    world_events: VecDeque<WorldEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self {
            collision_events: VecDeque::new(),
            world_events: VecDeque::new(),
        }
    }

    /// Adds a collision event to the queue
    pub fn push_collision(&mut self, event: CollisionEvent) {
        self.collision_events.push_back(event);
    }

    /// Adds a world event to the queue
    pub fn push_world(&mut self, event: WorldEvent) {
        self.world_events.push_back(event);
    }

    /// Gets the next collision event from the queue
    pub fn next_collision_event(&mut self) -> Option<CollisionEvent> {
        self.collision_events.pop_front()
    }

    /// Gets the next world event from the queue
    pub fn next_world_event(&mut self) -> Option<WorldEvent> {
        self.world_events.pop_front()
    }

    /// Returns whether there are any collision events in the queue
    pub fn has_collision_events(&self) -> bool {
        !self.collision_events.is_empty()
    }

    /// Returns whether there are any world events in the queue
    pub fn has_world_events(&self) -> bool {
        !self.world_events.is_empty()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.collision_events.is_empty() && self.world_events.is_empty()
    }

    /// Clears all events from the queue
    pub fn clear(&mut self) {
        self.collision_events.clear();
        self.world_events.clear();
    }

    /// Returns an iterator over the queued collision events
    pub fn collision_events(&self) -> impl Iterator<Item = &CollisionEvent> {
        self.collision_events.iter()
    }

    /// Returns an iterator over the queued world events
    pub fn world_events(&self) -> impl Iterator<Item = &WorldEvent> {
        self.world_events.iter()
    }

    /// Gets all collision events involving a specific node
    pub fn collision_events_for_node(&self, handle: NodeHandle) -> Vec<&CollisionEvent> {
        self.collision_events
            .iter()
            .filter(|e| match e {
                CollisionEvent::NodeNode { node_a, node_b, .. } => {
                    *node_a == handle || *node_b == handle
                }
                CollisionEvent::NodeConnection { node, .. } => *node == handle,
                CollisionEvent::ShapeContainment { node, .. } => *node == handle,
                CollisionEvent::Boundary { node, .. } => *node == handle,
            })
            .collect()
    }
}
