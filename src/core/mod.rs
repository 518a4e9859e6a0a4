pub mod config;
pub mod events;
pub mod storage;
pub mod world;

pub use self::config::SimulationConfig;
pub use self::events::{BoundaryWall, CollisionEvent, EventQueue, WorldEvent};
pub use self::storage::{Handle, HandleMap};
pub use self::world::PhysicsWorld;

/// A unique identifier for a node in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub(crate) u32);

/// A unique identifier for a connection in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionHandle(pub(crate) u32);

/// A unique identifier for a composite in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeHandle(pub(crate) u32);

impl Handle for NodeHandle {
    fn from_raw(id: u32) -> Self {
        Self(id)
    }

    fn raw(self) -> u32 {
        self.0
    }
}

impl Handle for ConnectionHandle {
    fn from_raw(id: u32) -> Self {
        Self(id)
    }

    fn raw(self) -> u32 {
        self.0
    }
}

impl Handle for CompositeHandle {
    fn from_raw(id: u32) -> Self {
        Self(id)
    }

    fn raw(self) -> u32 {
        self.0
    }
}
