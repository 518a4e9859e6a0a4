pub mod math;
pub mod core;
pub mod nodes;
pub mod connections;
pub mod composites;
pub mod collision;

/// Re-export common types for easier usage
pub use crate::core::{PhysicsWorld, SimulationConfig};
pub use crate::core::{CompositeHandle, ConnectionHandle, NodeHandle};
pub use crate::nodes::{Material, Node};
pub use crate::connections::Connection;
pub use crate::composites::{Composite, Polygon, Rect, Rope};
pub use crate::math::Vector2;

/// Error types for the physics engine
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum PhysicsError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),

        #[error("Simulation stability error: {0}")]
        SimulationError(String),
    }
}

/// Result type for physics engine operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
