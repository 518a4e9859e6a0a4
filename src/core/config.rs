use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Configuration parameters for the physics simulation
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// The width of the simulation area
    pub area_width: f32,

    /// The height of the simulation area
    pub area_height: f32,

    /// The gravity acceleration vector (positive y points down)
    pub gravity: Vector2,

    /// Tuning factor translating gravity units into world-scale motion
    pub gravity_scale: f32,

    /// The number of sub-steps each `update` call is divided into
    pub sub_steps: u32,

    /// The fraction of contact overlap resolved per sub-step, in [0.5, 1.5]
    pub response_coef: f32,

    /// The maximum simulated time per sub-step, clamping large frame deltas
    pub max_delta: f32,

    /// The smallest cell size the spatial grid will use
    pub min_cell_size: f32,
}

impl SimulationConfig {
    /// Creates a configuration for the given simulation area with default tuning
    pub fn new(area_width: f32, area_height: f32) -> Self {
        Self {
            area_width,
            area_height,
            ..Self::default()
        }
    }

    /// Validates the configuration, returning an error for out-of-range values
    pub fn validate(&self) -> Result<()> {
        if !(self.area_width > 0.0 && self.area_width.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "area_width must be positive and finite, got {}",
                self.area_width
            )));
        }
        if !(self.area_height > 0.0 && self.area_height.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "area_height must be positive and finite, got {}",
                self.area_height
            )));
        }
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidParameter(
                "gravity must be finite".to_string(),
            ));
        }
        if self.sub_steps == 0 {
            return Err(PhysicsError::InvalidParameter(
                "sub_steps must be at least 1".to_string(),
            ));
        }
        if !(0.5..=1.5).contains(&self.response_coef) {
            return Err(PhysicsError::InvalidParameter(format!(
                "response_coef must be in [0.5, 1.5], got {}",
                self.response_coef
            )));
        }
        if !(self.max_delta > 0.0 && self.max_delta.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "max_delta must be positive and finite, got {}",
                self.max_delta
            )));
        }
        if !(self.min_cell_size > 0.0 && self.min_cell_size.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "min_cell_size must be positive and finite, got {}",
                self.min_cell_size
            )));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            area_width: 1000.0,
            area_height: 1000.0,
            gravity: Vector2::new(0.0, 9.81),
            gravity_scale: 250.0,
            sub_steps: 8,
            response_coef: 0.75,
            max_delta: 1.0 / 30.0,
            min_cell_size: 8.0,
        }
    }
}
