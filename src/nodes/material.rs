use crate::error::PhysicsError;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Surface and drag properties for physics nodes.
///
/// The friction values are retention factors in `[0, 1]`: displacement is
/// scaled by `air_friction^dt` every sub-step, and the velocity component
/// tangential to a boundary contact is scaled by `surface_friction`. A value
/// of `1.0` means no loss.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Material {
    /// Coefficient of restitution (bounciness), 0-1
    pub bounciness: f32,

    /// Fraction of velocity retained per second of free motion, 0-1
    pub air_friction: f32,

    /// Fraction of tangential velocity retained on boundary contact, 0-1
    pub surface_friction: f32,
}

impl Material {
    /// Creates a new material with the specified properties
    pub fn new(bounciness: f32, air_friction: f32, surface_friction: f32) -> Result<Self> {
        for (name, value) in [
            ("bounciness", bounciness),
            ("air_friction", air_friction),
            ("surface_friction", surface_friction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PhysicsError::InvalidParameter(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }

        Ok(Self {
            bounciness,
            air_friction,
            surface_friction,
        })
    }

    /// Creates a material for rubber (high bounciness)
    pub fn rubber() -> Self {
        Self {
            bounciness: 0.85,
            air_friction: 0.999,
            surface_friction: 0.75,
        }
    }

    /// Creates a material for wood (low bounciness, grippy)
    pub fn wood() -> Self {
        Self {
            bounciness: 0.2,
            air_friction: 0.998,
            surface_friction: 0.7,
        }
    }

    /// Creates a material for metal (medium bounciness)
    pub fn metal() -> Self {
        Self {
            bounciness: 0.5,
            air_friction: 0.999,
            surface_friction: 0.85,
        }
    }

    /// Creates a material for ice (slides almost freely)
    pub fn ice() -> Self {
        Self {
            bounciness: 0.05,
            air_friction: 0.999,
            surface_friction: 0.99,
        }
    }

    /// Creates a material for concrete (dead stop on contact)
    pub fn concrete() -> Self {
        Self {
            bounciness: 0.1,
            air_friction: 0.997,
            surface_friction: 0.4,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            bounciness: 0.3,
            air_friction: 0.999,
            surface_friction: 0.9,
        }
    }
}
