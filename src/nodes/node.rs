use crate::collision::CollisionFilter;
use crate::core::CompositeHandle;
use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::nodes::Material;
use crate::Result;

/// A Verlet point mass.
///
/// Velocity is implicit: it is the difference between `position` and
/// `prev_position`, where `prev_position` always holds the node's position
/// at the start of the current sub-step. There is no stored velocity field.
pub struct Node {
    /// The node's position in world space
    position: Vector2,

    /// The node's position at the start of the current sub-step
    prev_position: Vector2,

    /// Forces accumulated for the next integration step
    forces: Vector2,

    /// The node's radius
    radius: f32,

    /// The node's mass
    mass: f32,

    /// Inverse of the node's mass (zero while locked)
    inv_mass: f32,

    /// The node's material properties
    material: Material,

    /// Whether the node is an immovable anchor
    locked: bool,

    /// Whether the node participates in collision detection
    collider: bool,

    /// Collision group membership and mask
    filter: CollisionFilter,

    /// The velocity magnitude cap, preventing tunneling after a stall
    max_velocity: f32,

    /// The composite this node belongs to, if any
    pub(crate) parent: Option<CompositeHandle>,

    /// Cosmetic roll accumulated from horizontal motion; not an angular velocity
    visual_rotation: f32,
}

impl Node {
    /// Creates a new unlocked node with the given position, radius and mass
    pub fn new(position: Vector2, radius: f32, mass: f32) -> Result<Self> {
        if !position.is_finite() {
            return Err(PhysicsError::InvalidParameter(
                "position must be finite".to_string(),
            ));
        }
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "radius must be positive and finite, got {}",
                radius
            )));
        }
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "mass must be positive and finite, got {}",
                mass
            )));
        }

        Ok(Self {
            position,
            prev_position: position,
            forces: Vector2::zero(),
            radius,
            mass,
            inv_mass: 1.0 / mass,
            material: Material::default(),
            locked: false,
            collider: true,
            filter: CollisionFilter::default(),
            max_velocity: 1000.0,
            parent: None,
            visual_rotation: 0.0,
        })
    }

    /// Creates a locked anchor node with the given position and radius
    pub fn new_locked(position: Vector2, radius: f32) -> Result<Self> {
        let mut node = Self::new(position, radius, 1.0)?;
        node.set_locked(true);
        Ok(node)
    }

    /// Sets the node's material, consuming and returning self
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Sets whether the node is a collider, consuming and returning self
    pub fn with_collider(mut self, collider: bool) -> Self {
        self.collider = collider;
        self
    }

    /// Sets the node's collision filter, consuming and returning self
    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Locks or unlocks the node, consuming and returning self
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.set_locked(locked);
        self
    }

    /// Returns the node's position
    pub fn get_position(&self) -> Vector2 {
        self.position
    }

    /// Sets the node's position without changing its implicit velocity
    pub fn set_position(&mut self, position: Vector2) {
        let velocity = self.get_velocity();
        self.position = position;
        self.prev_position = position - velocity;
    }

    /// Moves the node by `offset`, leaving `prev_position` in place.
    ///
    /// This changes the implicit velocity and is how collision resolution
    /// injects positional restitution.
    pub(crate) fn displace(&mut self, offset: Vector2) {
        self.position += offset;
    }

    /// Returns the node's position at the start of the current sub-step
    pub fn get_prev_position(&self) -> Vector2 {
        self.prev_position
    }

    /// Returns the node's implicit per-sub-step velocity
    pub fn get_velocity(&self) -> Vector2 {
        self.position - self.prev_position
    }

    /// Sets the node's implicit per-sub-step velocity
    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.prev_position = self.position - velocity;
    }

    /// Returns the node's radius
    pub fn get_radius(&self) -> f32 {
        self.radius
    }

    /// Sets the node's radius
    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "radius must be positive and finite, got {}",
                radius
            )));
        }
        self.radius = radius;
        Ok(())
    }

    /// Returns the node's mass
    pub fn get_mass(&self) -> f32 {
        self.mass
    }

    /// Sets the node's mass
    pub fn set_mass(&mut self, mass: f32) -> Result<()> {
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "mass must be positive and finite, got {}",
                mass
            )));
        }
        self.mass = mass;
        if !self.locked {
            self.inv_mass = 1.0 / mass;
        }
        Ok(())
    }

    /// Returns the inverse of the node's mass; zero while the node is locked
    pub fn get_inverse_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Returns the node's material
    pub fn get_material(&self) -> Material {
        self.material
    }

    /// Sets the node's material
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Returns whether the node is locked
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Locks or unlocks the node
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        self.inv_mass = if locked { 0.0 } else { 1.0 / self.mass };
        if locked {
            self.prev_position = self.position;
            self.forces = Vector2::zero();
        }
    }

    /// Returns whether the node participates in collision detection
    pub fn is_collider(&self) -> bool {
        self.collider
    }

    /// Sets whether the node participates in collision detection
    pub fn set_collider(&mut self, collider: bool) {
        self.collider = collider;
    }

    /// Returns the node's collision filter
    pub fn get_filter(&self) -> CollisionFilter {
        self.filter
    }

    /// Sets the node's collision filter
    pub fn set_filter(&mut self, filter: CollisionFilter) {
        self.filter = filter;
    }

    /// Returns the node's velocity magnitude cap
    pub fn get_max_velocity(&self) -> f32 {
        self.max_velocity
    }

    /// Sets the node's velocity magnitude cap
    pub fn set_max_velocity(&mut self, max_velocity: f32) -> Result<()> {
        if !(max_velocity > 0.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "max_velocity must be positive, got {}",
                max_velocity
            )));
        }
        self.max_velocity = max_velocity;
        Ok(())
    }

    /// Returns the composite this node belongs to, if any
    pub fn get_parent(&self) -> Option<CompositeHandle> {
        self.parent
    }

    /// Returns the cosmetic roll angle accumulated from horizontal motion
    pub fn get_visual_rotation(&self) -> f32 {
        self.visual_rotation
    }

    /// Accumulates a force to be applied at the next integration step
    pub fn apply_force(&mut self, force: Vector2) {
        self.forces += force;
    }

    /// Advances the node by one sub-step of Verlet integration.
    ///
    /// Locked nodes only shed their accumulated forces. For unlocked nodes
    /// the previous displacement is clamped to `max_velocity * dt`, decayed
    /// by `air_friction^dt`, and combined with the acceleration term; then
    /// `prev_position` rolls forward to the pre-step position.
    pub(crate) fn integrate(&mut self, dt: f32, gravity: Vector2, gravity_scale: f32) {
        if self.locked {
            self.forces = Vector2::zero();
            return;
        }

        self.forces += gravity * (self.mass * gravity_scale);

        let acceleration = self.forces * self.inv_mass;
        let acceleration_displacement = acceleration * (0.5 * dt * dt);

        let displacement = (self.position - self.prev_position)
            .clamp_length(self.max_velocity * dt)
            * self.material.air_friction.powf(dt);

        let next = self.position + displacement + acceleration_displacement;

        self.prev_position = self.position;
        self.position = next;
        self.forces = Vector2::zero();

        // Cosmetic roll, scaled like a wheel of this radius
        self.visual_rotation += displacement.x / self.radius;
    }
}
