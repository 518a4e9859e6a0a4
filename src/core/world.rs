use crate::collision::{
    circle_segment, closest_edge_index, collide, point_in_polygon, ColliderShape, CollisionFilter,
    SpatialGrid,
};
use crate::composites::Composite;
use crate::connections::Connection;
use crate::core::{
    BoundaryWall, CollisionEvent, CompositeHandle, ConnectionHandle, EventQueue, Handle,
    HandleMap, NodeHandle, SimulationConfig, WorldEvent,
};
use crate::error::PhysicsError;
use crate::math::{closest_point_on_segment, Segment, Vector2};
use crate::nodes::Node;
use crate::Result;
use log::{debug, warn};

/// The main physics world that owns all nodes, connections and composites
/// and advances the simulation.
///
/// One `update` call is a single run-to-completion transaction: the caller
/// invokes it once per external tick and must not mutate node state while it
/// runs. Structural changes (adding or removing nodes, connections or
/// composites) belong between updates. Events accumulated during an update
/// stay queued until the next `update` call clears them, so the host drains
/// them in between.
pub struct PhysicsWorld {
    /// All nodes in the world
    nodes: HandleMap<NodeHandle, Node>,

    /// All connections in the world
    connections: HandleMap<ConnectionHandle, Connection>,

    /// All composites in the world
    composites: HandleMap<CompositeHandle, Composite>,

    /// The broad-phase spatial index, rebuilt every sub-step
    grid: SpatialGrid,

    /// Configuration for the simulation
    config: SimulationConfig,

    /// Queue of physics events
    events: EventQueue,

    /// The total elapsed simulation time
    time: f32,

    /// The largest node radius seen so far, which drives the grid cell size
    largest_node_radius: f32,

    /// Whether the grid must be reallocated before the next sub-step
    grid_stale: bool,
}

/// Per-node data captured immutably before a resolution step mutates storage
struct NodeSnapshot {
    position: Vector2,
    radius: f32,
    inv_mass: f32,
    bounciness: f32,
    locked: bool,
    collider: bool,
    filter: CollisionFilter,
    parent: Option<CompositeHandle>,
}

impl PhysicsWorld {
    /// Creates a new physics world for the given area with default tuning
    pub fn new(area_width: f32, area_height: f32) -> Result<Self> {
        Self::with_config(SimulationConfig::new(area_width, area_height))
    }

    /// Creates a new physics world with the given configuration
    pub fn with_config(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let grid = SpatialGrid::new(config.area_width, config.area_height, config.min_cell_size);

        Ok(Self {
            nodes: HandleMap::new(),
            connections: HandleMap::new(),
            composites: HandleMap::new(),
            grid,
            config,
            events: EventQueue::new(),
            time: 0.0,
            largest_node_radius: 0.0,
            grid_stale: false,
        })
    }

    /// Returns the current simulation time
    pub fn get_time(&self) -> f32 {
        self.time
    }

    /// Returns a reference to the simulation configuration
    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replaces the simulation configuration after validating it
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.grid_stale = true;
        Ok(())
    }

    /// Returns the current gravity vector
    pub fn get_gravity(&self) -> Vector2 {
        self.config.gravity
    }

    /// Sets the gravity vector
    pub fn set_gravity(&mut self, gravity: Vector2) {
        self.config.gravity = gravity;
    }

    /// Returns the width of the simulation area
    pub fn get_area_width(&self) -> f32 {
        self.config.area_width
    }

    /// Returns the height of the simulation area
    pub fn get_area_height(&self) -> f32 {
        self.config.area_height
    }

    /// Returns a reference to the event queue
    pub fn get_events(&self) -> &EventQueue {
        &self.events
    }

    /// Returns a mutable reference to the event queue
    pub fn get_events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    // === Nodes ===

    /// Adds a node to the world and returns its handle.
    ///
    /// A node larger than any seen before marks the spatial grid stale; the
    /// grid is reallocated at the start of the next `update` call, never as
    /// a hidden side effect of this one.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let radius = node.get_radius();
        let handle = self.nodes.add(node);

        if radius > self.largest_node_radius {
            self.largest_node_radius = radius;
            let required = self.required_cell_size();
            if required > self.grid.cell_size() {
                self.grid_stale = true;
                warn!(
                    "node radius {} outgrows spatial grid cell size {}; grid will be rebuilt at {}",
                    radius,
                    self.grid.cell_size(),
                    required
                );
            }
        }

        self.events.push_world(WorldEvent::NodeAdded(handle));
        handle
    }

    /// Removes a node and every connection attached to it
    pub fn remove_node(&mut self, handle: NodeHandle) -> Result<Node> {
        let attached: Vec<ConnectionHandle> = self
            .connections
            .iter()
            .filter(|(_, conn)| conn.involves_node(handle))
            .map(|(h, _)| h)
            .collect();
        for conn_handle in attached {
            let _ = self.remove_connection(conn_handle);
        }

        let node = self.nodes.remove(handle).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("Node with handle {:?} not found", handle))
        })?;

        if let Some(parent) = node.get_parent() {
            if let Some(composite) = self.composites.get_mut(parent) {
                composite.nodes.retain(|h| *h != handle);
            }
        }

        self.events.push_world(WorldEvent::NodeRemoved(handle));
        Ok(node)
    }

    /// Gets a reference to a node by its handle
    pub fn get_node(&self, handle: NodeHandle) -> Result<&Node> {
        self.nodes.get_checked(handle)
    }

    /// Gets a mutable reference to a node by its handle
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Result<&mut Node> {
        self.nodes.get_checked_mut(handle)
    }

    /// Returns an iterator over all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeHandle, &Node)> {
        self.nodes.iter()
    }

    /// Returns the number of nodes in the world
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // === Connections ===

    /// Adds a connection to the world and returns its handle.
    ///
    /// Both endpoints must already be in the world. A zero resting distance
    /// is captured from the current separation of the endpoints.
    pub fn add_connection(&mut self, mut connection: Connection) -> Result<ConnectionHandle> {
        for endpoint in [connection.get_node_a(), connection.get_node_b()] {
            if !self.nodes.contains(endpoint) {
                return Err(PhysicsError::ResourceNotFound(format!(
                    "Connection endpoint {:?} not found",
                    endpoint
                )));
            }
        }

        connection.capture_resting_distance(&self.nodes);
        let handle = self.connections.add(connection);
        self.events.push_world(WorldEvent::ConnectionAdded(handle));
        Ok(handle)
    }

    /// Removes a connection from the world
    pub fn remove_connection(&mut self, handle: ConnectionHandle) -> Result<Connection> {
        let connection = self.connections.remove(handle).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!(
                "Connection with handle {:?} not found",
                handle
            ))
        })?;

        if let Some(parent) = connection.get_parent() {
            if let Some(composite) = self.composites.get_mut(parent) {
                composite.connections.retain(|h| *h != handle);
            }
        }

        self.events.push_world(WorldEvent::ConnectionRemoved(handle));
        Ok(connection)
    }

    /// Gets a reference to a connection by its handle
    pub fn get_connection(&self, handle: ConnectionHandle) -> Result<&Connection> {
        self.connections.get_checked(handle)
    }

    /// Gets a mutable reference to a connection by its handle
    pub fn get_connection_mut(&mut self, handle: ConnectionHandle) -> Result<&mut Connection> {
        self.connections.get_checked_mut(handle)
    }

    /// Returns an iterator over all connections in insertion order
    pub fn connections(&self) -> impl Iterator<Item = (ConnectionHandle, &Connection)> {
        self.connections.iter()
    }

    /// Returns the number of connections in the world
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    // === Composites ===

    /// Groups existing nodes and connections into a composite and marks them
    /// as its members.
    ///
    /// The orientation from the first node to the second is captured as the
    /// rotation reference. Composite factories call this after wiring their
    /// topology; it is public so custom shapes can be assembled the same way.
    pub fn assemble_composite(
        &mut self,
        name: impl Into<String>,
        nodes: Vec<NodeHandle>,
        connections: Vec<ConnectionHandle>,
        solid_shape: bool,
    ) -> Result<CompositeHandle> {
        if nodes.len() < 2 {
            return Err(PhysicsError::InvalidParameter(format!(
                "composite needs at least 2 nodes, got {}",
                nodes.len()
            )));
        }
        for &node in &nodes {
            if !self.nodes.contains(node) {
                return Err(PhysicsError::ResourceNotFound(format!(
                    "Composite member node {:?} not found",
                    node
                )));
            }
        }
        for &conn in &connections {
            if !self.connections.contains(conn) {
                return Err(PhysicsError::ResourceNotFound(format!(
                    "Composite member connection {:?} not found",
                    conn
                )));
            }
        }

        let first = self.nodes.get_checked(nodes[0])?.get_position();
        let second = self.nodes.get_checked(nodes[1])?.get_position();
        let reference_orientation = (second - first).normalize();

        let member_nodes = nodes.clone();
        let member_connections = connections.clone();
        let handle = self.composites.add(Composite::new(
            name.into(),
            nodes,
            connections,
            solid_shape,
            reference_orientation,
        ));

        for node in member_nodes {
            if let Some(n) = self.nodes.get_mut(node) {
                n.parent = Some(handle);
            }
        }
        for conn in member_connections {
            if let Some(c) = self.connections.get_mut(conn) {
                c.parent = Some(handle);
            }
        }

        self.events.push_world(WorldEvent::CompositeAdded(handle));
        Ok(handle)
    }

    /// Removes a composite together with all its nodes and connections
    pub fn remove_composite(&mut self, handle: CompositeHandle) -> Result<Composite> {
        let composite = self.composites.remove(handle).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!(
                "Composite with handle {:?} not found",
                handle
            ))
        })?;

        for &conn in composite.get_connections() {
            let _ = self.remove_connection(conn);
        }
        for &node in composite.get_nodes() {
            let _ = self.remove_node(node);
        }

        self.events.push_world(WorldEvent::CompositeRemoved(handle));
        Ok(composite)
    }

    /// Gets a reference to a composite by its handle
    pub fn get_composite(&self, handle: CompositeHandle) -> Result<&Composite> {
        self.composites.get_checked(handle)
    }

    /// Returns an iterator over all composites in insertion order
    pub fn composites(&self) -> impl Iterator<Item = (CompositeHandle, &Composite)> {
        self.composites.iter()
    }

    /// Returns the number of composites in the world
    pub fn composite_count(&self) -> usize {
        self.composites.len()
    }

    /// Returns the mass-weighted centroid of a composite
    pub fn composite_position(&self, handle: CompositeHandle) -> Result<Vector2> {
        let composite = self.composites.get_checked(handle)?;

        let mut total_mass = 0.0;
        let mut weighted = Vector2::zero();
        for &node in composite.get_nodes() {
            if let Some(n) = self.nodes.get(node) {
                total_mass += n.get_mass();
                weighted += n.get_position() * n.get_mass();
            }
        }

        if total_mass <= crate::math::EPSILON {
            return Err(PhysicsError::SimulationError(format!(
                "composite {:?} has no massive nodes",
                handle
            )));
        }
        Ok(weighted / total_mass)
    }

    /// Returns the total mass of a composite
    pub fn composite_mass(&self, handle: CompositeHandle) -> Result<f32> {
        let composite = self.composites.get_checked(handle)?;
        Ok(composite
            .get_nodes()
            .iter()
            .filter_map(|&node| self.nodes.get(node))
            .map(|n| n.get_mass())
            .sum())
    }

    /// Returns the composite's rotation relative to its assembly-time
    /// orientation, in radians within `[-PI, PI]`
    pub fn composite_rotation(&self, handle: CompositeHandle) -> Result<f32> {
        let composite = self.composites.get_checked(handle)?;
        let members = composite.get_nodes();
        if members.len() < 2 {
            return Ok(0.0);
        }

        let first = self.nodes.get_checked(members[0])?.get_position();
        let second = self.nodes.get_checked(members[1])?.get_position();
        let current = second - first;
        if current.is_zero() {
            return Ok(0.0);
        }

        Ok(composite.get_reference_orientation().angle_to(&current))
    }

    // === Simulation ===

    /// Advances the simulation by `delta_time`.
    ///
    /// The delta is divided into `sub_steps` slices, each clamped to
    /// `max_delta` so a stalled caller cannot inject an explosive time step.
    /// Each sub-step integrates all nodes, relaxes every connection once,
    /// rebuilds the spatial grid and resolves boundary, node-node and
    /// node-connection collisions. Events from the previous update are
    /// cleared first.
    pub fn update(&mut self, delta_time: f32) {
        if !delta_time.is_finite() || delta_time <= 0.0 {
            warn!("ignoring update with non-positive delta time {}", delta_time);
            return;
        }

        self.events.clear();

        if self.grid_stale {
            self.reallocate_grid();
        }

        let dt = (delta_time / self.config.sub_steps as f32).min(self.config.max_delta);
        for _ in 0..self.config.sub_steps {
            self.sub_step(dt);
        }

        self.time += delta_time;
    }

    /// Clears the world of all nodes, connections and composites
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
        self.composites.clear();
        self.events.clear();
        self.grid.clear();
        self.time = 0.0;
        self.largest_node_radius = 0.0;
        self.grid_stale = true;
    }

    /// The cell size the grid needs for the largest node seen so far
    fn required_cell_size(&self) -> f32 {
        (2.0 * self.largest_node_radius).max(self.config.min_cell_size)
    }

    /// Reallocates the spatial grid at the currently required cell size
    fn reallocate_grid(&mut self) {
        let cell_size = self.required_cell_size();
        self.grid = SpatialGrid::new(self.config.area_width, self.config.area_height, cell_size);
        self.grid_stale = false;
        debug!("spatial grid reallocated at cell size {}", cell_size);
        self.events.push_world(WorldEvent::GridResized { cell_size });
    }

    /// Runs one sub-step: integrate, relax, rebuild grid, resolve collisions
    fn sub_step(&mut self, dt: f32) {
        let gravity = self.config.gravity;
        let gravity_scale = self.config.gravity_scale;
        for (_, node) in self.nodes.iter_mut() {
            node.integrate(dt, gravity, gravity_scale);
        }

        // One relaxation pass per sub-step; convergence comes from repetition
        for (_, connection) in self.connections.iter() {
            connection.solve(&mut self.nodes);
        }

        self.grid.clear();
        for (handle, node) in self.nodes.iter() {
            self.grid.insert(handle, node.get_position());
        }

        let node_handles = self.nodes.handles();
        for &handle in &node_handles {
            self.resolve_boundary(handle);

            let position = match self.nodes.get(handle) {
                Some(node) => node.get_position(),
                None => continue,
            };
            for other in self.grid.nearby(position) {
                if other.raw() <= handle.raw() {
                    continue;
                }
                self.resolve_node_node(handle, other);
            }
        }

        let connection_handles = self.connections.handles();
        for &handle in &connection_handles {
            self.resolve_connection_contacts(handle);
        }
    }

    /// Captures the node fields a resolution step reads
    fn snapshot(&self, handle: NodeHandle) -> Option<NodeSnapshot> {
        self.nodes.get(handle).map(|node| NodeSnapshot {
            position: node.get_position(),
            radius: node.get_radius(),
            inv_mass: node.get_inverse_mass(),
            bounciness: node.get_material().bounciness,
            locked: node.is_locked(),
            collider: node.is_collider(),
            filter: node.get_filter(),
            parent: node.get_parent(),
        })
    }

    /// Clamps a node into the simulation area, reflecting the normal
    /// velocity component with bounciness and scaling the tangential one
    /// with surface friction
    fn resolve_boundary(&mut self, handle: NodeHandle) {
        let (mut position, mut velocity, radius, material, locked) = match self.nodes.get(handle)
        {
            Some(node) => (
                node.get_position(),
                node.get_velocity(),
                node.get_radius(),
                node.get_material(),
                node.is_locked(),
            ),
            None => return,
        };
        if locked {
            return;
        }

        let width = self.config.area_width;
        let height = self.config.area_height;
        let mut hit_x = None;
        let mut hit_y = None;

        if position.x - radius < 0.0 {
            position.x = radius;
            velocity.x = -velocity.x * material.bounciness;
            velocity.y *= material.surface_friction;
            hit_x = Some(BoundaryWall::Left);
        } else if position.x + radius > width {
            position.x = width - radius;
            velocity.x = -velocity.x * material.bounciness;
            velocity.y *= material.surface_friction;
            hit_x = Some(BoundaryWall::Right);
        }

        if position.y - radius < 0.0 {
            position.y = radius;
            velocity.y = -velocity.y * material.bounciness;
            velocity.x *= material.surface_friction;
            hit_y = Some(BoundaryWall::Top);
        } else if position.y + radius > height {
            position.y = height - radius;
            velocity.y = -velocity.y * material.bounciness;
            velocity.x *= material.surface_friction;
            hit_y = Some(BoundaryWall::Bottom);
        }

        if hit_x.is_none() && hit_y.is_none() {
            return;
        }

        if let Some(node) = self.nodes.get_mut(handle) {
            node.set_position(position);
            node.set_velocity(velocity);
        }
        for wall in [hit_x, hit_y].into_iter().flatten() {
            self.events
                .push_collision(CollisionEvent::Boundary { node: handle, wall });
        }
    }

    /// Separates two overlapping collider nodes along the line between
    /// their centers, split in inverse proportion to mass
    fn resolve_node_node(&mut self, a: NodeHandle, b: NodeHandle) {
        let snap_a = match self.snapshot(a) {
            Some(s) => s,
            None => return,
        };
        let snap_b = match self.snapshot(b) {
            Some(s) => s,
            None => return,
        };

        if !snap_a.collider || !snap_b.collider {
            return;
        }
        if !snap_a.filter.should_collide(&snap_b.filter) {
            return;
        }
        // Siblings of one composite are held apart by their connections
        if snap_a.parent.is_some() && snap_a.parent == snap_b.parent {
            return;
        }
        let inv_sum = snap_a.inv_mass + snap_b.inv_mass;
        if inv_sum <= 0.0 {
            return;
        }

        let contact = match collide(
            &ColliderShape::Circle {
                radius: snap_a.radius,
            },
            snap_a.position,
            &ColliderShape::Circle {
                radius: snap_b.radius,
            },
            snap_b.position,
        ) {
            Some(contact) => contact,
            None => return,
        };

        // Positional restitution: bouncier pairs rebound past exact separation
        let scale =
            self.config.response_coef * (1.0 + 0.5 * (snap_a.bounciness + snap_b.bounciness));
        let correction = contact.normal * (contact.depth * scale);

        if let Some(node) = self.nodes.get_mut(a) {
            node.displace(-correction * (snap_a.inv_mass / inv_sum));
        }
        if let Some(node) = self.nodes.get_mut(b) {
            node.displace(correction * (snap_b.inv_mass / inv_sum));
        }

        self.events.push_collision(CollisionEvent::NodeNode {
            node_a: a,
            node_b: b,
            depth: contact.depth,
        });
    }

    /// Collects the collider edges of a composite as world-space segments
    fn collect_collider_edges(
        &self,
        composite: CompositeHandle,
    ) -> (Vec<(Vector2, Vector2)>, Vec<ConnectionHandle>) {
        let mut geometry = Vec::new();
        let mut handles = Vec::new();

        if let Some(comp) = self.composites.get(composite) {
            for &conn_handle in comp.get_connections() {
                let conn = match self.connections.get(conn_handle) {
                    Some(conn) if conn.is_collider() => conn,
                    _ => continue,
                };
                if let (Some(a), Some(b)) = (
                    self.nodes.get(conn.get_node_a()),
                    self.nodes.get(conn.get_node_b()),
                ) {
                    geometry.push((a.get_position(), b.get_position()));
                    handles.push(conn_handle);
                }
            }
        }

        (geometry, handles)
    }

    /// Resolves contacts between one connection's segment and nearby nodes,
    /// including containment ejection for solid composites
    fn resolve_connection_contacts(&mut self, handle: ConnectionHandle) {
        let (node_a, node_b, is_collider, parent) = match self.connections.get(handle) {
            Some(conn) => (
                conn.get_node_a(),
                conn.get_node_b(),
                conn.is_collider(),
                conn.get_parent(),
            ),
            None => return,
        };
        if !is_collider {
            return;
        }

        let (start, end) = match (self.nodes.get(node_a), self.nodes.get(node_b)) {
            (Some(a), Some(b)) => (a.get_position(), b.get_position()),
            _ => return,
        };
        if Segment::new(start, end).is_degenerate() {
            return;
        }

        let candidates = self.grid.nodes_near_segment(start, end);

        let solid_parent = parent.filter(|&p| {
            self.composites
                .get(p)
                .map(|c| c.is_solid_shape())
                .unwrap_or(false)
        });
        let (edge_geometry, edge_handles) = match solid_parent {
            Some(p) => self.collect_collider_edges(p),
            None => (Vec::new(), Vec::new()),
        };

        for candidate in candidates {
            if candidate == node_a || candidate == node_b {
                continue;
            }
            let snap = match self.snapshot(candidate) {
                Some(s) => s,
                None => continue,
            };
            if !snap.collider {
                continue;
            }
            if parent.is_some() && snap.parent == parent {
                continue;
            }

            // Containment: a node that slipped fully inside the solid parent
            // is ejected by the closest edge only, so the shape pushes it
            // out exactly once
            if let Some(composite) = solid_parent {
                if !snap.locked
                    && point_in_polygon(snap.position, &edge_geometry)
                    && closest_edge_index(snap.position, &edge_geometry)
                        .map(|i| edge_handles[i] == handle)
                        .unwrap_or(false)
                {
                    let (seg_a, seg_b) = match (self.nodes.get(node_a), self.nodes.get(node_b)) {
                        (Some(a), Some(b)) => (a.get_position(), b.get_position()),
                        _ => continue,
                    };
                    let (closest, _) = closest_point_on_segment(snap.position, seg_a, seg_b);
                    let offset = closest - snap.position;
                    let distance = offset.length();
                    if distance > crate::math::EPSILON {
                        let normal = offset / distance;
                        if let Some(node) = self.nodes.get_mut(candidate) {
                            node.displace(normal * (distance + snap.radius));
                        }
                        self.events.push_collision(CollisionEvent::ShapeContainment {
                            node: candidate,
                            composite,
                        });
                        continue;
                    }
                }
            }

            // Segment overlap: push the node and both endpoints apart,
            // endpoint recoil levered toward the closer endpoint
            let (seg_a, seg_b) = match (self.nodes.get(node_a), self.nodes.get(node_b)) {
                (Some(a), Some(b)) => (a.get_position(), b.get_position()),
                _ => return,
            };
            let contact =
                match circle_segment(snap.position, snap.radius, Segment::new(seg_a, seg_b)) {
                    Some(contact) => contact,
                    None => continue,
                };

            let inv_a = self
                .nodes
                .get(node_a)
                .map(|n| n.get_inverse_mass())
                .unwrap_or(0.0);
            let inv_b = self
                .nodes
                .get(node_b)
                .map(|n| n.get_inverse_mass())
                .unwrap_or(0.0);
            let total = snap.inv_mass + inv_a + inv_b;
            if total <= 0.0 {
                continue;
            }

            let correction = contact.normal * (contact.depth * self.config.response_coef);
            let lever_a = 1.0 - contact.t;
            let lever_b = contact.t;

            if let Some(node) = self.nodes.get_mut(candidate) {
                node.displace(correction * (snap.inv_mass / total));
            }
            if let Some(node) = self.nodes.get_mut(node_a) {
                node.displace(-correction * (lever_a * inv_a / total));
            }
            if let Some(node) = self.nodes.get_mut(node_b) {
                node.displace(-correction * (lever_b * inv_b / total));
            }

            self.events.push_collision(CollisionEvent::NodeConnection {
                node: candidate,
                connection: handle,
                depth: contact.depth,
            });
        }
    }
}
