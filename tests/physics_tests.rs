use approx::assert_relative_eq;
use rand::Rng;
use std::collections::HashSet;
use std::f32::consts::FRAC_PI_2;
use verlet2d::collision::{
    closest_edge_index, collide, point_in_polygon, ColliderShape, CollisionFilter,
    CollisionGroups, SpatialGrid,
};
use verlet2d::core::{BoundaryWall, CollisionEvent, WorldEvent};
use verlet2d::error::PhysicsError;
use verlet2d::math::{Segment, Vector2};
use verlet2d::{
    Connection, Material, Node, PhysicsWorld, Polygon, Rect, Rope, SimulationConfig,
};

/// A 100x100 gravity-free configuration for isolating single mechanisms
fn still_config(sub_steps: u32) -> SimulationConfig {
    SimulationConfig {
        area_width: 100.0,
        area_height: 100.0,
        gravity: Vector2::zero(),
        sub_steps,
        ..SimulationConfig::default()
    }
}

/// A material that kills carried velocity every sub-step, so positions only
/// move where a solver moved them
fn dead_material() -> Material {
    Material::new(0.0, 0.0, 1.0).unwrap()
}

#[test]
fn test_validation_errors() {
    // Node construction guards
    assert!(matches!(
        Node::new(Vector2::zero(), -1.0, 1.0),
        Err(PhysicsError::InvalidParameter(_))
    ));
    assert!(matches!(
        Node::new(Vector2::zero(), 1.0, 0.0),
        Err(PhysicsError::InvalidParameter(_))
    ));
    assert!(matches!(
        Node::new(Vector2::new(f32::NAN, 0.0), 1.0, 1.0),
        Err(PhysicsError::InvalidParameter(_))
    ));

    // Material coefficients are confined to [0, 1]
    assert!(matches!(
        Material::new(1.5, 0.5, 0.5),
        Err(PhysicsError::InvalidParameter(_))
    ));
    assert!(matches!(
        Material::new(0.5, -0.1, 0.5),
        Err(PhysicsError::InvalidParameter(_))
    ));

    // A connection cannot join a node to itself
    let mut world = PhysicsWorld::new(100.0, 100.0).unwrap();
    let a = world.add_node(Node::new(Vector2::new(10.0, 10.0), 1.0, 1.0).unwrap());
    assert!(matches!(
        Connection::new(a, a),
        Err(PhysicsError::InvalidParameter(_))
    ));

    // Connections to removed nodes are rejected at registration
    let b = world.add_node(Node::new(Vector2::new(20.0, 10.0), 1.0, 1.0).unwrap());
    let dangling = Connection::new(a, b).unwrap();
    world.remove_node(b).unwrap();
    assert!(matches!(
        world.add_connection(dangling),
        Err(PhysicsError::ResourceNotFound(_))
    ));

    // Factory guards
    assert!(Polygon::new(Vector2::new(50.0, 50.0), 10.0, 2)
        .build(&mut world)
        .is_err());
    assert!(Rope::new(Vector2::zero(), Vector2::one(), 1)
        .build(&mut world)
        .is_err());
    assert!(Rect::new(Vector2::new(50.0, 50.0), -5.0, 5.0)
        .build(&mut world)
        .is_err());
}

#[test]
fn test_config_validation() {
    let mut config = still_config(1);
    config.response_coef = 2.0;
    assert!(PhysicsWorld::with_config(config).is_err());

    let mut config = still_config(1);
    config.sub_steps = 0;
    assert!(PhysicsWorld::with_config(config).is_err());

    let mut config = still_config(1);
    config.area_width = -100.0;
    assert!(PhysicsWorld::with_config(config).is_err());
}

#[test]
fn test_constraint_relaxation_halves_deviation() {
    let mut world = PhysicsWorld::with_config(still_config(1)).unwrap();

    let a = world.add_node(
        Node::new(Vector2::new(20.0, 50.0), 1.0, 1.0)
            .unwrap()
            .with_material(dead_material())
            .with_collider(false),
    );
    let b = world.add_node(
        Node::new(Vector2::new(35.0, 50.0), 1.0, 1.0)
            .unwrap()
            .with_material(dead_material())
            .with_collider(false),
    );
    world
        .add_connection(Connection::with_resting_distance(a, b, 5.0).unwrap())
        .unwrap();

    // One pass corrects half the deviation: 15 -> resting + 10/2 = 10
    world.update(0.016);
    let distance = world
        .get_node(a)
        .unwrap()
        .get_position()
        .distance(&world.get_node(b).unwrap().get_position());
    assert_relative_eq!(distance, 10.0, epsilon = 1.0e-4);

    // Repeated passes converge monotonically toward the resting distance
    let mut deviation = distance - 5.0;
    for _ in 0..50 {
        world.update(0.016);
        let distance = world
            .get_node(a)
            .unwrap()
            .get_position()
            .distance(&world.get_node(b).unwrap().get_position());
        let next = distance - 5.0;
        assert!(next <= deviation + 1.0e-5);
        deviation = next;
    }
    assert!(deviation.abs() < 1.0e-3);
}

#[test]
fn test_mass_weighted_correction() {
    let mut world = PhysicsWorld::with_config(still_config(1)).unwrap();

    let light = world.add_node(
        Node::new(Vector2::new(20.0, 50.0), 1.0, 1.0)
            .unwrap()
            .with_material(dead_material())
            .with_collider(false),
    );
    let heavy = world.add_node(
        Node::new(Vector2::new(35.0, 50.0), 1.0, 3.0)
            .unwrap()
            .with_material(dead_material())
            .with_collider(false),
    );
    world
        .add_connection(Connection::with_resting_distance(light, heavy, 5.0).unwrap())
        .unwrap();

    world.update(0.016);

    // The light node absorbs the heavy node's mass share and vice versa
    assert_relative_eq!(
        world.get_node(light).unwrap().get_position().x,
        23.75,
        epsilon = 1.0e-4
    );
    assert_relative_eq!(
        world.get_node(heavy).unwrap().get_position().x,
        33.75,
        epsilon = 1.0e-4
    );
}

#[test]
fn test_locked_node_never_moves() {
    let mut world = PhysicsWorld::with_config(still_config(1)).unwrap();

    let anchor = world.add_node(
        Node::new_locked(Vector2::new(20.0, 50.0), 1.0)
            .unwrap()
            .with_collider(false),
    );
    let free = world.add_node(
        Node::new(Vector2::new(35.0, 50.0), 1.0, 1.0)
            .unwrap()
            .with_material(dead_material())
            .with_collider(false),
    );
    world
        .add_connection(Connection::with_resting_distance(anchor, free, 5.0).unwrap())
        .unwrap();

    for _ in 0..60 {
        world.update(0.016);
        assert_eq!(
            world.get_node(anchor).unwrap().get_position(),
            Vector2::new(20.0, 50.0)
        );
    }

    // All correction landed on the free node
    assert_relative_eq!(
        world.get_node(free).unwrap().get_position().x,
        25.0,
        epsilon = 1.0e-3
    );
}

#[test]
fn test_boundary_containment() {
    let mut world = PhysicsWorld::with_config(still_config(1)).unwrap();

    let handle = world.add_node(
        Node::new(Vector2::new(3.0, 50.0), 5.0, 1.0)
            .unwrap()
            .with_material(dead_material()),
    );

    world.update(0.016);

    let position = world.get_node(handle).unwrap().get_position();
    assert!(position.x >= 5.0 - 1.0e-4);
    assert_relative_eq!(position.y, 50.0, epsilon = 1.0e-4);
    assert!(world.get_events().collision_events().any(|e| matches!(
        e,
        CollisionEvent::Boundary {
            wall: BoundaryWall::Left,
            ..
        }
    )));
}

#[test]
fn test_node_node_separation() {
    let mut config = still_config(1);
    config.response_coef = 1.0;
    let mut world = PhysicsWorld::with_config(config).unwrap();

    let a = world.add_node(
        Node::new(Vector2::new(50.0, 50.0), 5.0, 1.0)
            .unwrap()
            .with_material(dead_material()),
    );
    let b = world.add_node(
        Node::new(Vector2::new(56.0, 50.0), 5.0, 1.0)
            .unwrap()
            .with_material(dead_material()),
    );

    world.update(0.016);

    let distance = world
        .get_node(a)
        .unwrap()
        .get_position()
        .distance(&world.get_node(b).unwrap().get_position());
    assert!(distance >= 10.0 - 1.0e-3);
    assert!(world
        .get_events()
        .collision_events()
        .any(|e| matches!(e, CollisionEvent::NodeNode { .. })));

    // No new contact once separated; the queue is cleared per update
    world.update(0.016);
    assert_eq!(world.get_events().collision_events().count(), 0);
}

#[test]
fn test_collision_filter_blocks_pair() {
    let mut world = PhysicsWorld::with_config(still_config(1)).unwrap();
    let filter = CollisionFilter::new(CollisionGroups::DEBRIS, CollisionGroups::DEFAULT);

    let a = world.add_node(
        Node::new(Vector2::new(50.0, 50.0), 5.0, 1.0)
            .unwrap()
            .with_material(dead_material())
            .with_filter(filter),
    );
    let b = world.add_node(
        Node::new(Vector2::new(56.0, 50.0), 5.0, 1.0)
            .unwrap()
            .with_material(dead_material())
            .with_filter(filter),
    );

    world.update(0.016);

    assert_eq!(
        world.get_node(a).unwrap().get_position(),
        Vector2::new(50.0, 50.0)
    );
    assert_eq!(
        world.get_node(b).unwrap().get_position(),
        Vector2::new(56.0, 50.0)
    );
    assert!(!world
        .get_events()
        .collision_events()
        .any(|e| matches!(e, CollisionEvent::NodeNode { .. })));
}

#[test]
fn test_node_connection_collision() {
    let mut world = PhysicsWorld::with_config(still_config(1)).unwrap();

    let a = world.add_node(
        Node::new(Vector2::new(40.0, 50.0), 1.0, 1.0)
            .unwrap()
            .with_material(dead_material()),
    );
    let b = world.add_node(
        Node::new(Vector2::new(60.0, 50.0), 1.0, 1.0)
            .unwrap()
            .with_material(dead_material()),
    );
    let conn = world.add_connection(Connection::new(a, b).unwrap()).unwrap();

    let intruder = world.add_node(
        Node::new(Vector2::new(50.0, 50.5), 2.0, 1.0)
            .unwrap()
            .with_material(dead_material()),
    );

    world.update(0.016);

    // The intruder is pushed off the segment, the endpoints recoil
    assert!(world.get_node(intruder).unwrap().get_position().y > 50.6);
    assert!(world.get_node(a).unwrap().get_position().y < 49.99);
    assert!(world.get_node(b).unwrap().get_position().y < 49.99);
    assert!(world.get_events().collision_events().any(|e| matches!(
        e,
        CollisionEvent::NodeConnection { connection, .. } if *connection == conn
    )));
}

#[test]
fn test_solid_shape_ejects_contained_node() {
    let mut world = PhysicsWorld::with_config(still_config(8)).unwrap();

    let rect = Rect::new(Vector2::new(50.0, 50.0), 20.0, 20.0)
        .with_material(dead_material())
        .build(&mut world)
        .unwrap();

    // A small node fully inside the rectangle, closest to its right edge
    let intruder = world.add_node(
        Node::new(Vector2::new(52.0, 50.0), 1.0, 1.0)
            .unwrap()
            .with_material(dead_material()),
    );

    world.update(0.016);

    // Ejected through the right edge (x = 60) with one radius of clearance
    let position = world.get_node(intruder).unwrap().get_position();
    assert!(position.x > 60.0, "node still inside at {}", position);
    assert_relative_eq!(position.y, 50.0, epsilon = 1.0e-3);
    assert!(world.get_events().collision_events().any(|e| matches!(
        e,
        CollisionEvent::ShapeContainment { composite, .. } if *composite == rect
    )));
}

#[test]
fn test_grid_query_soundness() {
    let mut world = PhysicsWorld::new(100.0, 100.0).unwrap();
    let mut rng = rand::thread_rng();

    let mut entries = Vec::new();
    for _ in 0..60 {
        let position = Vector2::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
        let handle = world.add_node(Node::new(position, 1.0, 1.0).unwrap());
        entries.push((handle, position));
    }

    let mut grid = SpatialGrid::new(100.0, 100.0, 8.0);
    for (handle, position) in &entries {
        grid.insert(*handle, *position);
    }

    // Compare against a brute-force neighbor scan: everything within one
    // cell of a node's cell must be reported
    let cell = |p: Vector2| -> (i32, i32) {
        (
            ((p.x / 8.0).floor() as i32).clamp(0, 12),
            ((p.y / 8.0).floor() as i32).clamp(0, 12),
        )
    };

    for (_, p1) in &entries {
        let nearby = grid.nearby(*p1);
        let (col_1, row_1) = cell(*p1);
        for (h2, p2) in &entries {
            let (col_2, row_2) = cell(*p2);
            if (col_1 - col_2).abs() <= 1 && (row_1 - row_2).abs() <= 1 {
                assert!(
                    nearby.contains(h2),
                    "grid query missed a same/adjacent cell occupant"
                );
            }
        }
    }
}

#[test]
fn test_grid_segment_query() {
    let mut world = PhysicsWorld::new(100.0, 100.0).unwrap();
    let positions = [
        Vector2::new(10.0, 10.0),
        Vector2::new(50.0, 50.0),
        Vector2::new(90.0, 90.0),
    ];
    let handles: Vec<_> = positions
        .iter()
        .map(|&p| world.add_node(Node::new(p, 1.0, 1.0).unwrap()))
        .collect();

    let mut grid = SpatialGrid::new(100.0, 100.0, 8.0);
    for (&handle, &position) in handles.iter().zip(&positions) {
        grid.insert(handle, position);
    }

    let found = grid.nodes_near_segment(Vector2::new(5.0, 5.0), Vector2::new(95.0, 95.0));
    for handle in &handles {
        assert!(found.contains(handle));
    }

    // Results are de-duplicated
    let unique: HashSet<_> = found.iter().copied().collect();
    assert_eq!(unique.len(), found.len());
}

#[test]
fn test_grid_resize_on_large_node() {
    let mut world = PhysicsWorld::new(100.0, 100.0).unwrap();
    world.add_node(Node::new(Vector2::new(50.0, 50.0), 10.0, 1.0).unwrap());

    world.update(0.016);
    assert!(world.get_events().world_events().any(|e| matches!(
        e,
        WorldEvent::GridResized { cell_size } if (*cell_size - 20.0).abs() < 1.0e-6
    )));

    // A smaller node does not trigger another reallocation
    world.add_node(Node::new(Vector2::new(20.0, 20.0), 3.0, 1.0).unwrap());
    world.update(0.016);
    assert!(!world
        .get_events()
        .world_events()
        .any(|e| matches!(e, WorldEvent::GridResized { .. })));
}

#[test]
fn test_falling_node_comes_to_rest() {
    let config = SimulationConfig {
        area_width: 100.0,
        area_height: 100.0,
        sub_steps: 1,
        ..SimulationConfig::default()
    };
    let mut world = PhysicsWorld::with_config(config).unwrap();

    let handle = world.add_node(
        Node::new(Vector2::new(50.0, 0.0), 5.0, 1.0)
            .unwrap()
            .with_material(Material::new(0.0, 1.0, 1.0).unwrap()),
    );

    for _ in 0..500 {
        world.update(0.016);
    }

    // Rests on the floor with no horizontal drift
    let position = world.get_node(handle).unwrap().get_position();
    assert!((position.y - 95.0).abs() < 0.5, "y = {}", position.y);
    assert!((position.x - 50.0).abs() < 1.0e-3, "x = {}", position.x);
}

#[test]
fn test_rope_sags_and_keeps_length() {
    let mut world = PhysicsWorld::new(100.0, 100.0).unwrap();
    let rope = Rope::new(Vector2::new(30.0, 20.0), Vector2::new(70.0, 20.0), 5)
        .build(&mut world)
        .unwrap();

    for _ in 0..300 {
        world.update(0.016);
    }

    let members = world.get_composite(rope).unwrap().get_nodes().to_vec();
    let positions: Vec<Vector2> = members
        .iter()
        .map(|&h| world.get_node(h).unwrap().get_position())
        .collect();

    // The rope fell below its initial straight line
    let lowest = positions.iter().map(|p| p.y).fold(f32::MIN, f32::max);
    assert!(lowest > 21.0);

    // Connections hold the total length near the resting sum (4 x 10)
    let total: f32 = positions.windows(2).map(|w| w[0].distance(&w[1])).sum();
    assert!((total - 40.0).abs() < 6.0, "total length = {}", total);
}

#[test]
fn test_rope_locked_endpoint_holds() {
    let mut world = PhysicsWorld::new(100.0, 100.0).unwrap();
    let rope = Rope::new(Vector2::new(20.0, 20.0), Vector2::new(60.0, 20.0), 5)
        .with_locked_start(true)
        .build(&mut world)
        .unwrap();

    let members = world.get_composite(rope).unwrap().get_nodes().to_vec();
    let mut deepest = f32::MIN;
    for _ in 0..100 {
        world.update(0.016);
        assert_eq!(
            world.get_node(members[0]).unwrap().get_position(),
            Vector2::new(20.0, 20.0)
        );
        deepest = deepest.max(world.get_node(members[4]).unwrap().get_position().y);
    }

    assert!(world.get_node(members[0]).unwrap().is_locked());
    // The free end swung below the anchored line at some point
    assert!(deepest > 25.0);
}

#[test]
fn test_rect_composite_properties() {
    let mut world = PhysicsWorld::new(100.0, 100.0).unwrap();
    let rect = Rect::new(Vector2::new(50.0, 50.0), 20.0, 10.0)
        .build(&mut world)
        .unwrap();

    assert_eq!(world.node_count(), 4);
    assert_eq!(world.connection_count(), 6);
    assert_eq!(world.composite_count(), 1);

    assert_relative_eq!(world.composite_mass(rect).unwrap(), 4.0);
    let center = world.composite_position(rect).unwrap();
    assert_relative_eq!(center.x, 50.0, epsilon = 1.0e-4);
    assert_relative_eq!(center.y, 50.0, epsilon = 1.0e-4);
    assert_relative_eq!(world.composite_rotation(rect).unwrap(), 0.0, epsilon = 1.0e-5);

    // Members carry the composite back-handle
    for (handle, node) in world.nodes() {
        assert_eq!(node.get_parent(), Some(rect));
        assert!(world.get_composite(rect).unwrap().contains_node(handle));
    }

    // Removing the composite removes everything it assembled
    world.remove_composite(rect).unwrap();
    assert_eq!(world.node_count(), 0);
    assert_eq!(world.connection_count(), 0);
    assert_eq!(world.composite_count(), 0);
}

#[test]
fn test_polygon_composite_topology() {
    let mut world = PhysicsWorld::new(100.0, 100.0).unwrap();
    Polygon::new(Vector2::new(50.0, 50.0), 10.0, 6)
        .build(&mut world)
        .unwrap();

    // Fully connected: 6 nodes, 15 connections, 6 perimeter colliders
    assert_eq!(world.node_count(), 6);
    assert_eq!(world.connection_count(), 15);
    let colliders = world
        .connections()
        .filter(|(_, conn)| conn.is_collider())
        .count();
    assert_eq!(colliders, 6);
}

#[test]
fn test_composite_rotation_tracking() {
    let mut world = PhysicsWorld::new(100.0, 100.0).unwrap();
    let rect = Rect::new(Vector2::new(50.0, 50.0), 20.0, 20.0)
        .build(&mut world)
        .unwrap();

    // Rotate every corner a quarter turn around the center
    let members = world.get_composite(rect).unwrap().get_nodes().to_vec();
    for &handle in &members {
        let delta = world.get_node(handle).unwrap().get_position() - Vector2::new(50.0, 50.0);
        world
            .get_node_mut(handle)
            .unwrap()
            .set_position(Vector2::new(50.0 - delta.y, 50.0 + delta.x));
    }

    assert_relative_eq!(
        world.composite_rotation(rect).unwrap(),
        FRAC_PI_2,
        epsilon = 1.0e-4
    );
}

#[test]
fn test_remove_node_removes_attached_connections() {
    let mut world = PhysicsWorld::new(100.0, 100.0).unwrap();
    let a = world.add_node(Node::new(Vector2::new(10.0, 10.0), 1.0, 1.0).unwrap());
    let b = world.add_node(Node::new(Vector2::new(20.0, 10.0), 1.0, 1.0).unwrap());
    world.add_connection(Connection::new(a, b).unwrap()).unwrap();

    world.remove_node(a).unwrap();
    assert_eq!(world.connection_count(), 0);
    assert_eq!(world.node_count(), 1);

    // The world still steps cleanly afterwards
    world.update(0.016);
}

#[test]
fn test_resting_distance_captured_on_add() {
    let mut world = PhysicsWorld::new(100.0, 100.0).unwrap();
    let a = world.add_node(Node::new(Vector2::new(20.0, 50.0), 1.0, 1.0).unwrap());
    let b = world.add_node(Node::new(Vector2::new(27.0, 50.0), 1.0, 1.0).unwrap());

    let handle = world.add_connection(Connection::new(a, b).unwrap()).unwrap();
    assert_relative_eq!(
        world.get_connection(handle).unwrap().get_resting_distance(),
        7.0,
        epsilon = 1.0e-5
    );
}

#[test]
fn test_storage_keeps_insertion_order() {
    let mut world = PhysicsWorld::new(100.0, 100.0).unwrap();
    let a = world.add_node(Node::new(Vector2::new(10.0, 10.0), 1.0, 1.0).unwrap());
    let b = world.add_node(Node::new(Vector2::new(20.0, 10.0), 1.0, 1.0).unwrap());
    let c = world.add_node(Node::new(Vector2::new(30.0, 10.0), 1.0, 1.0).unwrap());

    world.remove_node(b).unwrap();

    let order: Vec<_> = world.nodes().map(|(h, _)| h).collect();
    assert_eq!(order, vec![a, c]);
    assert!(matches!(
        world.get_node(b),
        Err(PhysicsError::ResourceNotFound(_))
    ));
}

#[test]
fn test_update_ignores_bad_delta() {
    let mut world = PhysicsWorld::new(100.0, 100.0).unwrap();

    world.update(-1.0);
    assert_eq!(world.get_time(), 0.0);

    world.update(f32::NAN);
    assert_eq!(world.get_time(), 0.0);

    world.update(0.016);
    assert_relative_eq!(world.get_time(), 0.016);
}

#[test]
fn test_velocity_clamp_limits_step() {
    let mut world = PhysicsWorld::with_config(still_config(1)).unwrap();
    let mut node = Node::new(Vector2::new(20.0, 50.0), 1.0, 1.0)
        .unwrap()
        .with_material(Material::new(0.0, 1.0, 1.0).unwrap());

    // An absurd implicit velocity is capped at max_velocity * dt per sub-step
    node.set_velocity(Vector2::new(500.0, 0.0));
    let handle = world.add_node(node);

    world.update(0.016);

    let travelled = world.get_node(handle).unwrap().get_position().x - 20.0;
    assert!(travelled <= 16.0 + 1.0e-3, "travelled {}", travelled);
    assert!(travelled >= 15.9);

    // Horizontal motion accumulates the cosmetic roll angle
    assert_relative_eq!(
        world.get_node(handle).unwrap().get_visual_rotation(),
        16.0,
        epsilon = 1.0e-3
    );
}

#[test]
fn test_apply_force_accelerates_node() {
    let mut world = PhysicsWorld::with_config(still_config(1)).unwrap();
    let handle = world.add_node(
        Node::new(Vector2::new(20.0, 50.0), 1.0, 1.0)
            .unwrap()
            .with_material(Material::new(0.0, 1.0, 1.0).unwrap()),
    );

    world
        .get_node_mut(handle)
        .unwrap()
        .apply_force(Vector2::new(100.0, 0.0));
    world.update(0.016);

    // One impulse of 100 over dt: x += 0.5 * 100 * dt^2
    let position = world.get_node(handle).unwrap().get_position();
    assert_relative_eq!(position.x, 20.0 + 0.5 * 100.0 * 0.016 * 0.016, epsilon = 1.0e-4);

    // The gained velocity carries into the next update without the force
    world.update(0.016);
    assert!(world.get_node(handle).unwrap().get_position().x > position.x);
}

#[test]
fn test_world_accessors() {
    let mut world = PhysicsWorld::new(120.0, 80.0).unwrap();

    assert_eq!(world.get_area_width(), 120.0);
    assert_eq!(world.get_area_height(), 80.0);
    assert_eq!(world.get_gravity(), Vector2::new(0.0, 9.81));

    world.set_gravity(Vector2::new(0.0, 20.0));
    assert_eq!(world.get_gravity(), Vector2::new(0.0, 20.0));
    assert_eq!(world.get_config().area_width, 120.0);

    // Draining the queue consumes events in order
    world.add_node(Node::new(Vector2::new(10.0, 10.0), 1.0, 1.0).unwrap());
    assert!(world.get_events().has_world_events());
    assert!(matches!(
        world.get_events_mut().next_world_event(),
        Some(WorldEvent::NodeAdded(_))
    ));
    assert!(!world.get_events().has_world_events());

    world.clear();
    assert_eq!(world.node_count(), 0);
    assert_eq!(world.get_time(), 0.0);
}

#[test]
fn test_point_in_polygon_even_odd() {
    let square = [
        (Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0)),
        (Vector2::new(10.0, 0.0), Vector2::new(10.0, 10.0)),
        (Vector2::new(10.0, 10.0), Vector2::new(0.0, 10.0)),
        (Vector2::new(0.0, 10.0), Vector2::new(0.0, 0.0)),
    ];

    assert!(point_in_polygon(Vector2::new(5.0, 5.0), &square));
    assert!(point_in_polygon(Vector2::new(9.5, 0.5), &square));
    assert!(!point_in_polygon(Vector2::new(15.0, 5.0), &square));
    assert!(!point_in_polygon(Vector2::new(-1.0, 5.0), &square));
    assert!(!point_in_polygon(Vector2::new(5.0, 12.0), &square));

    // Edge order does not matter for the parity count
    let shuffled = [square[2], square[0], square[3], square[1]];
    assert!(point_in_polygon(Vector2::new(5.0, 5.0), &shuffled));

    assert_eq!(closest_edge_index(Vector2::new(9.0, 5.0), &square), Some(1));
    assert_eq!(closest_edge_index(Vector2::new(5.0, 1.0), &square), Some(0));
    assert_eq!(closest_edge_index(Vector2::new(5.0, 5.0), &[]), None);
}

#[test]
fn test_collider_dispatch() {
    let circle = ColliderShape::Circle { radius: 5.0 };

    // Circle-circle overlap
    let contact = collide(
        &circle,
        Vector2::zero(),
        &circle,
        Vector2::new(6.0, 0.0),
    )
    .unwrap();
    assert_relative_eq!(contact.normal.x, 1.0);
    assert_relative_eq!(contact.depth, 4.0);

    // Separated circles produce no contact
    assert!(collide(&circle, Vector2::zero(), &circle, Vector2::new(20.0, 0.0)).is_none());

    // Coincident centers are degenerate and skipped
    assert!(collide(&circle, Vector2::one(), &circle, Vector2::one()).is_none());

    // Circle-segment, both orderings, normals point first -> second
    let segment = ColliderShape::Segment(Segment::new(
        Vector2::new(0.0, 5.0),
        Vector2::new(10.0, 5.0),
    ));
    let ball = ColliderShape::Circle { radius: 3.0 };

    let contact = collide(&ball, Vector2::new(5.0, 3.0), &segment, Vector2::zero()).unwrap();
    assert_relative_eq!(contact.normal.y, 1.0);
    assert_relative_eq!(contact.depth, 1.0);

    let contact = collide(&segment, Vector2::zero(), &ball, Vector2::new(5.0, 3.0)).unwrap();
    assert_relative_eq!(contact.normal.y, -1.0);
    assert_relative_eq!(contact.depth, 1.0);

    // Segments collide through their endpoint nodes, not with each other
    let other = ColliderShape::Segment(Segment::new(Vector2::zero(), Vector2::new(0.0, 10.0)));
    assert!(collide(&segment, Vector2::zero(), &other, Vector2::zero()).is_none());
}
