use verlet2d::{Material, Node, PhysicsWorld, Vector2};

use std::thread::sleep;
use std::time::Duration;

fn main() {
    // Create a physics world with a 200x120 area
    let mut world = PhysicsWorld::new(200.0, 120.0).expect("valid config");

    // Drop a handful of nodes with different materials
    let handles = create_bouncing_nodes(&mut world, 9);

    // Animation loop
    let time_step = 1.0 / 60.0;

    loop {
        // Step the simulation
        world.update(time_step);

        // Print node positions
        print!("\x1B[2J\x1B[1;1H"); // Clear terminal
        println!("Bouncing Nodes Simulation");
        println!("-------------------------");

        for (i, handle) in handles.iter().enumerate() {
            let node = world.get_node(*handle).expect("node exists");
            let pos = node.get_position();
            let vel = node.get_velocity();

            println!(
                "Node {}: Pos=({:.2}, {:.2}), Vel=({:.2}, {:.2})",
                i + 1,
                pos.x,
                pos.y,
                vel.x,
                vel.y
            );
        }

        let contacts = world.get_events().collision_events().count();
        println!("Contacts this frame: {}", contacts);

        // Sleep to limit the frame rate
        sleep(Duration::from_millis((time_step * 1000.0) as u64));

        // Break after 10 seconds
        if world.get_time() > 10.0 {
            break;
        }
    }
}

fn create_bouncing_nodes(world: &mut PhysicsWorld, count: usize) -> Vec<verlet2d::NodeHandle> {
    let mut handles = Vec::new();

    let materials = [
        Material::rubber(), // Rubber (high bounciness)
        Material::metal(),  // Metal (medium bounciness)
        Material::wood(),   // Wood (low bounciness)
    ];

    for i in 0..count {
        let x = 20.0 + (i as f32) * 20.0;
        let y = 10.0 + (i % 3) as f32 * 8.0;
        let radius = 2.0 + (i % 3) as f32;

        let material = materials[i % materials.len()];
        let mut node = Node::new(Vector2::new(x, y), radius, 1.0)
            .expect("valid node")
            .with_material(material);

        // Give it a sideways push
        node.set_velocity(Vector2::new((i as f32) * 0.05 - 0.2, 0.0));

        handles.push(world.add_node(node));
    }

    handles
}
