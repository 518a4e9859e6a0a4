use verlet2d::{Material, Node, PhysicsWorld, Polygon, Rope, Vector2};

use std::thread::sleep;
use std::time::Duration;

fn main() {
    let mut world = PhysicsWorld::new(300.0, 200.0).expect("valid config");

    // A rope bridge anchored at both ends
    let bridge = Rope::new(Vector2::new(40.0, 80.0), Vector2::new(260.0, 80.0), 16)
        .with_name("bridge")
        .with_node_radius(1.5)
        .with_locked_start(true)
        .with_locked_end(true)
        .build(&mut world)
        .expect("valid rope");

    // A hexagonal boulder dropped onto the bridge
    let boulder = Polygon::new(Vector2::new(150.0, 20.0), 12.0, 6)
        .with_name("boulder")
        .with_node_radius(3.0)
        .with_node_mass(4.0)
        .with_material(Material::wood())
        .build(&mut world)
        .expect("valid polygon");

    // Loose debris
    for i in 0..4 {
        let node = Node::new(Vector2::new(100.0 + (i as f32) * 30.0, 10.0), 2.5, 0.5)
            .expect("valid node")
            .with_material(Material::rubber());
        world.add_node(node);
    }

    let time_step = 1.0 / 60.0;

    loop {
        world.update(time_step);

        print!("\x1B[2J\x1B[1;1H");
        println!("Rope Bridge Simulation");
        println!("----------------------");

        let center = world.composite_position(boulder).expect("boulder exists");
        let angle = world.composite_rotation(boulder).expect("boulder exists");
        println!(
            "Boulder: Pos=({:.1}, {:.1}), Rot={:.2} rad",
            center.x, center.y, angle
        );

        let sag = world
            .get_composite(bridge)
            .expect("bridge exists")
            .get_nodes()
            .iter()
            .filter_map(|&h| world.get_node(h).ok())
            .map(|n| n.get_position().y)
            .fold(f32::MIN, f32::max);
        println!("Bridge lowest point: {:.1}", sag);

        sleep(Duration::from_millis((time_step * 1000.0) as u64));

        if world.get_time() > 12.0 {
            break;
        }
    }
}
