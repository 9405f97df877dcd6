use anyhow::Result;
use glam::Vec3;
use tracing::info;

use sceneforge::config::load_simulation_settings;
use sceneforge::scene::document;
use sceneforge::utils::logging::init_logging;
use sceneforge::{BodyKind, HalfExtents, Node, PhysicsBody, PhysicsWorld, SceneGraph, Shape};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    init_logging();
    info!("sceneforge demo {}", VERSION);

    let settings = load_simulation_settings();
    let mut graph = SceneGraph::new();

    let root = graph.add_root(Node::root("scene"));
    graph.attach_world(root, PhysicsWorld::new(&settings))?;

    let ground = graph.add_child(
        root,
        Node::physics_with_body(
            "ground",
            PhysicsBody {
                body_kind: BodyKind::Static,
                ..Default::default()
            },
        )
        .at(Vec3::new(0.0, -0.5, 0.0)),
    )?;
    graph.add_shape(
        ground,
        Shape::Box {
            half_extents: HalfExtents::new(10.0, 0.5, 10.0),
        },
    );

    let ball = graph.add_child(root, Node::physics("ball").at(Vec3::new(0.0, 5.0, 0.0)))?;
    graph.add_shape(ball, Shape::Sphere { radius: 0.5 });

    graph.initialize(root);

    for _ in 0..240 {
        graph.step_worlds(settings.timestep);
        graph.update(root);
    }

    let resting = graph
        .get(ball)
        .map(|n| n.transform.position)
        .unwrap_or(Vec3::ZERO);
    info!("ball settled at {:?}", resting);

    let doc = document::serialize_node(&graph, root)?;
    println!("{}", document::to_json(&doc)?);

    Ok(())
}
