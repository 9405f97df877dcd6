// SceneForge: scene-graph / rigid-body authoring core
// Scene documents in, simulated transforms out

pub mod utils;
pub mod config;
pub mod physics;
pub mod scene;

// Re-export commonly used types for convenience
pub use physics::{BodyKind, HalfExtents, PhysicsBody, PhysicsWorld, Shape};
pub use scene::{Node, NodeId, NodeKind, SceneError, SceneGraph, Transform};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
