//! Rigid-body configuration and the rapier-backed world wrapper.
//!
//! The scene graph owns the authoring-side state (shape descriptors, mass,
//! damping, filters); rapier owns the simulation (collision detection,
//! integration, constraint solving). This module is the seam between the two.

pub mod body;
pub mod shape;
pub mod world;

// Re-export main types for convenience
pub use body::{BodyKind, PhysicsBody};
pub use shape::{HalfExtents, Shape};
pub use world::PhysicsWorld;
