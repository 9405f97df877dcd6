use rapier3d::prelude::RigidBodyHandle;
use serde::{Deserialize, Serialize};

use crate::physics::{shape, Shape};
use crate::scene::NodeId;

/// How the simulation treats a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    /// Never moves; infinite mass.
    Static,
    /// Fully simulated.
    Dynamic,
    /// Moved by the application, pushes dynamic bodies.
    Kinematic,
}

impl Default for BodyKind {
    fn default() -> Self {
        Self::Dynamic
    }
}

/// Rigid-body configuration owned by a physics node.
///
/// This is the authoring-side record: everything here is serialized into the
/// scene document. The `handle`/`world` pair is runtime state established by
/// `SceneGraph::initialize` and never written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsBody {
    pub body_kind: BodyKind,
    /// Mass in kilograms; only meaningful for dynamic bodies.
    pub mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub allow_sleep: bool,
    pub sleep_speed_limit: f32,
    pub sleep_time_limit: f32,
    pub collision_filter_group: u32,
    pub collision_filter_mask: u32,
    /// When set, the node's orientation is never overwritten from the
    /// simulated body, and the body itself has rotations locked.
    pub fixed_rotation: bool,
    #[serde(deserialize_with = "shape::deserialize_shapes")]
    pub shapes: Vec<Shape>,

    #[serde(skip)]
    pub handle: Option<RigidBodyHandle>,
    #[serde(skip)]
    pub world: Option<NodeId>,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            body_kind: BodyKind::Dynamic,
            mass: 1.0,
            linear_damping: 0.01,
            angular_damping: 0.01,
            allow_sleep: true,
            sleep_speed_limit: 0.1,
            sleep_time_limit: 1.0,
            collision_filter_group: 1,
            collision_filter_mask: u32::MAX,
            fixed_rotation: false,
            shapes: Vec::new(),
            handle: None,
            world: None,
        }
    }
}

impl PhysicsBody {
    /// Append a shape descriptor, order-preserving. Attachment to a live
    /// rapier body goes through `SceneGraph::add_shape`.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// The rapier handle, once the body is registered with a world.
    pub fn handle(&self) -> Option<RigidBodyHandle> {
        self.handle
    }

    /// Id of the scene root whose world this body is registered with.
    pub fn bound_world(&self) -> Option<NodeId> {
        self.world
    }

    pub fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    /// Copy of the configuration with runtime bindings cleared, for use in
    /// scene documents.
    pub(crate) fn detached_copy(&self) -> Self {
        let mut copy = self.clone();
        copy.handle = None;
        copy.world = None;
        copy
    }
}
