use glam::{Quat, Vec3};

use crate::physics::PhysicsBody;

/// Arena id of a node within a [`crate::scene::SceneGraph`].
pub type NodeId = u32;

/// Local transform of a node. Physics nodes are unoffset by convention:
/// positions are not composed with ancestor transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// What a node is, and the data that comes with it.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Plain grouping node.
    Group,
    /// Scene root; may expose a physics world (see `SceneGraph::attach_world`).
    Root,
    /// Node mirroring a simulated rigid body.
    Physics(PhysicsBody),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: 0,
            name: name.into(),
            transform: Transform::default(),
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Group)
    }

    pub fn root(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Root)
    }

    /// Physics node with a default body: dynamic, mass 1, no shapes.
    pub fn physics(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Physics(PhysicsBody::default()))
    }

    pub fn physics_with_body(name: impl Into<String>, body: PhysicsBody) -> Self {
        Self::with_kind(name, NodeKind::Physics(body))
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn oriented(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Type tag used in scene documents.
    pub fn type_tag(&self) -> &'static str {
        match self.kind {
            NodeKind::Group => "Group",
            NodeKind::Root => "Root",
            NodeKind::Physics(_) => "Physics",
        }
    }

    pub fn body(&self) -> Option<&PhysicsBody> {
        match &self.kind {
            NodeKind::Physics(body) => Some(body),
            _ => None,
        }
    }

    pub fn body_mut(&mut self) -> Option<&mut PhysicsBody> {
        match &mut self.kind {
            NodeKind::Physics(body) => Some(body),
            _ => None,
        }
    }
}

impl Default for Node {
    /// Matches the default physics node: name "physics", dynamic body.
    fn default() -> Self {
        Self::physics("physics")
    }
}
