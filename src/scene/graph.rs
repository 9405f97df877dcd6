use std::collections::HashMap;

use tracing::{debug, warn};

use crate::physics::{PhysicsWorld, Shape};
use crate::scene::node::{Node, NodeId, NodeKind};
use crate::scene::{SceneError, SceneResult};

/// Arena-based scene graph.
///
/// Nodes are stored flat and keyed by id; hierarchy lives in the parent/child
/// links. Physics worlds are keyed by the scene root that exposes them, which
/// is the marker the ancestor walk in [`SceneGraph::initialize`] looks for.
///
/// Lifecycle contract (single-threaded, driven by the runtime/editor loop):
/// `initialize` once per subtree after final attachment, then per tick
/// `step_worlds` followed by an `update` sweep. None of the sweep entry
/// points return errors; a malformed node is logged and skipped so its
/// siblings still run.
pub struct SceneGraph {
    nodes: HashMap<NodeId, Node>,
    worlds: HashMap<NodeId, PhysicsWorld>,
    next_id: NodeId,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            worlds: HashMap::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, mut node: Node, parent: Option<NodeId>) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        node.id = id;
        node.parent = parent;
        node.children.clear();
        self.nodes.insert(id, node);
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.push(id);
        }
        id
    }

    /// Add a node with no parent (typically a `Root`).
    pub fn add_root(&mut self, node: Node) -> NodeId {
        self.insert(node, None)
    }

    /// Add a node as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> SceneResult<NodeId> {
        if !self.nodes.contains_key(&parent) {
            return Err(SceneError::NodeNotFound { id: parent });
        }
        Ok(self.insert(node, Some(parent)))
    }

    /// Make a scene root expose a physics world. The root becomes a binding
    /// target for every physics descendant initialized afterwards.
    pub fn attach_world(&mut self, id: NodeId, world: PhysicsWorld) -> SceneResult<()> {
        let node = self
            .nodes
            .get(&id)
            .ok_or(SceneError::NodeNotFound { id })?;
        if !matches!(node.kind, NodeKind::Root) {
            return Err(SceneError::NotASceneRoot { id });
        }
        if self.worlds.contains_key(&id) {
            return Err(SceneError::WorldAlreadyBound { id });
        }
        self.worlds.insert(id, world);
        Ok(())
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn world(&self, id: NodeId) -> Option<&PhysicsWorld> {
        self.worlds.get(&id)
    }

    pub fn world_mut(&mut self, id: NodeId) -> Option<&mut PhysicsWorld> {
        self.worlds.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over the ancestors of `id`, nearest first, excluding `id`
    /// itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            current: Some(id),
        }
    }

    fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// One-time binding sweep over the subtree rooted at `id`.
    ///
    /// For each physics node, in pre-order: seed the body from the node's
    /// current transform, find the nearest ancestor exposing a world (the walk
    /// stops at the first match), and register the body there. A node with no
    /// qualifying ancestor stays unbound and is only ever visually
    /// synchronized; that is not an error.
    pub fn initialize(&mut self, id: NodeId) {
        if !self.nodes.contains_key(&id) {
            warn!(node = id, "initialize: node not found");
            return;
        }
        self.bind_body(id);
        for child in self.children_of(id) {
            self.initialize(child);
        }
    }

    fn bind_body(&mut self, id: NodeId) {
        // Nearest-wins: first ancestor exposing a world ends the walk.
        let world_id = self
            .ancestors(id)
            .find(|ancestor| self.worlds.contains_key(ancestor));

        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        let transform = node.transform;
        let NodeKind::Physics(body) = &mut node.kind else {
            return;
        };
        if body.handle.is_some() {
            warn!(node = id, "initialize: body already bound, skipping");
            return;
        }
        let Some(world_id) = world_id else {
            debug!(node = id, "no scene root with a physics world; node stays unbound");
            return;
        };
        let Some(world) = self.worlds.get_mut(&world_id) else {
            return;
        };

        let handle = world.register_body(body, transform.position, transform.rotation);
        body.handle = Some(handle);
        body.world = Some(world_id);
        debug!(node = id, root = world_id, "physics body registered");
    }

    /// Per-tick sweep over the subtree rooted at `id`, pulling simulated poses
    /// back into node transforms. Call after the worlds have advanced.
    ///
    /// Position is copied unconditionally; orientation is skipped for bodies
    /// with `fixed_rotation`. Children are visited in order; each node syncs
    /// against its own body only (no transform composition).
    pub fn update(&mut self, id: NodeId) {
        if !self.nodes.contains_key(&id) {
            warn!(node = id, "update: node not found");
            return;
        }
        self.sync_body(id);
        for child in self.children_of(id) {
            self.update(child);
        }
    }

    fn sync_body(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let NodeKind::Physics(body) = &node.kind else {
            return;
        };
        let (Some(handle), Some(world_id)) = (body.handle, body.world) else {
            return;
        };
        let fixed_rotation = body.fixed_rotation;

        let Some((position, rotation)) = self
            .worlds
            .get(&world_id)
            .and_then(|world| world.body_pose(handle))
        else {
            return;
        };

        if let Some(node) = self.nodes.get_mut(&id) {
            node.transform.position = position;
            if !fixed_rotation {
                node.transform.rotation = rotation;
            }
        }
    }

    /// Append a shape to a physics node, order-preserving. If the body is
    /// already registered, the collider is attached to the live body as well.
    pub fn add_shape(&mut self, id: NodeId, shape: Shape) {
        let Some(node) = self.nodes.get_mut(&id) else {
            warn!(node = id, "add_shape: node not found");
            return;
        };
        let NodeKind::Physics(body) = &mut node.kind else {
            warn!(node = id, "add_shape: not a physics node");
            return;
        };

        if let (Some(handle), Some(world_id)) = (body.handle, body.world) {
            if let Some(world) = self.worlds.get_mut(&world_id) {
                world.attach_shape(
                    handle,
                    &shape,
                    body.collision_filter_group,
                    body.collision_filter_mask,
                );
            }
        }
        body.shapes.push(shape);
    }

    /// Dynamic-input variant of [`SceneGraph::add_shape`]: anything that is
    /// not a valid shape descriptor is ignored without mutating the node.
    pub fn add_shape_value(&mut self, id: NodeId, value: &serde_json::Value) {
        match Shape::from_value(value) {
            Some(shape) => self.add_shape(id, shape),
            None => warn!(node = id, "add_shape: ignoring non-shape value"),
        }
    }

    /// De-register a physics node's body from its bound world. No-op for
    /// unbound or non-physics nodes.
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        let NodeKind::Physics(body) = &mut node.kind else {
            return;
        };
        if let (Some(handle), Some(world_id)) = (body.handle, body.world) {
            body.handle = None;
            body.world = None;
            if let Some(world) = self.worlds.get_mut(&world_id) {
                world.remove_body(handle);
            }
            debug!(node = id, root = world_id, "physics body de-registered");
        }
    }

    /// Remove a node and its whole subtree, de-registering every body in it
    /// from its bound world first.
    pub fn remove(&mut self, id: NodeId) -> SceneResult<()> {
        if !self.nodes.contains_key(&id) {
            return Err(SceneError::NodeNotFound { id });
        }

        if let Some(parent_id) = self.nodes.get(&id).and_then(|n| n.parent) {
            if let Some(parent) = self.nodes.get_mut(&parent_id) {
                parent.children.retain(|child| *child != id);
            }
        }

        let mut stack = vec![id];
        let mut subtree = Vec::new();
        while let Some(current) = stack.pop() {
            subtree.push(current);
            stack.extend(self.children_of(current));
        }

        for node_id in subtree {
            self.detach(node_id);
            self.worlds.remove(&node_id);
            self.nodes.remove(&node_id);
        }
        Ok(())
    }

    /// Advance every world in the graph by `dt` seconds. The driver calls
    /// this strictly before the `update` sweep.
    pub fn step_worlds(&mut self, dt: f32) {
        for world in self.worlds.values_mut() {
            world.step(dt);
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Ancestors<'a> {
    graph: &'a SceneGraph,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.current?;
        let parent = self.graph.nodes.get(&current).and_then(|n| n.parent);
        self.current = parent;
        parent
    }
}
