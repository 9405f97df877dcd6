//! Scene document serialization.
//!
//! The document is the JSON envelope scene files use: the generic node record
//! (name, type, transform, children) plus, for physics nodes, the `body`
//! record with the full rigid-body configuration. Field names and the shape
//! entry layout are fixed; existing saved scenes depend on them.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::physics::PhysicsBody;
use crate::scene::graph::SceneGraph;
use crate::scene::node::{Node, NodeId, NodeKind};
use crate::scene::{SceneError, SceneResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<PhysicsBody>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDocument>,
}

/// Produce the document for the subtree rooted at `id`. Read-only: neither
/// nodes nor body handles are mutated.
pub fn serialize_node(graph: &SceneGraph, id: NodeId) -> SceneResult<NodeDocument> {
    let node = graph.get(id).ok_or(SceneError::NodeNotFound { id })?;

    let children = node
        .children()
        .iter()
        .map(|child| serialize_node(graph, *child))
        .collect::<SceneResult<Vec<_>>>()?;

    Ok(NodeDocument {
        name: node.name.clone(),
        node_type: node.type_tag().to_string(),
        translation: node.transform.position.to_array(),
        rotation: node.transform.rotation.to_array(),
        body: node.body().map(PhysicsBody::detached_copy),
        children,
    })
}

/// Rebuild a subtree from a document under `parent` (or as a new root).
///
/// Unknown node types become plain groups with a warning; a `Physics` record
/// without a `body` gets the default body. Reconstructed bodies are unbound;
/// run `initialize` afterwards to register them.
pub fn instantiate(
    graph: &mut SceneGraph,
    parent: Option<NodeId>,
    doc: &NodeDocument,
) -> SceneResult<NodeId> {
    let kind = match doc.node_type.as_str() {
        "Group" => NodeKind::Group,
        "Root" => NodeKind::Root,
        "Physics" => NodeKind::Physics(
            doc.body
                .as_ref()
                .map(PhysicsBody::detached_copy)
                .unwrap_or_default(),
        ),
        other => {
            warn!("Unknown node type {:?}, instantiating as a group", other);
            NodeKind::Group
        }
    };

    let mut node = match kind {
        NodeKind::Group => Node::group(&doc.name),
        NodeKind::Root => Node::root(&doc.name),
        NodeKind::Physics(body) => Node::physics_with_body(&doc.name, body),
    };
    node.transform.position = glam::Vec3::from_array(doc.translation);
    node.transform.rotation = glam::Quat::from_array(doc.rotation);

    let id = match parent {
        Some(parent) => graph.add_child(parent, node)?,
        None => graph.add_root(node),
    };

    for child in &doc.children {
        instantiate(graph, Some(id), child)?;
    }
    Ok(id)
}

pub fn to_json(doc: &NodeDocument) -> SceneResult<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

pub fn from_json(json: &str) -> SceneResult<NodeDocument> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BodyKind, HalfExtents, Shape};
    use glam::Vec3;
    use serde_json::json;

    fn scene_with_ball() -> (SceneGraph, NodeId, NodeId) {
        let mut graph = SceneGraph::new();
        let root = graph.add_root(Node::root("scene"));
        let ball = graph
            .add_child(root, Node::physics("ball").at(Vec3::new(0.0, 3.0, 0.0)))
            .unwrap();
        graph.add_shape(ball, Shape::Sphere { radius: 2.0 });
        (graph, root, ball)
    }

    #[test]
    fn document_carries_identity_transform_and_body() {
        let (graph, root, _) = scene_with_ball();
        let doc = serialize_node(&graph, root).unwrap();

        assert_eq!(doc.name, "scene");
        assert_eq!(doc.node_type, "Root");
        assert!(doc.body.is_none());
        assert_eq!(doc.children.len(), 1);

        let ball = &doc.children[0];
        assert_eq!(ball.node_type, "Physics");
        assert_eq!(ball.translation, [0.0, 3.0, 0.0]);
        let body = ball.body.as_ref().unwrap();
        assert_eq!(body.shapes, vec![Shape::Sphere { radius: 2.0 }]);
    }

    #[test]
    fn body_record_wire_layout() {
        let (graph, _, ball) = scene_with_ball();
        let doc = serialize_node(&graph, ball).unwrap();
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["type"], "Physics");
        assert_eq!(value["body"]["bodyKind"], "dynamic");
        assert_eq!(value["body"]["mass"], 1.0);
        assert_eq!(
            value["body"]["shapes"],
            json!([{"type": "sphere", "radius": 2.0}])
        );
    }

    #[test]
    fn round_trip_preserves_shapes_in_order() {
        let mut graph = SceneGraph::new();
        let ball = graph.add_root(Node::physics("ball"));
        graph.add_shape(ball, Shape::Sphere { radius: 2.0 });
        graph.add_shape(
            ball,
            Shape::Box {
                half_extents: HalfExtents::new(1.0, 1.0, 1.0),
            },
        );

        let doc = serialize_node(&graph, ball).unwrap();
        let json = to_json(&doc).unwrap();
        let parsed = from_json(&json).unwrap();

        let mut restored = SceneGraph::new();
        let restored_id = instantiate(&mut restored, None, &parsed).unwrap();
        let body = restored.get(restored_id).unwrap().body().unwrap();

        assert_eq!(
            body.shapes,
            vec![
                Shape::Sphere { radius: 2.0 },
                Shape::Box {
                    half_extents: HalfExtents::new(1.0, 1.0, 1.0),
                },
            ]
        );
    }

    #[test]
    fn serialization_does_not_mutate_bindings() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root(Node::root("scene"));
        graph
            .attach_world(root, crate::physics::PhysicsWorld::default())
            .unwrap();
        let ball = graph.add_child(root, Node::physics("ball")).unwrap();
        graph.initialize(root);

        let doc = serialize_node(&graph, root).unwrap();
        // the live body stays bound; the document copy is detached
        assert!(graph.get(ball).unwrap().body().unwrap().is_bound());
        assert!(!doc.children[0].body.as_ref().unwrap().is_bound());
    }

    #[test]
    fn unknown_shape_type_is_dropped_on_load() {
        let json = json!({
            "name": "ball",
            "type": "Physics",
            "translation": [0.0, 0.0, 0.0],
            "rotation": [0.0, 0.0, 0.0, 1.0],
            "body": {
                "bodyKind": "dynamic",
                "mass": 1.0,
                "linearDamping": 0.01,
                "angularDamping": 0.01,
                "allowSleep": true,
                "sleepSpeedLimit": 0.1,
                "sleepTimeLimit": 1.0,
                "collisionFilterGroup": 1,
                "collisionFilterMask": 4294967295u32,
                "fixedRotation": false,
                "shapes": [
                    {"type": "trimesh", "indices": [0, 1, 2]},
                    {"type": "sphere", "radius": 1.5}
                ]
            }
        })
        .to_string();

        let doc = from_json(&json).unwrap();
        let body = doc.body.unwrap();
        assert_eq!(body.shapes, vec![Shape::Sphere { radius: 1.5 }]);
    }

    #[test]
    fn unknown_node_type_becomes_a_group() {
        let doc = NodeDocument {
            name: "light".to_string(),
            node_type: "Light".to_string(),
            translation: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            body: None,
            children: vec![],
        };
        let mut graph = SceneGraph::new();
        let id = instantiate(&mut graph, None, &doc).unwrap();
        assert_eq!(graph.get(id).unwrap().type_tag(), "Group");
    }

    #[test]
    fn static_box_scenario() {
        let mut graph = SceneGraph::new();
        let crate_id = graph.add_root(Node::physics_with_body(
            "crate",
            PhysicsBody {
                body_kind: BodyKind::Dynamic,
                mass: 5.0,
                ..Default::default()
            },
        ));
        graph.add_shape(
            crate_id,
            Shape::Box {
                half_extents: HalfExtents::new(0.5, 0.5, 0.5),
            },
        );

        let value =
            serde_json::to_value(serialize_node(&graph, crate_id).unwrap()).unwrap();
        assert_eq!(value["body"]["mass"], 5.0);
        assert_eq!(value["body"]["bodyKind"], "dynamic");
        assert_eq!(
            value["body"]["shapes"],
            json!([{"type": "box", "halfExtents": {"x": 0.5, "y": 0.5, "z": 0.5}}])
        );
    }
}
