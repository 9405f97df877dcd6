use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Box half-extents, kept as a named {x, y, z} record to match the scene
/// document layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct HalfExtents {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl HalfExtents {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<glam::Vec3> for HalfExtents {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Collision shape descriptor attached to a physics body.
///
/// The wire format tags each entry with `type` and serializes only the fields
/// of that variant, in the layout existing scene files use.
// A trimesh variant is reserved for later; it is never emitted today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Shape {
    Sphere {
        radius: f32,
    },
    #[serde(rename_all = "camelCase")]
    Box {
        half_extents: HalfExtents,
    },
    ConvexPolyhedron {
        vertices: Vec<[f32; 3]>,
        faces: Vec<Vec<u32>>,
    },
}

impl Shape {
    /// Parse a dynamic value (editor input, document entry) into a shape
    /// descriptor. Returns `None` for anything that is not a recognized
    /// descriptor, including unknown `type` tags.
    pub fn from_value(value: &serde_json::Value) -> Option<Shape> {
        serde_json::from_value(value.clone()).ok()
    }

    pub fn type_tag(&self) -> &'static str {
        match self {
            Shape::Sphere { .. } => "sphere",
            Shape::Box { .. } => "box",
            Shape::ConvexPolyhedron { .. } => "convexPolyhedron",
        }
    }
}

/// Deserialize a shape list leniently: entries with an unknown or malformed
/// descriptor are dropped with a warning instead of failing the whole
/// document load.
pub(crate) fn deserialize_shapes<'de, D>(deserializer: D) -> Result<Vec<Shape>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
    Ok(raw
        .iter()
        .filter_map(|value| {
            let shape = Shape::from_value(value);
            if shape.is_none() {
                warn!("Dropping unrecognized shape entry: {}", value);
            }
            shape
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sphere_wire_layout() {
        let shape = Shape::Sphere { radius: 2.0 };
        let value = serde_json::to_value(&shape).unwrap();
        assert_eq!(value, json!({"type": "sphere", "radius": 2.0}));
    }

    #[test]
    fn box_wire_layout() {
        let shape = Shape::Box {
            half_extents: HalfExtents::new(1.0, 2.0, 3.0),
        };
        let value = serde_json::to_value(&shape).unwrap();
        assert_eq!(
            value,
            json!({"type": "box", "halfExtents": {"x": 1.0, "y": 2.0, "z": 3.0}})
        );
    }

    #[test]
    fn convex_wire_layout() {
        let shape = Shape::ConvexPolyhedron {
            vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            faces: vec![vec![0, 1, 2], vec![0, 1, 3], vec![0, 2, 3], vec![1, 2, 3]],
        };
        let value = serde_json::to_value(&shape).unwrap();
        assert_eq!(value["type"], "convexPolyhedron");
        assert_eq!(value["vertices"][1], json!([1.0, 0.0, 0.0]));
        assert_eq!(value["faces"][0], json!([0, 1, 2]));
    }

    #[test]
    fn from_value_rejects_non_shapes() {
        assert_eq!(Shape::from_value(&json!(5)), None);
        assert_eq!(Shape::from_value(&json!("sphere")), None);
        assert_eq!(Shape::from_value(&json!({"radius": 1.0})), None);
        assert_eq!(
            Shape::from_value(&json!({"type": "trimesh", "indices": []})),
            None
        );
    }

    #[test]
    fn from_value_accepts_descriptors() {
        let shape = Shape::from_value(&json!({"type": "sphere", "radius": 0.5}));
        assert_eq!(shape, Some(Shape::Sphere { radius: 0.5 }));
    }

    #[test]
    fn lenient_list_drops_unknown_entries() {
        #[derive(serde::Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "deserialize_shapes")]
            shapes: Vec<Shape>,
        }

        let holder: Holder = serde_json::from_value(json!({
            "shapes": [
                {"type": "sphere", "radius": 1.0},
                {"type": "heightfield", "rows": 4},
                {"type": "box", "halfExtents": {"x": 1.0, "y": 1.0, "z": 1.0}}
            ]
        }))
        .unwrap();

        assert_eq!(holder.shapes.len(), 2);
        assert_eq!(holder.shapes[0], Shape::Sphere { radius: 1.0 });
        assert_eq!(holder.shapes[1].type_tag(), "box");
    }
}
