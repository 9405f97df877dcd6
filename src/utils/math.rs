//! Conversions between the scene-side math types (glam) and the physics-side
//! math types (nalgebra, as re-exported by rapier).

// Keep the nalgebra names explicit so we don't accidentally rely on aliases
// that aren't in scope.
use rapier3d::na::{Point3, Quaternion, UnitQuaternion, Vector3};

pub fn to_na_vector(v: glam::Vec3) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

pub fn from_na_vector(v: &Vector3<f32>) -> glam::Vec3 {
    glam::Vec3::new(v.x, v.y, v.z)
}

pub fn to_na_point(v: [f32; 3]) -> Point3<f32> {
    Point3::new(v[0], v[1], v[2])
}

/// nalgebra's `Quaternion::new` takes (w, i, j, k); glam stores (x, y, z, w).
pub fn to_na_quat(q: glam::Quat) -> UnitQuaternion<f32> {
    UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z))
}

pub fn from_na_quat(q: &UnitQuaternion<f32>) -> glam::Quat {
    // nalgebra stores quaternion coords in (i, j, k, w) order
    glam::Quat::from_xyzw(q.coords.x, q.coords.y, q.coords.z, q.coords.w)
}
