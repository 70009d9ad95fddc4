//! Planar reflection math for the mirror demo.
//!
//! A mirror is modelled as an infinite plane `n . p + d = 0` with unit
//! normal `n`. Reflecting the camera across that plane and rendering the
//! scene with the reflected view (restricted by a stencil mask to the
//! mirror quad) yields the image seen in the mirror.

use cgmath::{InnerSpace, Matrix4, Point3, Vector3};

/// An infinite plane `normal . p + d = 0`. `normal` is kept unit length by
/// the constructors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f32>,
    pub d: f32,
}

impl Plane {
    /// Plane from a unit-length normal candidate and a point on the plane.
    /// The normal is normalized, so callers may pass any non-zero direction.
    pub fn from_point_normal(point: Point3<f32>, normal: Vector3<f32>) -> Self {
        let normal = normal.normalize();
        let d = -normal.dot(point - Point3::new(0.0, 0.0, 0.0));
        Self { normal, d }
    }

    /// Signed distance of `p` to the plane, positive on the normal side.
    pub fn signed_distance(&self, p: Point3<f32>) -> f32 {
        self.normal.dot(p - Point3::new(0.0, 0.0, 0.0)) + self.d
    }

    /// Mirrors a point across the plane: `p - 2 (n.p + d) n`.
    pub fn reflect_point(&self, p: Point3<f32>) -> Point3<f32> {
        p - self.normal * (2.0 * self.signed_distance(p))
    }

    /// Mirrors a direction across the plane: `v - 2 (n.v) n`. Directions
    /// ignore `d`; only the orientation of the plane matters.
    pub fn reflect_direction(&self, v: Vector3<f32>) -> Vector3<f32> {
        v - self.normal * (2.0 * self.normal.dot(v))
    }

    /// Householder reflection as a homogeneous 4x4 matrix.
    ///
    /// The linear part is `I - 2 n n^T`, the translation `-2 d n`. Applying
    /// it to a point is identical to [`reflect_point`](Self::reflect_point).
    /// Its determinant is -1, so triangle winding flips; render reflected
    /// geometry with the opposite front-face convention.
    pub fn reflection_matrix(&self) -> Matrix4<f32> {
        let n = self.normal;
        // Column major.
        Matrix4::new(
            1.0 - 2.0 * n.x * n.x,
            -2.0 * n.x * n.y,
            -2.0 * n.x * n.z,
            0.0,
            -2.0 * n.y * n.x,
            1.0 - 2.0 * n.y * n.y,
            -2.0 * n.y * n.z,
            0.0,
            -2.0 * n.z * n.x,
            -2.0 * n.z * n.y,
            1.0 - 2.0 * n.z * n.z,
            0.0,
            -2.0 * self.d * n.x,
            -2.0 * self.d * n.y,
            -2.0 * self.d * n.z,
            1.0,
        )
    }
}
