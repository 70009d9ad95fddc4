use approx::assert_relative_eq;
use cgmath::{InnerSpace, Matrix4, Point3, SquareMatrix, Transform, Vector3};
use lumen_ngin::reflect::Plane;

fn tilted_plane() -> Plane {
    // A non-axis-aligned plane to keep the tests honest.
    Plane::from_point_normal(Point3::new(1.0, 2.0, -1.0), Vector3::new(1.0, 2.0, 2.0))
}

#[test]
fn should_leave_points_on_the_plane_fixed() {
    let plane = tilted_plane();
    let p = Point3::new(1.0, 2.0, -1.0);
    let r = plane.reflect_point(p);
    assert_relative_eq!(r.x, p.x, epsilon = 1e-5);
    assert_relative_eq!(r.y, p.y, epsilon = 1e-5);
    assert_relative_eq!(r.z, p.z, epsilon = 1e-5);
    assert_relative_eq!(plane.signed_distance(p), 0.0, epsilon = 1e-5);
}

#[test]
fn should_be_an_involution() {
    let plane = tilted_plane();
    let p = Point3::new(-3.0, 0.5, 7.0);
    let twice = plane.reflect_point(plane.reflect_point(p));
    assert_relative_eq!(twice.x, p.x, epsilon = 1e-4);
    assert_relative_eq!(twice.y, p.y, epsilon = 1e-4);
    assert_relative_eq!(twice.z, p.z, epsilon = 1e-4);

    let v = Vector3::new(0.3, -1.2, 0.8);
    let twice = plane.reflect_direction(plane.reflect_direction(v));
    assert_relative_eq!(twice.x, v.x, epsilon = 1e-5);
    assert_relative_eq!(twice.y, v.y, epsilon = 1e-5);
    assert_relative_eq!(twice.z, v.z, epsilon = 1e-5);
}

#[test]
fn should_negate_the_signed_distance() {
    let plane = tilted_plane();
    let p = Point3::new(4.0, -2.0, 1.5);
    let r = plane.reflect_point(p);
    assert_relative_eq!(
        plane.signed_distance(r),
        -plane.signed_distance(p),
        epsilon = 1e-4
    );
}

#[test]
fn should_preserve_direction_lengths() {
    let plane = tilted_plane();
    let v = Vector3::new(2.0, -3.0, 0.5);
    assert_relative_eq!(
        plane.reflect_direction(v).magnitude(),
        v.magnitude(),
        epsilon = 1e-5
    );
}

#[test]
fn should_match_the_reflection_matrix() {
    let plane = tilted_plane();
    let m = plane.reflection_matrix();
    for p in [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(5.0, -1.0, 3.0),
        Point3::new(-0.2, 8.0, 0.4),
    ] {
        let by_matrix = m.transform_point(p);
        let by_formula = plane.reflect_point(p);
        assert_relative_eq!(by_matrix.x, by_formula.x, epsilon = 1e-4);
        assert_relative_eq!(by_matrix.y, by_formula.y, epsilon = 1e-4);
        assert_relative_eq!(by_matrix.z, by_formula.z, epsilon = 1e-4);
    }
}

#[test]
fn should_flip_orientation() {
    // Determinant -1: reflected triangles change winding, which is why
    // the mirror pipeline flips its front-face convention.
    let m = tilted_plane().reflection_matrix();
    assert_relative_eq!(m.determinant(), -1.0, epsilon = 1e-4);
}

#[test]
fn should_square_to_identity() {
    let m = tilted_plane().reflection_matrix();
    let id = m * m;
    let expected = Matrix4::<f32>::identity();
    for c in 0..4 {
        for r in 0..4 {
            assert_relative_eq!(id[c][r], expected[c][r], epsilon = 1e-4);
        }
    }
}
