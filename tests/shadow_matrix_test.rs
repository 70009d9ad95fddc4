use approx::assert_relative_eq;
use cgmath::{Point3, Transform, Vector3};
use lumen_ngin::pipelines::shadow::{face_proj, face_view, face_views, FaceUniform, SHADOW_FACES};

const LIGHT: Point3<f32> = Point3::new(1.0, 3.0, -2.0);

#[test]
fn should_center_every_face_on_the_light() {
    for view in face_views(LIGHT) {
        let origin = view.transform_point(LIGHT);
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.z, 0.0, epsilon = 1e-5);
    }
}

#[test]
fn should_look_down_each_face_forward_vector() {
    // A point one unit along the face's forward vector lands on the view
    // space -z axis (right-handed convention).
    for (face, (forward, _)) in SHADOW_FACES.iter().enumerate() {
        let view = face_view(LIGHT, face);
        let ahead = LIGHT + Vector3::from(*forward);
        let in_view = view.transform_point(ahead);
        assert_relative_eq!(in_view.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(in_view.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(in_view.z, -1.0, epsilon = 1e-5);
    }
}

#[test]
fn should_cover_all_six_directions() {
    // Forward vectors are the axis directions in cube layer order and
    // pairwise distinct.
    let expected: [[f32; 3]; 6] = [
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ];
    for (face, (forward, up)) in SHADOW_FACES.iter().enumerate() {
        assert_eq!(*forward, expected[face]);
        // Up must be perpendicular to forward.
        let dot: f32 = forward
            .iter()
            .zip(up.iter())
            .map(|(a, b)| a * b)
            .sum();
        assert_relative_eq!(dot, 0.0, epsilon = 1e-6);
    }
}

#[test]
fn should_map_near_to_zero_and_far_to_one() {
    let far = 25.0;
    let proj = face_proj(far);

    let near_clip = proj * cgmath::Vector4::new(0.0, 0.0, -0.1, 1.0);
    assert_relative_eq!(near_clip.z / near_clip.w, 0.0, epsilon = 1e-5);

    let far_clip = proj * cgmath::Vector4::new(0.0, 0.0, -far, 1.0);
    assert_relative_eq!(far_clip.z / far_clip.w, 1.0, epsilon = 1e-5);
}

#[test]
fn should_keep_square_frusta() {
    // 90 degrees fov with aspect 1: a point at 45 degrees off axis lands
    // exactly on the clip boundary, in both x and y. Clip y is negated so
    // the face image matches the cube sampling orientation.
    let proj = face_proj(25.0);
    let edge_x = proj * cgmath::Vector4::new(1.0, 0.0, -1.0, 1.0);
    assert_relative_eq!(edge_x.x / edge_x.w, 1.0, epsilon = 1e-4);
    let edge_y = proj * cgmath::Vector4::new(0.0, 1.0, -1.0, 1.0);
    assert_relative_eq!(edge_y.y / edge_y.w, -1.0, epsilon = 1e-4);
}

#[test]
fn should_render_faces_in_cube_sampling_orientation() {
    // The framebuffer texel a fragment is written to must be the texel the
    // cube lookup reads for the same direction. Framebuffer coordinates put
    // row 0 at the top: u = x/w / 2 + 0.5, v = -y/w / 2 + 0.5.
    let far = 25.0;

    // +Z face (layer 4): s = x/(2z) + 0.5, t = -y/(2z) + 0.5.
    let dir = Vector3::new(0.2, 0.5, 1.0);
    let clip = face_proj(far) * face_view(LIGHT, 4) * (LIGHT + dir).to_homogeneous();
    let u = 0.5 * clip.x / clip.w + 0.5;
    let v = 0.5 * -clip.y / clip.w + 0.5;
    assert_relative_eq!(u, 0.5 * dir.x / dir.z + 0.5, epsilon = 1e-5);
    assert_relative_eq!(v, 0.5 * -dir.y / dir.z + 0.5, epsilon = 1e-5);

    // +X face (layer 0): s = -z/(2x) + 0.5, t = -y/(2x) + 0.5.
    let dir = Vector3::new(1.0, 0.4, -0.3);
    let clip = face_proj(far) * face_view(LIGHT, 0) * (LIGHT + dir).to_homogeneous();
    let u = 0.5 * clip.x / clip.w + 0.5;
    let v = 0.5 * -clip.y / clip.w + 0.5;
    assert_relative_eq!(u, 0.5 * -dir.z / dir.x + 0.5, epsilon = 1e-5);
    assert_relative_eq!(v, 0.5 * -dir.y / dir.x + 0.5, epsilon = 1e-5);
}

#[test]
fn should_combine_view_and_projection_in_the_face_uniform() {
    let far = 25.0;
    for face in 0..6 {
        let uniform = FaceUniform::new(LIGHT, far, face);
        assert_eq!(uniform.light_pos, [LIGHT.x, LIGHT.y, LIGHT.z]);
        assert_relative_eq!(uniform.far, far);

        let expected: [[f32; 4]; 4] = (face_proj(far) * face_view(LIGHT, face)).into();
        assert_eq!(uniform.view_proj, expected);
    }
}
