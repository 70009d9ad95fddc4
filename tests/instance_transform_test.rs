use approx::assert_relative_eq;
use cgmath::{InnerSpace, Vector3};
use lumen_ngin::data_structures::instance::Instance;

// InstanceRaw is plain GPU data: mat4 model (16 floats), mat3 normal
// (9 floats, column major at offset 16), handedness (offset 25).
fn raw_floats(instance: &Instance) -> [f32; 26] {
    bytemuck::cast(instance.to_raw())
}

fn apply_normal_matrix(raw: &[f32; 26], n: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(
        raw[16] * n.x + raw[19] * n.y + raw[22] * n.z,
        raw[17] * n.x + raw[20] * n.y + raw[23] * n.z,
        raw[18] * n.x + raw[21] * n.y + raw[24] * n.z,
    )
}

#[test]
fn should_keep_normals_perpendicular_under_nonuniform_scale() {
    let mut instance = Instance::new();
    instance.scale = Vector3::new(2.0, 1.0, 1.0);
    let raw = raw_floats(&instance);

    // A slanted surface: normal (1,1,0), tangent (1,-1,0). Stretching x by
    // 2 moves the tangent to (2,-1,0); the transformed normal has to stay
    // perpendicular to it, which the plain rotation part would not give.
    let normal = apply_normal_matrix(&raw, Vector3::new(1.0, 1.0, 0.0).normalize());
    let tangent = Vector3::new(2.0, -1.0, 0.0);
    assert_relative_eq!(normal.dot(tangent), 0.0, epsilon = 1e-5);
}

#[test]
fn should_leave_normals_alone_without_scale() {
    let mut instance = Instance::new();
    instance.position = Vector3::new(3.0, -1.0, 2.0);
    let raw = raw_floats(&instance);

    let n = Vector3::new(0.0, 0.0, 1.0);
    let transformed = apply_normal_matrix(&raw, n);
    assert_relative_eq!(transformed.x, n.x, epsilon = 1e-6);
    assert_relative_eq!(transformed.y, n.y, epsilon = 1e-6);
    assert_relative_eq!(transformed.z, n.z, epsilon = 1e-6);
}

#[test]
fn should_flag_mirrored_instances_via_handedness() {
    let mut instance = Instance::new();
    instance.scale = Vector3::new(-1.0, 1.0, 1.0);
    let raw = raw_floats(&instance);
    assert_eq!(raw[25], -1.0);

    let raw = raw_floats(&Instance::new());
    assert_eq!(raw[25], 1.0);
}
