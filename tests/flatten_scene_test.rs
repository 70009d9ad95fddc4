use approx::assert_relative_eq;
use cgmath::SquareMatrix;
use lumen_ngin::data_structures::scene::{FlatScene, DEFAULT_ALBEDO};

fn quad_positions() -> Vec<[f32; 3]> {
    vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ]
}

const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

#[test]
fn should_keep_attribute_arrays_parallel() {
    let mut scene = FlatScene::new();
    scene.append_raw(
        &quad_positions(),
        None,
        None,
        None,
        DEFAULT_ALBEDO,
        &QUAD_INDICES,
        cgmath::Matrix4::identity(),
    );
    scene.append_raw(
        &quad_positions()[..3],
        Some(&[[0.0, 0.0, 1.0]; 3]),
        Some(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]),
        None,
        [1.0, 0.0, 0.0, 1.0],
        &[0, 1, 2],
        cgmath::Matrix4::identity(),
    );

    assert_eq!(scene.vertex_count(), 7);
    assert_eq!(scene.positions.len(), 7);
    assert_eq!(scene.albedo.len(), 7);
    assert_eq!(scene.normals.len(), 7);
    assert_eq!(scene.uvs.len(), 7);
    assert_eq!(scene.tangents.len(), 7);
    assert_eq!(scene.bitangents.len(), 7);
    assert_eq!(scene.index_count(), 9);
}

#[test]
fn should_rebase_indices_per_primitive() {
    let mut scene = FlatScene::new();
    scene.append_raw(
        &quad_positions(),
        None,
        None,
        None,
        DEFAULT_ALBEDO,
        &QUAD_INDICES,
        cgmath::Matrix4::identity(),
    );
    scene.append_raw(
        &quad_positions(),
        None,
        None,
        None,
        DEFAULT_ALBEDO,
        &QUAD_INDICES,
        cgmath::Matrix4::identity(),
    );

    let expected: Vec<u32> = QUAD_INDICES
        .iter()
        .copied()
        .chain(QUAD_INDICES.iter().map(|i| i + 4))
        .collect();
    assert_eq!(scene.indices, expected);
    // Every index stays in range.
    assert!(scene.indices.iter().all(|&i| (i as usize) < scene.vertex_count()));
}

#[test]
fn should_fill_missing_attributes_with_zeros() {
    let mut scene = FlatScene::new();
    scene.append_raw(
        &quad_positions(),
        None,
        None,
        None,
        DEFAULT_ALBEDO,
        &QUAD_INDICES,
        cgmath::Matrix4::identity(),
    );

    assert!(scene.normals.iter().all(|n| *n == [0.0; 3]));
    assert!(scene.uvs.iter().all(|t| *t == [0.0; 2]));
    assert!(scene.missing_tangents());
    assert!(scene.albedo.iter().all(|a| *a == DEFAULT_ALBEDO));
}

#[test]
fn should_apply_world_transform_to_positions_and_normals() {
    let mut scene = FlatScene::new();
    let world = cgmath::Matrix4::from_translation(cgmath::Vector3::new(0.0, 0.0, 5.0))
        * cgmath::Matrix4::from_angle_y(cgmath::Deg(90.0));
    scene.append_raw(
        &[[1.0, 0.0, 0.0]],
        Some(&[[1.0, 0.0, 0.0]]),
        None,
        None,
        DEFAULT_ALBEDO,
        &[0],
        world,
    );

    // 90 degrees around y sends +x to -z; the translation only moves
    // the position.
    let p = scene.positions[0];
    assert_relative_eq!(p[0], 0.0, epsilon = 1e-6);
    assert_relative_eq!(p[1], 0.0, epsilon = 1e-6);
    assert_relative_eq!(p[2], 4.0, epsilon = 1e-6);

    let n = scene.normals[0];
    assert_relative_eq!(n[0], 0.0, epsilon = 1e-6);
    assert_relative_eq!(n[1], 0.0, epsilon = 1e-6);
    assert_relative_eq!(n[2], -1.0, epsilon = 1e-6);
}

#[test]
fn should_derive_bitangent_from_gltf_tangent_w() {
    let mut scene = FlatScene::new();
    scene.append_raw(
        &[[0.0, 0.0, 0.0]],
        Some(&[[0.0, 0.0, 1.0]]),
        Some(&[[0.0, 0.0]]),
        Some(&[[1.0, 0.0, 0.0, -1.0]]),
        DEFAULT_ALBEDO,
        &[0],
        cgmath::Matrix4::identity(),
    );

    // bitangent = cross(n, t) * w = (0,1,0) * -1
    let b = scene.bitangents[0];
    assert_relative_eq!(b[0], 0.0, epsilon = 1e-6);
    assert_relative_eq!(b[1], -1.0, epsilon = 1e-6);
    assert_relative_eq!(b[2], 0.0, epsilon = 1e-6);
}

#[test]
fn should_compute_tangents_from_uv_layout() {
    let mut scene = FlatScene::new();
    // A quad in the xy plane with uvs aligned to the axes: the tangent
    // must come out along +x and the bitangent along +y (before the
    // handedness flip for wgpu's texture space).
    scene.append_raw(
        &quad_positions(),
        Some(&[[0.0, 0.0, 1.0]; 4]),
        Some(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
        None,
        DEFAULT_ALBEDO,
        &QUAD_INDICES,
        cgmath::Matrix4::identity(),
    );
    assert!(scene.missing_tangents());

    scene.compute_tangents();

    assert!(!scene.missing_tangents());
    for i in 0..scene.vertex_count() {
        let t = scene.tangents[i];
        assert_relative_eq!(t[0], 1.0, epsilon = 1e-5);
        assert_relative_eq!(t[1], 0.0, epsilon = 1e-5);
        assert_relative_eq!(t[2], 0.0, epsilon = 1e-5);
        let b = scene.bitangents[i];
        assert_relative_eq!(b[0], 0.0, epsilon = 1e-5);
        assert_relative_eq!(b[1], -1.0, epsilon = 1e-5);
        assert_relative_eq!(b[2], 0.0, epsilon = 1e-5);
    }
}

#[test]
fn should_interleave_in_vertex_order() {
    let mut scene = FlatScene::new();
    scene.append_raw(
        &quad_positions(),
        Some(&[[0.0, 0.0, 1.0]; 4]),
        Some(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
        None,
        [0.2, 0.4, 0.6, 1.0],
        &QUAD_INDICES,
        cgmath::Matrix4::identity(),
    );

    let vertices = scene.interleaved();
    assert_eq!(vertices.len(), 4);
    for (i, v) in vertices.iter().enumerate() {
        assert_eq!(v.position, scene.positions[i]);
        assert_eq!(v.tex_coords, scene.uvs[i]);
        assert_eq!(v.normal, scene.normals[i]);
        assert_eq!(v.albedo, [0.2, 0.4, 0.6, 1.0]);
    }
}
