use lumen_ngin::resources::scene_from_slice;

// The Cornell box shipped with the demos: three wall primitives (white,
// red, green) plus two transformed box nodes sharing one cube mesh.
const CORNELL_BOX: &[u8] = include_bytes!("../assets/cornell_box.gltf");

#[test]
fn should_flatten_all_nodes_into_one_scene() {
    let scene = scene_from_slice(CORNELL_BOX).expect("import failed");

    // Walls: 3 white quads + 1 red + 1 green = 20 vertices. Boxes: 24
    // cube vertices in each of the two nodes.
    assert_eq!(scene.vertex_count(), 20 + 2 * 24);
    // 6 indices per quad (5 quads + 6 faces per cube, twice).
    assert_eq!(scene.index_count(), 5 * 6 + 2 * 36);
    assert!(scene.indices.iter().all(|&i| (i as usize) < scene.vertex_count()));
}

#[test]
fn should_stamp_material_base_colors_per_vertex() {
    let scene = scene_from_slice(CORNELL_BOX).expect("import failed");

    let red = [0.65, 0.05, 0.05, 1.0];
    let green = [0.12, 0.45, 0.15, 1.0];
    assert_eq!(scene.albedo.iter().filter(|a| **a == red).count(), 4);
    assert_eq!(scene.albedo.iter().filter(|a| **a == green).count(), 4);
}

#[test]
fn should_apply_node_transforms_to_vertices() {
    let scene = scene_from_slice(CORNELL_BOX).expect("import failed");

    // The interior spans [-2, 2] in x/z and [0, 4] in y; the boxes stay
    // inside it, so world-space bounds equal the wall bounds.
    let max_y = scene.positions.iter().map(|p| p[1]).fold(f32::MIN, f32::max);
    let min_y = scene.positions.iter().map(|p| p[1]).fold(f32::MAX, f32::min);
    assert!((max_y - 4.0).abs() < 1e-5);
    assert!(min_y.abs() < 1e-5);

    // The tall box is scaled to 1.8 units high and sits on the floor, so
    // some vertex must reach that height but no box vertex exceeds it.
    let tall_top = scene
        .positions
        .iter()
        .zip(&scene.albedo)
        .filter(|(p, a)| **a == [0.73, 0.73, 0.73, 1.0] && p[1] < 3.9)
        .map(|(p, _)| p[1])
        .fold(f32::MIN, f32::max);
    assert!((tall_top - 1.8).abs() < 1e-5);
}

#[test]
fn should_reject_invalid_gltf() {
    assert!(scene_from_slice(b"not a gltf document").is_err());
}

// A structurally valid document whose index accessor holds the value 9
// with only 3 vertices. The importer does not check index values, so the
// flattening has to.
const OUT_OF_RANGE_INDICES: &str = r#"{
  "asset": {"version": "2.0"},
  "scene": 0,
  "scenes": [{"nodes": [0]}],
  "nodes": [{"mesh": 0}],
  "meshes": [{"primitives": [{"attributes": {"POSITION": 0, "TEXCOORD_0": 1}, "indices": 2}]}],
  "accessors": [
    {"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3", "min": [0, 0, 0], "max": [1, 1, 0]},
    {"bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC2"},
    {"bufferView": 2, "componentType": 5123, "count": 3, "type": "SCALAR"}
  ],
  "bufferViews": [
    {"buffer": 0, "byteOffset": 0, "byteLength": 36, "target": 34962},
    {"buffer": 0, "byteOffset": 36, "byteLength": 24, "target": 34962},
    {"buffer": 0, "byteOffset": 60, "byteLength": 6, "target": 34963}
  ],
  "buffers": [{"byteLength": 68, "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAAAAAAAAAAAAIA/AAAAAAAAAAAAAIA/AAABAAkAAAA="}]
}"#;

#[test]
fn should_skip_primitives_with_out_of_range_indices() {
    // The primitive carries uvs, so without the range check its bad index
    // would reach tangent generation and panic there.
    let scene = scene_from_slice(OUT_OF_RANGE_INDICES.as_bytes()).expect("import failed");
    assert_eq!(scene.vertex_count(), 0);
    assert_eq!(scene.index_count(), 0);
}
