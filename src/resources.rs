//! Loading scenes from external files.

use anyhow::Context;
use cgmath::SquareMatrix;

use crate::data_structures::scene::{self, FlatScene};

/// Resolves `file_name` inside the `assets` directory next to the
/// executable (copied there by the build script).
pub fn asset_path(file_name: &str) -> std::path::PathBuf {
    std::path::Path::new("./").join("assets").join(file_name)
}

/// Imports a glTF file from the assets directory and flattens every scene
/// into one [`FlatScene`]. External and data-URI buffers are resolved by the
/// importer. When the asset carries uvs but no tangents, tangents are
/// derived from the triangle uv deltas.
pub async fn load_scene(file_name: &str) -> anyhow::Result<FlatScene> {
    let path = asset_path(file_name);
    let (document, buffers, _images) = gltf::import(&path)
        .with_context(|| format!("importing gltf {}", path.display()))?;
    flatten_document(&document, &buffers)
}

/// Same as [`load_scene`] but for glTF data already in memory. Used by
/// tests and anywhere assets are embedded.
pub fn scene_from_slice(data: &[u8]) -> anyhow::Result<FlatScene> {
    let (document, buffers, _images) = gltf::import_slice(data)?;
    flatten_document(&document, &buffers)
}

fn flatten_document(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
) -> anyhow::Result<FlatScene> {
    let mut scene = FlatScene::new();
    for gltf_scene in document.scenes() {
        for node in gltf_scene.nodes() {
            flatten_node(&node, buffers, cgmath::Matrix4::identity(), &mut scene);
        }
    }
    log::info!(
        "flattened gltf into {} vertices / {} indices",
        scene.vertex_count(),
        scene.index_count()
    );

    if scene.missing_tangents() && scene.uvs.iter().any(|uv| *uv != [0.0, 0.0]) {
        scene.compute_tangents();
    }
    Ok(scene)
}

/// Depth-first traversal accumulating the world transform. Primitives are
/// appended at their world-space position so the flat buffers need no
/// per-node transforms at draw time.
fn flatten_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent: cgmath::Matrix4<f32>,
    scene: &mut FlatScene,
) {
    let local: cgmath::Matrix4<f32> = node.transform().matrix().into();
    let world = parent * local;

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let Some(positions) = reader.read_positions() else {
                log::warn!(
                    "skipping primitive without positions in mesh {:?}",
                    mesh.name()
                );
                continue;
            };
            let positions: Vec<[f32; 3]> = positions.collect();
            let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(|n| n.collect());
            let uvs: Option<Vec<[f32; 2]>> =
                reader.read_tex_coords(0).map(|t| t.into_f32().collect());
            let tangents: Option<Vec<[f32; 4]>> = reader.read_tangents().map(|t| t.collect());

            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                // Non-indexed primitives draw their vertices in order.
                None => (0..positions.len() as u32).collect(),
            };
            // Index values are accessor contents, not validated by the
            // importer against the position count.
            if indices.iter().any(|&i| i as usize >= positions.len()) {
                log::warn!(
                    "skipping primitive with out-of-range indices in mesh {:?}",
                    mesh.name()
                );
                continue;
            }

            let base_color = primitive
                .material()
                .index()
                .map(|_| {
                    primitive
                        .material()
                        .pbr_metallic_roughness()
                        .base_color_factor()
                })
                .unwrap_or(scene::DEFAULT_ALBEDO);

            scene.append_raw(
                &positions,
                normals.as_deref(),
                uvs.as_deref(),
                tangents.as_deref(),
                base_color,
                &indices,
                world,
            );
        }
    }

    for child in node.children() {
        flatten_node(&child, buffers, world, scene);
    }
}
