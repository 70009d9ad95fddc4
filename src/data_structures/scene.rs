//! Flat scene extraction: parallel vertex attribute arrays plus indices.
//!
//! A [`FlatScene`] is what a glTF node tree collapses into before upload:
//! one growable array per vertex attribute (positions, albedo, normals, uvs,
//! tangents, bitangents) and one index array, all meshes appended back to
//! back. Index `i` into every attribute array refers to the same logical
//! vertex; the arrays always have identical length. That invariant is held
//! structurally: [`FlatScene::append_raw`] is the only way data gets in, and
//! it pushes exactly one element to each array per vertex.
//!
//! Incoming primitive indices are rebased by the vertex count at append time,
//! so the flattened index array stays valid across any number of meshes.

use cgmath::{InnerSpace, Matrix, SquareMatrix, Transform};

use crate::data_structures::model::{self, ModelVertex};

/// Default base color when a primitive has no material: a light grey, so
/// unassigned geometry is visible without blowing out under full lighting.
pub const DEFAULT_ALBEDO: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

#[derive(Debug, Default, Clone)]
pub struct FlatScene {
    pub positions: Vec<[f32; 3]>,
    pub albedo: Vec<[f32; 4]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub tangents: Vec<[f32; 3]>,
    pub bitangents: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl FlatScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Appends one primitive worth of vertex data.
    ///
    /// * `positions` defines the vertex count of the primitive; `normals`,
    ///   `uvs` and `tangents` are zero-filled when absent or shorter.
    /// * glTF tangents are vec4 with the bitangent handedness in `w`;
    ///   the bitangent is `cross(normal, tangent.xyz) * w`.
    /// * `base_color` is stamped onto every vertex of the primitive.
    /// * `indices` are rebased by the current vertex count.
    /// * `world` is applied to positions; its inverse-transpose rotates
    ///   normals and tangents.
    pub fn append_raw(
        &mut self,
        positions: &[[f32; 3]],
        normals: Option<&[[f32; 3]]>,
        uvs: Option<&[[f32; 2]]>,
        tangents: Option<&[[f32; 4]]>,
        base_color: [f32; 4],
        indices: &[u32],
        world: cgmath::Matrix4<f32>,
    ) {
        let vertex_offset = self.vertex_count() as u32;

        let normal_matrix = normal_matrix(world);

        for (i, position) in positions.iter().enumerate() {
            let p = world.transform_point(cgmath::Point3::from(*position));
            self.positions.push(p.into());
            self.albedo.push(base_color);

            let normal: cgmath::Vector3<f32> = normals
                .and_then(|ns| ns.get(i))
                .copied()
                .unwrap_or([0.0; 3])
                .into();
            let normal = normal_matrix * normal;
            let normal = if normal.magnitude2() > 0.0 {
                normal.normalize()
            } else {
                normal
            };
            self.normals.push(normal.into());

            self.uvs
                .push(uvs.and_then(|ts| ts.get(i)).copied().unwrap_or([0.0; 2]));

            match tangents.and_then(|ts| ts.get(i)) {
                Some(&[tx, ty, tz, w]) => {
                    let tangent = (normal_matrix * cgmath::Vector3::new(tx, ty, tz)).normalize();
                    let bitangent = normal.cross(tangent) * w;
                    self.tangents.push(tangent.into());
                    self.bitangents.push(bitangent.into());
                }
                None => {
                    self.tangents.push([0.0; 3]);
                    self.bitangents.push([0.0; 3]);
                }
            }
        }

        self.indices
            .extend(indices.iter().map(|i| i + vertex_offset));
    }

    /// Derives per-vertex tangents/bitangents from triangle UV deltas,
    /// averaged over all incident triangles. Used when the source asset
    /// carries uvs but no tangent attribute.
    pub fn compute_tangents(&mut self) {
        let mut tangents = vec![cgmath::Vector3::new(0.0f32, 0.0, 0.0); self.vertex_count()];
        let mut bitangents = vec![cgmath::Vector3::new(0.0f32, 0.0, 0.0); self.vertex_count()];
        let mut triangles_included = vec![0u32; self.vertex_count()];

        for c in self.indices.chunks(3) {
            if c.len() < 3 {
                break;
            }
            let (i0, i1, i2) = (c[0] as usize, c[1] as usize, c[2] as usize);

            let pos0: cgmath::Vector3<f32> = self.positions[i0].into();
            let pos1: cgmath::Vector3<f32> = self.positions[i1].into();
            let pos2: cgmath::Vector3<f32> = self.positions[i2].into();

            let uv0: cgmath::Vector2<f32> = self.uvs[i0].into();
            let uv1: cgmath::Vector2<f32> = self.uvs[i1].into();
            let uv2: cgmath::Vector2<f32> = self.uvs[i2].into();

            let delta_pos1 = pos1 - pos0;
            let delta_pos2 = pos2 - pos0;
            let delta_uv1 = uv1 - uv0;
            let delta_uv2 = uv2 - uv0;

            // Solving delta_pos = delta_uv.x * T + delta_uv.y * B for both
            // edges gives the tangent frame of the triangle.
            let det = delta_uv1.x * delta_uv2.y - delta_uv1.y * delta_uv2.x;
            if det.abs() <= f32::EPSILON {
                // Degenerate UV mapping, nothing to derive from this triangle.
                continue;
            }
            let r = 1.0 / det;
            let tangent = (delta_pos1 * delta_uv2.y - delta_pos2 * delta_uv1.y) * r;
            // The bitangent is flipped for right-handed normal maps in the
            // wgpu texture coordinate system.
            let bitangent = (delta_pos2 * delta_uv1.x - delta_pos1 * delta_uv2.x) * -r;

            for &i in &[i0, i1, i2] {
                tangents[i] += tangent;
                bitangents[i] += bitangent;
                triangles_included[i] += 1;
            }
        }

        for (i, n) in triangles_included.into_iter().enumerate() {
            if n == 0 {
                continue;
            }
            let denom = 1.0 / n as f32;
            self.tangents[i] = (tangents[i] * denom).into();
            self.bitangents[i] = (bitangents[i] * denom).into();
        }
    }

    /// True when no appended primitive carried a tangent attribute.
    pub fn missing_tangents(&self) -> bool {
        self.tangents
            .iter()
            .all(|t| *t == [0.0, 0.0, 0.0])
    }

    /// Zips the parallel arrays back into interleaved vertices for upload.
    pub fn interleaved(&self) -> Vec<ModelVertex> {
        (0..self.vertex_count())
            .map(|i| ModelVertex {
                position: self.positions[i],
                tex_coords: self.uvs[i],
                normal: self.normals[i],
                albedo: self.albedo[i],
                tangent: self.tangents[i],
                bitangent: self.bitangents[i],
            })
            .collect()
    }

    pub fn into_mesh(&self, device: &wgpu::Device, label: &str) -> model::Mesh {
        model::mk_mesh(device, label, &self.interleaved(), &self.indices)
    }
}

/// Rotation part for normals: inverse-transpose of the upper 3x3 of `world`.
/// Falls back to the plain upper 3x3 when the matrix is singular.
fn normal_matrix(world: cgmath::Matrix4<f32>) -> cgmath::Matrix3<f32> {
    let linear = cgmath::Matrix3::new(
        world.x.x, world.x.y, world.x.z,
        world.y.x, world.y.y, world.y.z,
        world.z.x, world.z.y, world.z.z,
    );
    linear
        .invert()
        .map(|inv| inv.transpose())
        .unwrap_or(linear)
}
