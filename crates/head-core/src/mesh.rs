//! Indexed triangle meshes: binary glTF loading, ray picking and the few
//! derived buffers the renderer needs (normals, wireframe edges).

use crate::error::{Result, SceneError};
use crate::ray::{ray_sphere, ray_triangle, Ray};
use fnv::FnvHashSet;
use glam::{Mat3, Mat4, Vec3};

#[derive(Clone, Debug, Default)]
pub struct TriMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

/// Nearest intersection of a ray with a mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshHit {
    pub t: f32,
    pub point: Vec3,
    pub triangle: usize,
}

impl TriMesh {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let normals = smooth_normals(&positions, &indices);
        Self {
            positions,
            normals,
            indices,
        }
    }

    /// Merge every triangle primitive of the default scene into one mesh,
    /// with node transforms baked in. Only buffers embedded in the GLB binary
    /// chunk are supported.
    pub fn from_glb(bytes: &[u8]) -> Result<Self> {
        let gltf = gltf::Gltf::from_slice(bytes)?;
        for buffer in gltf.buffers() {
            if let gltf::buffer::Source::Uri(_) = buffer.source() {
                return Err(SceneError::ExternalBuffer(buffer.index()));
            }
        }
        let blob = gltf.blob.as_deref();
        let mut out = TriMesh::default();
        let mut primitive_index = 0usize;

        let mut add_mesh = |mesh: gltf::Mesh, transform: Mat4| -> Result<()> {
            for primitive in mesh.primitives() {
                let this_index = primitive_index;
                primitive_index += 1;
                if primitive.mode() != gltf::mesh::Mode::Triangles {
                    log::warn!(
                        "[asset] skipping primitive {} with mode {:?}",
                        this_index,
                        primitive.mode()
                    );
                    continue;
                }
                let reader = primitive.reader(|buffer| match buffer.source() {
                    gltf::buffer::Source::Bin => blob,
                    gltf::buffer::Source::Uri(_) => None,
                });
                let positions: Vec<Vec3> = reader
                    .read_positions()
                    .ok_or(SceneError::MissingPositions(this_index))?
                    .map(Vec3::from)
                    .collect();
                let normals: Option<Vec<Vec3>> = reader
                    .read_normals()
                    .map(|it| it.map(Vec3::from).collect());
                let indices: Vec<u32> = match reader.read_indices() {
                    Some(ix) => ix.into_u32().collect(),
                    None => (0..positions.len() as u32).collect(),
                };
                out.append(&positions, normals.as_deref(), &indices, transform);
            }
            Ok(())
        };

        match gltf.default_scene().or_else(|| gltf.scenes().next()) {
            Some(scene) => {
                let mut stack: Vec<(gltf::Node, Mat4)> =
                    scene.nodes().map(|n| (n, Mat4::IDENTITY)).collect();
                while let Some((node, parent)) = stack.pop() {
                    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
                    let world = parent * local;
                    if let Some(mesh) = node.mesh() {
                        add_mesh(mesh, world)?;
                    }
                    stack.extend(node.children().map(|c| (c, world)));
                }
            }
            None => {
                for mesh in gltf.meshes() {
                    add_mesh(mesh, Mat4::IDENTITY)?;
                }
            }
        }

        if out.indices.is_empty() {
            return Err(SceneError::NoMesh);
        }
        log::info!(
            "[asset] loaded mesh: {} vertices, {} triangles",
            out.positions.len(),
            out.triangle_count()
        );
        Ok(out)
    }

    fn append(
        &mut self,
        positions: &[Vec3],
        normals: Option<&[Vec3]>,
        indices: &[u32],
        transform: Mat4,
    ) {
        let base = self.positions.len() as u32;
        let normal_matrix = Mat3::from_mat4(transform).inverse().transpose();
        let computed;
        let normals = match normals {
            Some(n) if n.len() == positions.len() => n,
            _ => {
                computed = smooth_normals(positions, indices);
                &computed[..]
            }
        };
        self.positions
            .extend(positions.iter().map(|p| transform.transform_point3(*p)));
        self.normals
            .extend(normals.iter().map(|n| (normal_matrix * *n).normalize_or_zero()));
        self.indices.extend(
            indices
                .chunks_exact(3)
                .filter(|t| t.iter().all(|&i| (i as usize) < positions.len()))
                .flatten()
                .map(|i| base + i),
        );
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn triangle(&self, index: usize) -> (Vec3, Vec3, Vec3) {
        let i = index * 3;
        (
            self.positions[self.indices[i] as usize],
            self.positions[self.indices[i + 1] as usize],
            self.positions[self.indices[i + 2] as usize],
        )
    }

    /// Centre and radius of a sphere enclosing every vertex.
    pub fn bounding_sphere(&self) -> (Vec3, f32) {
        if self.positions.is_empty() {
            return (Vec3::ZERO, 0.0);
        }
        let (min, max) = self.positions.iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(lo, hi), p| (lo.min(*p), hi.max(*p)),
        );
        let center = (min + max) * 0.5;
        let radius = self
            .positions
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0f32, f32::max);
        (center, radius)
    }

    /// Nearest hit along the ray, if any.
    pub fn intersect(&self, ray: &Ray) -> Option<MeshHit> {
        let (center, radius) = self.bounding_sphere();
        let inside = ray.origin.distance_squared(center) <= radius * radius;
        if !inside && ray_sphere(ray.origin, ray.dir, center, radius).is_none() {
            return None;
        }
        let mut best: Option<MeshHit> = None;
        for tri in 0..self.triangle_count() {
            let (a, b, c) = self.triangle(tri);
            if let Some(t) = ray_triangle(ray, a, b, c) {
                match best {
                    Some(h) if t >= h.t => {}
                    _ => {
                        best = Some(MeshHit {
                            t,
                            point: ray.at(t),
                            triangle: tri,
                        })
                    }
                }
            }
        }
        best
    }

    /// Unique undirected edges as a line-list index buffer.
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut seen: FnvHashSet<(u32, u32)> = FnvHashSet::default();
        let mut out = Vec::with_capacity(self.indices.len() * 2);
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    out.push(key.0);
                    out.push(key.1);
                }
            }
        }
        out
    }

    /// Latitude/longitude sphere centred on the origin.
    pub fn uv_sphere(radius: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let rings = segments;
        let mut positions = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
        let mut normals = Vec::with_capacity(positions.capacity());
        for r in 0..=rings {
            let theta = std::f32::consts::PI * r as f32 / rings as f32;
            let (st, ct) = theta.sin_cos();
            for s in 0..=segments {
                let phi = std::f32::consts::TAU * s as f32 / segments as f32;
                let (sp, cp) = phi.sin_cos();
                let n = Vec3::new(st * cp, ct, st * sp);
                positions.push(n * radius);
                normals.push(n);
            }
        }
        let stride = segments + 1;
        let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
        for r in 0..rings {
            for s in 0..segments {
                let a = r * stride + s;
                let b = a + stride;
                if r != 0 {
                    indices.extend_from_slice(&[a, a + 1, b]);
                }
                if r != rings - 1 {
                    indices.extend_from_slice(&[a + 1, b + 1, b]);
                }
            }
        }
        Self {
            positions,
            normals,
            indices,
        }
    }
}

fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        if ia >= positions.len() || ib >= positions.len() || ic >= positions.len() {
            continue;
        }
        let n = (positions[ib] - positions[ia]).cross(positions[ic] - positions[ia]);
        normals[ia] += n;
        normals[ib] += n;
        normals[ic] += n;
    }
    normals.iter().map(|n| n.normalize_or_zero()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_deduplicated() {
        // two triangles sharing one edge -> 5 unique edges
        let mesh = TriMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0)],
            vec![0, 1, 2, 1, 3, 2],
        );
        assert_eq!(mesh.edge_indices().len(), 10);
    }

    #[test]
    fn sphere_hit_is_nearest_surface() {
        let sphere = TriMesh::uv_sphere(1.0, 32);
        let ray = Ray::new(Vec3::new(0.02, 0.03, 5.0), Vec3::NEG_Z);
        let hit = sphere.intersect(&ray).expect("hit");
        assert!(hit.point.z > 0.95, "expected front face, got {:?}", hit.point);
    }

    #[test]
    fn normals_follow_winding() {
        let mesh = TriMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2]);
        assert!((mesh.normals[0] - Vec3::Z).length() < 1e-6);
    }
}
