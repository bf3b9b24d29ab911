//! CPU-side vertex lists for the marker overlay geometry (spokes and anchor
//! spheres). Rebuilt every frame and uploaded as-is by the renderer.

use crate::constants::{ANCHOR_SPHERE_RADIUS, ANCHOR_SPHERE_SEGMENTS, LINE_COLOR, SPHERE_COLOR};
use crate::marker_set::MarkerSet;
use crate::mesh::TriMesh;
use crate::picker::TransientMarkers;
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

#[derive(Clone, Debug)]
pub struct DrawList {
    /// Line-list vertices, two per segment.
    pub lines: Vec<ColorVertex>,
    /// Triangle-list vertices.
    pub triangles: Vec<ColorVertex>,
    unit_sphere: TriMesh,
}

impl Default for DrawList {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            triangles: Vec::new(),
            unit_sphere: TriMesh::uv_sphere(1.0, ANCHOR_SPHERE_SEGMENTS),
        }
    }
}

impl DrawList {
    pub fn clear(&mut self) {
        self.lines.clear();
        self.triangles.clear();
    }

    pub fn push_line(&mut self, a: Vec3, b: Vec3, color: [f32; 3]) {
        self.lines.push(ColorVertex {
            position: a.to_array(),
            color,
        });
        self.lines.push(ColorVertex {
            position: b.to_array(),
            color,
        });
    }

    pub fn push_sphere(&mut self, center: Vec3, radius: f32, color: [f32; 3]) {
        let sphere = &self.unit_sphere;
        self.triangles.extend(sphere.indices.iter().map(|&i| ColorVertex {
            position: (center + sphere.positions[i as usize] * radius).to_array(),
            color,
        }));
    }

    /// Spokes and anchor spheres for every marker plus the picker's
    /// transient feedback.
    pub fn build(&mut self, markers: &MarkerSet, transient: &TransientMarkers) {
        self.clear();
        for m in markers.markers() {
            let (a, b) = m.geometry.spoke();
            self.push_line(a, b, LINE_COLOR);
            self.push_sphere(a, ANCHOR_SPHERE_RADIUS, SPHERE_COLOR);
        }
        for &p in transient.spheres() {
            self.push_sphere(p, ANCHOR_SPHERE_RADIUS, SPHERE_COLOR);
        }
        if let Some((a, b)) = transient.spoke() {
            self.push_line(a, b, LINE_COLOR);
        }
    }

    #[inline]
    pub fn sphere_vertex_count(&self) -> usize {
        self.unit_sphere.indices.len()
    }
}
