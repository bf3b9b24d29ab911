//! Authoring tool: click on the head to find surface coordinates for new
//! markers.
//!
//! A pick is a pure function of the click and the current camera and mesh.
//! Numbering and logging of discoveries is left to the caller, and the
//! temporary spheres/spoke that visualise picks live in [`TransientMarkers`],
//! which the caller owns and clears.

use crate::camera::Camera;
use crate::constants::{PICK_LABEL, PICK_STANDOFF};
use crate::marker::label_point;
use crate::mesh::TriMesh;
use crate::ray::{pointer_to_ndc, Ray, Viewport};
use glam::{Vec2, Vec3};
use std::fmt;

/// Everything resolved while handling one click.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickedPoint {
    pub pointer_px: Vec2,
    pub ndc: Vec2,
    pub ray: Ray,
    pub point: Vec3,
    pub distance: f32,
}

#[derive(Clone, Debug)]
pub struct SurfacePicker {
    pub standoff: f32,
    /// Label written into discovery records, to be edited by hand afterwards.
    pub label: String,
}

impl Default for SurfacePicker {
    fn default() -> Self {
        Self {
            standoff: PICK_STANDOFF,
            label: PICK_LABEL.to_string(),
        }
    }
}

impl SurfacePicker {
    /// Negative stand-offs are clamped to 0 so the spoke never points inward.
    pub fn new(standoff: f32, label: impl Into<String>) -> Self {
        Self {
            standoff: standoff.max(0.0),
            label: label.into(),
        }
    }

    /// Cast from the camera through `pointer_px` against `mesh` only.
    /// A miss is `None`, not an error.
    pub fn pick(
        &self,
        camera: &Camera,
        mesh: &TriMesh,
        pointer_px: Vec2,
        viewport: Viewport,
    ) -> Option<PickedPoint> {
        let ndc = pointer_to_ndc(pointer_px, viewport);
        let ray = camera.ray_from_ndc(ndc);
        let hit = mesh.intersect(&ray)?;
        log::debug!(
            "[pick] ndc=({:.3},{:.3}) t={:.4} tri={}",
            ndc.x,
            ndc.y,
            hit.t,
            hit.triangle
        );
        Some(PickedPoint {
            pointer_px,
            ndc,
            ray,
            point: hit.point,
            distance: hit.t,
        })
    }

    pub fn discovery(&self, index: u32, picked: &PickedPoint) -> Discovery {
        Discovery {
            index,
            label: self.label.clone(),
            point: picked.point,
        }
    }
}

/// A numbered surface point ready to be copied into the marker list.
#[derive(Clone, Debug, PartialEq)]
pub struct Discovery {
    pub index: u32,
    pub label: String,
    pub point: Vec3,
}

impl Discovery {
    pub fn comment_line(&self) -> String {
        format!("// # Point {}", self.index)
    }

    /// `[ "<label>", <x>, <y>, <z> ]`, with quotes and backslashes in the
    /// label escaped so the line pastes back as a literal.
    pub fn record_line(&self) -> String {
        format!(
            "[ {:?}, {}, {}, {} ]",
            self.label, self.point.x, self.point.y, self.point.z
        )
    }
}

impl fmt::Display for Discovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.comment_line())?;
        write!(f, "{}", self.record_line())
    }
}

/// Visual feedback for picks: one sphere per picked point, and a single
/// spoke for the most recent pick.
#[derive(Clone, Debug, Default)]
pub struct TransientMarkers {
    spheres: Vec<Vec3>,
    spoke: Option<(Vec3, Vec3)>,
}

impl TransientMarkers {
    pub fn add(&mut self, point: Vec3, standoff: f32) {
        self.spheres.push(point);
        self.spoke = Some((point, label_point(point, standoff.max(0.0))));
    }

    pub fn clear(&mut self) {
        self.spheres.clear();
        self.spoke = None;
    }

    #[inline]
    pub fn spheres(&self) -> &[Vec3] {
        &self.spheres
    }

    #[inline]
    pub fn spoke(&self) -> Option<(Vec3, Vec3)> {
        self.spoke
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty() && self.spoke.is_none()
    }
}
