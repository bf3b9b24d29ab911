//! Annotation markers: a sphere on the head surface, a spoke pointing away
//! from the head centre, and a label at the end of the spoke that can open
//! an external link.

use crate::constants::{
    DEGENERATE_LENGTH_SQ, FALLBACK_DIRECTION, LABEL_ADVANCE, LABEL_COLOR, LABEL_FONT_SIZE,
    LABEL_HOVER_COLOR, LABEL_RIGHT, LABEL_UP,
};
use crate::ray::{ray_plane, Ray};
use glam::Vec3;
use serde::Deserialize;

/// One entry of the hand-authored marker list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MarkerRecord {
    pub label: String,
    #[serde(default)]
    pub link: Option<String>,
    pub anchor: Vec3,
}

impl MarkerRecord {
    pub fn new(label: impl Into<String>, anchor: Vec3) -> Self {
        Self {
            label: label.into(),
            link: None,
            anchor,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Unit direction from the origin through `anchor`. An anchor at the origin
/// has no direction and gets [`FALLBACK_DIRECTION`].
#[inline]
pub fn radial_direction(anchor: Vec3) -> Vec3 {
    if anchor.length_squared() <= DEGENERATE_LENGTH_SQ || !anchor.is_finite() {
        return Vec3::from(FALLBACK_DIRECTION);
    }
    anchor.normalize()
}

/// Where the label sits: `standoff` further out along the radial direction.
#[inline]
pub fn label_point(anchor: Vec3, standoff: f32) -> Vec3 {
    anchor + radial_direction(anchor) * standoff
}

/// Hit rectangle of a label. Text is anchored left/middle at `origin` and
/// laid out in the fixed plane spanned by `right` and `up`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelQuad {
    pub origin: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub width: f32,
    pub height: f32,
}

impl LabelQuad {
    pub fn for_text(origin: Vec3, text: &str, font_size: f32) -> Self {
        let chars = text.chars().count().max(1) as f32;
        Self {
            origin,
            right: Vec3::from(LABEL_RIGHT),
            up: Vec3::from(LABEL_UP),
            width: chars * LABEL_ADVANCE * font_size,
            height: font_size,
        }
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.right.cross(self.up)
    }

    /// Corners counter-clockwise from bottom-left.
    pub fn corners(&self) -> [Vec3; 4] {
        let half_up = self.up * (self.height * 0.5);
        let across = self.right * self.width;
        [
            self.origin - half_up,
            self.origin + across - half_up,
            self.origin + across + half_up,
            self.origin + half_up,
        ]
    }

    /// Distance along the ray when it passes through the rectangle (either
    /// face).
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let t = ray_plane(ray, self.origin, self.normal())?;
        let local = ray.at(t) - self.origin;
        let u = local.dot(self.right);
        let v = local.dot(self.up);
        let half = self.height * 0.5;
        ((0.0..=self.width).contains(&u) && (-half..=half).contains(&v)).then_some(t)
    }
}

/// Points derived from an anchor and a stand-off distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerGeometry {
    pub anchor: Vec3,
    pub direction: Vec3,
    pub label_point: Vec3,
    pub label: LabelQuad,
}

impl MarkerGeometry {
    pub fn new(anchor: Vec3, standoff: f32, text: &str, font_size: f32) -> Self {
        let direction = radial_direction(anchor);
        let label_point = anchor + direction * standoff;
        Self {
            anchor,
            direction,
            label_point,
            label: LabelQuad::for_text(label_point, text, font_size),
        }
    }

    /// Segment drawn from the anchor out to the label.
    #[inline]
    pub fn spoke(&self) -> (Vec3, Vec3) {
        (self.anchor, self.label_point)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTransition {
    Entered,
    Left,
}

#[derive(Clone, Debug)]
pub struct Marker {
    pub record: MarkerRecord,
    pub geometry: MarkerGeometry,
    hovered: bool,
    // Width of the rendered text in world units, once the front-end has measured it.
    measured_width: Option<f32>,
}

impl Marker {
    pub fn new(record: MarkerRecord, standoff: f32) -> Self {
        if record.anchor.length_squared() <= DEGENERATE_LENGTH_SQ {
            log::warn!(
                "[marker] '{}' is anchored at the origin; pointing it along {:?}",
                record.label,
                FALLBACK_DIRECTION
            );
        }
        let geometry = MarkerGeometry::new(record.anchor, standoff, &record.label, LABEL_FONT_SIZE);
        Self {
            record,
            geometry,
            hovered: false,
            measured_width: None,
        }
    }

    pub fn set_standoff(&mut self, standoff: f32) {
        self.geometry =
            MarkerGeometry::new(self.record.anchor, standoff, &self.record.label, LABEL_FONT_SIZE);
        if let Some(w) = self.measured_width {
            self.geometry.label.width = w;
        }
    }

    /// Replace the estimated label width with the width of the text as
    /// actually drawn. Non-finite or negative widths are ignored.
    pub fn set_label_width(&mut self, width: f32) {
        if !width.is_finite() || width < 0.0 {
            return;
        }
        self.measured_width = Some(width);
        self.geometry.label.width = width;
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Re-test the label against this frame's pointer ray. `None` for the
    /// ray means the pointer is not over the canvas.
    pub fn update_hover(&mut self, ray: Option<&Ray>) -> Option<HoverTransition> {
        let now = ray.is_some_and(|r| self.geometry.label.intersect(r).is_some());
        let was = std::mem::replace(&mut self.hovered, now);
        match (was, now) {
            (false, true) => Some(HoverTransition::Entered),
            (true, false) => Some(HoverTransition::Left),
            _ => None,
        }
    }

    /// The link to open for a click, if the label is hovered and has one.
    pub fn click(&self) -> Option<&str> {
        if !self.hovered {
            return None;
        }
        self.record.link.as_deref()
    }

    pub fn label_color(&self) -> [f32; 3] {
        if self.hovered && self.record.link.is_some() {
            LABEL_HOVER_COLOR
        } else {
            LABEL_COLOR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_corners_span_width_and_height() {
        let q = LabelQuad::for_text(Vec3::ZERO, "abcd", 0.1);
        let [bl, br, tr, tl] = q.corners();
        assert!((br.x - bl.x - q.width).abs() < 1e-6);
        assert!((tl.y - bl.y - 0.1).abs() < 1e-6);
        assert_eq!(tr, Vec3::new(q.width, 0.05, 0.0));
    }

    #[test]
    fn quad_hit_from_behind() {
        let q = LabelQuad::for_text(Vec3::ZERO, "abcd", 0.1);
        let ray = Ray::new(Vec3::new(0.05, 0.0, -1.0), Vec3::Z);
        assert!(q.intersect(&ray).is_some());
    }

    #[test]
    fn non_finite_anchor_uses_fallback() {
        let d = radial_direction(Vec3::new(f32::NAN, 0.0, 0.0));
        assert_eq!(d, Vec3::from(FALLBACK_DIRECTION));
    }
}
