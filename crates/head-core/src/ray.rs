//! Rays, viewport coordinates and the primitive intersection tests used by
//! both the surface picker and label hover testing.

use glam::{Vec2, Vec3};

/// Drawable area in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width.max(1.0) / self.height.max(1.0)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Pixel coordinates (origin top-left, Y down) to normalized device
/// coordinates in `[-1, 1]` with Y up.
#[inline]
pub fn pointer_to_ndc(px: Vec2, viewport: Viewport) -> Vec2 {
    let w = viewport.width.max(1.0);
    let h = viewport.height.max(1.0);
    Vec2::new(2.0 * px.x / w - 1.0, 1.0 - 2.0 * px.y / h)
}

/// Inverse of [`pointer_to_ndc`].
#[inline]
pub fn ndc_to_pointer(ndc: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.width,
        (1.0 - ndc.y) * 0.5 * viewport.height,
    )
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Möller–Trumbore, two-sided. Returns the distance along the ray.
#[inline]
pub fn ray_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-8;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.dir.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < EPSILON {
        return None; // parallel
    }
    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = f * ray.dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = f * edge2.dot(q);
    (t > EPSILON).then_some(t)
}

/// Intersect with the plane through `point` with normal `normal`, either side.
#[inline]
pub fn ray_plane(ray: &Ray, point: Vec3, normal: Vec3) -> Option<f32> {
    let denom = ray.dir.dot(normal);
    if denom.abs() < 1e-8 {
        return None;
    }
    let t = (point - ray.origin).dot(normal) / denom;
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_corners() {
        let vp = Viewport::new(200.0, 100.0);
        assert_eq!(pointer_to_ndc(Vec2::new(0.0, 0.0), vp), Vec2::new(-1.0, 1.0));
        assert_eq!(pointer_to_ndc(Vec2::new(200.0, 100.0), vp), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn ndc_round_trip_through_pixels() {
        let vp = Viewport::new(640.0, 480.0);
        let px = Vec2::new(123.0, 321.0);
        let back = ndc_to_pointer(pointer_to_ndc(px, vp), vp);
        assert!((back - px).length() < 1e-3);
    }

    #[test]
    fn triangle_hit_and_miss() {
        let ray = Ray::new(Vec3::new(0.2, 0.2, 5.0), Vec3::NEG_Z);
        let (a, b, c) = (Vec3::ZERO, Vec3::X, Vec3::Y);
        let t = ray_triangle(&ray, a, b, c).expect("hit");
        assert!((t - 5.0).abs() < 1e-5);

        let miss = Ray::new(Vec3::new(2.0, 2.0, 5.0), Vec3::NEG_Z);
        assert!(ray_triangle(&miss, a, b, c).is_none());
    }

    #[test]
    fn triangle_behind_origin_is_ignored() {
        let ray = Ray::new(Vec3::new(0.2, 0.2, 5.0), Vec3::Z);
        assert!(ray_triangle(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    }

    #[test]
    fn plane_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);
        assert!(ray_plane(&ray, Vec3::ZERO, Vec3::Z).is_none());
    }
}
