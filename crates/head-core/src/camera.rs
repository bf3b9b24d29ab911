//! Perspective camera and orbit controls.
//!
//! The camera is plain data; the orbit controller owns the spherical
//! parameters (yaw, pitch, distance around a target) and writes them back into
//! the camera each frame.

use crate::constants::{
    AUTO_ROTATE_SPEED, CAMERA_EYE, CAMERA_FOVY_DEGREES, CAMERA_TARGET, CAMERA_ZFAR,
    CAMERA_ZNEAR, ORBIT_MAX_DISTANCE, ORBIT_MAX_PITCH, ORBIT_MIN_DISTANCE, ORBIT_PAN_PER_PX,
    ORBIT_ROTATE_PER_PX, ORBIT_ZOOM_PER_UNIT,
};
use crate::ray::{ndc_to_pointer, pointer_to_ndc, Ray, Viewport};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::from(CAMERA_EYE), Vec3::from(CAMERA_TARGET), 1.0)
    }
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, aspect: f32) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray from the eye through a point given in normalized
    /// device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray::new(self.eye, p1 - self.eye)
    }

    pub fn ray_from_pointer(&self, px: Vec2, viewport: Viewport) -> Ray {
        self.ray_from_ndc(pointer_to_ndc(px, viewport))
    }

    /// Project a world point to NDC (z is depth in `[0, 1]`). `None` when the
    /// point is behind the eye.
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    pub fn world_to_pointer(&self, world: Vec3, viewport: Viewport) -> Option<Vec2> {
        self.project(world)
            .map(|ndc| ndc_to_pointer(ndc.truncate(), viewport))
    }

    /// Unit vectors spanning the image plane, in world space.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.eye).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward);
        (right, up)
    }
}

/// Drag-to-rotate, shift-drag-to-pan, wheel-to-zoom around a target point,
/// with optional continuous rotation.
#[derive(Clone, Debug)]
pub struct OrbitController {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::from_eye(Vec3::from(CAMERA_EYE), Vec3::from(CAMERA_TARGET))
    }
}

impl OrbitController {
    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset
            .length()
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        let yaw = offset.x.atan2(offset.z);
        let pitch = if offset.length_squared() > 0.0 {
            (offset.y / offset.length()).clamp(-1.0, 1.0).asin()
        } else {
            0.0
        };
        Self {
            target,
            distance,
            yaw,
            pitch: pitch.clamp(-ORBIT_MAX_PITCH, ORBIT_MAX_PITCH),
            auto_rotate: false,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    pub fn rotate(&mut self, dx_px: f32, dy_px: f32) {
        self.yaw -= dx_px * ORBIT_ROTATE_PER_PX;
        self.pitch = (self.pitch + dy_px * ORBIT_ROTATE_PER_PX)
            .clamp(-ORBIT_MAX_PITCH, ORBIT_MAX_PITCH);
    }

    pub fn pan(&mut self, camera: &Camera, dx_px: f32, dy_px: f32) {
        let (right, up) = camera.basis();
        let scale = self.distance * ORBIT_PAN_PER_PX;
        self.target += (-right * dx_px + up * dy_px) * scale;
    }

    /// Positive `delta` (wheel down) moves away from the target.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (delta * ORBIT_ZOOM_PER_UNIT).exp())
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    pub fn tick(&mut self, dt_sec: f32) {
        if self.auto_rotate {
            self.yaw += self.auto_rotate_speed * dt_sec.max(0.0);
        }
    }

    pub fn apply(&self, camera: &mut Camera) {
        camera.eye = self.eye();
        camera.target = self.target;
    }
}
