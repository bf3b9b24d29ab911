// Shared scene tuning constants. `SceneConfig` defaults are drawn from here.

// Markers
pub const DEFAULT_STANDOFF: f32 = 0.3; // radial label distance for the shipped marker set
pub const PICK_STANDOFF: f32 = 0.7; // stand-off line length drawn by the surface picker
pub const ANCHOR_SPHERE_RADIUS: f32 = 0.004;
pub const ANCHOR_SPHERE_SEGMENTS: u32 = 16;

// Labels are laid out in a fixed plane: text advances along +X, up is +Y.
pub const LABEL_FONT_SIZE: f32 = 0.02; // world units
pub const LABEL_ADVANCE: f32 = 0.6; // average glyph advance as a fraction of font size
pub const LABEL_RIGHT: [f32; 3] = [1.0, 0.0, 0.0];
pub const LABEL_UP: [f32; 3] = [0.0, 1.0, 0.0];

// Used when an anchor sits at the origin and has no radial direction.
pub const FALLBACK_DIRECTION: [f32; 3] = [0.0, 1.0, 0.0];
// Squared length below which an anchor counts as "at the origin".
pub const DEGENERATE_LENGTH_SQ: f32 = 1e-12;

// Colours (linear RGB)
pub const LINE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const SPHERE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const LABEL_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const LABEL_HOVER_COLOR: [f32; 3] = [1.0, 0.55, 0.0];
pub const HEAD_COLOR: [f32; 3] = [0.82, 0.8, 0.78];
pub const HEAD_OPACITY: f32 = 0.65; // translucent so the wireframe ghost shows through
pub const GHOST_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

// The head sits at the origin with no transform, so anchors given in the
// model's local space are also world positions.
pub const GHOST_SCALE: f32 = 0.95; // wireframe copy drawn slightly inside the head

// Camera
pub const CAMERA_EYE: [f32; 3] = [1.0, 0.0, 1.0];
pub const CAMERA_TARGET: [f32; 3] = [0.0, 0.0, 0.0];
pub const CAMERA_FOVY_DEGREES: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.01;
pub const CAMERA_ZFAR: f32 = 100.0;

// Orbit controls
pub const ORBIT_ROTATE_PER_PX: f32 = 0.005; // radians per pixel dragged
pub const ORBIT_PAN_PER_PX: f32 = 0.0015; // world units per pixel, scaled by distance
pub const ORBIT_ZOOM_PER_UNIT: f32 = 0.001; // wheel delta to log-distance
pub const ORBIT_MIN_DISTANCE: f32 = 0.2;
pub const ORBIT_MAX_DISTANCE: f32 = 20.0;
pub const ORBIT_MAX_PITCH: f32 = 1.55; // just short of straight up/down
pub const AUTO_ROTATE_SPEED: f32 = 0.2; // radians per second when enabled
pub const PAN_BUTTON: i16 = 2; // secondary (right) mouse button drags pan

// Picking
pub const PICK_LABEL: &str = "Earlobe"; // placeholder label printed in discovery records
pub const CLICK_SLOP_PX: f32 = 4.0; // drags shorter than this still count as clicks

#[inline]
pub fn head_color_rgba() -> [f32; 4] {
    [HEAD_COLOR[0], HEAD_COLOR[1], HEAD_COLOR[2], HEAD_OPACITY]
}
