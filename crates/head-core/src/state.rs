//! Viewer state shared between the event handlers and the frame loop.
//!
//! Platform code feeds pointer positions, clicks and frame deltas in; this
//! type answers with hover changes, the cursor to show, links to open and
//! picker discoveries. Nothing here touches the DOM.

use crate::camera::{Camera, OrbitController};
use crate::config::SceneConfig;
use crate::constants::CLICK_SLOP_PX;
use crate::marker_set::{HoverChanges, MarkerSet};
use crate::mesh::TriMesh;
use crate::picker::{Discovery, SurfacePicker, TransientMarkers};
use crate::ray::{Ray, Viewport};
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorStyle {
    Default,
    Pointer,
}

#[derive(Debug, Default)]
pub struct FrameUpdate {
    pub hover_changes: HoverChanges,
    /// Set only when the cursor should change.
    pub cursor: Option<CursorStyle>,
}

#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub pan: bool,
    pub last: Vec2,
    pub travelled: f32,
}

#[derive(Clone, Debug)]
pub struct ViewerState {
    pub camera: Camera,
    pub orbit: OrbitController,
    pub markers: MarkerSet,
    pub transient: TransientMarkers,
    pub drag: DragState,
    picker: Option<SurfacePicker>,
    picker_settings: SurfacePicker,
    viewport: Viewport,
    pointer: Option<Vec2>,
    discoveries: u32,
    link_cursor: bool,
    home: (Vec3, Vec3),
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}

impl ViewerState {
    pub fn new(config: &SceneConfig) -> Self {
        let mut camera = Camera::new(config.camera_eye, config.camera_target, 1.0);
        camera.fovy_radians = config.fovy_degrees.to_radians();
        let mut orbit = OrbitController::from_eye(config.camera_eye, config.camera_target);
        orbit.auto_rotate = config.auto_rotate;
        orbit.auto_rotate_speed = config.auto_rotate_speed;
        let picker_settings =
            SurfacePicker::new(config.picker_standoff, config.picker_label.clone());
        Self {
            camera,
            orbit,
            markers: MarkerSet::new(config.markers.clone(), config.standoff),
            transient: TransientMarkers::default(),
            drag: DragState::default(),
            picker: config.picker_enabled.then(|| picker_settings.clone()),
            picker_settings,
            viewport: Viewport::new(1.0, 1.0),
            pointer: None,
            discoveries: 0,
            link_cursor: false,
            home: (config.camera_eye, config.camera_target),
        }
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.camera.aspect = self.viewport.aspect();
    }

    #[inline]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// `None` when the pointer has left the canvas.
    pub fn set_pointer(&mut self, px: Option<Vec2>) {
        self.pointer = px;
    }

    pub fn pointer_ray(&self) -> Option<Ray> {
        self.pointer
            .map(|px| self.camera.ray_from_pointer(px, self.viewport))
    }

    /// Advance camera motion and re-run hover testing against the current
    /// pointer ray.
    pub fn tick(&mut self, dt_sec: f32) -> FrameUpdate {
        self.orbit.tick(dt_sec);
        self.orbit.apply(&mut self.camera);
        let ray = self.pointer_ray();
        let hover_changes = self.markers.update_hover(ray.as_ref());
        for (i, t) in &hover_changes {
            log::debug!("[marker] {} {:?}", self.markers.markers()[*i].record.label, t);
        }
        let link_cursor = self.markers.any_link_hovered();
        let cursor = (link_cursor != self.link_cursor).then(|| {
            self.link_cursor = link_cursor;
            if link_cursor {
                CursorStyle::Pointer
            } else {
                CursorStyle::Default
            }
        });
        FrameUpdate {
            hover_changes,
            cursor,
        }
    }

    /// Link to open for a click at the current hover state.
    pub fn click_link(&self) -> Option<String> {
        self.markers.click().map(str::to_owned)
    }

    pub fn pointer_down(&mut self, px: Vec2, pan: bool) {
        self.pointer = Some(px);
        self.drag = DragState {
            active: true,
            pan,
            last: px,
            travelled: 0.0,
        };
    }

    pub fn pointer_move(&mut self, px: Vec2) {
        self.pointer = Some(px);
        if !self.drag.active {
            return;
        }
        let delta = px - self.drag.last;
        self.drag.last = px;
        self.drag.travelled += delta.length();
        if self.drag.pan {
            self.orbit.pan(&self.camera, delta.x, delta.y);
        } else {
            self.orbit.rotate(delta.x, delta.y);
        }
        self.orbit.apply(&mut self.camera);
    }

    /// Ends a drag. True when the pointer barely moved, so the gesture
    /// should be treated as a click.
    pub fn pointer_up(&mut self) -> bool {
        let was_click = !self.drag.active || self.drag.travelled < CLICK_SLOP_PX;
        self.drag.active = false;
        was_click
    }

    /// Whether the most recent press/release should count as a click
    /// rather than an orbit drag.
    #[inline]
    pub fn is_click_gesture(&self) -> bool {
        !self.drag.active && self.drag.travelled < CLICK_SLOP_PX
    }

    pub fn zoom(&mut self, delta: f32) {
        self.orbit.zoom(delta);
        self.orbit.apply(&mut self.camera);
    }

    #[inline]
    pub fn picker_active(&self) -> bool {
        self.picker.is_some()
    }

    pub fn set_picker_active(&mut self, active: bool) {
        if active == self.picker_active() {
            return;
        }
        if active {
            self.picker = Some(self.picker_settings.clone());
        } else {
            self.picker = None;
            self.transient.clear();
        }
        log::info!("[pick] picker {}", if active { "on" } else { "off" });
    }

    /// Pick on the mesh at `px`. Clicks on a clickable label are left to
    /// the label. The returned discovery is numbered from 1.
    pub fn pick(&mut self, mesh: &TriMesh, px: Vec2) -> Option<Discovery> {
        let picker = self.picker.as_ref()?;
        if self.markers.any_link_hovered() {
            return None;
        }
        let picked = picker.pick(&self.camera, mesh, px, self.viewport)?;
        self.discoveries += 1;
        self.transient.add(picked.point, picker.standoff);
        Some(picker.discovery(self.discoveries, &picked))
    }

    pub fn clear_picks(&mut self) {
        self.transient.clear();
    }

    pub fn reset_view(&mut self) {
        let auto_rotate = self.orbit.auto_rotate;
        let speed = self.orbit.auto_rotate_speed;
        self.orbit = OrbitController::from_eye(self.home.0, self.home.1);
        self.orbit.auto_rotate = auto_rotate;
        self.orbit.auto_rotate_speed = speed;
        self.orbit.apply(&mut self.camera);
    }
}
