// Host-side tests for the shared viewer state: hover/cursor updates,
// link clicks, drag-vs-click and the surface picker.

use glam::{Vec2, Vec3};
use head_core::*;

const VP: f32 = 100.0;

fn center() -> Vec2 {
    Vec2::splat(VP * 0.5)
}

// A camera looking straight at the middle of one marker's label.
fn facing_label(label: &str, link: Option<&str>) -> ViewerState {
    let mut record = MarkerRecord::new(label, Vec3::new(0.0, 0.0, 0.1));
    if let Some(l) = link {
        record = record.with_link(l);
    }
    let geom = MarkerGeometry::new(record.anchor, 0.3, label, LABEL_FONT_SIZE);
    let mid = geom.label.origin + geom.label.right * (geom.label.width * 0.5);
    let config = SceneConfig {
        markers: vec![record],
        standoff: 0.3,
        camera_eye: mid + Vec3::new(0.0, 0.0, 1.5),
        camera_target: mid,
        ..SceneConfig::default()
    };
    let mut state = ViewerState::new(&config);
    state.set_viewport(VP, VP);
    state
}

// Unit quad in the z = 0 plane, seen head-on from +Z. Offset so the view
// centre is not on the shared diagonal.
fn wall() -> TriMesh {
    TriMesh::new(
        vec![
            Vec3::new(-0.4, -0.45, 0.0),
            Vec3::new(0.6, -0.45, 0.0),
            Vec3::new(0.6, 0.55, 0.0),
            Vec3::new(-0.4, 0.55, 0.0),
        ],
        vec![0, 1, 2, 0, 2, 3],
    )
}

fn picking_state() -> ViewerState {
    let config = SceneConfig {
        markers: Vec::new(),
        camera_eye: Vec3::new(0.0, 0.0, 3.0),
        camera_target: Vec3::ZERO,
        picker_enabled: true,
        ..SceneConfig::default()
    };
    let mut state = ViewerState::new(&config);
    state.set_viewport(VP, VP);
    state
}

#[test]
fn cursor_changes_only_when_link_hover_flips() {
    let mut state = facing_label("Earlobe", Some("https://example.com/ear"));
    state.set_pointer(Some(center()));

    let first = state.tick(0.016);
    assert_eq!(first.hover_changes.len(), 1);
    assert_eq!(first.cursor, Some(CursorStyle::Pointer));

    let second = state.tick(0.016);
    assert!(second.hover_changes.is_empty());
    assert_eq!(second.cursor, None);

    state.set_pointer(None);
    let third = state.tick(0.016);
    assert_eq!(third.hover_changes[0].1, HoverTransition::Left);
    assert_eq!(third.cursor, Some(CursorStyle::Default));
}

#[test]
fn unlinked_label_hovers_without_cursor_change() {
    let mut state = facing_label("Temple", None);
    state.set_pointer(Some(center()));
    let update = state.tick(0.016);
    assert_eq!(update.hover_changes.len(), 1);
    assert_eq!(update.cursor, None);
    assert_eq!(state.click_link(), None);
}

#[test]
fn click_opens_link_only_while_hovered() {
    let mut state = facing_label("Earlobe", Some("https://example.com/ear"));
    assert_eq!(state.click_link(), None);
    state.set_pointer(Some(center()));
    state.tick(0.016);
    assert_eq!(state.click_link().as_deref(), Some("https://example.com/ear"));
    state.set_pointer(Some(Vec2::ZERO));
    state.tick(0.016);
    assert_eq!(state.click_link(), None);
}

#[test]
fn short_press_is_a_click_and_long_drag_is_not() {
    let mut state = ViewerState::default();
    state.set_viewport(VP, VP);
    state.pointer_down(Vec2::new(10.0, 10.0), false);
    state.pointer_move(Vec2::new(11.0, 10.0));
    assert!(state.pointer_up());
    assert!(state.is_click_gesture());

    let eye = state.camera.eye;
    state.pointer_down(Vec2::new(10.0, 10.0), false);
    state.pointer_move(Vec2::new(60.0, 10.0));
    assert!(!state.pointer_up());
    assert!(!state.is_click_gesture());
    assert!((state.camera.eye - eye).length() > 1e-3);
}

#[test]
fn reset_view_restores_home() {
    let mut state = ViewerState::default();
    let eye = state.camera.eye;
    state.pointer_down(Vec2::ZERO, false);
    state.pointer_move(Vec2::new(80.0, 30.0));
    state.pointer_up();
    state.zoom(500.0);
    state.reset_view();
    assert!((state.camera.eye - eye).length() < 1e-4);
}

#[test]
fn pick_hit_logs_numbered_discoveries() {
    let mut state = picking_state();
    let mesh = wall();

    let first = state.pick(&mesh, center()).expect("centre hits the wall");
    assert_eq!(first.index, 1);
    assert!(first.point.length() < 1e-4);
    assert_eq!(first.comment_line(), "// # Point 1");
    assert_eq!(first.label, PICK_LABEL);
    assert!(first.record_line().starts_with("[ \"Earlobe\", "));

    let second = state.pick(&mesh, center() + Vec2::new(5.0, 0.0)).unwrap();
    assert_eq!(second.index, 2);
    assert!(second.point.x > 0.0);
    assert_eq!(state.transient.spheres().len(), 2);

    let (from, to) = state.transient.spoke().unwrap();
    assert_eq!(from, second.point);
    assert!(((to - from).length() - PICK_STANDOFF).abs() < 1e-4);
}

#[test]
fn pick_miss_changes_nothing() {
    let mut state = picking_state();
    let mesh = wall();
    assert!(state.pick(&mesh, Vec2::ZERO).is_none());
    assert!(state.transient.is_empty());
    // Numbering continues from the last real hit.
    let hit = state.pick(&mesh, center()).unwrap();
    assert_eq!(hit.index, 1);
}

#[test]
fn inactive_picker_ignores_clicks() {
    let mut state = picking_state();
    state.set_picker_active(false);
    assert!(state.pick(&wall(), center()).is_none());
    assert!(state.transient.is_empty());
}

#[test]
fn deactivating_picker_clears_feedback() {
    let mut state = picking_state();
    let mesh = wall();
    state.pick(&mesh, center()).unwrap();
    assert!(!state.transient.is_empty());
    state.set_picker_active(false);
    assert!(state.transient.is_empty());
    assert!(!state.picker_active());
}

#[test]
fn clear_picks_keeps_picker_on() {
    let mut state = picking_state();
    state.pick(&wall(), center()).unwrap();
    state.clear_picks();
    assert!(state.transient.is_empty());
    assert!(state.picker_active());
}

#[test]
fn key_bindings() {
    assert_eq!(key_action("p"), Some(KeyAction::TogglePicker));
    assert_eq!(key_action("C"), Some(KeyAction::ClearPicks));
    assert_eq!(key_action("r"), Some(KeyAction::ToggleAutoRotate));
    assert_eq!(key_action("h"), Some(KeyAction::ToggleHint));
    assert_eq!(key_action("Home"), Some(KeyAction::ResetView));
    assert_eq!(key_action("x"), None);
}

#[test]
fn config_overrides_only_named_fields() {
    let cfg = SceneConfig::from_json(
        r#"{
            "standoff": 0.5,
            "markers": [
                { "label": "Nose", "link": "https://example.com/nose", "anchor": [0.0, 0.0, 0.2] }
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.standoff, 0.5);
    assert_eq!(cfg.markers.len(), 1);
    assert_eq!(cfg.markers[0].link.as_deref(), Some("https://example.com/nose"));
    assert_eq!(cfg.camera_eye, Vec3::from(CAMERA_EYE));

    let state = ViewerState::new(&cfg);
    assert!(
        (state.markers.markers()[0].geometry.label_point - Vec3::new(0.0, 0.0, 0.7)).length()
            < 1e-5
    );
}

#[test]
fn malformed_config_is_an_error() {
    assert!(SceneConfig::from_json("{ \"standoff\": \"far\" }").is_err());
}

#[test]
fn negative_picker_standoff_keeps_spoke_on_the_surface() {
    let config = SceneConfig {
        markers: Vec::new(),
        standoff: -0.5,
        camera_eye: Vec3::new(0.0, 0.0, 3.0),
        camera_target: Vec3::ZERO,
        picker_enabled: true,
        picker_standoff: -0.5,
        ..SceneConfig::default()
    };
    let mut state = ViewerState::new(&config);
    state.set_viewport(VP, VP);
    assert_eq!(state.markers.standoff(), 0.0);

    let hit = state.pick(&wall(), center()).unwrap();
    let (from, to) = state.transient.spoke().unwrap();
    assert_eq!(from, hit.point);
    assert_eq!(to, hit.point);
}

#[test]
fn right_or_shift_drag_pans_the_target() {
    assert!(is_pan_drag(PAN_BUTTON, false));
    assert!(is_pan_drag(0, true));
    assert!(!is_pan_drag(0, false));

    let mut state = ViewerState::default();
    state.set_viewport(VP, VP);
    let target = state.camera.target;
    let eye_offset = state.camera.eye - target;
    state.pointer_down(Vec2::new(10.0, 10.0), is_pan_drag(PAN_BUTTON, false));
    state.pointer_move(Vec2::new(60.0, 10.0));
    state.pointer_up();
    assert!((state.camera.target - target).length() > 1e-4);
    // Panning translates; the viewing direction is unchanged.
    assert!((state.camera.eye - state.camera.target - eye_offset).length() < 1e-4);
}
