// Host-side tests for marker geometry, hover and click behaviour.

use glam::Vec3;
use head_core::*;

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn label_point_moves_out_along_the_anchor_direction() {
    assert!(close(
        label_point(Vec3::new(1.0, 0.0, 0.0), 0.5),
        Vec3::new(1.5, 0.0, 0.0)
    ));
    assert!(close(
        label_point(Vec3::new(0.0, 3.0, 4.0), 1.0),
        Vec3::new(0.0, 3.6, 4.8)
    ));
}

#[test]
fn zero_standoff_puts_label_on_the_anchor() {
    let anchor = Vec3::new(0.164, 0.031, 0.025);
    assert_eq!(label_point(anchor, 0.0), anchor);
}

#[test]
fn label_distance_from_anchor_equals_standoff() {
    for &(anchor, d) in &[
        (Vec3::new(0.2, -0.1, 0.05), 0.3),
        (Vec3::new(-3.0, 0.5, 7.0), 0.7),
    ] {
        let p = label_point(anchor, d);
        assert!(((p - anchor).length() - d).abs() < 1e-5);
        // Farther from the origin, on the same ray.
        assert!(p.length() > anchor.length());
        assert!(p.normalize().dot(anchor.normalize()) > 0.9999);
    }
}

#[test]
fn anchor_at_origin_falls_back_to_up() {
    let geom = MarkerGeometry::new(Vec3::ZERO, 0.3, "Origin", LABEL_FONT_SIZE);
    assert_eq!(geom.direction, Vec3::from(FALLBACK_DIRECTION));
    assert!(close(geom.label_point, Vec3::new(0.0, 0.3, 0.0)));
}

#[test]
fn spoke_runs_from_anchor_to_label() {
    let m = Marker::new(MarkerRecord::new("Temple", Vec3::new(0.0, 0.5, 0.0)), 0.25);
    let (a, b) = m.geometry.spoke();
    assert_eq!(a, Vec3::new(0.0, 0.5, 0.0));
    assert!(close(b, Vec3::new(0.0, 0.75, 0.0)));
}

// A ray straight through the middle of the marker's label quad.
fn ray_through_label(m: &Marker) -> Ray {
    let q = &m.geometry.label;
    let mid = q.origin + q.right * (q.width * 0.5);
    Ray::new(mid + q.normal(), -q.normal())
}

#[test]
fn hover_is_recomputed_every_update() {
    let mut m = Marker::new(
        MarkerRecord::new("Earlobe", Vec3::new(0.0, 0.0, 0.1)).with_link("https://example.com/ear"),
        0.3,
    );
    let ray = ray_through_label(&m);
    assert_eq!(m.update_hover(Some(&ray)), Some(HoverTransition::Entered));
    assert_eq!(m.update_hover(Some(&ray)), None);
    assert!(m.is_hovered());
    assert_eq!(m.click(), Some("https://example.com/ear"));
    assert_eq!(m.label_color(), LABEL_HOVER_COLOR);

    assert_eq!(m.update_hover(None), Some(HoverTransition::Left));
    assert!(!m.is_hovered());
    assert_eq!(m.click(), None);
    assert_eq!(m.label_color(), LABEL_COLOR);
}

#[test]
fn ray_missing_the_label_does_not_hover() {
    let mut m = Marker::new(MarkerRecord::new("Eyeball", Vec3::new(0.0, 0.0, 0.1)), 0.3);
    let miss = Ray::new(Vec3::new(5.0, 5.0, 5.0), Vec3::Z);
    assert_eq!(m.update_hover(Some(&miss)), None);
    assert!(!m.is_hovered());
}

#[test]
fn label_without_link_never_opens_or_highlights() {
    let mut m = Marker::new(MarkerRecord::new("Hear Stuff", Vec3::new(0.0, 0.0, 0.1)), 0.3);
    let ray = ray_through_label(&m);
    m.update_hover(Some(&ray));
    assert!(m.is_hovered());
    assert_eq!(m.click(), None);
    assert_eq!(m.label_color(), LABEL_COLOR);
}

#[test]
fn marker_set_click_picks_first_hovered_link() {
    let records = vec![
        MarkerRecord::new("Plain", Vec3::new(0.0, 0.0, 0.1)),
        MarkerRecord::new("Linked", Vec3::new(0.0, 0.0, 0.1)).with_link("https://example.com/a"),
    ];
    let mut set = MarkerSet::new(records, 0.3);
    let ray = ray_through_label(&set.markers()[0]);
    let changes = set.update_hover(Some(&ray));
    assert_eq!(changes.len(), 2);
    assert!(set.any_hovered());
    assert!(set.any_link_hovered());
    assert_eq!(set.click(), Some("https://example.com/a"));
}

#[test]
fn negative_standoff_is_clamped() {
    let set = MarkerSet::new(vec![MarkerRecord::new("X", Vec3::X)], -1.0);
    assert_eq!(set.standoff(), 0.0);
    assert_eq!(set.markers()[0].geometry.label_point, Vec3::X);
}

#[test]
fn default_set_has_six_unlinked_markers() {
    let set = MarkerSet::default();
    assert_eq!(set.len(), 6);
    assert!(set.markers().iter().all(|m| m.record.link.is_none()));
    assert_eq!(set.standoff(), DEFAULT_STANDOFF);
}

#[test]
fn draw_list_has_one_spoke_and_sphere_per_marker() {
    let set = MarkerSet::default();
    let mut draw = DrawList::default();
    draw.build(&set, &TransientMarkers::default());
    assert_eq!(draw.lines.len(), 2 * set.len());
    assert_eq!(draw.triangles.len(), set.len() * draw.sphere_vertex_count());
}

#[test]
fn measured_label_width_sizes_the_hover_rectangle() {
    let mut set = MarkerSet::new(
        vec![MarkerRecord::new("Ear", Vec3::new(0.0, 0.0, 0.1)).with_link("https://example.com/ear")],
        0.3,
    );
    let estimated = set.markers()[0].geometry.label.width;
    let drawn = estimated * 3.0;

    // Just past the estimated end of the text, inside the drawn text.
    let ray_past_estimate = |set: &MarkerSet| {
        let q = &set.markers()[0].geometry.label;
        let p = q.origin + q.right * (estimated * 1.5);
        Ray::new(p + q.normal(), -q.normal())
    };
    let ray = ray_past_estimate(&set);
    set.update_hover(Some(&ray));
    assert!(!set.any_hovered());

    set.fit_label_widths(|text| (text == "Ear").then_some(drawn));
    set.update_hover(Some(&ray));
    assert!(set.any_link_hovered());

    // Survives a stand-off change.
    set.set_standoff(0.5);
    assert_eq!(set.markers()[0].geometry.label.width, drawn);
    let ray = ray_past_estimate(&set);
    set.update_hover(Some(&ray));
    assert!(set.any_hovered());
}

#[test]
fn invalid_measured_width_is_ignored() {
    let mut m = Marker::new(MarkerRecord::new("Temple", Vec3::Y), 0.3);
    let before = m.geometry.label.width;
    m.set_label_width(f32::NAN);
    m.set_label_width(-1.0);
    assert_eq!(m.geometry.label.width, before);
}
