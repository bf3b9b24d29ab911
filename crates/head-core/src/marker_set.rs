use crate::constants::DEFAULT_STANDOFF;
use crate::marker::{HoverTransition, Marker, MarkerRecord};
use crate::ray::Ray;
use glam::Vec3;
use smallvec::SmallVec;

pub type HoverChanges = SmallVec<[(usize, HoverTransition); 4]>;

/// Ordered batch of markers sharing one stand-off distance. Markers are
/// hover-tested independently; order only decides draw order and which link
/// wins if two labels overlap under the pointer.
#[derive(Clone, Debug)]
pub struct MarkerSet {
    standoff: f32,
    markers: Vec<Marker>,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::new(default_portrait_records(), DEFAULT_STANDOFF)
    }
}

impl MarkerSet {
    pub fn new(records: Vec<MarkerRecord>, standoff: f32) -> Self {
        let standoff = standoff.max(0.0);
        Self {
            standoff,
            markers: records
                .into_iter()
                .map(|r| Marker::new(r, standoff))
                .collect(),
        }
    }

    #[inline]
    pub fn standoff(&self) -> f32 {
        self.standoff
    }

    pub fn set_standoff(&mut self, standoff: f32) {
        self.standoff = standoff.max(0.0);
        for m in &mut self.markers {
            m.set_standoff(self.standoff);
        }
    }

    /// Size each label's hit rectangle from `measure`, which returns the
    /// drawn width of a label's text in world units.
    pub fn fit_label_widths(&mut self, mut measure: impl FnMut(&str) -> Option<f32>) {
        for m in &mut self.markers {
            if let Some(w) = measure(&m.record.label) {
                m.set_label_width(w);
            }
        }
    }

    #[inline]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Per-frame hover pass. Returns only the markers whose state flipped.
    pub fn update_hover(&mut self, ray: Option<&Ray>) -> HoverChanges {
        self.markers
            .iter_mut()
            .enumerate()
            .filter_map(|(i, m)| m.update_hover(ray).map(|t| (i, t)))
            .collect()
    }

    pub fn any_hovered(&self) -> bool {
        self.markers.iter().any(Marker::is_hovered)
    }

    /// True when a hovered label would open something on click.
    pub fn any_link_hovered(&self) -> bool {
        self.markers
            .iter()
            .any(|m| m.is_hovered() && m.record.link.is_some())
    }

    /// Link of the first hovered marker that has one.
    pub fn click(&self) -> Option<&str> {
        self.markers.iter().find_map(Marker::click)
    }
}

/// The anchors shipped with the portrait, picked by hand on the head mesh.
pub fn default_portrait_records() -> Vec<MarkerRecord> {
    vec![
        MarkerRecord::new(
            "Earlobe",
            Vec3::new(0.164_302_2, 0.031_520_11, 0.025_099_44),
        ),
        MarkerRecord::new("Temple", Vec3::new(0.153_400_33, 0.154_274_68, 0.167_902_1)),
        MarkerRecord::new(
            "Eyeball",
            Vec3::new(0.087_878_25, 0.122_462_1, 0.208_021_65),
        ),
        MarkerRecord::new(
            "Frontal Noggins",
            Vec3::new(0.161_038_68, 0.277_729_84, 0.134_779_28),
        ),
        MarkerRecord::new(
            "Occipital Lobe",
            Vec3::new(0.135_021_3, 0.049_238_63, -0.222_303_18),
        ),
        MarkerRecord::new(
            "Hear Stuff",
            Vec3::new(0.161_841_44, 0.078_774_17, -0.005_378_855),
        ),
    ]
}
