use crate::constants::{
    AUTO_ROTATE_SPEED, CAMERA_EYE, CAMERA_FOVY_DEGREES, CAMERA_TARGET, DEFAULT_STANDOFF,
    PICK_LABEL, PICK_STANDOFF,
};
use crate::error::Result;
use crate::marker::MarkerRecord;
use crate::marker_set::default_portrait_records;
use glam::Vec3;
use serde::Deserialize;

/// Runtime scene settings. Every field is optional in JSON and falls back to
/// the shipped portrait setup.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub asset_url: String,
    pub standoff: f32,
    pub markers: Vec<MarkerRecord>,
    pub camera_eye: Vec3,
    pub camera_target: Vec3,
    pub fovy_degrees: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    /// Start with the surface picker active.
    pub picker_enabled: bool,
    pub picker_standoff: f32,
    pub picker_label: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            asset_url: "head.glb".to_string(),
            standoff: DEFAULT_STANDOFF,
            markers: default_portrait_records(),
            camera_eye: Vec3::from(CAMERA_EYE),
            camera_target: Vec3::from(CAMERA_TARGET),
            fovy_degrees: CAMERA_FOVY_DEGREES,
            auto_rotate: false,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            picker_enabled: false,
            picker_standoff: PICK_STANDOFF,
            picker_label: PICK_LABEL.to_string(),
        }
    }
}

impl SceneConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SceneConfig::from_json("{}").unwrap(), SceneConfig::default());
    }

    #[test]
    fn markers_override_defaults() {
        let cfg = SceneConfig::from_json(
            r#"{ "standoff": 0.5,
                 "markers": [ { "label": "Work", "link": "https://example.com/work", "anchor": [0.1, 0.2, 0.3] } ] }"#,
        )
        .unwrap();
        assert_eq!(cfg.standoff, 0.5);
        assert_eq!(cfg.markers.len(), 1);
        assert_eq!(cfg.markers[0].link.as_deref(), Some("https://example.com/work"));
        assert_eq!(cfg.markers[0].anchor, Vec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SceneConfig::from_json("{ standoff: }").is_err());
    }
}
