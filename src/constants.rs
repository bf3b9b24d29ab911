/// Page wiring and presentation constants for the web front-end.
///
/// Scene tuning (stand-off distances, camera, colours) lives in
/// `head_core::constants`; these are the DOM- and canvas-specific values.
// Element ids expected in index.html
pub const CANVAS_ID: &str = "app-canvas";
pub const LABEL_CANVAS_ID: &str = "label-canvas";
pub const CONFIG_ELEMENT_ID: &str = "scene-config";
pub const HINT_ID: &str = "hint-overlay";
pub const PICKER_BADGE_ID: &str = "picker-badge";

// Cursor styles
pub const CURSOR_POINTER: &str = "pointer";
pub const CURSOR_DEFAULT: &str = "auto";

// Links open in a new browsing context
pub const LINK_TARGET: &str = "_blank";

// Label text is rasterised at this pixel size and scaled onto its world quad.
pub const LABEL_RASTER_PX: f64 = 64.0;
pub const LABEL_FONT_FAMILY: &str = "system-ui, sans-serif";

// Wheel delta normalisation (DOM_DELTA_LINE / DOM_DELTA_PAGE to pixels)
pub const WHEEL_LINE_PX: f32 = 16.0;
pub const WHEEL_PAGE_PX: f32 = 800.0;

// Lighting for the head mesh
pub const LIGHT_DIR: [f32; 3] = [10.0, 10.0, 10.0]; // towards the point light
pub const AMBIENT: f32 = 0.45;
