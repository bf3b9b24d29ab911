pub mod camera;
pub mod config;
pub mod constants;
pub mod controls;
pub mod draw;
pub mod error;
pub mod marker;
pub mod marker_set;
pub mod mesh;
pub mod picker;
pub mod ray;
pub mod state;

pub static HEAD_WGSL: &str = include_str!("../shaders/head.wgsl");
pub static OVERLAY_WGSL: &str = include_str!("../shaders/overlay.wgsl");

pub use camera::*;
pub use config::*;
pub use constants::*;
pub use controls::*;
pub use draw::*;
pub use error::SceneError;
pub use marker::*;
pub use marker_set::*;
pub use mesh::*;
pub use picker::*;
pub use ray::*;
pub use state::*;
