use head_core::{SceneConfig, TriMesh, ViewerState};
use std::rc::Rc;

/// Everything the event handlers and the frame loop share.
pub struct App {
    pub state: ViewerState,
    /// Filled in once the model asset has loaded.
    pub mesh: Option<Rc<TriMesh>>,
}

impl App {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            state: ViewerState::new(config),
            mesh: None,
        }
    }
}
