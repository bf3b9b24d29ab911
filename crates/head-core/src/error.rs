use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("glTF parse error: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("asset contains no triangle mesh")]
    NoMesh,
    #[error("mesh primitive {0} has no POSITION attribute")]
    MissingPositions(usize),
    #[error("buffer {0} is not embedded in the binary chunk")]
    ExternalBuffer(usize),
    #[error("invalid scene config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SceneError>;
