use crate::scene::NodeId;

/// Problems found while composing a scene from its configuration.
///
/// Runtime interaction never produces these; a bad pointer event or a missing
/// asset degrades to "no hit" instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("unknown layer `{0}`")]
    UnknownLayer(String),
    #[error("layer `{0}` declared twice")]
    DuplicateLayer(String),
    #[error("interactive object `{0}` declared twice")]
    DuplicateObject(String),
    #[error("interactive object `{0}` has no parts")]
    EmptyObject(String),
    #[error("node {node:?} already belongs to `{owner}`")]
    PartOwned { node: NodeId, owner: String },
    #[error("object `{object}` has no part {index}")]
    UnknownPart { object: String, index: usize },
    #[error("unknown assembly `{0}`")]
    UnknownAssembly(String),
    #[error("unknown asset `{0}`")]
    UnknownAsset(String),
    #[error("unknown group `{0}`")]
    UnknownGroup(String),
}
