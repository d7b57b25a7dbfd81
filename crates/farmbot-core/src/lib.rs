//! Platform-free core of the FarmBot 3D demo: scene composition, pointer
//! picking and the interaction state that drives visual feedback.

pub mod assembly;
pub mod assets;
pub mod camera;
pub mod compose;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod indicator;
pub mod interaction;
pub mod label;
pub mod layers;
pub mod picking;
pub mod scene;
pub mod viewport;

pub use assembly::*;
pub use assets::*;
pub use camera::*;
pub use compose::compose;
pub use config::*;
pub use constants::*;
pub use context::*;
pub use error::*;
pub use indicator::*;
pub use interaction::*;
pub use label::*;
pub use layers::*;
pub use picking::*;
pub use scene::*;
pub use viewport::*;
