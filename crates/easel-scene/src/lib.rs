pub mod color;
pub mod document;
pub mod error;
pub mod graph;
pub mod node;

pub use color::Rgba;
pub use document::Document;
pub use error::{Result, SceneError};
pub use graph::SceneGraph;
pub use node::{LayoutMode, NodeId, NodeKind, SceneNode};
