mod classify;

pub mod message;
pub mod patcher;
pub mod props;
pub mod registry;
pub mod render;

pub use message::{BridgeMessage, Tag};
pub use patcher::{PatchError, ScenePatcher, PROVENANCE_MARKER, PROVENANCE_TAG};
pub use props::Props;
pub use registry::{Instance, InstanceRegistry, RawText};
pub use render::{RenderError, Renderers};
