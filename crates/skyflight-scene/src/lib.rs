//! Scene description, background asset streaming and the live scene graph.

mod error;
mod graph;
mod manifest;
mod streaming;

pub use error::SceneError;
pub use graph::{Scene, SceneGraph, SceneObject};
pub use manifest::{AmbientLight, Floor, ModelSpec, SceneManifest, SunLight, rgb_from_hex};
pub use streaming::{AssetKind, AssetStreamer, LoadRequest, LoadResult};
