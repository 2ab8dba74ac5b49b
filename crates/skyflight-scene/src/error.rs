use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating or streaming scene assets.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The configured asset root is not a directory.
    #[error("asset root not found: {}", .0.display())]
    AssetRootMissing(PathBuf),

    /// An asset file could not be read.
    #[error("failed to read asset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A loader thread could not be started.
    #[error("failed to spawn asset loader thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}
