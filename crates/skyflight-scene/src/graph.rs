//! The live scene: lights, floor and whichever models have finished loading.

use std::sync::Arc;

use glam::DVec3;
use tracing::{info, warn};

use crate::error::SceneError;
use crate::manifest::{AmbientLight, Floor, SceneManifest, SunLight};
use crate::streaming::{AssetKind, AssetStreamer, LoadRequest, LoadResult};

/// A model that has arrived from disk.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub name: String,
    pub position: DVec3,
    pub scale: f64,
    /// Raw file contents, handed to the renderer untouched.
    pub data: Arc<[u8]>,
}

/// Everything currently drawable.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    pub objects: Vec<SceneObject>,
    pub floor: Floor,
    /// Raw floor texture bytes once loaded.
    pub floor_texture: Option<Arc<[u8]>>,
    pub ambient_light: AmbientLight,
    pub sun_light: SunLight,
}

impl SceneGraph {
    /// A graph with lights and floor but no loaded assets.
    #[must_use]
    pub fn new(manifest: &SceneManifest) -> Self {
        Self {
            objects: Vec::new(),
            floor: manifest.floor.clone(),
            floor_texture: None,
            ambient_light: manifest.ambient_light,
            sun_light: manifest.sun_light,
        }
    }
}

/// Scene manifest, streamer and graph together.
pub struct Scene {
    manifest: SceneManifest,
    graph: SceneGraph,
    streamer: Option<AssetStreamer>,
    pending: usize,
    failed: usize,
}

impl Scene {
    /// Start streaming every asset named in `manifest`.
    ///
    /// # Errors
    /// Returns [`SceneError::AssetRootMissing`] if the asset root is not a
    /// directory, or [`SceneError::WorkerSpawn`] if no loader can be started.
    pub fn load(manifest: SceneManifest, loader_threads: usize) -> Result<Self, SceneError> {
        if !manifest.asset_root.is_dir() {
            return Err(SceneError::AssetRootMissing(manifest.asset_root.clone()));
        }
        let streamer = AssetStreamer::new(loader_threads, manifest.asset_count())?;

        let requests = manifest
            .models
            .iter()
            .enumerate()
            .map(|(index, model)| LoadRequest {
                kind: AssetKind::Model(index),
                path: manifest.resolve(&model.path),
            })
            .chain(std::iter::once(LoadRequest {
                kind: AssetKind::FloorTexture,
                path: manifest.resolve(&manifest.floor.texture),
            }));

        let mut pending = 0;
        for request in requests {
            let path = request.path.clone();
            if streamer.submit(request) {
                pending += 1;
            } else {
                warn!(path = %path.display(), "asset request rejected");
            }
        }
        info!(
            root = %manifest.asset_root.display(),
            assets = pending,
            "streaming scene assets"
        );

        Ok(Self {
            graph: SceneGraph::new(&manifest),
            manifest,
            streamer: Some(streamer),
            pending,
            failed: 0,
        })
    }

    /// A scene that never loads anything, for when streaming cannot start.
    #[must_use]
    pub fn empty(manifest: SceneManifest) -> Self {
        Self {
            graph: SceneGraph::new(&manifest),
            manifest,
            streamer: None,
            pending: 0,
            failed: 0,
        }
    }

    /// Move finished loads into the graph. Returns how many assets arrived.
    pub fn poll(&mut self) -> usize {
        let Some(streamer) = &self.streamer else {
            return 0;
        };
        let results = streamer.drain_results();
        let mut arrived = 0;
        for result in results {
            self.pending = self.pending.saturating_sub(1);
            if self.apply(result) {
                arrived += 1;
            }
        }
        if self.pending == 0 {
            info!(
                objects = self.graph.objects.len(),
                failed = self.failed,
                "scene streaming finished"
            );
            self.streamer = None;
        }
        arrived
    }

    fn apply(&mut self, result: LoadResult) -> bool {
        let data = match result.bytes {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "skipping asset");
                self.failed += 1;
                return false;
            }
        };
        match result.kind {
            AssetKind::Model(index) => {
                let Some(model) = self.manifest.models.get(index) else {
                    warn!(index, "load result for unknown model");
                    return false;
                };
                info!(name = %model.name, bytes = data.len(), "model loaded");
                self.graph.objects.push(SceneObject {
                    name: model.name.clone(),
                    position: model.position,
                    scale: model.scale,
                    data,
                });
            }
            AssetKind::FloorTexture => {
                info!(bytes = data.len(), "floor texture loaded");
                self.graph.floor_texture = Some(data);
            }
        }
        true
    }

    #[must_use]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    #[must_use]
    pub fn manifest(&self) -> &SceneManifest {
        &self.manifest
    }

    /// `true` while loads are outstanding.
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.streamer.is_some()
    }

    /// Loads not yet drained.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Loads that failed and were skipped.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }
}
