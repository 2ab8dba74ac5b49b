//! Background asset streaming: reads files on loader threads and hands the
//! raw bytes back over a channel, so disk access never blocks a frame.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::JoinHandle;

use tracing::{debug, trace};

use crate::error::SceneError;

/// What a loaded file is used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Index into [`SceneManifest::models`](crate::SceneManifest::models).
    Model(usize),
    /// The floor texture.
    FloorTexture,
}

/// A file read request for the loader threads.
#[derive(Clone, Debug)]
pub struct LoadRequest {
    pub kind: AssetKind,
    pub path: PathBuf,
}

/// A finished read, successful or not.
#[derive(Debug)]
pub struct LoadResult {
    pub kind: AssetKind,
    pub path: PathBuf,
    pub bytes: Result<Arc<[u8]>, SceneError>,
}

/// Loader thread pool.
///
/// Requests go in through [`submit`](Self::submit); completed reads are
/// collected once per frame with [`drain_results`](Self::drain_results).
pub struct AssetStreamer {
    request_sender: Option<crossbeam_channel::Sender<LoadRequest>>,
    result_receiver: crossbeam_channel::Receiver<LoadResult>,
    worker_handles: Vec<JoinHandle<()>>,
    budget: usize,
    in_flight: Arc<AtomicUsize>,
}

impl AssetStreamer {
    /// Spawn `worker_count` loader threads (at least one) accepting up to
    /// `budget` outstanding requests.
    ///
    /// # Errors
    /// Returns [`SceneError::WorkerSpawn`] if a thread cannot be started.
    pub fn new(worker_count: usize, budget: usize) -> Result<Self, SceneError> {
        let budget = budget.max(1);
        let (request_tx, request_rx) = crossbeam_channel::bounded::<LoadRequest>(budget);
        let (result_tx, result_rx) = crossbeam_channel::unbounded();
        let in_flight = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::with_capacity(worker_count.max(1));
        for index in 0..worker_count.max(1) {
            let rx = request_rx.clone();
            let tx = result_tx.clone();
            let flight = Arc::clone(&in_flight);

            let handle = std::thread::Builder::new()
                .name(format!("asset-loader-{index}"))
                .spawn(move || {
                    while let Ok(request) = rx.recv() {
                        trace!(path = %request.path.display(), "reading asset");
                        let bytes = std::fs::read(&request.path)
                            .map(Arc::from)
                            .map_err(|source| SceneError::Io {
                                path: request.path.clone(),
                                source,
                            });
                        flight.fetch_sub(1, Ordering::Relaxed);
                        let _ = tx.send(LoadResult {
                            kind: request.kind,
                            path: request.path,
                            bytes,
                        });
                    }
                })
                .map_err(SceneError::WorkerSpawn)?;
            handles.push(handle);
        }
        debug!(workers = handles.len(), budget, "asset streamer started");

        Ok(Self {
            request_sender: Some(request_tx),
            result_receiver: result_rx,
            worker_handles: handles,
            budget,
            in_flight,
        })
    }

    /// Queue a read. Returns `false` if the budget is exhausted or the
    /// streamer has been shut down.
    pub fn submit(&self, request: LoadRequest) -> bool {
        let Some(sender) = &self.request_sender else {
            return false;
        };
        if self.in_flight.load(Ordering::Relaxed) >= self.budget {
            return false;
        }
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        if sender.try_send(request).is_err() {
            self.in_flight.fetch_sub(1, Ordering::Relaxed);
            return false;
        }
        true
    }

    /// Collect every read that has finished since the last call.
    pub fn drain_results(&self) -> Vec<LoadResult> {
        let mut results = Vec::new();
        while let Ok(result) = self.result_receiver.try_recv() {
            results.push(result);
        }
        results
    }

    /// Requests queued or being read.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Close the request channel and join the loader threads.
    pub fn shutdown(&mut self) {
        self.request_sender.take();
        for handle in self.worker_handles.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for AssetStreamer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
