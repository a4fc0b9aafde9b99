use crate::graph::{GraphMode, LinkGraph};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use wikigraph_dataset::{Dataset, Fingerprint};

/// Memoized graph builds keyed by dataset content and mode.
///
/// Built graphs are handed out as shared snapshots, so any number of readers
/// can filter and search the same graph while others hit the cache.
#[derive(Default)]
pub struct GraphCache {
    entries: Mutex<HashMap<(Fingerprint, GraphMode), Arc<LinkGraph>>>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, fingerprint: Fingerprint, mode: GraphMode) -> Option<Arc<LinkGraph>> {
        self.lock().get(&(fingerprint, mode)).cloned()
    }

    pub fn get_or_build(&self, dataset: &Dataset, mode: GraphMode) -> Arc<LinkGraph> {
        self.get_or_build_with(dataset, mode, |dataset, mode| LinkGraph::build(dataset, mode))
    }

    /// Like [`get_or_build`](Self::get_or_build) with a custom builder, used
    /// to report build progress on a miss.
    pub fn get_or_build_with<F>(&self, dataset: &Dataset, mode: GraphMode, build: F) -> Arc<LinkGraph>
    where
        F: FnOnce(&Dataset, GraphMode) -> LinkGraph,
    {
        let key = (dataset.fingerprint, mode);
        if let Some(graph) = self.lock().get(&key) {
            debug!("Graph cache hit for {} ({})", dataset.fingerprint.short(), mode.as_str());
            return graph.clone();
        }

        debug!("Graph cache miss for {} ({})", dataset.fingerprint.short(), mode.as_str());
        // built outside the lock; a racing builder of the same key just loses
        let graph = Arc::new(build(dataset, mode));
        self.lock().entry(key).or_insert(graph).clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(Fingerprint, GraphMode), Arc<LinkGraph>>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
