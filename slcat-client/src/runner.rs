use tracing::debug;

use crate::cache::ResultCache;
use crate::client::CatalogClient;
use crate::state::{ClientConfig, QueryResult, Target};

/// Resolves a batch of targets against the cache and the network.
///
/// Targets are processed strictly one at a time: a target is not started
/// until the previous one reached its terminal state, so the injected
/// [`ResultCache`] only ever sees a single writer. The full result set is
/// delivered at once — there is no partial delivery, and one target's
/// failure never aborts the rest.
pub struct QueryRunner {
    client: CatalogClient,
    cache: ResultCache,
}

impl QueryRunner {
    /// A runner using `config` for connections and the injected `cache`.
    pub fn new(config: ClientConfig, cache: ResultCache) -> Self {
        Self {
            client: CatalogClient::new(config),
            cache,
        }
    }

    /// Returns the underlying cache.
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Resolve every target, in input order.
    ///
    /// A cache-fresh target is answered from the cache with no network
    /// activity; a miss drives one full handshake and stores its result,
    /// keyed by the target id, before the next target starts.
    pub async fn run(&mut self, targets: &[Target]) -> Vec<QueryResult> {
        let mut results = Vec::with_capacity(targets.len());
        for target in targets {
            if let Some(hit) = self.cache.get(&target.id) {
                debug!(target = %target.id, "cache hit");
                results.push(hit.clone());
                continue;
            }
            let result = self.client.query(target).await;
            self.cache.put(result.clone());
            results.push(result);
        }
        results
    }
}
