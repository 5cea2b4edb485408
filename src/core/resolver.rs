use crate::core::cache::ServiceCache;
use crate::core::search::{SearchOutcome, ServiceSearch};
use crate::domain::model::{Resolution, ServiceRecord, UnresolvedReason};
use crate::domain::ports::{ServiceMapping, XmlmcTransport};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Resolves source service keys and service names to instance service IDs.
///
/// The cache is consulted first; misses fall back to an exact-match search on
/// the instance. Every failure collapses to an empty ID for callers of the
/// string API, while the `resolution_*` methods keep the reason.
pub struct ServiceResolver<T: XmlmcTransport, M: ServiceMapping> {
    cache: Arc<ServiceCache>,
    search: ServiceSearch<T>,
    mapping: M,
}

impl<T: XmlmcTransport, M: ServiceMapping> ServiceResolver<T, M> {
    pub fn new(transport: T, mapping: M) -> Self {
        Self::with_cache(transport, mapping, Arc::new(ServiceCache::new()))
    }

    pub fn with_cache(transport: T, mapping: M, cache: Arc<ServiceCache>) -> Self {
        Self {
            search: ServiceSearch::new(transport, Arc::clone(&cache)),
            cache,
            mapping,
        }
    }

    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.search = self.search.with_application(application);
        self
    }

    pub fn cache(&self) -> &Arc<ServiceCache> {
        &self.cache
    }

    /// Full cached record for a resolved service.
    pub fn cached_service(&self, service_name: &str) -> Option<ServiceRecord> {
        self.cache.get(service_name)
    }

    pub async fn resolution_for_key(&self, source_key: &str) -> Resolution {
        match self.mapping.target_service(source_key) {
            Some(service_name) if !service_name.is_empty() => {
                self.resolution_for_name(service_name).await
            }
            _ => Resolution::Unresolved(UnresolvedReason::NoMapping),
        }
    }

    pub async fn resolution_for_name(&self, service_name: &str) -> Resolution {
        if service_name.is_empty() {
            return Resolution::Unresolved(UnresolvedReason::EmptyName);
        }

        if let Some(id) = self.cache.lookup(service_name) {
            return Resolution::Resolved(id);
        }

        match self.search.search(service_name).await {
            SearchOutcome::Found(id) => Resolution::Resolved(id.to_string()),
            SearchOutcome::NotFound(reason) => Resolution::Unresolved(reason),
        }
    }

    /// Service ID for a source-system service key, or an empty string.
    pub async fn resolve_by_service_key(&self, source_key: &str) -> String {
        self.resolution_for_key(source_key).await.into_id_string()
    }

    /// Service ID for a service name, or an empty string.
    pub async fn resolve_by_name(&self, service_name: &str) -> String {
        self.resolution_for_name(service_name).await.into_id_string()
    }
}

impl<T, M> ServiceResolver<T, M>
where
    T: XmlmcTransport + 'static,
    M: ServiceMapping + 'static,
{
    /// 以有限並發解析一批 source key，結果順序與輸入相同
    pub async fn resolve_keys(
        self: &Arc<Self>,
        keys: Vec<String>,
        concurrency: usize,
    ) -> Vec<(String, String)> {
        let semaphore = Arc::new(Semaphore::new(concurrency.clamp(1, Semaphore::MAX_PERMITS)));
        let mut join_set = JoinSet::new();
        let total = keys.len();

        for (index, key) in keys.into_iter().enumerate() {
            let resolver = Arc::clone(self);
            let semaphore = Arc::clone(&semaphore);
            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let id = resolver.resolve_by_service_key(&key).await;
                (index, key, id)
            });
        }

        let mut results = Vec::with_capacity(total);
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => tracing::error!("Service resolution task failed: {}", e),
            }
        }

        results.sort_by_key(|(index, _, _)| *index);
        tracing::debug!(
            "Resolved {} of {} service keys",
            results.iter().filter(|(_, _, id)| !id.is_empty()).count(),
            total
        );

        results.into_iter().map(|(_, key, id)| (key, id)).collect()
    }
}
