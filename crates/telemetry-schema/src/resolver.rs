//! Revision-aware schema resolution

use crate::cache::SchemaCache;
use crate::config::ResolverConfig;
use crate::source::{Schema, SchemaSource};
use std::sync::Arc;
use telemetry_core::{HistogramDefinition, Result};
use tracing::{debug, instrument};

/// Resolves histogram names to definitions through a cached schema source
///
/// Schemas are memoized per revision; concurrent lookups of one revision
/// share a single fetch.
pub struct SchemaResolver<S> {
    source: S,
    cache: SchemaCache<String, Schema>,
    config: ResolverConfig,
}

impl<S: SchemaSource> SchemaResolver<S> {
    /// Create a resolver with the default configuration
    pub fn new(source: S) -> Self {
        Self::with_config(source, ResolverConfig::default())
    }

    /// Create a resolver with its own cache built from `config`
    pub fn with_config(source: S, config: ResolverConfig) -> Self {
        let cache = SchemaCache::new(config.cache_policy.clone());
        Self::with_cache(source, config, cache)
    }

    /// Create a resolver around an existing, possibly shared, cache
    ///
    /// The cache's own policy takes precedence over `config.cache_policy`.
    pub fn with_cache(source: S, config: ResolverConfig, cache: SchemaCache<String, Schema>) -> Self {
        Self {
            source,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn cache(&self) -> &SchemaCache<String, Schema> {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Schema of a revision, fetched at most once while cached
    #[instrument(skip(self))]
    pub fn resolve(&self, revision: &str) -> Result<Arc<Schema>> {
        self.cache
            .get_or_try_compute(revision.to_string(), |revision| -> Result<Schema> {
                debug!("Fetching histogram schema");
                let entries = self.source.fetch(revision)?;
                debug!(histograms = entries.len(), "Fetched histogram schema");
                Ok(Schema::new(revision.as_str(), entries))
            })
    }

    /// Definition of a histogram at `revision`, or at the default revision
    ///
    /// A leading `STARTUP_` is stripped from `name` before lookup.
    pub fn definition(&self, name: &str, revision: Option<&str>) -> Result<Arc<HistogramDefinition>> {
        let revision = revision.unwrap_or(&self.config.default_revision);
        let schema = self.resolve(revision)?;
        schema.definition(name).map(Arc::new)
    }
}
