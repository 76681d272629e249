//! Resolver configuration

use crate::cache::CachePolicy;
use serde::{Deserialize, Serialize};

/// Revision used when a submission does not name one
pub const DEFAULT_REVISION: &str = "https://hg.mozilla.org/mozilla-central/rev/tip";

/// Number of revisions kept by the default cache policy
pub const DEFAULT_CACHE_ENTRIES: usize = 512;

const DEFINITIONS_PATH: &str = "/toolkit/components/telemetry/Histograms.json";

/// Configuration for a `SchemaResolver`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Revision used by lookups that do not specify one
    pub default_revision: String,
    /// Eviction policy of the revision cache
    pub cache_policy: CachePolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_revision: DEFAULT_REVISION.to_string(),
            cache_policy: CachePolicy::Lru {
                max_entries: DEFAULT_CACHE_ENTRIES,
            },
        }
    }
}

impl ResolverConfig {
    pub fn with_default_revision(mut self, revision: impl Into<String>) -> Self {
        self.default_revision = revision.into();
        self
    }

    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }
}

/// Location of the raw histogram schema document for a revision
///
/// Revisions are repository browse URLs (`.../rev/<id>`); the document is
/// served from the matching `raw-file` path.
pub fn definitions_uri(revision: &str) -> String {
    format!("{revision}{DEFINITIONS_PATH}").replacen("/rev/", "/raw-file/", 1)
}
