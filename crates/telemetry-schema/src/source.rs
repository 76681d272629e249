//! Schema sources and resolved schemas

use std::collections::HashMap;
use telemetry_core::{schema_name, Error, HistogramDefinition, Result, SchemaEntry};

/// Histogram name to schema entry, as declared by one revision
pub type SchemaEntries = HashMap<String, SchemaEntry>;

/// Something that can produce the schema entries of a revision
///
/// Implementations own transport concerns (HTTP, files, retries). Errors are
/// passed through the resolver unchanged.
pub trait SchemaSource: Send + Sync {
    /// Fetch every histogram entry declared at `revision`
    fn fetch(&self, revision: &str) -> anyhow::Result<SchemaEntries>;
}

impl<F> SchemaSource for F
where
    F: Fn(&str) -> anyhow::Result<SchemaEntries> + Send + Sync,
{
    fn fetch(&self, revision: &str) -> anyhow::Result<SchemaEntries> {
        self(revision)
    }
}

/// In-memory source holding pre-loaded revisions
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    revisions: HashMap<String, SchemaEntries>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the entries of a revision
    pub fn with_revision(mut self, revision: impl Into<String>, entries: SchemaEntries) -> Self {
        self.revisions.insert(revision.into(), entries);
        self
    }
}

impl SchemaSource for StaticSource {
    fn fetch(&self, revision: &str) -> anyhow::Result<SchemaEntries> {
        self.revisions
            .get(revision)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("revision {revision} is not available"))
    }
}

/// All histogram entries of one revision
#[derive(Debug, Clone)]
pub struct Schema {
    revision: String,
    entries: SchemaEntries,
}

impl Schema {
    pub fn new(revision: impl Into<String>, entries: SchemaEntries) -> Self {
        Self {
            revision: revision.into(),
            entries,
        }
    }

    /// Revision these entries were resolved from
    pub fn revision(&self) -> &str {
        &self.revision
    }

    /// Raw entry for a histogram, after stripping any `STARTUP_` prefix
    pub fn entry(&self, name: &str) -> Option<&SchemaEntry> {
        self.entries.get(schema_name(name))
    }

    /// Definition of a histogram, after stripping any `STARTUP_` prefix
    ///
    /// Kind and layout are validated here, so a malformed entry only affects
    /// the histograms that use it.
    pub fn definition(&self, name: &str) -> Result<HistogramDefinition> {
        let entry = self.entry(name).ok_or_else(|| Error::UnknownHistogram {
            name: name.to_string(),
            revision: self.revision.clone(),
        })?;
        HistogramDefinition::from_entry(entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
