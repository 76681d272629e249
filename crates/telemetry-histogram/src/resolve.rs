//! Building histograms straight from a schema resolver

use crate::builders::RawHistogram;
use crate::types::HistogramValue;
use telemetry_core::Result;
use telemetry_schema::{SchemaResolver, SchemaSource};

impl HistogramValue {
    /// Resolve the definition of `name` and build the histogram
    ///
    /// `revision` defaults to the resolver's configured revision. A
    /// `STARTUP_` prefix is ignored for the lookup but kept in the name.
    pub fn resolve<S: SchemaSource>(
        name: impl Into<String>,
        raw: RawHistogram,
        resolver: &SchemaResolver<S>,
        revision: Option<&str>,
    ) -> Result<Self> {
        let name = name.into();
        let definition = resolver.definition(&name, revision)?;
        Self::new(name, raw, definition)
    }
}
