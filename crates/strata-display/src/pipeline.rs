//! Filter pipeline — an ordered list of filters applied to each render pass.
//!
//! Order matters: a fragmenting filter (tab expansion, selection highlight)
//! placed before a regex colorizer can split atoms across a would-be match,
//! and the colorizer then drops that match. The pipeline applies filters
//! exactly in the order they were added and leaves ordering policy to its
//! owner.

use tracing::debug;

use crate::display_buffer::DisplayBuffer;
use crate::error::{Error, Result};
use crate::filter::{Filter, FilterContext, FilterRegistry};
use crate::params::FilterParameters;

/// Ordered `(id, filter)` list.
#[derive(Default)]
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateFilter`] if a filter with the same id is
    /// already present.
    pub fn add(&mut self, filter: Box<dyn Filter>) -> Result<()> {
        if self.contains(filter.id()) {
            return Err(Error::DuplicateFilter(filter.id().to_string()));
        }
        debug!(id = filter.id(), position = self.filters.len(), "filter added");
        self.filters.push(filter);
        Ok(())
    }

    /// Build `name` through `registry` and append it.
    ///
    /// # Errors
    ///
    /// Propagates lookup and construction errors, and duplicate ids.
    pub fn add_named(
        &mut self,
        registry: &FilterRegistry,
        name: &str,
        context: &FilterContext,
        params: &FilterParameters,
    ) -> Result<()> {
        let filter = registry.create(name, context, params)?;
        self.add(filter)
    }

    /// Remove the filter with `id`. Returns whether one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f.id() != id);
        self.filters.len() != before
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.filters.iter().any(|f| f.id() == id)
    }

    /// Filter ids in application order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.id()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run every filter in order over `display`.
    pub fn apply(&self, display: &mut DisplayBuffer<'_>) {
        for filter in &self.filters {
            filter.apply(display);
            let atoms = display.len();
            debug!(id = filter.id(), atoms, "filter applied");
            debug_assert!(
                display.is_well_formed(),
                "filter {} broke the atom partition",
                filter.id()
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
