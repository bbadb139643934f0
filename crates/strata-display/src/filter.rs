//! Filters and the registry that builds them by name.
//!
//! A [`Filter`] is one in-place transformation of a [`DisplayBuffer`]. The
//! [`FilterRegistry`] maps a name to a factory closure
//! `(context, parameters) → filter`, so a pipeline can be described as a list
//! of names plus settings. The registry is an ordinary value built once at
//! startup with [`FilterRegistry::with_builtins`], never a global.
//!
//! # Filter context
//!
//! Factories receive a [`FilterContext`] describing the window the filter
//! will render for. Filters that need live window state (the selection
//! highlighter) keep a shared handle from the context and read it on every
//! [`apply`](Filter::apply), not at construction time.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use strata_text::Selection;

use crate::display_buffer::DisplayBuffer;
use crate::error::{Error, Result};
use crate::filters;
use crate::params::FilterParameters;
use crate::syntax::SyntaxTable;

/// One display-buffer transformation.
pub trait Filter {
    /// Unique id of this instance within a pipeline.
    fn id(&self) -> &str;

    /// Refine `display` in place.
    fn apply(&self, display: &mut DisplayBuffer<'_>);
}

/// Selections shared between a window and the filters rendering it.
pub type SharedSelections = Rc<RefCell<Vec<Selection>>>;

/// What a window exposes to filter factories.
#[derive(Clone, Default)]
pub struct FilterContext {
    pub selections: SharedSelections,
}

impl FilterContext {
    #[must_use]
    pub fn new(selections: SharedSelections) -> Self {
        Self { selections }
    }
}

/// Builds a filter instance from a context and its parameters.
pub type FilterFactory = Box<dyn Fn(&FilterContext, &FilterParameters) -> Result<Box<dyn Filter>>>;

/// Name → factory lookup table.
#[derive(Default)]
pub struct FilterRegistry {
    factories: HashMap<String, FilterFactory>,
}

impl FilterRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in filter registered.
    ///
    /// Compiles the C++ pattern table up front so the first render pays no
    /// compilation cost.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Regex`] if a built-in pattern fails to compile.
    pub fn with_builtins() -> Result<Self> {
        let cplusplus = Arc::new(SyntaxTable::cplusplus()?);
        let mut registry = Self::new();
        filters::register_builtins(&mut registry, &cplusplus);
        Ok(registry)
    }

    /// Register `factory` under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&FilterContext, &FilterParameters) -> Result<Box<dyn Filter>> + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Build the filter registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFilter`] for unregistered names, or whatever
    /// the factory reports for bad parameters.
    pub fn create(
        &self,
        name: &str,
        context: &FilterContext,
        params: &FilterParameters,
    ) -> Result<Box<dyn Filter>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| Error::UnknownFilter(name.to_string()))?;
        factory(context, params)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
