//! Batch secret resolution.
//!
//! Each term is handled independently and in order:
//!
//! 1. `list` mode: list names under the term and move on.
//! 2. `regenerate`: force-generate first.
//! 3. show; if that fails for any reason, generate and show once more.
//!
//! The first error aborts the whole batch. Secrets generated for earlier
//! terms stay in the store.

use serde::Serialize;
use std::collections::HashMap;
use tera::Value;
use tracing::debug;

use crate::error::{LookupError, Result};
use crate::options::LookupOptions;
use crate::platform::CommandRunner;
use crate::store::Gopass;

/// Result for one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    /// A secret value.
    Value(String),
    /// Secret names, in `list` mode.
    List(Vec<String>),
}

impl Resolved {
    /// The lines this result prints as.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Resolved::Value(value) => vec![value.as_str()],
            Resolved::List(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Resolves terms against a [`Gopass`] store.
pub struct SecretResolver<R> {
    store: Gopass<R>,
    defaults: LookupOptions,
}

impl<R: CommandRunner> SecretResolver<R> {
    pub fn new(store: Gopass<R>) -> Self {
        Self {
            store,
            defaults: LookupOptions::default(),
        }
    }

    /// Use `defaults` for keys missing from keyword mappings.
    pub fn with_defaults(mut self, defaults: LookupOptions) -> Self {
        self.defaults = defaults;
        self
    }

    #[cfg(test)]
    pub fn store(&self) -> &Gopass<R> {
        &self.store
    }

    /// Validate `kwargs` once, then resolve every term with the result.
    ///
    /// Invalid options fail the call before any command runs.
    pub fn resolve_kwargs(
        &self,
        terms: &[String],
        kwargs: &HashMap<String, Value>,
    ) -> Result<Vec<Resolved>> {
        let options = self.defaults.merge_kwargs(kwargs)?;
        self.resolve(terms, &options)
    }

    /// Resolve every term with the same options, preserving order.
    pub fn resolve(&self, terms: &[String], options: &LookupOptions) -> Result<Vec<Resolved>> {
        terms
            .iter()
            .map(|term| self.resolve_term(term, options))
            .collect()
    }

    fn resolve_term(&self, term: &str, options: &LookupOptions) -> Result<Resolved> {
        if options.list {
            return self
                .store
                .list(term)
                .map(Resolved::List)
                .map_err(|e| LookupError::List {
                    term: term.to_string(),
                    detail: e.to_string(),
                });
        }

        if options.regenerate {
            self.generate(term, options, true)?;
        }

        match self.store.show(term) {
            Ok(value) => Ok(Resolved::Value(value)),
            Err(e) => {
                // Any failure is treated as a missing secret.
                debug!("Could not show {term} ({e}), generating");
                self.generate(term, options, false)?;
                self.store
                    .show(term)
                    .map(Resolved::Value)
                    .map_err(|e| generation_error(term, e))
            }
        }
    }

    fn generate(&self, term: &str, options: &LookupOptions, force: bool) -> Result<()> {
        self.store
            .generate(term, options.length, options.symbols, force)
            .map_err(|e| generation_error(term, e))?;
        debug!("Generated password for {term}");
        Ok(())
    }
}

fn generation_error(term: &str, e: impl std::fmt::Display) -> LookupError {
    LookupError::Generation {
        term: term.to_string(),
        detail: e.to_string(),
    }
}
