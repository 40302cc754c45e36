//! Triple store backends.
//!
//! The explorer never stores or plans queries itself; it hands SPARQL to a
//! [`TripleStore`] and reads back solution rows. Two backends exist:
//!
//! - [`EmbeddedStore`]: an in-process oxigraph store (in memory or on disk)
//! - [`RemoteStore`]: a SPARQL 1.1 Protocol endpoint reached over HTTP

pub mod embedded;
pub mod remote;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use embedded::EmbeddedStore;
pub use remote::RemoteStore;

use crate::error::StoreError;
use crate::model::Value;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// One solution of a SELECT query: variable name → bound term.
///
/// Unbound variables are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    bindings: BTreeMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, var: impl Into<String>, value: Value) {
        self.bindings.insert(var.into(), value);
    }

    pub fn get(&self, var: &str) -> Option<&Value> {
        self.bindings.get(var)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

/// A store that answers SPARQL SELECT queries.
pub trait TripleStore: Send + Sync {
    /// Run a SELECT query and collect every solution.
    ///
    /// Either all rows are returned or an error is; there are no partial results.
    fn select(&self, sparql: &str) -> StoreResult<Vec<Row>>;

    /// Short human-readable name for logs and error messages.
    fn describe(&self) -> String;
}

impl<T: TripleStore + ?Sized> TripleStore for Box<T> {
    fn select(&self, sparql: &str) -> StoreResult<Vec<Row>> {
        (**self).select(sparql)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: TripleStore + ?Sized> TripleStore for Arc<T> {
    fn select(&self, sparql: &str) -> StoreResult<Vec<Row>> {
        (**self).select(sparql)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: TripleStore + ?Sized> TripleStore for &T {
    fn select(&self, sparql: &str) -> StoreResult<Vec<Row>> {
        (**self).select(sparql)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
