//! In-process SPARQL store backed by oxigraph.
//!
//! Holds the component statements either in memory or in an on-disk
//! oxigraph database, and answers SELECT queries directly.

use std::io::Read;
use std::path::{Path, PathBuf};

use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::Term;
use oxigraph::sparql::QueryResults;
use oxigraph::store::{LoaderError, Store};

use crate::error::{LoadError, LoadResult, StoreError};
use crate::model::Value;

use super::{Row, StoreResult, TripleStore};

/// Oxigraph-backed SPARQL store.
#[derive(Clone)]
pub struct EmbeddedStore {
    store: Store,
    path: Option<PathBuf>,
}

impl EmbeddedStore {
    /// Create a new in-memory store (no persistence).
    pub fn in_memory() -> StoreResult<Self> {
        let store = Store::new().map_err(|e| StoreError::Connection {
            store: "in-memory oxigraph".into(),
            message: format!("failed to create oxigraph store: {e}"),
        })?;
        Ok(Self { store, path: None })
    }

    /// Open or create a persistent store at the given directory.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let describe = || format!("oxigraph at {}", path.display());
        std::fs::create_dir_all(path).map_err(|e| StoreError::Connection {
            store: describe(),
            message: format!("failed to create store directory: {e}"),
        })?;
        let store = Store::open(path).map_err(|e| StoreError::Connection {
            store: describe(),
            message: format!("failed to open store: {e}"),
        })?;
        Ok(Self {
            store,
            path: Some(path.to_path_buf()),
        })
    }

    /// Parse Turtle from `reader` and insert every statement into the default graph.
    ///
    /// `origin` names the source in error messages.
    pub fn load_turtle(
        &self,
        reader: impl Read,
        base_iri: Option<&str>,
        origin: &str,
    ) -> LoadResult<()> {
        let mut parser = RdfParser::from_format(RdfFormat::Turtle);
        if let Some(base) = base_iri {
            parser = parser.with_base_iri(base).map_err(|e| LoadError::Malformed {
                origin: origin.to_string(),
                message: format!("invalid base IRI {base}: {e}"),
            })?;
        }

        self.store
            .load_from_reader(parser, reader)
            .map_err(|e| match e {
                LoaderError::Parsing(e) => LoadError::Malformed {
                    origin: origin.to_string(),
                    message: e.to_string(),
                },
                other => LoadError::Storage {
                    origin: origin.to_string(),
                    message: other.to_string(),
                },
            })
    }

    /// Number of statements in the store.
    pub fn len(&self) -> StoreResult<usize> {
        self.store.len().map_err(|e| StoreError::Connection {
            store: self.describe(),
            message: format!("failed to count statements: {e}"),
        })
    }

    /// Whether the store holds no statements.
    pub fn is_empty(&self) -> StoreResult<bool> {
        self.len().map(|n| n == 0)
    }
}

/// Reduce an oxigraph term to its lexical form.
fn term_to_value(term: &Term) -> Value {
    match term {
        Term::NamedNode(node) => Value::Iri(node.as_str().to_string()),
        Term::BlankNode(node) => Value::Blank(node.as_str().to_string()),
        Term::Literal(lit) => Value::Literal(lit.value().to_string()),
        #[allow(unreachable_patterns)]
        other => Value::Literal(other.to_string()),
    }
}

impl TripleStore for EmbeddedStore {
    fn select(&self, sparql: &str) -> StoreResult<Vec<Row>> {
        let results = self.store.query(sparql).map_err(|e| StoreError::Query {
            store: self.describe(),
            message: format!("SPARQL query failed: {e}"),
        })?;

        match results {
            QueryResults::Solutions(solutions) => {
                let mut rows = Vec::new();
                for solution in solutions {
                    let solution = solution.map_err(|e| StoreError::Query {
                        store: self.describe(),
                        message: format!("solution error: {e}"),
                    })?;
                    rows.push(
                        solution
                            .iter()
                            .map(|(var, term)| (var.as_str().to_string(), term_to_value(term)))
                            .collect(),
                    );
                }
                Ok(rows)
            }
            _ => Err(StoreError::Query {
                store: self.describe(),
                message: "expected solutions from a SELECT query".into(),
            }),
        }
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(path) => format!("oxigraph at {}", path.display()),
            None => "in-memory oxigraph".into(),
        }
    }
}

impl std::fmt::Debug for EmbeddedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedStore")
            .field("path", &self.path)
            .finish()
    }
}
