//! Core data types: RDF terms, triples and the folded component record.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::vocab::ComponentClass;

/// An RDF term as returned by a store, reduced to its lexical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    Iri(String),
    Literal(String),
    Blank(String),
}

impl Value {
    /// IRI string, literal lexical value, or blank node label.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Iri(s) | Self::Literal(s) | Self::Blank(s) => s,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Self::Iri(_))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::Literal(lit) => write!(f, "\"{lit}\""),
            Self::Blank(id) => write!(f, "_:{id}"),
        }
    }
}

/// One (subject, predicate, object) statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Value,
}

impl Triple {
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Value) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }
}

/// A cataloged robotics software component, folded from its statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Subject IRI; the component's identity.
    pub id: String,
    /// Display name (`rdfs:label`).
    pub label: String,
    pub class: ComponentClass,
    pub description: Option<String>,
    /// Consumed message types.
    pub inputs: BTreeSet<String>,
    /// Produced message types.
    pub outputs: BTreeSet<String>,
    /// Kept verbatim, e.g. "10 Hz".
    pub update_rate: Option<String>,
    pub package: Option<String>,
    pub node_type: Option<String>,
    /// Class-specific extras (`sensorType`, `algorithm`) and any predicate
    /// outside the fixed vocabulary, keyed by local name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Component {
    /// Case-insensitive substring match over label, class name and description.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(needle)
            || self.class.as_str().to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}
