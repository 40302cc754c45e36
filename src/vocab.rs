//! The fixed component vocabulary.
//!
//! Component classes and predicates form a closed set in the
//! `http://example.org/ros-components#` namespace, plus the two RDF/RDFS terms
//! used for typing and labelling.

use serde::{Deserialize, Serialize};

/// Namespace for component classes, predicates and instances.
pub const COMP_NS: &str = "http://example.org/ros-components#";
/// `rdf:` namespace.
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// `rdfs:` namespace.
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
/// `rdfs:label`.
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

/// The known component classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentClass {
    LocalizationNode,
    SensorDriver,
    PathPlanner,
    Controller,
    PerceptionNode,
}

impl ComponentClass {
    pub const ALL: [ComponentClass; 5] = [
        Self::LocalizationNode,
        Self::SensorDriver,
        Self::PathPlanner,
        Self::Controller,
        Self::PerceptionNode,
    ];

    /// Local name inside the component namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LocalizationNode => "LocalizationNode",
            Self::SensorDriver => "SensorDriver",
            Self::PathPlanner => "PathPlanner",
            Self::Controller => "Controller",
            Self::PerceptionNode => "PerceptionNode",
        }
    }

    /// Full class IRI.
    pub fn iri(&self) -> String {
        format!("{COMP_NS}{}", self.as_str())
    }

    /// Recognize a class from its full IRI. Unknown types return `None`.
    pub fn from_iri(iri: &str) -> Option<Self> {
        let local = iri.strip_prefix(COMP_NS)?;
        Self::ALL.into_iter().find(|c| c.as_str() == local)
    }
}

impl std::fmt::Display for ComponentClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a predicate's values fold into a component record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Last value seen wins.
    Single,
    /// Values accumulate into a set.
    Many,
}

/// The predicates the explorer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    Type,
    Label,
    Description,
    HasInput,
    HasOutput,
    UpdateRate,
    Package,
    NodeType,
    SensorType,
    Algorithm,
}

impl Predicate {
    pub const ALL: [Predicate; 10] = [
        Self::Type,
        Self::Label,
        Self::Description,
        Self::HasInput,
        Self::HasOutput,
        Self::UpdateRate,
        Self::Package,
        Self::NodeType,
        Self::SensorType,
        Self::Algorithm,
    ];

    /// Full predicate IRI.
    pub fn iri(&self) -> String {
        match self {
            Self::Type => RDF_TYPE.to_string(),
            Self::Label => RDFS_LABEL.to_string(),
            other => format!("{COMP_NS}{}", other.local_name()),
        }
    }

    /// Short name, also used as the key for open attributes.
    pub fn local_name(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Label => "label",
            Self::Description => "description",
            Self::HasInput => "hasInput",
            Self::HasOutput => "hasOutput",
            Self::UpdateRate => "updateRate",
            Self::Package => "package",
            Self::NodeType => "nodeType",
            Self::SensorType => "sensorType",
            Self::Algorithm => "algorithm",
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        match self {
            Self::HasInput | Self::HasOutput => Cardinality::Many,
            _ => Cardinality::Single,
        }
    }

    /// Recognize a predicate from its full IRI.
    pub fn from_iri(iri: &str) -> Option<Self> {
        match iri {
            RDF_TYPE => Some(Self::Type),
            RDFS_LABEL => Some(Self::Label),
            _ => {
                let local = iri.strip_prefix(COMP_NS)?;
                Self::ALL
                    .into_iter()
                    .filter(|p| !matches!(p, Self::Type | Self::Label))
                    .find(|p| p.local_name() == local)
            }
        }
    }
}

/// The fragment or last path segment of an IRI.
pub fn local_name(iri: &str) -> &str {
    iri.rsplit(['#', '/']).next().unwrap_or(iri)
}

/// Expand a bare local name (`amcl`) or a `comp:` CURIE into a full IRI.
///
/// Anything that already looks like an absolute IRI passes through unchanged.
pub fn expand_id(id: &str) -> String {
    let id = id.trim();
    if let Some(local) = id.strip_prefix("comp:") {
        format!("{COMP_NS}{local}")
    } else if id.contains("://") || id.starts_with("urn:") {
        id.to_string()
    } else {
        format!("{COMP_NS}{id}")
    }
}
