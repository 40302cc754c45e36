//! SPARQL text for the catalog operations.
//!
//! Every query returns one row per statement (`?s ?p ?o` or `?p ?o`); merging
//! those rows is the job of [`crate::fold`].

use oxigraph::model::NamedNode;

use crate::vocab::{ComponentClass, COMP_NS, RDF_NS, RDFS_NS};

fn prefixes() -> String {
    format!("PREFIX rdf: <{RDF_NS}>\nPREFIX rdfs: <{RDFS_NS}>\nPREFIX comp: <{COMP_NS}>\n")
}

/// `FILTER(?class IN (comp:LocalizationNode, ...))`
fn class_filter(var: &str) -> String {
    let classes = ComponentClass::ALL
        .iter()
        .map(|c| format!("comp:{}", c.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("FILTER(?{var} IN ({classes}))")
}

/// Every statement about every subject typed as a known component class.
pub fn all_component_statements() -> String {
    format!(
        "{}SELECT ?s ?p ?o WHERE {{\n  ?s rdf:type ?class .\n  {}\n  ?s ?p ?o .\n}}",
        prefixes(),
        class_filter("class"),
    )
}

/// Every statement about one subject.
pub fn subject_statements(subject: &NamedNode) -> String {
    // NamedNode's Display writes `<iri>`, already validated.
    format!("SELECT ?p ?o WHERE {{ {subject} ?p ?o }}")
}

/// Number of distinct component subjects, bound to `?count`.
pub fn component_count() -> String {
    format!(
        "{}SELECT (COUNT(DISTINCT ?s) AS ?count) WHERE {{\n  ?s rdf:type ?class .\n  {}\n}}",
        prefixes(),
        class_filter("class"),
    )
}
