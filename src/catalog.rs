//! The component catalog: list, search and detail lookups over a triple store.
//!
//! Every call re-queries the store and folds the raw rows; the catalog keeps
//! no component state between calls.

use oxigraph::model::NamedNode;

use crate::config::ExplorerConfig;
use crate::error::{CatalogError, CatalogResult, ExplorerResult};
use crate::fold;
use crate::loader;
use crate::model::{Component, Triple, Value};
use crate::query;
use crate::store::{EmbeddedStore, RemoteStore, Row, TripleStore};

/// Read-only view of the components held by a store.
pub struct ComponentCatalog<S> {
    store: S,
}

impl<S: TripleStore> ComponentCatalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every component, one record per subject, sorted by label.
    pub fn list_all(&self) -> CatalogResult<Vec<Component>> {
        let rows = self.store.select(&query::all_component_statements())?;
        let triples = rows
            .iter()
            .map(row_to_triple)
            .collect::<CatalogResult<Vec<_>>>()?;
        let components = fold::fold_triples(&triples);
        tracing::debug!(
            store = %self.store.describe(),
            rows = rows.len(),
            components = components.len(),
            "listed components"
        );
        Ok(components)
    }

    /// Components whose label, class name or description contains `term`,
    /// ignoring case. A blank term matches everything.
    pub fn search(&self, term: &str) -> CatalogResult<Vec<Component>> {
        let all = self.list_all()?;
        if term.trim().is_empty() {
            return Ok(all);
        }
        let needle = term.to_lowercase();
        let hits: Vec<Component> = all.into_iter().filter(|c| c.matches(&needle)).collect();
        tracing::info!(term, hits = hits.len(), "component search");
        Ok(hits)
    }

    /// All statements about one component, folded into its record.
    pub fn get_details(&self, id: &str) -> CatalogResult<Component> {
        let not_found = || CatalogError::NotFound { id: id.to_string() };
        // An invalid IRI cannot name a stored subject.
        let subject = NamedNode::new(id).map_err(|_| not_found())?;

        let rows = self.store.select(&query::subject_statements(&subject))?;
        let statements = rows
            .iter()
            .map(|row| {
                let predicate = binding(row, "p")?;
                let Value::Iri(predicate) = predicate else {
                    return Err(malformed("predicate is not an IRI"));
                };
                Ok((predicate.as_str(), binding(row, "o")?))
            })
            .collect::<CatalogResult<Vec<_>>>()?;

        match fold::fold_subject(id, statements) {
            Some(component) => Ok(component),
            None => {
                tracing::warn!(id, statements = rows.len(), "no component details found");
                Err(not_found())
            }
        }
    }

    /// Number of distinct components, counted by the store.
    pub fn count(&self) -> CatalogResult<usize> {
        let rows = self.store.select(&query::component_count())?;
        let row = rows
            .first()
            .ok_or_else(|| malformed("COUNT query returned no rows"))?;
        let count = binding(row, "count")?;
        count
            .as_str()
            .parse()
            .map_err(|_| malformed(&format!("COUNT is not a number: {count}")))
    }
}

impl ComponentCatalog<Box<dyn TripleStore>> {
    /// Build a catalog from configuration.
    ///
    /// With an `endpoint` the remote store is used as-is. Otherwise the
    /// embedded store is opened and, when empty, loaded from `data_file`.
    pub fn from_config(config: &ExplorerConfig) -> ExplorerResult<Self> {
        if let Some(endpoint) = &config.endpoint {
            tracing::info!(endpoint, "using remote SPARQL endpoint");
            let store = RemoteStore::new(endpoint.clone(), config.timeout());
            return Ok(Self::new(Box::new(store)));
        }

        let store = match &config.store_dir {
            Some(dir) => EmbeddedStore::open(dir)?,
            None => EmbeddedStore::in_memory()?,
        };
        if store.is_empty()? {
            loader::load_file(&store, &config.data_file)?;
        } else {
            tracing::info!(store = %store.describe(), "store already populated, skipping load");
        }
        Ok(Self::new(Box::new(store)))
    }
}

fn malformed(message: &str) -> CatalogError {
    CatalogError::Query {
        message: format!("malformed query response: {message}"),
    }
}

fn binding<'r>(row: &'r Row, var: &str) -> CatalogResult<&'r Value> {
    row.get(var)
        .ok_or_else(|| malformed(&format!("missing ?{var} binding")))
}

fn row_to_triple(row: &Row) -> CatalogResult<Triple> {
    let subject = match binding(row, "s")? {
        Value::Iri(s) | Value::Blank(s) => s.clone(),
        Value::Literal(_) => return Err(malformed("subject is a literal")),
    };
    let Value::Iri(predicate) = binding(row, "p")? else {
        return Err(malformed("predicate is not an IRI"));
    };
    Ok(Triple::new(subject, predicate.clone(), binding(row, "o")?.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::StoreResult;
    use crate::vocab::{COMP_NS, RDF_TYPE, RDFS_LABEL};

    const DOC: &str = r#"
        @prefix comp: <http://example.org/ros-components#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

        comp:amcl a comp:LocalizationNode ;
            rdfs:label "AMCL" ;
            comp:description "Particle filter localization against a laser map." ;
            comp:hasInput "sensor_msgs/LaserScan", "nav_msgs/OccupancyGrid" ;
            comp:hasOutput "geometry_msgs/PoseWithCovarianceStamped" .

        comp:usb_cam a comp:SensorDriver ;
            rdfs:label "USB Camera Driver" ;
            comp:sensorType "Camera" .

        comp:robot rdfs:label "Not a component" .
    "#;

    fn catalog() -> ComponentCatalog<EmbeddedStore> {
        let store = EmbeddedStore::in_memory().unwrap();
        loader::load_str(&store, DOC, None).unwrap();
        ComponentCatalog::new(store)
    }

    #[test]
    fn list_all_folds_rows() {
        let components = catalog().list_all().unwrap();
        assert_eq!(components.len(), 2);
        let amcl = &components[0];
        assert_eq!(amcl.label, "AMCL");
        assert_eq!(amcl.inputs.len(), 2);
        assert_eq!(amcl.outputs.len(), 1);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let catalog = catalog();
        let hits = catalog.search("CAMERA").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label, "USB Camera Driver");

        assert_eq!(catalog.search("sensordriver").unwrap().len(), 1);
        assert!(catalog.search("gripper").unwrap().is_empty());
        assert_eq!(catalog.search("   ").unwrap().len(), 2);
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_term() {
        let catalog = catalog();
        // "USB Camera Driver" has no space before "USB".
        assert!(catalog.search(" usb").unwrap().is_empty());
        assert_eq!(catalog.search("usb").unwrap().len(), 1);
        assert_eq!(catalog.search(" camera ").unwrap().len(), 1);
    }

    #[test]
    fn details_and_not_found() {
        let catalog = catalog();
        let amcl = catalog.get_details(&format!("{COMP_NS}amcl")).unwrap();
        assert_eq!(amcl.label, "AMCL");

        for id in [
            format!("{COMP_NS}unknown"),
            format!("{COMP_NS}robot"),
            "not an iri".to_string(),
        ] {
            let err = catalog.get_details(&id).unwrap_err();
            assert!(matches!(err, CatalogError::NotFound { .. }), "{id}: {err:?}");
        }
    }

    #[test]
    fn count_matches_list() {
        let catalog = catalog();
        assert_eq!(catalog.count().unwrap(), catalog.list_all().unwrap().len());
    }

    /// Store stub that replays canned rows or fails.
    struct FakeStore(StoreResult<Vec<Row>>);

    impl TripleStore for FakeStore {
        fn select(&self, _sparql: &str) -> StoreResult<Vec<Row>> {
            match &self.0 {
                Ok(rows) => Ok(rows.clone()),
                Err(StoreError::Connection { store, message }) => Err(StoreError::Connection {
                    store: store.clone(),
                    message: message.clone(),
                }),
                Err(StoreError::Query { store, message }) => Err(StoreError::Query {
                    store: store.clone(),
                    message: message.clone(),
                }),
            }
        }

        fn describe(&self) -> String {
            "fake".into()
        }
    }

    fn row(s: &str, p: &str, o: Value) -> Row {
        [
            ("s".to_string(), Value::Iri(s.into())),
            ("p".to_string(), Value::Iri(p.into())),
            ("o".to_string(), o),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn connection_failures_surface() {
        let catalog = ComponentCatalog::new(FakeStore(Err(StoreError::Connection {
            store: "fake".into(),
            message: "connection refused".into(),
        })));
        assert!(matches!(catalog.list_all(), Err(CatalogError::Connection { .. })));
        assert!(matches!(catalog.search("amcl"), Err(CatalogError::Connection { .. })));
        assert!(matches!(
            catalog.get_details(&format!("{COMP_NS}amcl")),
            Err(CatalogError::Connection { .. })
        ));
    }

    #[test]
    fn rows_missing_bindings_are_query_errors() {
        let mut broken = Row::new();
        broken.bind("s", Value::Iri(format!("{COMP_NS}amcl")));
        let catalog = ComponentCatalog::new(FakeStore(Ok(vec![
            row(
                &format!("{COMP_NS}amcl"),
                RDF_TYPE,
                Value::Iri(format!("{COMP_NS}LocalizationNode")),
            ),
            broken,
        ])));
        assert!(matches!(catalog.list_all(), Err(CatalogError::Query { .. })));
    }

    #[test]
    fn duplicate_rows_fold_to_one_record() {
        let amcl = format!("{COMP_NS}amcl");
        let typed = row(&amcl, RDF_TYPE, Value::Iri(format!("{COMP_NS}LocalizationNode")));
        let label = row(&amcl, RDFS_LABEL, Value::Literal("AMCL".into()));
        let input = row(
            &amcl,
            &format!("{COMP_NS}hasInput"),
            Value::Literal("sensor_msgs/LaserScan".into()),
        );
        let rows = vec![typed.clone(), label.clone(), input.clone(), typed, label, input];
        let catalog = ComponentCatalog::new(FakeStore(Ok(rows)));

        let components = catalog.list_all().unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].inputs.len(), 1);
    }

    #[test]
    fn non_numeric_count_is_a_query_error() {
        let mut r = Row::new();
        r.bind("count", Value::Literal("many".into()));
        let catalog = ComponentCatalog::new(FakeStore(Ok(vec![r])));
        assert!(matches!(catalog.count(), Err(CatalogError::Query { .. })));
    }
}
