//! Loading component descriptions from Turtle into the embedded store.

use std::io::{BufReader, ErrorKind};
use std::path::Path;

use serde::Serialize;

use crate::error::{LoadError, LoadResult};
use crate::store::EmbeddedStore;

/// Outcome of a load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    /// Where the statements came from.
    pub origin: String,
    /// Statements held by the store after loading.
    pub statements: usize,
}

/// Parse the Turtle file at `path` and insert its statements into `store`.
///
/// Loading the same file twice is not reconciled; oxigraph's set semantics
/// absorb identical statements.
pub fn load_file(store: &EmbeddedStore, path: &Path) -> LoadResult<LoadReport> {
    let origin = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::Missing {
            path: origin.clone(),
        },
        _ => LoadError::Unreadable {
            path: origin.clone(),
            source,
        },
    })?;
    // Opening a directory succeeds on Unix; reading it does not.
    let is_dir = file
        .metadata()
        .map_err(|source| LoadError::Unreadable {
            path: origin.clone(),
            source,
        })?
        .is_dir();
    if is_dir {
        return Err(LoadError::Unreadable {
            path: origin,
            source: std::io::Error::other("is a directory"),
        });
    }

    store.load_turtle(BufReader::new(file), None, &origin)?;
    report(store, origin)
}

/// Parse Turtle held in memory.
pub fn load_str(store: &EmbeddedStore, turtle: &str, base_iri: Option<&str>) -> LoadResult<LoadReport> {
    let origin = "(inline)".to_string();
    store.load_turtle(turtle.as_bytes(), base_iri, &origin)?;
    report(store, origin)
}

fn report(store: &EmbeddedStore, origin: String) -> LoadResult<LoadReport> {
    let statements = store.len().map_err(|e| LoadError::Storage {
        origin: origin.clone(),
        message: e.to_string(),
    })?;
    tracing::info!(%origin, statements, "loaded component statements");
    Ok(LoadReport { origin, statements })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file() {
        let store = EmbeddedStore::in_memory().unwrap();
        let err = load_file(&store, Path::new("/nonexistent/components.ttl")).unwrap_err();
        assert!(matches!(err, LoadError::Missing { .. }));
    }

    #[test]
    fn directory_is_unreadable() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = EmbeddedStore::in_memory().unwrap();
        let err = load_file(&store, dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Unreadable { .. }), "got {err:?}");
    }

    #[test]
    fn path_through_a_regular_file_is_unreadable_not_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("components.ttl");
        std::fs::write(&file, "").unwrap();

        let store = EmbeddedStore::in_memory().unwrap();
        let err = load_file(&store, &file.join("nested.ttl")).unwrap_err();
        assert!(matches!(err, LoadError::Unreadable { .. }), "got {err:?}");
    }

    #[test]
    fn malformed_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.ttl");
        std::fs::write(&path, "@prefix comp: <http://example.org/ros-components#> .\ncomp:a comp:b").unwrap();

        let store = EmbeddedStore::in_memory().unwrap();
        let err = load_file(&store, &path).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[test]
    fn load_inline_reports_statement_count() {
        let store = EmbeddedStore::in_memory().unwrap();
        let report = load_str(
            &store,
            "<urn:a> <urn:p> \"1\" . <urn:a> <urn:p> \"2\" .",
            None,
        )
        .unwrap();
        assert_eq!(report.statements, 2);

        // Identical statements are absorbed on reload.
        let report = load_str(&store, "<urn:a> <urn:p> \"1\" .", None).unwrap();
        assert_eq!(report.statements, 2);
    }
}
