//! Persistence and configuration tests.
//!
//! These verify that an on-disk store survives reopen without reloading, and
//! that configuration failures and unreachable endpoints surface as errors.

use std::path::PathBuf;
use std::time::Duration;

use ros_component_explorer::catalog::ComponentCatalog;
use ros_component_explorer::config::ExplorerConfig;
use ros_component_explorer::error::{CatalogError, ExplorerError, LoadError};
use ros_component_explorer::store::{EmbeddedStore, RemoteStore};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/components.ttl")
}

#[test]
fn persistent_store_survives_restart() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = ExplorerConfig {
        data_file: sample_path(),
        store_dir: Some(dir.path().join("store")),
        ..Default::default()
    };

    // First session: loads the dataset.
    {
        let catalog = ComponentCatalog::from_config(&config).unwrap();
        assert_eq!(catalog.list_all().unwrap().len(), 13);
    }

    // Second session: the data file is gone, the store still answers.
    {
        let config = ExplorerConfig {
            data_file: dir.path().join("missing.ttl"),
            ..config
        };
        let catalog = ComponentCatalog::from_config(&config).unwrap();
        assert_eq!(catalog.count().unwrap(), 13);
        let hits = catalog.search("amcl").unwrap();
        assert_eq!(hits.len(), 1);
    }

    let reopened = EmbeddedStore::open(&dir.path().join("store")).unwrap();
    assert!(!reopened.is_empty().unwrap());
}

#[test]
fn missing_dataset_is_a_load_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = ExplorerConfig {
        data_file: dir.path().join("nope.ttl"),
        ..Default::default()
    };
    let err = ComponentCatalog::from_config(&config).err().unwrap();
    assert!(matches!(err, ExplorerError::Load(LoadError::Missing { .. })));
}

#[test]
fn malformed_dataset_is_a_load_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("bad.ttl");
    std::fs::write(&path, "this is not turtle").unwrap();
    let config = ExplorerConfig {
        data_file: path,
        ..Default::default()
    };
    let err = ComponentCatalog::from_config(&config).err().unwrap();
    assert!(matches!(err, ExplorerError::Load(LoadError::Malformed { .. })));
}

#[test]
fn config_file_selects_dataset() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!("data_file = {:?}\nport = 9090\n", sample_path().display().to_string()),
    )
    .unwrap();

    let config = ExplorerConfig::from_file(&config_path).unwrap();
    assert_eq!(config.port, 9090);
    let catalog = ComponentCatalog::from_config(&config).unwrap();
    assert_eq!(catalog.count().unwrap(), 13);
}

#[test]
fn unreachable_endpoint_surfaces_connection_error() {
    let catalog = ComponentCatalog::new(RemoteStore::new(
        "http://127.0.0.1:9/sparql",
        Duration::from_secs(2),
    ));
    let err = catalog.list_all().unwrap_err();
    assert!(matches!(err, CatalogError::Connection { .. }), "got {err:?}");
    assert!(err.is_retryable());

    let err = catalog.search("amcl").unwrap_err();
    assert!(matches!(err, CatalogError::Connection { .. }));
}

#[test]
fn endpoint_config_skips_local_loading() {
    let config = ExplorerConfig {
        data_file: PathBuf::from("/nonexistent/components.ttl"),
        endpoint: Some("http://127.0.0.1:9/sparql".into()),
        timeout_secs: 2,
        ..Default::default()
    };
    // Building the catalog does not touch the network or the data file.
    let catalog = ComponentCatalog::from_config(&config).unwrap();
    assert!(matches!(catalog.count(), Err(CatalogError::Connection { .. })));
}
