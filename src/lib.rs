// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # ros-component-explorer
//!
//! Semantic catalog of ROS software components stored as RDF triples.
//!
//! ## Architecture
//!
//! - **Loader** (`loader`): Turtle documents into an embedded oxigraph store
//! - **Stores** (`store`): embedded oxigraph or a remote SPARQL endpoint
//! - **Catalog** (`catalog`): list, search and detail lookups over a store
//! - **Folding** (`fold`): one-row-per-triple results into one record per component
//!
//! ## Library usage
//!
//! ```no_run
//! use ros_component_explorer::catalog::ComponentCatalog;
//! use ros_component_explorer::loader;
//! use ros_component_explorer::store::EmbeddedStore;
//!
//! let store = EmbeddedStore::in_memory().unwrap();
//! loader::load_file(&store, std::path::Path::new("data/components.ttl")).unwrap();
//! let catalog = ComponentCatalog::new(store);
//! for component in catalog.search("laser").unwrap() {
//!     println!("{} ({})", component.label, component.class);
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod fold;
pub mod loader;
pub mod model;
pub mod query;
pub mod store;
pub mod vocab;
