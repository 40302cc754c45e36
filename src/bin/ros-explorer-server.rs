//! ros-component-explorer HTTP server.
//!
//! Serves the component catalog as JSON for a web front end:
//!
//! - `GET /components` — every component
//! - `GET /components?q=<term>` — case-insensitive search
//! - `GET /components/count` — number of components
//! - `GET /components/details?id=<iri-or-name>` — one component
//! - `GET /health` — server status
//!
//! Build and run: `cargo run --features server --bin ros-explorer-server`

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use ros_component_explorer::catalog::ComponentCatalog;
use ros_component_explorer::config::ExplorerConfig;
use ros_component_explorer::error::{CatalogError, CatalogResult};
use ros_component_explorer::model::Component;
use ros_component_explorer::store::TripleStore;
use ros_component_explorer::vocab;

// ── Server state ──────────────────────────────────────────────────────────

struct ServerState {
    catalog: Catalog,
}

type Catalog = ComponentCatalog<Box<dyn TripleStore>>;

type ApiError = (StatusCode, String);

/// Map catalog failures onto HTTP statuses: not-found is 404, an unreachable
/// store is 503 (retryable), a bad store response is 502.
fn api_error(err: CatalogError) -> ApiError {
    let status = match &err {
        CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
        CatalogError::Connection { .. } => StatusCode::SERVICE_UNAVAILABLE,
        CatalogError::Query { .. } => StatusCode::BAD_GATEWAY,
    };
    if status != StatusCode::NOT_FOUND {
        tracing::warn!(%status, "request failed: {err}");
    }
    (status, err.to_string())
}

// ── Request / response types ──────────────────────────────────────────────

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
}

#[derive(Deserialize)]
struct DetailsParams {
    id: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    store: String,
}

#[derive(Serialize)]
struct ComponentListResponse {
    count: usize,
    components: Vec<Component>,
}

#[derive(Serialize)]
struct CountResponse {
    count: usize,
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn health(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.catalog.store().describe(),
    })
}

/// Run a catalog call on the blocking pool; a remote store can hold the
/// thread for up to the configured timeout.
async fn with_catalog<T, F>(state: Arc<ServerState>, call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Catalog) -> CatalogResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || call(&state.catalog))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "catalog task panicked");
            (StatusCode::INTERNAL_SERVER_ERROR, "catalog task failed".to_string())
        })?
        .map_err(api_error)
}

async fn list_components(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ComponentListResponse>, ApiError> {
    let components = with_catalog(state, move |catalog| match params.q.as_deref() {
        Some(term) => catalog.search(term),
        None => catalog.list_all(),
    })
    .await?;

    Ok(Json(ComponentListResponse {
        count: components.len(),
        components,
    }))
}

async fn count_components(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = with_catalog(state, |catalog| catalog.count()).await?;
    Ok(Json(CountResponse { count }))
}

async fn component_details(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<DetailsParams>,
) -> Result<Json<Component>, ApiError> {
    let id = vocab::expand_id(&params.id);
    let component = with_catalog(state, move |catalog| catalog.get_details(&id)).await?;
    Ok(Json(component))
}

// ── Main ──────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=warn")),
        )
        .init();

    let config_path = std::env::var_os("ROS_EXPLORER_CONFIG").map(std::path::PathBuf::from);
    let config = ExplorerConfig::resolve(config_path.as_deref())?;
    let addr = config.listen_addr();

    // A dataset that fails to load is fatal at startup.
    let catalog = ComponentCatalog::from_config(&config)?;
    let components = catalog.count()?;
    tracing::info!(components, "component catalog ready");

    let state = Arc::new(ServerState { catalog });

    let app = Router::new()
        .route("/health", get(health))
        .route("/components", get(list_components))
        .route("/components/count", get(count_components))
        .route("/components/details", get(component_details))
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("ros-component-explorer server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| miette::miette!("failed to bind {addr}: {e}"))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| miette::miette!("server error: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ros_component_explorer::loader;
    use ros_component_explorer::store::EmbeddedStore;

    const DOC: &str = r#"
        @prefix comp: <http://example.org/ros-components#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

        comp:amcl a comp:LocalizationNode ;
            rdfs:label "AMCL" ;
            comp:description "Particle filter localization against a laser map." .

        comp:navfn a comp:PathPlanner ;
            rdfs:label "NavFn" .
    "#;

    fn state() -> Arc<ServerState> {
        let store = EmbeddedStore::in_memory().unwrap();
        loader::load_str(&store, DOC, None).unwrap();
        let store: Box<dyn TripleStore> = Box::new(store);
        Arc::new(ServerState {
            catalog: ComponentCatalog::new(store),
        })
    }

    #[test]
    fn catalog_errors_map_to_statuses() {
        let cases = [
            (CatalogError::NotFound { id: "comp:nope".into() }, StatusCode::NOT_FOUND),
            (
                CatalogError::Connection { message: "refused".into() },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (CatalogError::Query { message: "bad".into() }, StatusCode::BAD_GATEWAY),
        ];
        for (err, expected) in cases {
            let (status, body) = api_error(err);
            assert_eq!(status, expected);
            assert!(!body.is_empty());
        }
    }

    #[tokio::test]
    async fn unknown_details_id_is_404() {
        let result = component_details(
            State(state()),
            Query(DetailsParams { id: "no_such_node".into() }),
        )
        .await;
        match result {
            Err((status, body)) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(body.contains("no_such_node"), "{body}");
            }
            Ok(Json(component)) => panic!("unexpected component {}", component.id),
        }
    }

    #[tokio::test]
    async fn details_accept_local_names() {
        let Json(component) = component_details(
            State(state()),
            Query(DetailsParams { id: "amcl".into() }),
        )
        .await
        .unwrap();
        assert_eq!(component.label, "AMCL");
    }

    #[tokio::test]
    async fn list_searches_when_q_is_given() {
        let Json(all) = list_components(State(state()), Query(SearchParams { q: None }))
            .await
            .unwrap();
        assert_eq!(all.count, 2);

        let Json(hits) = list_components(
            State(state()),
            Query(SearchParams { q: Some("LASER".into()) }),
        )
        .await
        .unwrap();
        assert_eq!(hits.count, 1);
        assert_eq!(hits.components[0].label, "AMCL");

        let Json(count) = count_components(State(state())).await.unwrap();
        assert_eq!(count.count, 2);
    }
}
