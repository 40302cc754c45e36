//! SPARQL 1.1 Protocol client for remote triple stores.
//!
//! Queries are POSTed as `application/x-www-form-urlencoded` with a `query`
//! field, and results are read back as `application/sparql-results+json`.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use crate::error::StoreError;
use crate::model::Value;

use super::{Row, StoreResult, TripleStore};

const RESULTS_JSON: &str = "application/sparql-results+json";

/// HTTP connection to a SPARQL query endpoint.
pub struct RemoteStore {
    endpoint: String,
    http: ureq::Agent,
}

impl RemoteStore {
    /// Connect to `endpoint` with the given request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    fn query_error(&self, message: String) -> StoreError {
        StoreError::Query {
            store: self.describe(),
            message,
        }
    }
}

impl TripleStore for RemoteStore {
    fn select(&self, sparql: &str) -> StoreResult<Vec<Row>> {
        let response = self
            .http
            .post(&self.endpoint)
            .set("Accept", RESULTS_JSON)
            .send_form(&[("query", sparql)]);

        let response = match response {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                let message = format!("endpoint answered HTTP {code}: {body}");
                // A gateway in front of the store reports it down or slow.
                if matches!(code, 502..=504) {
                    return Err(StoreError::Connection {
                        store: self.describe(),
                        message,
                    });
                }
                return Err(self.query_error(message));
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(StoreError::Connection {
                    store: self.describe(),
                    message: transport.to_string(),
                });
            }
        };

        let body = response
            .into_string()
            .map_err(|e| self.query_error(format!("failed to read response body: {e}")))?;
        parse_results_json(&body).map_err(|message| self.query_error(message))
    }

    fn describe(&self) -> String {
        format!("SPARQL endpoint {}", self.endpoint)
    }
}

impl std::fmt::Debug for RemoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStore")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// SPARQL 1.1 Query Results JSON
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ResultsDocument {
    results: Option<ResultsBody>,
}

#[derive(Deserialize)]
struct ResultsBody {
    bindings: Vec<HashMap<String, JsonTerm>>,
}

#[derive(Deserialize)]
struct JsonTerm {
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

impl JsonTerm {
    fn into_value(self) -> Result<Value, String> {
        match self.kind.as_str() {
            "uri" => Ok(Value::Iri(self.value)),
            "bnode" => Ok(Value::Blank(self.value)),
            // "typed-literal" is the pre-standard spelling some stores still emit.
            "literal" | "typed-literal" => Ok(Value::Literal(self.value)),
            other => Err(format!("unknown term type \"{other}\"")),
        }
    }
}

/// Parse a SPARQL JSON results document into rows.
pub(crate) fn parse_results_json(body: &str) -> Result<Vec<Row>, String> {
    let doc: ResultsDocument =
        serde_json::from_str(body).map_err(|e| format!("malformed SPARQL JSON results: {e}"))?;
    let results = doc
        .results
        .ok_or_else(|| "response holds no SELECT results".to_string())?;

    results
        .bindings
        .into_iter()
        .map(|binding| {
            binding
                .into_iter()
                .map(|(var, term)| term.into_value().map(|v| (var, v)))
                .collect::<Result<Row, String>>()
        })
        .collect()
}
