//! PostgREST-compatible HTTP client.

use super::{ExecOutcome, RemoteStore, StoreError};
use crate::config::StoreConfig;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_RANGE;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::debug;

const REST_PREFIX: &str = "rest/v1";
const EXEC_FUNCTION: &str = "exec_sql";

/// Store client over the REST interface of the remote database.
pub struct RestStore {
    client: Client,
    config: StoreConfig,
}

impl RestStore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .user_agent(concat!("prospect-seed/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StoreError::Client)?;
        Ok(Self { client, config })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.config.url, REST_PREFIX, table)
    }

    fn rpc_url(&self, function: &str) -> String {
        format!("{}/{}/rpc/{}", self.config.url, REST_PREFIX, function)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
    }

    fn send(&self, target: &str, request: RequestBuilder) -> Result<Response, StoreError> {
        self.authorized(request)
            .send()
            .map_err(|source| StoreError::Transport {
                target: target.to_string(),
                source,
            })
    }
}

impl RemoteStore for RestStore {
    fn insert(&mut self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, StoreError> {
        debug!(table, rows = rows.len(), "bulk insert");
        let request = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(&rows);
        let response = ensure_success(table, self.send(table, request)?)?;

        response
            .json::<Vec<Value>>()
            .map_err(|e| StoreError::InvalidResponse {
                target: table.to_string(),
                message: e.to_string(),
            })
    }

    fn delete_all(&mut self, table: &str) -> Result<u64, StoreError> {
        debug!(table, "delete all rows");
        // PostgREST refuses unfiltered deletes; every seeded row has an id.
        let request = self
            .client
            .delete(self.table_url(table))
            .query(&[("id", "not.is.null")])
            .header("Prefer", "count=exact, return=minimal");
        let response = ensure_success(table, self.send(table, request)?)?;

        Ok(response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range)
            .unwrap_or(0))
    }

    fn execute_sql(&mut self, sql: &str) -> Result<ExecOutcome, StoreError> {
        debug!(bytes = sql.len(), "execute script");
        let request = self
            .client
            .post(self.rpc_url(EXEC_FUNCTION))
            .json(&json!({ "sql": sql }));
        let response = self.send(EXEC_FUNCTION, request)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(ExecOutcome::EndpointMissing);
        }
        ensure_success(EXEC_FUNCTION, response)?;
        Ok(ExecOutcome::Executed)
    }
}

fn ensure_success(target: &str, response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(StoreError::Status {
        target: target.to_string(),
        status: status.as_u16(),
        body,
    })
}

/// Total from a `Content-Range` header: `0-24/25` or `*/25`
fn parse_content_range(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}
