//! Blocking webhook client with sequential endpoint fallback.

use std::time::Duration;

use serde_json::Value;

use rowhook_config::EndpointSet;
use rowhook_core::{Row, RowKey, ROW_NUMBER_COLUMN};

use crate::error::{AttemptError, EndpointsExhausted};

const USER_AGENT: &str = concat!("rowhook/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Webhook API client (blocking).
///
/// Holds the resolved [`EndpointSet`]; each operation walks its URL
/// list strictly in order and returns on the first success, so total
/// latency is the failed attempts plus the one that succeeded. Nothing
/// runs concurrently and nothing is retried per URL.
#[derive(Clone)]
pub struct WebhookClient {
    http: reqwest::blocking::Client,
    endpoints: EndpointSet,
}

impl WebhookClient {
    pub fn new(endpoints: EndpointSet) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self { http, endpoints }
    }

    pub fn endpoints(&self) -> &EndpointSet {
        &self.endpoints
    }

    /// Fetches the rows of `sheet` in `doc`.
    pub fn fetch_rows(&self, doc: &str, sheet: &str) -> Result<Vec<Row>, EndpointsExhausted> {
        let body = serde_json::json!({ "doc": doc, "sheet": sheet });
        self.try_endpoints("fetch", &self.endpoints.fetch, |url| {
            let resp = self.post_json(url, &body)?;
            let text = resp
                .text()
                .map_err(|e| AttemptError::Network(e.to_string()))?;
            parse_rows(&text)
        })
    }

    /// Pushes an updated row. The response is acknowledged but its body
    /// is not parsed; only the status matters.
    pub fn update_row(
        &self,
        doc: &str,
        sheet: &str,
        key: RowKey,
        row: &Row,
    ) -> Result<(), EndpointsExhausted> {
        let body = update_body(doc, sheet, key, row);
        self.try_endpoints("update", &self.endpoints.update, |url| {
            self.post_json(url, &body).map(drop)
        })
    }

    /// Deletes the row identified by `key`.
    pub fn delete_row(&self, doc: &str, sheet: &str, key: RowKey) -> Result<(), EndpointsExhausted> {
        let body = serde_json::json!({
            "doc": doc,
            "sheet": sheet,
            ROW_NUMBER_COLUMN: key.to_value(),
        });
        self.try_endpoints("delete", &self.endpoints.delete, |url| {
            self.post_json(url, &body).map(drop)
        })
    }

    /// Attempts `op` against each URL in order. First success wins and
    /// later URLs are not contacted. On exhaustion the error from the
    /// last attempt is returned, annotated with every URL tried;
    /// earlier errors are only logged.
    fn try_endpoints<T>(
        &self,
        op: &str,
        urls: &[String],
        attempt: impl Fn(&str) -> Result<T, AttemptError>,
    ) -> Result<T, EndpointsExhausted> {
        let mut last: Option<AttemptError> = None;
        for url in urls {
            log::debug!("[{}] trying endpoint {}", op, url);
            match attempt(url) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    log::warn!("[{}] endpoint {} failed: {}", op, url, e);
                    last = Some(e);
                }
            }
        }
        // An empty URL list is unreachable through a validated
        // EndpointSet, but don't panic on it either.
        Err(EndpointsExhausted {
            tried: urls.to_vec(),
            last: last.unwrap_or_else(|| AttemptError::Network("no endpoints configured".into())),
        })
    }

    fn post_json(
        &self,
        url: &str,
        body: &Value,
    ) -> Result<reqwest::blocking::Response, AttemptError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .map_err(|e| AttemptError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AttemptError::Http(status, body));
        }

        Ok(response)
    }
}

/// Decodes a successful fetch body. A null or empty body means zero
/// rows; the webhook flows send nothing back for an empty sheet.
fn parse_rows(body: &str) -> Result<Vec<Row>, AttemptError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value =
        serde_json::from_str(body).map_err(|e| AttemptError::Parse(e.to_string()))?;
    match value {
        Value::Null => Ok(Vec::new()),
        other => serde_json::from_value(other).map_err(|e| AttemptError::Parse(e.to_string())),
    }
}

/// Update request body: `doc`, `sheet`, `rowIndex`, then one key per
/// column. The identity column is excluded in either spelling, and
/// null cells are sent as empty strings, matching what the webhook
/// flows expect.
fn update_body(doc: &str, sheet: &str, key: RowKey, row: &Row) -> Value {
    let mut body = serde_json::Map::new();
    body.insert("doc".into(), doc.into());
    body.insert("sheet".into(), sheet.into());
    body.insert("rowIndex".into(), key.to_value());
    for (column, value) in row.iter() {
        if column == ROW_NUMBER_COLUMN || column == "ROW_NUMBER" {
            continue;
        }
        let value = match value {
            Value::Null => Value::String(String::new()),
            other => other.clone(),
        };
        body.insert(column.clone(), value);
    }
    Value::Object(body)
}
