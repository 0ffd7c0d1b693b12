//! Registry lookup contract and `egrul.nalog.ru` client.
//!
//! The public registry answers in two steps: a search POST returns a result
//! token (`t`), then a GET for that token returns a `rows` list whose items
//! carry the short keys deserialized into [`RawRecord`].

use crate::logging::log_field;
use crate::model::record::RawRecord;
use log::{info, warn};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Default public registry endpoint.
pub const DEFAULT_REGISTRY_URL: &str = "https://egrul.nalog.ru";

const TOKEN_FIELD: &str = "t";
const ROWS_FIELD: &str = "rows";

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry lookup failures.
#[derive(Debug)]
pub enum RegistryError {
    /// Transport-level failure (connect, timeout, body decode).
    Http(reqwest::Error),
    /// Non-success HTTP status at one handshake stage.
    Status { stage: &'static str, code: u16 },
    /// Search response has no result token.
    MissingToken,
    /// Result response has no rows (unknown identifier or changed format).
    MissingRows,
    /// First row does not carry the expected fields.
    MalformedRow(serde_json::Error),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "registry request failed: {err}"),
            Self::Status { stage, code } => {
                write!(f, "registry {stage} request returned HTTP {code}")
            }
            Self::MissingToken => write!(f, "registry search response has no result token"),
            Self::MissingRows => write!(f, "registry result has no rows"),
            Self::MalformedRow(err) => write!(f, "registry row is malformed: {err}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::MalformedRow(err) => Some(err),
            Self::Status { .. } | Self::MissingToken | Self::MissingRows => None,
        }
    }
}

impl From<reqwest::Error> for RegistryError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Resolves an identifier to one raw registry row.
pub trait RegistryLookup {
    fn lookup(&self, inn: &str) -> RegistryResult<RawRecord>;
}

impl<T: RegistryLookup + ?Sized> RegistryLookup for &T {
    fn lookup(&self, inn: &str) -> RegistryResult<RawRecord> {
        (**self).lookup(inn)
    }
}

/// Blocking HTTP client for the public registry.
///
/// Created once at startup and reused for every lookup; the underlying
/// session keeps the cookies the registry hands out on the index page.
pub struct EgrulClient {
    http: Client,
    base_url: String,
}

impl EgrulClient {
    /// Creates a client for `base_url` with one per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RegistryResult<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn open_session(&self) -> RegistryResult<()> {
        let response = self
            .http
            .get(format!("{}/index.html", self.base_url))
            .send()?;
        ensure_success(response, "session")?;
        Ok(())
    }

    fn request_token(&self, inn: &str) -> RegistryResult<String> {
        let response = self
            .http
            .post(format!("{}/", self.base_url))
            .form(&[("query", inn)])
            .send()?;
        let body: Value = ensure_success(response, "search")?.json()?;
        parse_token(&body)
    }

    fn fetch_rows(&self, token: &str) -> RegistryResult<Value> {
        let response = self
            .http
            .get(format!("{}/search-result/{token}", self.base_url))
            .send()?;
        Ok(ensure_success(response, "result")?.json()?)
    }
}

impl RegistryLookup for EgrulClient {
    fn lookup(&self, inn: &str) -> RegistryResult<RawRecord> {
        self.open_session()?;
        let token = self.request_token(inn)?;
        let rows = self.fetch_rows(&token)?;
        match parse_first_row(&rows) {
            Ok(record) => {
                info!(
                    "event=registry_lookup module=registry status=ok inn={}",
                    log_field(inn)
                );
                Ok(record)
            }
            Err(err) => {
                warn!(
                    "event=registry_lookup module=registry status=error inn={} error={err}",
                    log_field(inn)
                );
                Err(err)
            }
        }
    }
}

fn ensure_success(response: Response, stage: &'static str) -> RegistryResult<Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(RegistryError::Status {
            stage,
            code: status.as_u16(),
        });
    }
    Ok(response)
}

/// Extracts the result token from a search response body.
pub fn parse_token(body: &Value) -> RegistryResult<String> {
    body.get(TOKEN_FIELD)
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or(RegistryError::MissingToken)
}

/// Deserializes the first item of the `rows` list; later items are ignored.
pub fn parse_first_row(body: &Value) -> RegistryResult<RawRecord> {
    let first = body
        .get(ROWS_FIELD)
        .and_then(Value::as_array)
        .and_then(|rows| rows.first())
        .ok_or(RegistryError::MissingRows)?;
    RawRecord::deserialize(first).map_err(RegistryError::MalformedRow)
}
