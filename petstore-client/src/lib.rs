//! HTTP client for the pet-store API.
//!
//! Every call is validated against the contract in [`petstore_core::registry`]
//! before anything goes over the wire, and issues exactly one request. Responses
//! are returned as decoded JSON; checking them against an entity schema is up
//! to the caller.

use http::header::CONTENT_TYPE;
use petstore_core::{ArgValue, Args, ExecutionContext, Operation, registry, stringify};
use serde_json::Value;
use url::Url;

mod error;
mod operations;


pub use error::{ClientError, HttpError};

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    context: ExecutionContext,
    http: reqwest::Client,
}

impl ApiClient {
    /// Binds a client to the API at `base_url`, e.g. `http://localhost:8080/api/v3`.
    /// The URL is only parsed when a request is built.
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            base_url: base_url.into(),
            context: ExecutionContext::default(),
            http: reqwest::Client::new(),
        }
    }

    /// Execution context used to check binary request bodies
    pub fn with_context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    /// Validates `args` against the operation's contract and issues the request
    pub async fn call(&self, op: Operation, args: Args) -> Result<Value, ClientError> {
        let args = registry().endpoint(op).validate_args(self.context, &args)?;
        let url = self.build_url(op, &args)?;

        let mut request = self.http.request(op.method(), url.clone());
        for (name, value) in &args.headers {
            request = request.header(name.as_str(), stringify(value));
        }
        request = match args.body {
            Some(ArgValue::Json(body)) => request.json(&body),
            Some(ArgValue::Binary(payload)) => {
                let content_type = payload.content_type().to_string();
                request
                    .header(CONTENT_TYPE, content_type)
                    .body(payload.into_bytes())
            }
            None => request,
        };

        log::debug!("{} {url} ({})", op.method(), op.alias());
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        log::debug!("{} {url} -> {status}", op.method());

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            log::warn!("{} {url} failed with {status}: {body}", op.method());
            return Err(HttpError { status, body }.into());
        }
        Ok(decode_body(&bytes))
    }

    /// The full request URL for already validated arguments
    pub fn build_url(&self, op: Operation, args: &Args) -> Result<Url, ClientError> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        let segments = op.path().expand(&args.params)?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| invalid("URL cannot be a base".to_string()))?;
            path.pop_if_empty();
            path.extend(segments.iter());
        }
        if !args.queries.is_empty() {
            let mut query = url.query_pairs_mut();
            for (name, value) in &args.queries {
                match value {
                    Value::Array(items) => {
                        for item in items {
                            query.append_pair(name, &stringify(item));
                        }
                    }
                    value => {
                        query.append_pair(name, &stringify(value));
                    }
                }
            }
        }
        Ok(url)
    }
}

/// JSON if the body parses as such, the text as a JSON string otherwise,
/// `null` for an empty body
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
