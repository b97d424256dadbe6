// Netmaker API HTTP client
//
// Wraps `reqwest::Client` with bearer-token injection, `/api` URL
// construction and status normalization. Endpoint helpers (networks,
// nodes, extclients, auth) are inherent methods in separate files so this
// module stays focused on transport mechanics.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{self, Resource};
use crate::transport::TransportConfig;

/// Message Netmaker puts in a 500 body when a lookup matched nothing.
pub const NO_RESULT_FOUND: &str = "no result found";

/// Netmaker error bodies look like `{"Code": 500, "Message": "..."}`.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(rename = "Message", default)]
    message: Option<String>,
}

/// Normalized outcome of a single API call.
///
/// Both of Netmaker's "nothing there" conventions collapse into
/// [`NotFound`](Self::NotFound); every other failure is an [`Error`].
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Successful call with a JSON payload.
    Json(Value),
    /// Successful call without a body (e.g. 204 on delete).
    NoContent,
    /// HTTP 404, or HTTP 500 carrying `"no result found"`.
    NotFound,
}

impl Response {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Interpret the payload as a single resource object.
    ///
    /// `NotFound`, `NoContent` and a JSON `null` all yield `None`.
    pub fn into_resource(self, context: &str) -> Result<Option<Resource>, Error> {
        match self {
            Self::Json(Value::Null) | Self::NoContent | Self::NotFound => Ok(None),
            Self::Json(value) => models::expect_object(value, context).map(Some),
        }
    }

    /// Interpret the payload as a list of resource objects.
    ///
    /// Missing lists are empty lists.
    pub fn into_resources(self, context: &str) -> Result<Vec<Resource>, Error> {
        match self {
            Self::Json(value) => models::expect_objects(value, context),
            Self::NoContent | Self::NotFound => Ok(Vec::new()),
        }
    }
}

/// Async client for the Netmaker REST API.
///
/// Every request goes to `{base_url}/api{path}`. The bearer token (if any)
/// is injected as a default header at construction time, so the client
/// holds no mutable state.
pub struct NetmakerClient {
    http: reqwest::Client,
    base_url: String,
}

impl NetmakerClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client that sends `Authorization: Bearer <token>` on every call.
    pub fn with_token(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid token header value: {e}"),
            })?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = transport.build_client_with_headers(headers)?;
        Self::from_reqwest(base_url, http)
    }

    /// Build a client without credentials. Only useful for
    /// [`authenticate`](Self::authenticate).
    pub fn unauthenticated(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        // Validate up front so request-time URL errors can only come from paths.
        let parsed = Url::parse(base_url)?;
        let base_url = parsed.as_str().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url })
    }

    /// The API server root, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// `{base}/api{path}`; `path` must start with `/`.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!("{}/api{path}", self.base_url))?)
    }

    // ── Request ──────────────────────────────────────────────────────

    /// Issue one API call and normalize the outcome.
    ///
    /// Returns [`Response::NotFound`] for 404 and for 500 with
    /// `{"Message": "no result found"}`, [`Response::NoContent`] for a
    /// successful empty body, and an [`Error::Api`] (with the server's
    /// `Message` appended) for every other non-success status.
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.url(path)?;
        debug!("{method} {url}");

        let mut builder = self.http.request(method, url.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let resp = builder.send().await?;

        Self::handle_response(url, resp).await
    }

    /// GET shorthand.
    pub async fn get(&self, path: &str) -> Result<Response, Error> {
        self.request::<Value>(Method::GET, path, None).await
    }

    /// DELETE shorthand.
    pub async fn delete(&self, path: &str) -> Result<Response, Error> {
        self.request::<Value>(Method::DELETE, path, None).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response(url: Url, resp: reqwest::Response) -> Result<Response, Error> {
        let status = resp.status();
        trace!(%status, "response received");

        if status == StatusCode::NOT_FOUND {
            return Ok(Response::NotFound);
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(Response::NoContent);
        }

        let body = resp.text().await?;

        if status.is_success() {
            if body.trim().is_empty() {
                return Ok(Response::NoContent);
            }
            return match serde_json::from_str(&body) {
                Ok(value) => Ok(Response::Json(value)),
                Err(e) => {
                    let preview: String = body.chars().take(200).collect();
                    Err(Error::Deserialization {
                        message: format!("{e} (body preview: {preview:?})"),
                        body,
                    })
                }
            };
        }

        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| e.message);

        if status == StatusCode::INTERNAL_SERVER_ERROR
            && message.as_deref() == Some(NO_RESULT_FOUND)
        {
            debug!("{url} reported {NO_RESULT_FOUND:?}, treating as not found");
            return Ok(Response::NotFound);
        }

        Err(Error::Api {
            status: status.as_u16(),
            url: url.to_string(),
            message,
        })
    }
}
