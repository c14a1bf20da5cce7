//! Typed REST plumbing over reqwest.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, trace};

use pmax_core::error::{ApiError, DecodeError, TransportError};
use pmax_core::resources::storage_group::RequestMetadata;
use pmax_core::{Credentials, EndpointUrl, Error, Result};

/// Wire shape of a Unisphere error body.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for Unisphere REST requests.
///
/// Attaches basic-auth and JSON headers, maps transport failures to
/// [`TransportError`], non-2xx responses to [`ApiError`], and body parse
/// failures to [`DecodeError`].
#[derive(Debug, Clone)]
pub(crate) struct RestClient {
    client: reqwest::Client,
    endpoint: EndpointUrl,
    credentials: Credentials,
}

impl RestClient {
    /// Create a new REST client for the given endpoint.
    pub fn new(
        endpoint: EndpointUrl,
        credentials: Credentials,
        request_timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pmax/", env!("CARGO_PKG_VERSION")))
            .timeout(request_timeout)
            .build()
            .map_err(|e| TransportError::Http {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint,
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        self.endpoint.rest_url(path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .basic_auth(self.credentials.username(), Some(self.credentials.password()))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }

    /// GET a resource and decode the body.
    pub async fn get<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!(path, "GET");
        let response = self
            .request(reqwest::Method::GET, path)
            .send()
            .await
            .map_err(classify_transport)?;
        self.handle_response(response).await
    }

    /// POST a body and decode the response.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        debug!(path, "POST");
        trace!(?body, "request body");
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await
            .map_err(classify_transport)?;
        self.handle_response(response).await
    }

    /// POST a body, discarding any response content.
    pub async fn post_no_response<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + std::fmt::Debug,
    {
        debug!(path, "POST (no response)");
        trace!(?body, "request body");
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await
            .map_err(classify_transport)?;
        self.handle_empty_response(response).await
    }

    /// PUT a body and decode the response.
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        self.put_with_metadata(path, body, None).await
    }

    /// PUT a body with optional metadata headers and decode the response.
    pub async fn put_with_metadata<B, R>(
        &self,
        path: &str,
        body: &B,
        metadata: Option<&RequestMetadata>,
    ) -> Result<R>
    where
        B: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        debug!(path, "PUT");
        trace!(?body, "request body");
        let mut request = self.request(reqwest::Method::PUT, path).json(body);
        if let Some(metadata) = metadata {
            for (name, value) in metadata.iter() {
                request = request.header(name, value);
            }
        }
        let response = request.send().await.map_err(classify_transport)?;
        self.handle_response(response).await
    }

    /// PUT a body, discarding any response content.
    pub async fn put_no_response<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + std::fmt::Debug,
    {
        debug!(path, "PUT (no response)");
        trace!(?body, "request body");
        let response = self
            .request(reqwest::Method::PUT, path)
            .json(body)
            .send()
            .await
            .map_err(classify_transport)?;
        self.handle_empty_response(response).await
    }

    /// DELETE a resource.
    pub async fn delete(&self, path: &str) -> Result<()> {
        debug!(path, "DELETE");
        let response = self
            .request(reqwest::Method::DELETE, path)
            .send()
            .await
            .map_err(classify_transport)?;
        self.handle_empty_response(response).await
    }

    /// DELETE a resource with a request body.
    pub async fn delete_with_body<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + std::fmt::Debug,
    {
        debug!(path, "DELETE (with body)");
        trace!(?body, "request body");
        let response = self
            .request(reqwest::Method::DELETE, path)
            .json(body)
            .send()
            .await
            .map_err(classify_transport)?;
        self.handle_empty_response(response).await
    }

    /// Handle a response, parsing the body or the error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            response.json::<R>().await.map_err(|e| {
                DecodeError::Body {
                    resource: std::any::type_name::<R>(),
                    message: e.to_string(),
                }
                .into()
            })
        } else {
            Err(Error::Api(self.parse_error_response(response).await))
        }
    }

    /// Handle a response where no body is expected.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Api(self.parse_error_response(response).await))
        }
    }

    /// Parse a Unisphere error response.
    async fn parse_error_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        match response.json::<ErrorBody>().await {
            Ok(body) => ApiError::new(status, body.message),
            Err(_) => ApiError::new(status, None),
        }
    }
}

/// Classify a reqwest failure into the transport taxonomy.
fn classify_transport(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout {
            message: err.to_string(),
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}
