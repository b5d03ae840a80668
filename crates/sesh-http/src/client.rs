//! HTTP client for the authentication service.

use reqwest::Response;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use sesh_core::error::{Error, ProtocolError, TransportError};
use sesh_core::{Result, ServiceUrl};

use crate::endpoints::ErrorResponse;

/// Convert a reqwest failure into a transport error.
pub(crate) fn map_reqwest(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
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

/// JSON-over-HTTP client bound to one service base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    service: ServiceUrl,
}

impl HttpClient {
    /// Create a new client for the given service.
    pub fn new(service: ServiceUrl) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sesh/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(map_reqwest)?;

        Ok(Self { client, service })
    }

    /// Returns the service URL this client is configured for.
    pub fn service(&self) -> &ServiceUrl {
        &self.service
    }

    /// POST a JSON body and decode a JSON answer.
    #[instrument(skip(self, body), fields(service = %self.service))]
    pub async fn post_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R>
    where
        B: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.service.endpoint_url(endpoint);
        debug!(endpoint, "POST");
        trace!(?body, "request body");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest)?;

        self.handle_response(response).await
    }

    /// GET with query parameters and decode a JSON answer.
    #[instrument(skip(self, params), fields(service = %self.service))]
    pub async fn get_json<Q, R>(&self, endpoint: &str, params: &Q) -> Result<R>
    where
        Q: Serialize,
        R: DeserializeOwned,
    {
        let url = self.service.endpoint_url(endpoint);
        debug!(endpoint, "GET");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(map_reqwest)?;

        self.handle_response(response).await
    }

    /// POST without a body, authenticated with a bearer token, ignoring the
    /// answer body.
    #[instrument(skip(self, token), fields(service = %self.service))]
    pub async fn post_authed_no_response(&self, endpoint: &str, token: &str) -> Result<()> {
        let url = self.service.endpoint_url(endpoint);
        debug!(endpoint, "POST (authenticated, no response)");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(map_reqwest)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Protocol(parse_error_response(response).await))
        }
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(&self, response: Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            response.json::<R>().await.map_err(map_reqwest)
        } else {
            Err(Error::Protocol(parse_error_response(response).await))
        }
    }
}

/// Parse an error body, falling back to the bare status.
async fn parse_error_response(response: Response) -> ProtocolError {
    let status = response.status().as_u16();

    match response.json::<ErrorResponse>().await {
        Ok(body) => ProtocolError::new(status, body.error, body.message),
        Err(_) => ProtocolError::new(status, None, None),
    }
}
