//! HTTP-backed [`AuthService`].

use async_trait::async_trait;
use tracing::{debug, instrument};

use sesh_core::{AuthService, Credentials, Identity, LoginResponse, Result, ServiceUrl, Token};

use crate::client::HttpClient;
use crate::endpoints::{LOGIN, LOGOUT, LoginRequest, USER_INFO, UserInfoQuery};

/// Authentication service reached over HTTP.
///
/// | Call | Request | Answer |
/// |---|---|---|
/// | login | `POST user/login` `{username, password}` | `{token}` |
/// | identity | `GET user/info?token=...` | `{username, picture, roles, permissions}` |
/// | logout | `POST user/logout`, bearer token | any 2xx |
///
/// Non-success statuses surface as [`sesh_core::Error::Protocol`].
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    client: HttpClient,
}

impl HttpAuthService {
    /// Create a service client for the given base URL.
    pub fn new(service: ServiceUrl) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(service)?,
        })
    }

    /// Returns the base URL of the service.
    pub fn url(&self) -> &ServiceUrl {
        self.client.service()
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        debug!("Requesting token");

        let request = LoginRequest {
            username: credentials.username(),
            password: credentials.password(),
        };

        self.client.post_json(LOGIN, &request).await
    }

    #[instrument(skip(self, token))]
    async fn fetch_identity(&self, token: &Token) -> Result<Identity> {
        debug!("Requesting identity");

        let query = UserInfoQuery {
            token: token.as_str(),
        };

        self.client.get_json(USER_INFO, &query).await
    }

    #[instrument(skip(self, token))]
    async fn logout(&self, token: &Token) -> Result<()> {
        debug!("Ending session");
        self.client
            .post_authed_no_response(LOGOUT, token.as_str())
            .await
    }
}
