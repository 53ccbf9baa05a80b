mod doctors;
mod endpoints;
mod patients;
mod prescriptions;
mod scope;

use std::sync::Arc;

use domain::Error;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error as ThisError;

use crate::config::ClientConfig;
use crate::token::{self, Claims, KeyringTokenStore, TokenStore};

pub use scope::ScreenScope;

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("invalid base url {url}: {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

/// The caller's session, resolved from the stored token.
#[derive(Clone)]
pub(crate) struct Identity {
    pub token: String,
    pub doctor_id: String,
    pub claims: Claims,
}

/// Session facade over the remote service.
///
/// Authenticated operations read the stored token, decode it for the doctor id, then call
/// the service with a bearer header, in that order. Nothing is cached between calls.
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    base: Url,
    store: Arc<dyn TokenStore>,
    http: Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self, BuildError> {
        let base = Url::parse(&config.base_url).map_err(|err| BuildError::BaseUrl {
            url: config.base_url.clone(),
            reason: err.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(BuildError::BaseUrl {
                url: config.base_url.clone(),
                reason: "not a hierarchical url".to_string(),
            });
        }

        let http = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self { config: Arc::new(config), base, store, http })
    }

    /// Client backed by the OS credential store named in `config`.
    pub fn with_keyring(config: ClientConfig) -> Result<Self, BuildError> {
        let store = KeyringTokenStore::new(&config.keyring_service, &config.token_key);
        Self::new(config, Arc::new(store))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) async fn identity(&self) -> Result<Identity, Error> {
        let token = self.store.get().await.ok_or(Error::Unauthenticated)?;

        let claims = match token::decode(&token) {
            Ok(claims) => claims,
            Err(_) => return Err(self.discard_invalid_token().await),
        };
        let Some(doctor_id) = claims.subject.clone() else {
            return Err(self.discard_invalid_token().await);
        };

        Ok(Identity { token, doctor_id, claims })
    }

    async fn discard_invalid_token(&self) -> Error {
        tracing::warn!("stored session token is invalid, discarding it");
        if let Err(err) = self.store.clear().await {
            tracing::warn!("failed to discard session token: {}", err);
        }
        Error::InvalidSession
    }

    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, path = url.path(), "request");
        self.http.request(method, url)
    }

    pub(crate) fn authorized(&self, method: Method, url: Url, identity: &Identity) -> RequestBuilder {
        self.request(method, url).bearer_auth(&identity.token)
    }

    /// Sends and treats every non-success status as a plain `RequestFailed`.
    pub(crate) async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, Error> {
        let response = request.send().await.map_err(|err| transport_error(operation, err))?;
        let status = response.status();
        tracing::debug!(operation, %status, "response");

        if status.is_success() {
            return Ok(response);
        }

        tracing::warn!(operation, %status, "service returned non-success");
        Err(Error::RequestFailed { operation, status: Some(status.as_u16()) })
    }

    /// Like [`ApiClient::send`], but for signup and creation calls a `message` field in the
    /// error body is surfaced. `fallback` is used when the body carries none.
    pub(crate) async fn send_reporting_message(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        fallback: Option<&'static str>,
    ) -> Result<Response, Error> {
        let response = request.send().await.map_err(|err| transport_error(operation, err))?;
        let status = response.status();
        tracing::debug!(operation, %status, "response");

        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ServiceMessage>()
            .await
            .ok()
            .and_then(|body| body.message)
            .filter(|m| !m.trim().is_empty());
        tracing::warn!(operation, %status, message = message.as_deref(), "service returned non-success");

        match message.or(fallback.map(str::to_string)) {
            Some(message) => Err(Error::RequestFailedWithMessage {
                operation,
                status: status.as_u16(),
                message,
            }),
            None => Err(Error::RequestFailed { operation, status: Some(status.as_u16()) }),
        }
    }

    pub(crate) async fn read_json<T: DeserializeOwned>(
        operation: &'static str,
        response: Response,
    ) -> Result<T, Error> {
        response.json::<T>().await.map_err(|err| body_error(operation, err))
    }
}

#[derive(Deserialize)]
struct ServiceMessage {
    #[serde(default)]
    message: Option<String>,
}

fn transport_error(operation: &'static str, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        tracing::warn!(operation, "request timed out");
        return Error::TimedOut { operation };
    }
    tracing::warn!(operation, "request failed: {}", err);
    Error::RequestFailed { operation, status: None }
}

fn body_error(operation: &'static str, err: reqwest::Error) -> Error {
    if err.is_decode() {
        tracing::warn!(operation, "unexpected response body: {}", err);
        return Error::MalformedResponse { operation };
    }
    transport_error(operation, err)
}
