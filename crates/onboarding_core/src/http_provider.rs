//! JSON-over-HTTP identity provider.
//!
//! `POST {base}/sign-up` takes a camelCase profile and answers with an
//! identity; `POST {base}/sign-in` takes `{email, password}` and answers with a
//! session or `null`. Failures carry `{code, message}` when the backend
//! provides one.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{AuthSession, Identity},
    error::ApiError,
    protocol::{SignInPayload, SignUpPayload},
};
use tracing::debug;
use url::Url;

use crate::{error::AuthError, IdentityProvider};

pub const SIGN_UP_PATH: &str = "sign-up";
pub const SIGN_IN_PATH: &str = "sign-in";

pub struct HttpIdentityProvider {
    http: Client,
    base_url: Url,
}

impl HttpIdentityProvider {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(base_url.trim())
            .with_context(|| format!("invalid identity provider url '{base_url}'"))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.base_url
            .join(path)
            .map_err(|err| AuthError::Unexpected(format!("invalid endpoint '{path}': {err}")))
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, AuthError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(%url, "calling identity provider");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_up(&self, profile: &SignUpPayload) -> Result<Identity, AuthError> {
        self.post(SIGN_UP_PATH, profile).await
    }

    async fn sign_in(&self, credentials: &SignInPayload) -> Result<AuthSession, AuthError> {
        let session: Option<AuthSession> = self.post(SIGN_IN_PATH, credentials).await?;
        session.ok_or_else(|| AuthError::InvalidCredentials("no session returned".to_string()))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AuthError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|err| AuthError::Unexpected(format!("invalid provider response: {err}")));
    }

    let body = response.text().await.unwrap_or_default();
    if let Ok(api_error) = serde_json::from_str::<ApiError>(&body) {
        return Err(api_error.into());
    }
    Err(status_error(status, body))
}

fn status_error(status: StatusCode, body: String) -> AuthError {
    let detail = if body.trim().is_empty() {
        status.to_string()
    } else {
        format!("{status}: {}", body.trim())
    };
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AuthError::InvalidCredentials(detail),
        StatusCode::CONFLICT => AuthError::AlreadyRegistered(detail),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => AuthError::Rejected(detail),
        StatusCode::TOO_MANY_REQUESTS => AuthError::Unavailable(detail),
        s if s.is_server_error() => AuthError::Unavailable(detail),
        _ => AuthError::Unexpected(detail),
    }
}

fn transport_error(err: reqwest::Error) -> AuthError {
    if err.is_connect() || err.is_timeout() {
        AuthError::Unavailable(err.to_string())
    } else {
        AuthError::from_message(err.to_string())
    }
}
