//! HTTP implementation of [`SessionGateway`].
//!
//! Talks to the session store:
//! - `GET  {base}/sessions`
//! - `POST {base}/session/{session_id}/{approve|reject}`

use async_trait::async_trait;
use reqwest::{Client, Url};
use shield_core::session::{Session, SessionAction, SessionGateway};
use shield_core::{Result, ShieldError};

/// Session gateway backed by `reqwest`.
///
/// The client is used as built; no request timeout is set here.
#[derive(Clone, Debug)]
pub struct HttpSessionGateway {
    client: Client,
    base_url: Url,
}

impl HttpSessionGateway {
    /// Creates a gateway for the backend at `backend_url`.
    ///
    /// # Errors
    ///
    /// `ShieldError::Config` if `backend_url` is not a usable base URL.
    pub fn new(backend_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), backend_url)
    }

    /// Creates a gateway that sends requests through `client`.
    pub fn with_client(client: Client, backend_url: &str) -> Result<Self> {
        let base_url = Url::parse(backend_url)
            .map_err(|e| ShieldError::config(format!("Invalid backend URL '{}': {}", backend_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(ShieldError::config(format!(
                "Backend URL '{}' cannot be used as a base",
                backend_url
            )));
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ShieldError::config(format!("Backend URL '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl SessionGateway for HttpSessionGateway {
    async fn fetch_sessions(&self) -> Result<Vec<Session>> {
        let url = self.endpoint(&["sessions"])?;
        tracing::debug!("[HttpGateway] GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ShieldError::transport(format!("Failed to fetch sessions: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShieldError::transport(format!(
                "Session store returned {} for /sessions",
                status
            )));
        }

        response
            .json::<Vec<Session>>()
            .await
            .map_err(|e| ShieldError::transport(format!("Malformed sessions payload: {}", e)))
    }

    async fn submit_action(&self, session_id: &str, action: SessionAction) -> Result<()> {
        let url = self.endpoint(&["session", session_id, action.as_str()])?;
        tracing::debug!("[HttpGateway] POST {}", url);

        let response = self.client.post(url).send().await.map_err(|e| {
            ShieldError::transport(format!("Failed to {} session {}: {}", action, session_id, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShieldError::action_rejected(
                session_id,
                action.as_str(),
                status.as_u16(),
            ));
        }

        Ok(())
    }
}
