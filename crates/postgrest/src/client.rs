//! HTTP client for the hosted backend.
//!
//! One [`Client`] is shared process-wide: it owns the connection pool, the
//! project API key, and the current user's bearer token. Repository
//! operations borrow it and compose requests through [`QueryBuilder`].
//!
//! Cancellation: a client is bound to a [`CancellationToken`]. When the
//! token fires, every in-flight send on that client resolves to
//! [`Error::Cancelled`] without side effects. UI scopes derive a child
//! client per screen via [`Client::scoped`].

use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tastelog_core::{Error, Result};
use tokio_util::sync::CancellationToken;

use crate::builder::QueryBuilder;
use crate::config::ClientConfig;
use crate::error;
use crate::storage::Storage;

#[derive(Clone)]
pub struct Client {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    api_key: String,
    auth: Arc<RwLock<Option<String>>>,
    cancel: CancellationToken,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    /// Build a client reusing an existing [`reqwest::Client`] (useful for
    /// sharing the connection pool in tests and tools).
    pub fn with_http(http: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            cancel: CancellationToken::new(),
            auth: Arc::new(RwLock::new(None)),
        }
    }

    /// A clone of this client bound to `cancel`. The pool, API key, and auth
    /// token stay shared; only the cancellation scope changes.
    pub fn scoped(&self, cancel: CancellationToken) -> Self {
        Self {
            cancel,
            ..self.clone()
        }
    }

    /// Replace the bearer token used for subsequent requests. `None` falls
    /// back to the anonymous project key.
    pub fn set_auth_token(&self, token: Option<String>) {
        let mut guard = self.auth.write().unwrap_or_else(|e| e.into_inner());
        *guard = token;
    }

    fn bearer(&self) -> String {
        let guard = self.auth.read().unwrap_or_else(|e| e.into_inner());
        guard.clone().unwrap_or_else(|| self.api_key.clone())
    }

    /// Start a read/mutation against a table or view.
    pub fn from(&self, table: &str) -> QueryBuilder<'_> {
        QueryBuilder::table(self, table)
    }

    /// Start an RPC call. Parameter structs declare their own wire names
    /// (`p_`-prefixed, snake case).
    pub fn rpc<P: Serialize>(&self, function: &str, params: &P) -> QueryBuilder<'_> {
        QueryBuilder::rpc(self, function, params)
    }

    /// The storage gateway for image buckets.
    pub fn storage(&self) -> Storage<'_> {
        Storage::new(self)
    }

    // ---- auth endpoints (non-PostgREST surface) ----

    /// GET a JSON document from an absolute path under the base URL.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.http.get(format!("{}{path}", self.base_url));
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(error::classify_request_error)
    }

    /// POST a JSON body to an absolute path and decode the JSON response.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let request = self.http.post(format!("{}{path}", self.base_url)).json(body);
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(error::classify_request_error)
    }

    /// POST with no body, discarding the response.
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        let request = self.http.post(format!("{}{path}", self.base_url));
        self.send(request).await?;
        Ok(())
    }

    // ---- transport core ----

    /// Attach auth headers, send, race against cancellation, and classify
    /// any failure. Success means a 2xx response.
    pub(crate) async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let request = request
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer());

        let response = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(Error::Cancelled),
            sent = request.send() => sent.map_err(error::classify_request_error)?,
        };

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "backend response");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(error::classify_status(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> Client {
        Client::new(ClientConfig::new("https://example.test", "anon-key"))
    }

    #[tokio::test]
    async fn cancelled_scope_short_circuits_before_transport() {
        let cancel = CancellationToken::new();
        let client = test_client().scoped(cancel.clone());
        cancel.cancel();

        let err = client
            .from("check_ins")
            .select("id")
            .fetch_all::<serde_json::Value>()
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn sibling_scopes_are_unaffected_by_cancellation() {
        let root = test_client();
        let cancelled = root.scoped(CancellationToken::new());
        let token = CancellationToken::new();
        let live = root.scoped(token.clone());
        drop(cancelled);

        // The live scope still owns an unfired token.
        assert!(!token.is_cancelled());
        drop(live);
    }

    #[test]
    fn auth_token_is_shared_across_scopes() {
        let root = test_client();
        let scope = root.scoped(CancellationToken::new());
        root.set_auth_token(Some("jwt".into()));
        assert_eq!(scope.bearer(), "jwt");
        root.set_auth_token(None);
        assert_eq!(scope.bearer(), "anon-key");
    }
}
