//! Session endpoints outside the PostgREST surface.

use serde::Deserialize;
use tastelog_core::types::ProfileId;
use tastelog_core::Result;
use tastelog_postgrest::Client;

pub struct AuthRepo;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: ProfileId,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

impl AuthRepo {
    /// The authenticated user behind the current bearer token.
    pub async fn user(client: &Client) -> Result<AuthUser> {
        client.get_json("/auth/v1/user").await
    }

    /// Exchange a refresh token for a new session and install its access
    /// token on the client.
    pub async fn refresh_session(client: &Client, refresh_token: &str) -> Result<AuthSession> {
        let session: AuthSession = client
            .post_json(
                "/auth/v1/token?grant_type=refresh_token",
                &serde_json::json!({ "refresh_token": refresh_token }),
            )
            .await?;
        client.set_auth_token(Some(session.access_token.clone()));
        tracing::debug!("session refreshed");
        Ok(session)
    }

    /// Revoke the session server-side and drop the local token.
    pub async fn sign_out(client: &Client) -> Result<()> {
        client.post_empty("/auth/v1/logout").await?;
        client.set_auth_token(None);
        Ok(())
    }
}
