//! Auth endpoints (`/auth/v1`)

use crate::client::{ClientError, QuillClient};
use crate::types::{AuthTokens, Claims, OAuthProvider, TokenResponse};
use reqwest::Method;
use serde_json::{Value, json};
use url::Url;

impl QuillClient {
    /// Fetch the identity behind the current access token.
    ///
    /// The provider verifies the token; the answer must carry a subject or the call fails
    /// with [`ClientError::MalformedClaims`].
    pub async fn get_claims(&self) -> Result<Claims, ClientError> {
        self.require_session()?;
        let request = self.request(Method::GET, "/auth/v1/user");
        let payload: Value = self.execute(request).await?;
        Ok(Claims::try_from(payload)?)
    }

    /// Revoke the current session on the provider side
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        self.require_session()?;
        let request = self.request(Method::POST, "/auth/v1/logout");
        self.execute_empty(request).await
    }

    /// Exchange a refresh token for a fresh session
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<AuthTokens, ClientError> {
        let request = self
            .request(Method::POST, "/auth/v1/token")
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }));
        let response: TokenResponse = self.execute(request).await?;
        Ok(response.into_tokens(chrono::Utc::now().timestamp()))
    }

    /// URL that starts the social login flow; the provider sends the browser back to
    /// `redirect_to` with the session tokens in the fragment.
    pub fn authorize_url(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<Url, ClientError> {
        let mut url = Url::parse(&format!("{}/auth/v1/authorize", self.base_url()))
            .map_err(|e| ClientError::Configuration(format!("invalid base_url: {e}")))?;
        url.query_pairs_mut()
            .append_pair("provider", provider.as_str())
            .append_pair("redirect_to", redirect_to);
        Ok(url)
    }
}
