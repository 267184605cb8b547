//! Backend client and session tokens

use crate::config::BackendConfig;
use gloo::storage::{LocalStorage, Storage};
use once_cell::sync::Lazy;
use quill_core::SessionConfig;
use quill_http::{AuthTokens, ClientError, QuillClient};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};
use wasm_bindgen::JsValue;

/// Client shared by every page; re-keyed whenever the tokens change
static CLIENT: Lazy<Mutex<Option<QuillClient>>> = Lazy::new(|| Mutex::new(None));

/// Current client, acting for the signed-in user when there is one
pub fn get_client() -> Result<QuillClient, ClientError> {
    let mut lock = CLIENT.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(client) = lock.as_ref() {
        return Ok(client.clone());
    }

    let client = build_client(stored_tokens().as_ref())?;
    *lock = Some(client.clone());
    Ok(client)
}

/// Replace the stored tokens and rebuild the shared client
pub fn set_tokens(tokens: Option<&AuthTokens>) -> Result<(), ClientError> {
    match tokens {
        Some(tokens) => {
            if let Err(e) = LocalStorage::set(SessionConfig::TOKEN_KEY, tokens) {
                warn!(error = %e, "Failed to persist auth tokens");
            }
        }
        None => LocalStorage::delete(SessionConfig::TOKEN_KEY),
    }

    let mut lock = CLIENT.lock().unwrap_or_else(PoisonError::into_inner);
    let client = match lock.as_ref() {
        Some(current) => current.with_access_token(tokens.map(|t| t.access_token.clone())),
        None => build_client(tokens)?,
    };
    *lock = Some(client);
    Ok(())
}

fn build_client(tokens: Option<&AuthTokens>) -> Result<QuillClient, ClientError> {
    let mut builder = QuillClient::builder()
        .base_url(BackendConfig::URL)
        .anon_key(BackendConfig::ANON_KEY);
    if let Some(tokens) = tokens {
        builder = builder.access_token(tokens.access_token.clone());
    }
    builder.build()
}

fn stored_tokens() -> Option<AuthTokens> {
    LocalStorage::get(SessionConfig::TOKEN_KEY).ok()
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Pick up tokens the provider left in the URL fragment after a social login,
/// then strip the fragment so the tokens do not linger in history.
pub fn capture_oauth_redirect() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let Ok(hash) = location.hash() else {
        return;
    };
    let Some(tokens) = AuthTokens::from_fragment(&hash, now()) else {
        return;
    };

    info!("Captured session from sign-in redirect");
    if let Err(e) = set_tokens(Some(&tokens)) {
        warn!(error = %e, "Failed to install captured session");
    }

    let path = location.pathname().unwrap_or_default();
    let search = location.search().unwrap_or_default();
    if let Ok(history) = window.history() {
        let clean = format!("{path}{search}");
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&clean)) {
            warn!(error = ?e, "Failed to clear sign-in fragment");
        }
    }
}

/// Exchange an expired access token for a fresh one. Without a usable refresh token,
/// or when the exchange fails, the tokens are dropped and hydration will see no session.
pub async fn refresh_if_expired() {
    let Some(tokens) = stored_tokens() else {
        return;
    };
    if !tokens.is_expired(now()) {
        return;
    }

    let Some(refresh_token) = tokens.refresh_token.as_deref() else {
        debug!("Access token expired without a refresh token");
        clear_tokens();
        return;
    };

    let result = match get_client() {
        Ok(client) => client.refresh_session(refresh_token).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(fresh) => {
            debug!("Refreshed expired access token");
            if let Err(e) = set_tokens(Some(&fresh)) {
                warn!(error = %e, "Failed to install refreshed session");
            }
        }
        Err(e) => {
            warn!(error = %e, "Token refresh failed");
            clear_tokens();
        }
    }
}

/// Forget the tokens and fall back to an anonymous client
pub fn clear_tokens() {
    if let Err(e) = set_tokens(None) {
        warn!(error = %e, "Failed to reset backend client");
    }
}
