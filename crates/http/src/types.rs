//! Backend models shared by the client and the session core

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Reasons a provider payload could not be turned into [`Claims`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimsError {
    #[error("claims payload is not a JSON object")]
    NotAnObject,

    #[error("claims payload has no subject identifier")]
    MissingSubject,

    #[error("claims field `{0}` has the wrong type")]
    InvalidField(&'static str),
}

/// Identity of the signed-in user, as issued by the auth provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Stable unique user id
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub user_metadata: Map<String, Value>,
    #[serde(default)]
    pub app_metadata: Map<String, Value>,
}

impl Claims {
    /// Look up a string entry in the provider-supplied user metadata
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.user_metadata.get(key).and_then(Value::as_str)
    }

    /// Best-effort human name from the provider metadata
    pub fn display_name(&self) -> Option<&str> {
        self.metadata_str("full_name")
            .or_else(|| self.metadata_str("name"))
            .or_else(|| self.metadata_str("user_name"))
    }
}

impl TryFrom<Value> for Claims {
    type Error = ClaimsError;

    /// Accepts both token payloads (`sub`) and user records (`id`).
    fn try_from(payload: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut object) = payload else {
            return Err(ClaimsError::NotAnObject);
        };

        let sub = object
            .remove("sub")
            .or_else(|| object.remove("id"))
            .and_then(|value| value.as_str().map(str::to_owned))
            .filter(|sub| !sub.trim().is_empty())
            .ok_or(ClaimsError::MissingSubject)?;

        let email = optional_string(&mut object, "email")?;
        let role = optional_string(&mut object, "role")?;
        let user_metadata = optional_object(&mut object, "user_metadata")?;
        let app_metadata = optional_object(&mut object, "app_metadata")?;

        Ok(Self {
            sub,
            email,
            role,
            user_metadata,
            app_metadata,
        })
    }
}

fn optional_string(
    object: &mut Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ClaimsError> {
    match object.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(_) => Err(ClaimsError::InvalidField(field)),
    }
}

fn optional_object(
    object: &mut Map<String, Value>,
    field: &'static str,
) -> Result<Map<String, Value>, ClaimsError> {
    match object.remove(field) {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(ClaimsError::InvalidField(field)),
    }
}

/// Row of the `profiles` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl Profile {
    /// A profile is complete once its bio has been filled in
    pub fn is_complete(&self) -> bool {
        self.bio.as_deref().is_some_and(|bio| !bio.is_empty())
    }
}

/// Body of a profile update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub email: String,
    pub display_name: String,
    pub bio: String,
}

/// Row of the `posts` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

/// Body of a post insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: String,
}

/// Social login providers offered on the login page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    GitHub,
    Google,
}

impl OAuthProvider {
    pub const ALL: [Self; 2] = [Self::GitHub, Self::Google];

    /// Provider name understood by the authorize endpoint
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::Google => "google",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GitHub => "GitHub",
            Self::Google => "Google",
        }
    }
}

/// Tokens of an authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds)
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl AuthTokens {
    /// Parse the fragment the provider appends to the OAuth redirect
    /// (`access_token=..&refresh_token=..&expires_in=..`). A leading `#` is ignored.
    pub fn from_fragment(fragment: &str, now: i64) -> Option<Self> {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);

        let mut access_token = None;
        let mut refresh_token = None;
        let mut expires_at = None;
        let mut expires_in = None;

        for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
            match key.as_ref() {
                "access_token" => access_token = Some(value.into_owned()),
                "refresh_token" => refresh_token = Some(value.into_owned()),
                "expires_at" => expires_at = value.parse::<i64>().ok(),
                "expires_in" => expires_in = value.parse::<i64>().ok(),
                _ => {}
            }
        }

        let access_token = access_token.filter(|token| !token.is_empty())?;

        Some(Self {
            access_token,
            refresh_token: refresh_token.filter(|token| !token.is_empty()),
            expires_at: expires_at.or_else(|| expires_in.map(|secs| now.saturating_add(secs))),
        })
    }

    /// Whether the access token is past its expiry. Tokens without an expiry never expire.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// Response of the refresh-token grant
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl TokenResponse {
    pub(crate) fn into_tokens(self, now: i64) -> AuthTokens {
        AuthTokens {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self
                .expires_at
                .or_else(|| self.expires_in.map(|secs| now.saturating_add(secs))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn claims_from_user_record() {
        let claims = Claims::try_from(json!({
            "id": "u1",
            "aud": "authenticated",
            "email": "ada@example.com",
            "user_metadata": { "full_name": "Ada Lovelace" }
        }))
        .unwrap();

        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.email.as_deref(), Some("ada@example.com"));
        assert_eq!(claims.display_name(), Some("Ada Lovelace"));
        assert!(claims.app_metadata.is_empty());
    }

    #[test]
    fn claims_prefer_sub_over_id() {
        let claims = Claims::try_from(json!({ "sub": "from-token", "id": "from-user" })).unwrap();
        assert_eq!(claims.sub, "from-token");
    }

    #[test]
    fn claims_require_subject() {
        assert_eq!(
            Claims::try_from(json!({ "email": "x@example.com" })),
            Err(ClaimsError::MissingSubject)
        );
        assert_eq!(
            Claims::try_from(json!({ "sub": "  " })),
            Err(ClaimsError::MissingSubject)
        );
        assert_eq!(
            Claims::try_from(json!({ "sub": 42 })),
            Err(ClaimsError::MissingSubject)
        );
        assert_eq!(Claims::try_from(json!(null)), Err(ClaimsError::NotAnObject));
    }

    #[test]
    fn claims_reject_mistyped_fields() {
        assert_eq!(
            Claims::try_from(json!({ "sub": "u1", "user_metadata": "oops" })),
            Err(ClaimsError::InvalidField("user_metadata"))
        );
    }

    #[test]
    fn profile_completeness_follows_bio() {
        let mut profile: Profile = serde_json::from_value(json!({
            "id": "u1",
            "created_at": "2024-05-01T10:00:00.123456+00:00",
            "email": "ada@example.com",
            "display_name": "Ada",
            "bio": null
        }))
        .unwrap();
        assert!(!profile.is_complete());

        profile.bio = Some(String::new());
        assert!(!profile.is_complete());

        profile.bio = Some("hello".into());
        assert!(profile.is_complete());
    }

    #[test]
    fn tokens_from_redirect_fragment() {
        let tokens = AuthTokens::from_fragment(
            "#access_token=abc.def&expires_in=3600&refresh_token=r1&token_type=bearer",
            1_000,
        )
        .unwrap();

        assert_eq!(tokens.access_token, "abc.def");
        assert_eq!(tokens.refresh_token.as_deref(), Some("r1"));
        assert_eq!(tokens.expires_at, Some(4_600));
        assert!(!tokens.is_expired(4_599));
        assert!(tokens.is_expired(4_600));
    }

    #[test]
    fn huge_expires_in_saturates_instead_of_overflowing() {
        let now = 1_700_000_000;
        let fragment = "#access_token=abc&expires_in=9223372036854775807";
        let tokens = AuthTokens::from_fragment(fragment, now).unwrap();
        assert_eq!(tokens.expires_at, Some(i64::MAX));
        assert!(!tokens.is_expired(now));

        let refreshed = TokenResponse {
            access_token: "abc".into(),
            refresh_token: None,
            expires_in: Some(i64::MAX),
            expires_at: None,
        }
        .into_tokens(now);
        assert_eq!(refreshed.expires_at, Some(i64::MAX));
        assert!(!refreshed.is_expired(now));
    }

    #[test]
    fn fragment_without_access_token_is_ignored() {
        assert!(AuthTokens::from_fragment("#error=access_denied", 0).is_none());
        assert!(AuthTokens::from_fragment("", 0).is_none());
        assert!(AuthTokens::from_fragment("access_token=", 0).is_none());
    }
}
