//! Backend operations the session core depends on

use async_trait::async_trait;
use quill_http::{Claims, ClientError, Profile, ProfileUpdate, QuillClient};

/// The slice of the hosted backend used by hydration, sign-out and profile setup.
///
/// Futures are not `Send`: the browser client runs on a single-threaded event loop.
#[async_trait(?Send)]
pub trait SessionBackend {
    /// Identity behind the current session
    async fn get_claims(&self) -> Result<Claims, ClientError>;

    /// Profile row for a user, `None` when it does not exist
    async fn select_profile_by_id(&self, id: &str) -> Result<Option<Profile>, ClientError>;

    /// Update the profile row for a user and return the stored result
    async fn update_profile_by_id(
        &self,
        id: &str,
        update: &ProfileUpdate,
    ) -> Result<Profile, ClientError>;

    /// Revoke the current session
    async fn sign_out(&self) -> Result<(), ClientError>;
}

#[async_trait(?Send)]
impl SessionBackend for QuillClient {
    async fn get_claims(&self) -> Result<Claims, ClientError> {
        Self::get_claims(self).await
    }

    async fn select_profile_by_id(&self, id: &str) -> Result<Option<Profile>, ClientError> {
        Self::select_profile_by_id(self, id).await
    }

    async fn update_profile_by_id(
        &self,
        id: &str,
        update: &ProfileUpdate,
    ) -> Result<Profile, ClientError> {
        Self::update_profile_by_id(self, id, update).await
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        Self::sign_out(self).await
    }
}
