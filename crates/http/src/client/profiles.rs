//! Profile table endpoints

use crate::client::{ClientError, QuillClient};
use crate::types::{Profile, ProfileUpdate};
use reqwest::Method;

const PROFILES: &str = "/rest/v1/profiles";

impl QuillClient {
    /// Fetch the profile row for a user; `None` when the row does not exist (or is not
    /// visible to the caller)
    pub async fn select_profile_by_id(&self, id: &str) -> Result<Option<Profile>, ClientError> {
        let request = self
            .request(Method::GET, PROFILES)
            .query(&[("id", format!("eq.{id}").as_str()), ("select", "*")]);
        let rows: Vec<Profile> = self.execute(request).await?;
        Ok(rows.into_iter().next())
    }

    /// Update the profile row for a user and return the stored result
    pub async fn update_profile_by_id(
        &self,
        id: &str,
        update: &ProfileUpdate,
    ) -> Result<Profile, ClientError> {
        let request = self
            .request(Method::PATCH, PROFILES)
            .query(&[("id", format!("eq.{id}").as_str()), ("select", "*")])
            .header("Prefer", "return=representation")
            .json(update);
        let rows: Vec<Profile> = self.execute(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ClientError::NotFound(format!("profile {id}")))
    }
}
