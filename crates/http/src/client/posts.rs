//! Blog post endpoints

use crate::client::{ClientError, QuillClient};
use crate::types::{NewPost, Post};
use reqwest::Method;

const POSTS: &str = "/rest/v1/posts";

impl QuillClient {
    /// List posts, newest first
    pub async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        let request = self
            .request(Method::GET, POSTS)
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        self.execute(request).await
    }

    /// Fetch a single post
    pub async fn get_post(&self, id: i64) -> Result<Option<Post>, ClientError> {
        let request = self
            .request(Method::GET, POSTS)
            .query(&[("id", format!("eq.{id}").as_str()), ("select", "*")]);
        let rows: Vec<Post> = self.execute(request).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert a post (requires a signed-in user) and return the stored row
    pub async fn create_post(&self, post: &NewPost) -> Result<Post, ClientError> {
        self.require_session()?;
        let request = self
            .request(Method::POST, POSTS)
            .query(&[("select", "*")])
            .header("Prefer", "return=representation")
            .json(post);
        let rows: Vec<Post> = self.execute(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ClientError::ServerError {
                status: 201,
                message: "insert returned no row".into(),
            })
    }
}
