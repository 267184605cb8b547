//! Blog API service

use crate::client::get_client;
use quill_http::{NewPost, Post};

/// Blog API service
#[derive(Clone, Copy, Default)]
pub struct BlogApiService;

impl BlogApiService {
    pub const fn new() -> Self {
        Self
    }

    /// All posts, newest first
    pub async fn list_posts(self) -> Result<Vec<Post>, String> {
        let client = get_client().map_err(|e| format!("Failed to get client: {e}"))?;
        client.list_posts().await.map_err(|e| e.to_string())
    }

    /// A single post, `None` when it does not exist
    pub async fn get_post(self, id: i64) -> Result<Option<Post>, String> {
        let client = get_client().map_err(|e| format!("Failed to get client: {e}"))?;
        client.get_post(id).await.map_err(|e| e.to_string())
    }

    /// Publish a post as the signed-in user
    pub async fn create_post(self, post: NewPost) -> Result<Post, String> {
        let client = get_client().map_err(|e| format!("Failed to get client: {e}"))?;
        client.create_post(&post).await.map_err(|e| e.to_string())
    }
}
