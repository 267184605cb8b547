//! Post composition

use crate::error::ValidationError;
use quill_http::NewPost;

pub const MISSING_POST_FIELDS_MESSAGE: &str = "A post needs a title and some content.";

/// A post being written, before it has an author
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl PostDraft {
    /// Check the draft and attach the author. Title is trimmed, content kept as typed.
    pub fn validate(&self, author_id: &str) -> Result<NewPost, ValidationError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.content.trim().is_empty() {
            missing.push("content");
        }
        if !missing.is_empty() {
            return Err(ValidationError::new(MISSING_POST_FIELDS_MESSAGE, missing));
        }

        Ok(NewPost {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            author_id: author_id.to_string(),
        })
    }
}
