//! Typed client for the Quill backend

pub mod client;
pub mod types;

pub use client::{QuillClient, QuillClientBuilder, error::ClientError};
pub use types::{
    AuthTokens, Claims, ClaimsError, NewPost, OAuthProvider, Post, Profile, ProfileUpdate,
};
