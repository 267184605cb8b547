//! Session configuration

/// Storage keys and well-known routes
pub struct SessionConfig;

impl SessionConfig {
    /// Local storage key holding the persisted session
    pub const STORE_KEY: &'static str = "auth-store";

    /// Local storage key holding the auth tokens
    pub const TOKEN_KEY: &'static str = "quill-auth-token";

    /// Landing route for signed-in users
    pub const DEFAULT_ROUTE: &'static str = "/blog";

    pub const LOGIN_ROUTE: &'static str = "/login";

    pub const SETUP_ROUTE: &'static str = "/profile-setup";
}
