//! Frontend configuration

/// Backend connection settings, fixed at build time
pub struct BackendConfig;

impl BackendConfig {
    /// Project URL of the hosted backend
    pub const URL: &'static str = match option_env!("QUILL_BACKEND_URL") {
        Some(url) => url,
        None => "http://localhost:54321",
    };

    /// Public (anon) key of the project
    pub const ANON_KEY: &'static str = match option_env!("QUILL_ANON_KEY") {
        Some(key) => key,
        None => "local-anon-key",
    };

    /// Default `tracing` filter for the browser console
    pub const LOG_FILTER: &'static str = match option_env!("QUILL_LOG") {
        Some(filter) => filter,
        None => "info,quill_core=debug,quill_frontend=debug",
    };
}
