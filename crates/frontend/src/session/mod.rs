//! Session state shared across the app

mod context;

pub use context::{SessionContext, SessionProvider, use_session, use_sign_out};
