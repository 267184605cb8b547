//! Quill session core: state, persistence, hydration, route guards and profile setup

pub mod backend;
pub mod blog;
pub mod config;
pub mod error;
pub mod guard;
pub mod hydrate;
pub mod persist;
pub mod setup;
pub mod state;
pub mod storage;
pub mod store;

pub use backend::SessionBackend;
pub use blog::PostDraft;
pub use config::SessionConfig;
pub use error::{Result, SessionError, StorageError, ValidationError};
pub use guard::{GuardDecision, public_only, require_session};
pub use hydrate::{HydrationOutcome, hydrate, sign_out};
pub use setup::{FormField, ProfileForm, SetupLoad, SetupPhase, load_setup, submit_setup};
pub use state::{SessionAction, SessionState};
pub use storage::{MemoryStorage, StateStorage};
pub use store::{SessionObserver, SessionStore};
