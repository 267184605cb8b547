//! Serialization boundary between the session and durable storage

use crate::config::SessionConfig;
use crate::error::StorageError;
use crate::state::SessionState;
use crate::storage::StateStorage;
use quill_http::{Claims, Profile};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What survives a reload. The loading flag is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PersistedSession {
    #[serde(default)]
    pub claims: Option<Claims>,
    #[serde(default)]
    pub profile: Option<Profile>,
}

impl From<&SessionState> for PersistedSession {
    fn from(state: &SessionState) -> Self {
        Self {
            claims: state.claims().cloned(),
            profile: state.profile().cloned(),
        }
    }
}

/// Write the session under [`SessionConfig::STORE_KEY`]
pub fn save(storage: &impl StateStorage, state: &SessionState) -> Result<(), StorageError> {
    let serialized = serde_json::to_string(&PersistedSession::from(state))
        .map_err(|e| StorageError(format!("Failed to serialize session: {e}")))?;
    storage.save(SessionConfig::STORE_KEY, &serialized)
}

/// Read the persisted session; missing or corrupt data yields an empty session.
/// The result is always in the loading state.
pub fn restore(storage: &impl StateStorage) -> SessionState {
    let Some(stored) = storage.load(SessionConfig::STORE_KEY) else {
        return SessionState::default();
    };

    match serde_json::from_str::<PersistedSession>(&stored) {
        Ok(persisted) => SessionState::restored(persisted.claims, persisted.profile),
        Err(e) => {
            warn!(error = %e, "Discarding unreadable persisted session");
            storage.remove(SessionConfig::STORE_KEY);
            SessionState::default()
        }
    }
}

/// Remove the persisted session entirely
pub fn forget(storage: &impl StateStorage) {
    storage.remove(SessionConfig::STORE_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{claims, profile};
    use crate::state::SessionAction;
    use crate::storage::MemoryStorage;

    #[test]
    fn loading_flag_is_not_persisted() {
        let storage = MemoryStorage::new();
        let mut state = SessionState::default();
        state.apply(SessionAction::Hydrated {
            claims: claims("u1"),
            profile: Some(profile("u1", Some("hello"))),
        });

        save(&storage, &state).unwrap();
        let raw = storage.load(SessionConfig::STORE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("loading").is_none());
        assert_eq!(value["claims"]["sub"], "u1");

        let restored = restore(&storage);
        assert!(restored.is_loading());
        assert_eq!(restored.subject(), Some("u1"));
        assert!(restored.is_profile_complete());
    }

    #[test]
    fn missing_entry_restores_empty() {
        let restored = restore(&MemoryStorage::new());
        assert!(restored.is_loading());
        assert!(!restored.is_authenticated());
    }

    #[test]
    fn corrupt_entry_is_discarded() {
        let storage = MemoryStorage::new();
        storage.save(SessionConfig::STORE_KEY, "{not json").unwrap();

        let restored = restore(&storage);
        assert!(!restored.is_authenticated());
        assert!(storage.load(SessionConfig::STORE_KEY).is_none());
    }

    #[test]
    fn restore_drops_mismatched_profile() {
        let storage = MemoryStorage::new();
        let persisted = PersistedSession {
            claims: Some(claims("u1")),
            profile: Some(profile("u2", Some("hi"))),
        };
        storage
            .save(
                SessionConfig::STORE_KEY,
                &serde_json::to_string(&persisted).unwrap(),
            )
            .unwrap();

        let restored = restore(&storage);
        assert_eq!(restored.subject(), Some("u1"));
        assert!(restored.profile().is_none());
    }

    #[test]
    fn forget_removes_entry() {
        let storage = MemoryStorage::new();
        let state = SessionState::restored(Some(claims("u1")), None);
        save(&storage, &state).unwrap();

        forget(&storage);
        assert!(storage.load(SessionConfig::STORE_KEY).is_none());
        assert!(!restore(&storage).is_authenticated());
    }
}
