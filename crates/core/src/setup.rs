//! Profile setup flow
//!
//! `Loading → {FormReady | RedirectedComplete | FatalError}`;
//! `FormReady → Submitting → {RedirectedComplete | FormReady(with error)}`.

use crate::backend::SessionBackend;
use crate::error::{Result, ValidationError};
use crate::state::SessionAction;
use quill_http::{Claims, Profile, ProfileUpdate};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Message shown when a required field is left empty
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in every field.";

/// Editable fields of the setup form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Bio,
}

impl FormField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Bio => "bio",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub bio: String,
}

impl ProfileForm {
    /// Pre-fill from whatever the stored profile already has
    pub fn from_profile(profile: Option<&Profile>) -> Self {
        let Some(profile) = profile else {
            return Self::default();
        };
        Self {
            name: profile.display_name.clone().unwrap_or_default(),
            email: profile.email.clone().unwrap_or_default(),
            bio: profile.bio.clone().unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Bio => self.bio = value,
        }
    }

    /// All three fields are required
    pub fn validate(&self) -> std::result::Result<ProfileUpdate, ValidationError> {
        let missing: Vec<&'static str> = [
            (FormField::Name, &self.name),
            (FormField::Email, &self.email),
            (FormField::Bio, &self.bio),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field.as_str())
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError::new(MISSING_FIELDS_MESSAGE, missing));
        }

        Ok(ProfileUpdate {
            email: self.email.trim().to_string(),
            display_name: self.name.trim().to_string(),
            bio: self.bio.trim().to_string(),
        })
    }
}

/// Result of loading the setup page
#[derive(Debug, Clone, PartialEq)]
pub enum SetupLoad {
    /// The profile already has a bio; skip the form
    AlreadyComplete,
    /// Show the form for the user behind `claims`
    Form { claims: Claims, form: ProfileForm },
    /// The page went away before the data arrived
    Cancelled,
}

/// Fetch claims, then the profile, and decide whether the form is needed
pub async fn load_setup<B>(backend: &B, cancel: &CancellationToken) -> Result<SetupLoad>
where
    B: SessionBackend + ?Sized,
{
    let claims = backend.get_claims().await;
    if cancel.is_cancelled() {
        return Ok(SetupLoad::Cancelled);
    }
    let claims = claims?;

    let profile = backend.select_profile_by_id(&claims.sub).await;
    if cancel.is_cancelled() {
        return Ok(SetupLoad::Cancelled);
    }
    let profile = profile?;

    if profile.as_ref().is_some_and(Profile::is_complete) {
        debug!(subject = %claims.sub, "Profile already complete");
        return Ok(SetupLoad::AlreadyComplete);
    }

    Ok(SetupLoad::Form {
        form: ProfileForm::from_profile(profile.as_ref()),
        claims,
    })
}

/// Validate the form and write it to the profile row of `subject`
pub async fn submit_setup<B>(backend: &B, subject: &str, form: &ProfileForm) -> Result<Profile>
where
    B: SessionBackend + ?Sized,
{
    let update = form.validate()?;
    let profile = backend.update_profile_by_id(subject, &update).await?;
    info!(subject, "Profile setup completed");
    Ok(profile)
}

/// Where the setup page currently is
#[derive(Debug, Clone, PartialEq)]
pub enum SetupPhase {
    Loading,
    FormReady {
        claims: Claims,
        form: ProfileForm,
        error: Option<String>,
    },
    Submitting {
        claims: Claims,
        form: ProfileForm,
    },
    RedirectedComplete,
    FatalError(String),
}

impl SetupPhase {
    /// Phase after [`load_setup`]; `None` when the load was cancelled
    pub fn loaded(result: Result<SetupLoad>) -> Option<Self> {
        match result {
            Ok(SetupLoad::AlreadyComplete) => Some(Self::RedirectedComplete),
            Ok(SetupLoad::Form { claims, form }) => Some(Self::FormReady {
                claims,
                form,
                error: None,
            }),
            Ok(SetupLoad::Cancelled) => None,
            Err(e) => {
                error!(error = %e, "Profile setup could not start");
                Some(Self::FatalError(e.to_string()))
            }
        }
    }

    /// Edit one form field; other phases are unchanged
    #[must_use]
    pub fn edit(&self, field: FormField, value: String) -> Self {
        match self {
            Self::FormReady {
                claims,
                form,
                error,
            } => {
                let mut form = form.clone();
                form.set(field, value);
                Self::FormReady {
                    claims: claims.clone(),
                    form,
                    error: error.clone(),
                }
            }
            other => other.clone(),
        }
    }

    /// Try to start submitting. Invalid input stays on the form with the validation
    /// message; only a `Submitting` phase should reach the backend.
    #[must_use]
    pub fn begin_submit(&self) -> Self {
        match self {
            Self::FormReady { claims, form, .. } => match form.validate() {
                Ok(_) => Self::Submitting {
                    claims: claims.clone(),
                    form: form.clone(),
                },
                Err(e) => Self::FormReady {
                    claims: claims.clone(),
                    form: form.clone(),
                    error: Some(e.message.to_string()),
                },
            },
            other => other.clone(),
        }
    }

    /// Phase after [`submit_setup`] returned
    #[must_use]
    pub fn submitted(self, result: &Result<Profile>) -> Self {
        match (self, result) {
            (Self::Submitting { .. }, Ok(_)) => Self::RedirectedComplete,
            (Self::Submitting { claims, form }, Err(e)) => Self::FormReady {
                claims,
                form,
                error: Some(e.to_string()),
            },
            (other, _) => other,
        }
    }

    /// Session update for a profile saved while `Submitting`. Commits the claims the
    /// form was loaded with together with the new row, so a session that had failed
    /// closed becomes authenticated again.
    pub fn completion(&self, profile: Profile) -> Option<SessionAction> {
        match self {
            Self::Submitting { claims, .. } if claims.sub == profile.id => {
                Some(SessionAction::Hydrated {
                    claims: claims.clone(),
                    profile: Some(profile),
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{MockBackend, claims, profile};
    use crate::error::SessionError;
    use crate::state::SessionState;
    use quill_http::{ClaimsError, ClientError};

    fn filled() -> ProfileForm {
        ProfileForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            bio: "I write about engines.".into(),
        }
    }

    #[tokio::test]
    async fn incomplete_profile_prefills_form() {
        let mut backend = MockBackend::new();
        backend.expect_get_claims().returning(|| Ok(claims("u1")));
        backend
            .expect_select_profile_by_id()
            .withf(|id| id == "u1")
            .returning(|id| Ok(Some(profile(id, Some("")))));

        let load = load_setup(&backend, &CancellationToken::new()).await.unwrap();

        assert_eq!(
            load,
            SetupLoad::Form {
                claims: claims("u1"),
                form: ProfileForm {
                    name: "User u1".into(),
                    email: "u1@example.com".into(),
                    bio: String::new(),
                },
            }
        );
        assert!(matches!(
            SetupPhase::loaded(Ok(load)),
            Some(SetupPhase::FormReady { error: None, .. })
        ));
    }

    #[tokio::test]
    async fn complete_profile_redirects_without_form() {
        let mut backend = MockBackend::new();
        backend.expect_get_claims().returning(|| Ok(claims("u1")));
        backend
            .expect_select_profile_by_id()
            .returning(|id| Ok(Some(profile(id, Some("hello")))));

        let load = load_setup(&backend, &CancellationToken::new()).await.unwrap();
        assert_eq!(load, SetupLoad::AlreadyComplete);
        assert_eq!(
            SetupPhase::loaded(Ok(load)),
            Some(SetupPhase::RedirectedComplete)
        );
    }

    #[tokio::test]
    async fn missing_row_gives_empty_form() {
        let mut backend = MockBackend::new();
        backend.expect_get_claims().returning(|| Ok(claims("u1")));
        backend.expect_select_profile_by_id().returning(|_| Ok(None));

        let load = load_setup(&backend, &CancellationToken::new()).await.unwrap();
        assert_eq!(
            load,
            SetupLoad::Form {
                claims: claims("u1"),
                form: ProfileForm::default(),
            }
        );
    }

    #[tokio::test]
    async fn malformed_claims_are_fatal() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_claims()
            .returning(|| Err(ClientError::MalformedClaims(ClaimsError::MissingSubject)));
        backend.expect_select_profile_by_id().never();

        let result = load_setup(&backend, &CancellationToken::new()).await;
        assert!(matches!(result, Err(SessionError::MalformedClaims(_))));
        assert!(matches!(
            SetupPhase::loaded(result),
            Some(SetupPhase::FatalError(_))
        ));
    }

    #[tokio::test]
    async fn missing_session_is_fatal() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_claims()
            .returning(|| Err(ClientError::NoSession));

        let result = load_setup(&backend, &CancellationToken::new()).await;
        assert!(matches!(result, Err(SessionError::NoSession)));
    }

    #[tokio::test]
    async fn profile_fetch_failure_is_fatal() {
        let mut backend = MockBackend::new();
        backend.expect_get_claims().returning(|| Ok(claims("u1")));
        backend
            .expect_select_profile_by_id()
            .returning(|_| Err(ClientError::Forbidden("rls".into())));

        let result = load_setup(&backend, &CancellationToken::new()).await;
        assert!(matches!(result, Err(SessionError::Backend(ClientError::Forbidden(_)))));
    }

    #[tokio::test]
    async fn cancelled_load_yields_no_phase() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let mut backend = MockBackend::new();
        backend.expect_get_claims().returning(move || {
            trigger.cancel();
            Ok(claims("u1"))
        });
        backend.expect_select_profile_by_id().never();

        let result = load_setup(&backend, &cancel).await;
        assert_eq!(SetupPhase::loaded(result), None);
    }

    #[test]
    fn validation_rejects_each_empty_field() {
        for field in [FormField::Name, FormField::Email, FormField::Bio] {
            let mut form = filled();
            form.set(field, "   ".into());
            let error = form.validate().unwrap_err();
            assert_eq!(error.message, MISSING_FIELDS_MESSAGE);
            assert_eq!(error.missing, vec![field.as_str()]);
        }
    }

    #[test]
    fn validation_builds_trimmed_update() {
        let mut form = filled();
        form.set(FormField::Name, "  Ada  ".into());
        let update = form.validate().unwrap();
        assert_eq!(update.display_name, "Ada");
        assert_eq!(update.email, "ada@example.com");
    }

    #[tokio::test]
    async fn invalid_submission_never_reaches_backend() {
        let mut backend = MockBackend::new();
        backend.expect_update_profile_by_id().never();

        let form = ProfileForm {
            bio: String::new(),
            ..filled()
        };
        let result = submit_setup(&backend, "u1", &form).await;
        assert!(matches!(result, Err(SessionError::Validation(_))));

        let phase = SetupPhase::FormReady {
            claims: claims("u1"),
            form,
            error: None,
        };
        assert_eq!(
            phase.begin_submit(),
            SetupPhase::FormReady {
                claims: claims("u1"),
                form: ProfileForm {
                    bio: String::new(),
                    ..filled()
                },
                error: Some(MISSING_FIELDS_MESSAGE.into()),
            }
        );
    }

    #[tokio::test]
    async fn successful_submission_updates_row_for_subject() {
        let mut backend = MockBackend::new();
        backend
            .expect_update_profile_by_id()
            .withf(|id, update| {
                id == "u1"
                    && update.display_name == "Ada"
                    && update.email == "ada@example.com"
                    && update.bio == "I write about engines."
            })
            .times(1)
            .returning(|id, update| {
                let mut row = profile(id, Some(update.bio.as_str()));
                row.display_name = Some(update.display_name.clone());
                Ok(row)
            });

        let phase = SetupPhase::FormReady {
            claims: claims("u1"),
            form: filled(),
            error: None,
        }
        .begin_submit();
        assert!(matches!(phase, SetupPhase::Submitting { .. }));

        let result = submit_setup(&backend, "u1", &filled()).await;
        assert!(result.as_ref().is_ok_and(Profile::is_complete));

        let saved = result.as_ref().unwrap().clone();
        assert!(matches!(
            phase.completion(saved),
            Some(SessionAction::Hydrated { ref claims, profile: Some(_) }) if claims.sub == "u1"
        ));
        assert_eq!(phase.submitted(&result), SetupPhase::RedirectedComplete);
    }

    #[test]
    fn completion_restores_a_session_that_failed_closed() {
        let mut state = SessionState::default();
        state.apply(SessionAction::HydrationFailed);
        assert!(!state.is_authenticated());

        let phase = SetupPhase::Submitting {
            claims: claims("u1"),
            form: filled(),
        };
        state.apply(phase.completion(profile("u1", Some("hello"))).unwrap());

        assert!(state.is_authenticated());
        assert!(state.is_profile_complete());
        assert_eq!(state.subject(), Some("u1"));
    }

    #[test]
    fn completion_needs_a_matching_submission() {
        let phase = SetupPhase::Submitting {
            claims: claims("u1"),
            form: filled(),
        };
        assert_eq!(phase.completion(profile("u2", Some("hello"))), None);
        assert_eq!(SetupPhase::Loading.completion(profile("u1", Some("hello"))), None);
    }

    #[tokio::test]
    async fn failed_submission_returns_to_form_with_error() {
        let mut backend = MockBackend::new();
        backend
            .expect_update_profile_by_id()
            .returning(|_, _| {
                Err(ClientError::ServerError {
                    status: 503,
                    message: "unavailable".into(),
                })
            });

        let result = submit_setup(&backend, "u1", &filled()).await;
        let phase = SetupPhase::Submitting {
            claims: claims("u1"),
            form: filled(),
        }
        .submitted(&result);

        match phase {
            SetupPhase::FormReady { form, error, .. } => {
                assert_eq!(form, filled());
                assert!(error.is_some_and(|e| e.contains("unavailable")));
            }
            other => panic!("unexpected phase: {other:?}"),
        }
    }

    #[test]
    fn editing_only_touches_form_ready() {
        let phase = SetupPhase::FormReady {
            claims: claims("u1"),
            form: ProfileForm::default(),
            error: None,
        };
        assert_eq!(
            phase.edit(FormField::Bio, "hi".into()),
            SetupPhase::FormReady {
                claims: claims("u1"),
                form: ProfileForm {
                    bio: "hi".into(),
                    ..ProfileForm::default()
                },
                error: None,
            }
        );

        assert_eq!(
            SetupPhase::Loading.edit(FormField::Bio, "x".into()),
            SetupPhase::Loading
        );
    }
}
