//! Entry form lifecycle
//!
//! A session walks one form through draft entry, preview, submission
//! and the outcome. Every edit recomputes the derived columns and
//! writes the draft through the injected store. An accepted submission,
//! a reset, or emptying every field clears the saved draft.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::draft::DraftStore;
use super::payloads::FormPayload;
use super::submission::Submission;

/// Where a form is in its lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    Empty,
    PartiallyFilled,
    Previewing,
    Submitting,
    Submitted,
    Error,
}

/// An action attempted in a state that does not allow it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {action} while the form is {state:?}")]
pub struct InvalidTransition {
    pub state: FormState,
    pub action: &'static str,
}

/// Why a submission did not go through
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitFailure {
    #[error("validation failed: {0}")]
    Validation(&'static str),
    #[error("network error: {0}")]
    Network(String),
    #[error("submission rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// One form's editing session
#[derive(Debug, Clone)]
pub struct FormSession<P: FormPayload> {
    payload: P,
    state: FormState,
    last_error: Option<SubmitFailure>,
}

impl<P: FormPayload> Default for FormSession<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: FormPayload> FormSession<P> {
    pub fn new() -> Self {
        Self {
            payload: P::default(),
            state: FormState::Empty,
            last_error: None,
        }
    }

    /// Resume from a saved draft, if the store has one
    ///
    /// Derived columns are recomputed once on restore; a draft that no
    /// longer parses is discarded and the form starts empty.
    pub fn restore(store: &impl DraftStore) -> Self {
        let payload = store
            .get(P::KIND.draft_key())
            .and_then(|raw| serde_json::from_str::<P>(&raw).ok())
            .unwrap_or_default()
            .recompute();
        let state = if payload.is_empty() {
            FormState::Empty
        } else {
            FormState::PartiallyFilled
        };
        Self {
            payload,
            state,
            last_error: None,
        }
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn last_error(&self) -> Option<&SubmitFailure> {
        self.last_error.as_ref()
    }

    /// Apply an edit, recompute the derived columns and save the draft
    pub fn edit(
        &mut self,
        store: &mut impl DraftStore,
        apply: impl FnOnce(P) -> P,
    ) -> Result<(), InvalidTransition> {
        match self.state {
            FormState::Previewing | FormState::Submitting => {
                return Err(InvalidTransition {
                    state: self.state,
                    action: "edit",
                })
            }
            _ => {}
        }
        self.payload = apply(std::mem::take(&mut self.payload)).recompute();
        self.last_error = None;
        if self.payload.is_empty() {
            // An emptied form leaves no draft behind
            self.state = FormState::Empty;
            store.remove(P::KIND.draft_key());
        } else {
            self.state = FormState::PartiallyFilled;
            if let Ok(json) = serde_json::to_string(&self.payload) {
                store.put(P::KIND.draft_key(), &json);
            }
        }
        Ok(())
    }

    /// Discard the form and its saved draft
    pub fn reset(&mut self, store: &mut impl DraftStore) -> Result<(), InvalidTransition> {
        match self.state {
            FormState::Previewing | FormState::Submitting => Err(InvalidTransition {
                state: self.state,
                action: "reset",
            }),
            _ => {
                self.payload = P::default();
                self.last_error = None;
                store.remove(P::KIND.draft_key());
                self.state = FormState::Empty;
                Ok(())
            }
        }
    }

    /// Open the preview. There is no validation gate; the operator can
    /// always look at what would be submitted.
    pub fn preview(&mut self) -> Result<(), InvalidTransition> {
        match self.state {
            FormState::Empty | FormState::PartiallyFilled => {
                self.state = FormState::Previewing;
                Ok(())
            }
            state => Err(InvalidTransition {
                state,
                action: "preview",
            }),
        }
    }

    /// Leave the preview without submitting
    pub fn back(&mut self) -> Result<(), InvalidTransition> {
        match self.state {
            FormState::Previewing => {
                self.state = if self.payload.is_empty() {
                    FormState::Empty
                } else {
                    FormState::PartiallyFilled
                };
                Ok(())
            }
            state => Err(InvalidTransition {
                state,
                action: "go back",
            }),
        }
    }

    /// Confirm the preview; the caller sends the returned submission
    pub fn confirm(&mut self) -> Result<Submission, InvalidTransition> {
        match self.state {
            FormState::Previewing => {
                self.state = FormState::Submitting;
                Ok(self.payload.clone().into_submission())
            }
            state => Err(InvalidTransition {
                state,
                action: "confirm",
            }),
        }
    }

    /// The backend accepted the submission: clear the draft and reset
    pub fn complete(&mut self, store: &mut impl DraftStore) -> Result<(), InvalidTransition> {
        match self.state {
            FormState::Submitting => {
                self.payload = P::default();
                self.last_error = None;
                store.remove(P::KIND.draft_key());
                self.state = FormState::Submitted;
                Ok(())
            }
            state => Err(InvalidTransition {
                state,
                action: "complete",
            }),
        }
    }

    /// The submission failed: keep the operator's data and remember why
    pub fn fail(&mut self, failure: SubmitFailure) -> Result<(), InvalidTransition> {
        match self.state {
            FormState::Submitting => {
                self.last_error = Some(failure);
                self.state = FormState::Error;
                Ok(())
            }
            state => Err(InvalidTransition {
                state,
                action: "record a failure",
            }),
        }
    }

    /// Dismiss the submitted or error banner and return to editing
    pub fn acknowledge(&mut self) {
        match self.state {
            FormState::Submitted => self.state = FormState::Empty,
            FormState::Error => {
                self.state = if self.payload.is_empty() {
                    FormState::Empty
                } else {
                    FormState::PartiallyFilled
                };
            }
            _ => {}
        }
    }
}
