//! Optional generative-AI augmentation.
//!
//! [`AiService`] owns the credential lifecycle (validate, persist, reset)
//! and forwards prompts to a [`GenerativeClient`] once a model has
//! accepted the credential. It never retries and never falls back; callers
//! decide what to show when a call fails.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Result, StackError};

pub mod client;
pub mod prompts;
pub mod store;

pub use client::{DEFAULT_ENDPOINT, GeminiClient, GenerativeClient};
pub use prompts::{Prompt, PromptKind};
pub use store::{
    CREDENTIAL_KEY, CredentialStore, FileCredentialStore, KeyringCredentialStore,
    MemoryCredentialStore,
};

/// Candidate models, most preferred first.
pub const DEFAULT_MODELS: [&str; 4] = [
    "gemini-2.0-flash-exp",
    "gemini-2.5-flash",
    "gemini-2.0-flash",
    "gemini-2.5-pro",
];

/// Prompt used to probe whether a model accepts the credential.
pub const VALIDATION_PROMPT: &str = "Hello";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AiState {
    Uninitialized,
    Validating,
    Ready { model: String },
}

/// Where a piece of narrative text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeSource {
    Ai,
    Rules,
}

#[derive(Debug)]
struct Session {
    state: AiState,
    credential: Option<String>,
}

impl Session {
    const fn empty() -> Self {
        Self {
            state: AiState::Uninitialized,
            credential: None,
        }
    }
}

pub struct AiService {
    client: Arc<dyn GenerativeClient>,
    store: Arc<dyn CredentialStore>,
    models: Vec<String>,
    session: RwLock<Session>,
    /// Held for the duration of every external call.
    calls: Mutex<()>,
}

impl AiService {
    pub fn new(client: Arc<dyn GenerativeClient>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            client,
            store,
            models: DEFAULT_MODELS.iter().map(ToString::to_string).collect(),
            session: RwLock::new(Session::empty()),
            calls: Mutex::new(()),
        }
    }

    /// Replace the candidate model list. An empty list keeps the defaults.
    #[must_use]
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        let models: Vec<String> = models
            .into_iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();
        if !models.is_empty() {
            self.models = models;
        }
        self
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn state(&self) -> AiState {
        self.session.read().state.clone()
    }

    /// Model accepted during the last successful configure.
    pub fn model(&self) -> Option<String> {
        match &self.session.read().state {
            AiState::Ready { model } => Some(model.clone()),
            _ => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.session.read().state, AiState::Ready { .. })
    }

    /// Validate `credential` against the candidate models.
    ///
    /// Returns `true` once some model answers the probe prompt. On failure
    /// the service is left uninitialized and any stored credential is
    /// removed.
    pub fn configure(&self, credential: &str) -> bool {
        let _guard = self.calls.lock();
        self.reset_session();

        let credential = credential.trim();
        if credential.is_empty() {
            warn!(target: "ai", "refusing to configure with a blank credential");
            return false;
        }

        match self.activate(credential) {
            Ok(model) => {
                if let Err(err) = self.store.set(credential) {
                    warn!(target: "ai", error = %err, "failed to persist credential");
                }
                info!(target: "ai", %model, "AI augmentation ready");
                true
            }
            Err(err) => {
                if let Err(clear_err) = self.store.clear() {
                    warn!(target: "ai", error = %clear_err, "failed to clear stored credential");
                }
                warn!(target: "ai", error = %err, "AI configuration failed");
                false
            }
        }
    }

    /// Bring the service up from `default_credential`, else from the store.
    ///
    /// Unlike [`configure`](Self::configure) this never writes or clears
    /// the store.
    pub fn restore(&self, default_credential: Option<&str>) -> bool {
        let _guard = self.calls.lock();
        *self.session.write() = Session::empty();

        if let Some(credential) = default_credential
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            debug!(target: "ai", "restoring AI from configured credential");
            match self.activate(credential) {
                Ok(model) => {
                    info!(target: "ai", %model, "AI augmentation restored");
                    return true;
                }
                Err(err) => {
                    warn!(target: "ai", error = %err, "configured credential was not accepted");
                }
            }
        }

        let stored = match self.store.get() {
            Ok(Some(credential)) if !credential.trim().is_empty() => credential,
            Ok(_) => return false,
            Err(err) => {
                warn!(target: "ai", error = %err, "could not read stored credential");
                return false;
            }
        };
        debug!(target: "ai", "restoring AI from stored credential");
        match self.activate(stored.trim()) {
            Ok(model) => {
                info!(target: "ai", %model, "AI augmentation restored");
                true
            }
            Err(err) => {
                warn!(target: "ai", error = %err, "stored credential was not accepted");
                false
            }
        }
    }

    /// Forget the credential and model. Safe to call repeatedly.
    pub fn reset(&self) {
        let _guard = self.calls.lock();
        self.reset_session();
        info!(target: "ai", "AI augmentation reset");
    }

    /// Single call of the external client with `prompt`.
    ///
    /// Fails with [`StackError::AiUnavailable`] without touching the
    /// network when the service is not ready.
    pub fn generate(&self, prompt: &Prompt<'_>) -> Result<String> {
        let _guard = self.calls.lock();
        let (credential, model) = {
            let session = self.session.read();
            match (&session.state, &session.credential) {
                (AiState::Ready { model }, Some(credential)) => (credential.clone(), model.clone()),
                _ => {
                    return Err(StackError::AiUnavailable(
                        "AI augmentation is not configured".to_string(),
                    ));
                }
            }
        };

        let kind = prompt.kind();
        debug!(target: "ai", kind = kind.as_str(), %model, "generating");
        let text = self
            .client
            .generate_content(&credential, &model, &prompt.render())?;
        debug!(target: "ai", kind = kind.as_str(), chars = text.len(), "generated");
        Ok(text)
    }

    /// Probe `credential` and record the session. Caller holds `calls`.
    fn activate(&self, credential: &str) -> Result<String> {
        self.session.write().state = AiState::Validating;
        match self.validate(credential) {
            Ok(model) => {
                *self.session.write() = Session {
                    state: AiState::Ready {
                        model: model.clone(),
                    },
                    credential: Some(credential.to_string()),
                };
                Ok(model)
            }
            Err(err) => {
                *self.session.write() = Session::empty();
                Err(err)
            }
        }
    }

    fn validate(&self, credential: &str) -> Result<String> {
        for model in &self.models {
            match self
                .client
                .generate_content(credential, model, VALIDATION_PROMPT)
            {
                Ok(_) => return Ok(model.clone()),
                Err(err) => {
                    debug!(target: "ai", %model, error = %err, "model rejected credential");
                }
            }
        }
        Err(StackError::InvalidCredential(format!(
            "none of {} candidate models accepted the credential",
            self.models.len()
        )))
    }

    fn reset_session(&self) {
        *self.session.write() = Session::empty();
        if let Err(err) = self.store.clear() {
            warn!(target: "ai", error = %err, "failed to clear stored credential");
        }
    }
}
