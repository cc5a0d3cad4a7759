//! Shared test utilities for stackref.

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::ai::GenerativeClient;
use crate::error::{Result, StackError};

/// Table-driven test case structure.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
    pub should_panic: bool,
}

/// Run table-driven tests with detailed logging.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F) -> std::result::Result<(), String>
where
    I: std::fmt::Debug + Clone + std::panic::RefUnwindSafe,
    E: std::fmt::Debug + PartialEq,
    F: Fn(I) -> E + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    for case in cases {
        let start = std::time::Instant::now();
        println!("[TEST] Running: {}", case.name);
        println!("[TEST] Input: {:?}", case.input);

        let result = std::panic::catch_unwind(|| test_fn(case.input.clone()));
        let elapsed = start.elapsed();

        if case.should_panic {
            if result.is_ok() {
                return Err(format!("Test '{}' expected panic", case.name));
            }
            println!("[TEST] Expected panic occurred");
            println!("[TEST] PASSED: {} ({:?})\n", case.name, elapsed);
            continue;
        }

        let Ok(actual) = result else {
            return Err(format!("Test '{}' panicked unexpectedly", case.name));
        };

        println!("[TEST] Expected: {:?}", case.expected);
        println!("[TEST] Actual: {:?}", actual);
        println!("[TEST] Timing: {:?}", elapsed);

        if actual != case.expected {
            return Err(format!(
                "Test '{}' failed: expected {:?}, got {:?}",
                case.name, case.expected, actual
            ));
        }
        println!("[TEST] PASSED: {} ({:?})\n", case.name, elapsed);
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Recorded {
    calls: usize,
    last_prompt: Option<String>,
    last_credential: Option<String>,
}

/// In-process [`GenerativeClient`] with scripted behavior.
///
/// Accepts every credential and model unless told otherwise, and records
/// each call so tests can assert that no network work happened.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    reply: Option<String>,
    rejected_models: HashSet<String>,
    rejected_credentials: HashSet<String>,
    reject_all: bool,
    fail_generation: bool,
    recorded: Mutex<Recorded>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text returned for every accepted call.
    #[must_use]
    pub fn respond_with(mut self, reply: &str) -> Self {
        self.reply = Some(reply.to_string());
        self
    }

    #[must_use]
    pub fn reject_model(mut self, model: &str) -> Self {
        self.rejected_models.insert(model.to_string());
        self
    }

    #[must_use]
    pub fn reject_credential(mut self, credential: &str) -> Self {
        self.rejected_credentials.insert(credential.to_string());
        self
    }

    /// Every call fails, so no credential validates.
    #[must_use]
    pub fn reject_all(mut self) -> Self {
        self.reject_all = true;
        self
    }

    /// Validation probes succeed but real prompts fail.
    #[must_use]
    pub fn fail_generation(mut self) -> Self {
        self.fail_generation = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.recorded.lock().calls
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.recorded.lock().last_prompt.clone()
    }

    pub fn last_credential(&self) -> Option<String> {
        self.recorded.lock().last_credential.clone()
    }
}

impl GenerativeClient for ScriptedClient {
    fn generate_content(&self, credential: &str, model: &str, prompt: &str) -> Result<String> {
        {
            let mut recorded = self.recorded.lock();
            recorded.calls += 1;
            recorded.last_prompt = Some(prompt.to_string());
            recorded.last_credential = Some(credential.to_string());
        }

        if self.reject_all
            || self.rejected_models.contains(model)
            || self.rejected_credentials.contains(credential)
        {
            return Err(StackError::ExternalCall(format!("{model} HTTP 400: API key not valid")));
        }
        if self.fail_generation && prompt != crate::ai::VALIDATION_PROMPT {
            return Err(StackError::ExternalCall(format!("{model} request timed out")));
        }
        Ok(self
            .reply
            .clone()
            .unwrap_or_else(|| format!("scripted reply from {model}")))
    }
}
