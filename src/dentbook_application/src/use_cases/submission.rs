use std::sync::atomic::{AtomicBool, Ordering};

use dentbook_core::ValidationErrors;

/// Lifecycle of a form between edits and a server answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Editing,
    Validating,
    Submitting,
    Success,
    Rejected,
}

/// Result of one `submit` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    /// Another submission was still in flight; nothing happened.
    Ignored,
    /// Local validation failed, no request was sent.
    Invalid(ValidationErrors),
    Completed(T),
    /// The server refused or could not be reached. Holds the banner text.
    Rejected(String),
}

impl<T> SubmitOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Held for the duration of a submission. A second acquire fails until the
/// first guard is dropped.
pub(crate) struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Phase reported to callers. The stored phase stays `Editing` while a request
/// is out, so a submit future dropped mid-request leaves the form editable.
pub(crate) fn observed_phase(stored: FormPhase, flag: &AtomicBool) -> FormPhase {
    if stored == FormPhase::Editing && flag.load(Ordering::Acquire) {
        FormPhase::Submitting
    } else {
        stored
    }
}
