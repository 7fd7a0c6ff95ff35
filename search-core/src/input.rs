//! Query input control.

use crate::query::QueryOutcome;

/// Holds the text being edited and hands it to the state machine on submit.
///
/// The text is never cleared on submission so a query can be refined in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    text: String,
}

impl QueryInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Whether the control accepts edits and submissions.
    pub fn is_enabled(&self, outcome: &QueryOutcome) -> bool {
        !outcome.is_loading()
    }

    /// Whether the submit button is active: enabled and holding non-blank text.
    pub fn submit_enabled(&self, outcome: &QueryOutcome) -> bool {
        self.is_enabled(outcome) && !self.text.trim().is_empty()
    }

    pub fn button_label(&self, outcome: &QueryOutcome) -> &'static str {
        if outcome.is_loading() {
            "Searching..."
        } else {
            "Search"
        }
    }

    /// Raw, untrimmed text to submit, or `None` while a query is loading.
    pub fn submit(&self, outcome: &QueryOutcome) -> Option<String> {
        self.is_enabled(outcome).then(|| self.text.clone())
    }
}
