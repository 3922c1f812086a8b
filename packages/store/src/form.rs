//! View-local form state: the draft, its error map and the submission flags.
//!
//! A [`FormState`] lives only while a form view is mounted. Input changes merge
//! into the draft without validating; [`FormState::validate`] recomputes the
//! whole error map at submit time.

use crate::validation::{invalid_fields, validate_all, ErrorMap};

/// Ordered field name → value mapping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormDraft {
    fields: Vec<(String, String)>,
}

impl FormDraft {
    /// Creates a draft with the given fields, all empty.
    pub fn with_fields(names: &[&str]) -> Self {
        Self {
            fields: names
                .iter()
                .map(|name| (name.to_string(), String::new()))
                .collect(),
        }
    }

    /// Sets a field, appending it if the draft does not have it yet.
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((field.to_string(), value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Value of a field, empty when absent.
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Draft plus validation and submission bookkeeping for one form view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    pub draft: FormDraft,
    pub errors: ErrorMap,
    pub has_submitted: bool,
    pub submitting: bool,
}

impl FormState {
    pub fn new(draft: FormDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    /// Merges one field into the draft. Does not validate.
    pub fn on_input_change(&mut self, field: &str, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Replaces the error map with a fresh validation of every draft field,
    /// marks the form as submitted and returns the invalid field names.
    pub fn validate(&mut self) -> Vec<String> {
        self.errors = validate_all(&self.draft);
        self.has_submitted = true;
        invalid_fields(&self.errors)
    }

    /// Whether the field should be shown as invalid.
    pub fn is_invalid(&self, field: &str) -> bool {
        self.has_submitted && self.errors.get(field).copied().unwrap_or(false)
    }
}
