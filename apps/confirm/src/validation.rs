use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::form::{ConfirmForm, FieldRef};
use crate::schema::EntryKind;

/// A user-correctable reason to hold back submission.
///
/// `Display` is the alert text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Please enter your name before proceeding.")]
    MissingName,

    #[error("Please enter at least one skill before proceeding.")]
    NoSkills,
}

impl ValidationFailure {
    /// The input that should receive focus after the alert.
    pub fn focus_target(&self, form: &ConfirmForm) -> Option<FieldRef> {
        match self {
            ValidationFailure::MissingName => Some(FieldRef::name()),
            ValidationFailure::NoSkills => form
                .group(EntryKind::Skill)
                .entries()
                .first()
                .map(|e| FieldRef::entry(EntryKind::Skill, e.id, "skills")),
        }
    }
}

impl Serialize for ValidationFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Runs the pre-submit checks in page order: name first, then skills.
pub fn validate_submission(form: &ConfirmForm) -> Result<(), ValidationFailure> {
    if form.name().trim().is_empty() {
        return Err(ValidationFailure::MissingName);
    }
    if form.filled_skills().is_empty() {
        return Err(ValidationFailure::NoSkills);
    }
    Ok(())
}
