//! The confirmation form document.
//!
//! `ConfirmForm` is the headless stand-in for the page's DOM: personal info,
//! the four repeatable groups, the submit button and the textarea heights.
//! The controller is the only writer once the page is bound.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entry::{Entry, EntryId};
use crate::errors::FormError;
use crate::group::RepeatableFieldGroup;
use crate::schema::{EntryKind, PersonalField, Widget};

// ────────────────────────────────────────────────────────────────────────────
// Field references
// ────────────────────────────────────────────────────────────────────────────

/// Addresses one input on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldRef {
    Personal { field: PersonalField },
    Entry {
        kind: EntryKind,
        entry: EntryId,
        field: String,
    },
}

impl FieldRef {
    pub fn personal(field: PersonalField) -> Self {
        FieldRef::Personal { field }
    }

    pub fn name() -> Self {
        FieldRef::personal(PersonalField::Name)
    }

    pub fn entry(kind: EntryKind, entry: EntryId, field: impl Into<String>) -> Self {
        FieldRef::Entry {
            kind,
            entry,
            field: field.into(),
        }
    }

    /// The form-encoded input name behind this reference.
    pub fn input_name(&self) -> &str {
        match self {
            FieldRef::Personal { field } => field.name(),
            FieldRef::Entry { field, .. } => field,
        }
    }
}

/// Static facts about a referenced input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub widget: Widget,
    pub is_date: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info and submit button
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
}

impl PersonalInfo {
    pub fn get(&self, field: PersonalField) -> &str {
        match field {
            PersonalField::Name => &self.name,
            PersonalField::Email => &self.email,
            PersonalField::Phone => &self.phone,
            PersonalField::Location => &self.location,
            PersonalField::Summary => &self.summary,
        }
    }

    fn get_mut(&mut self, field: PersonalField) -> &mut String {
        match field {
            PersonalField::Name => &mut self.name,
            PersonalField::Email => &mut self.email,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Location => &mut self.location,
            PersonalField::Summary => &mut self.summary,
        }
    }
}

pub const DEFAULT_SUBMIT_LABEL: &str = "Confirm & Continue";

/// The form's submit control.
///
/// `idle_label` is fixed at construction, so repeated submissions never
/// mistake the processing label for the original one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitButton {
    idle_label: String,
    pub label: String,
    pub disabled: bool,
}

impl SubmitButton {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            idle_label: label.clone(),
            label,
            disabled: false,
        }
    }

    pub fn idle_label(&self) -> &str {
        &self.idle_label
    }

    pub fn begin_processing(&mut self, processing_label: &str) {
        self.label = processing_label.to_string();
        self.disabled = true;
    }

    /// Re-enables the button with its idle label.
    pub fn restore(&mut self) {
        self.label = self.idle_label.clone();
        self.disabled = false;
    }
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_LABEL)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Form document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmForm {
    pub personal: PersonalInfo,
    skills: RepeatableFieldGroup,
    experience: RepeatableFieldGroup,
    education: RepeatableFieldGroup,
    certifications: RepeatableFieldGroup,
    pub submit: SubmitButton,
    /// Heights set by auto-resize, in pixels. Absent means the widget default.
    #[serde(skip)]
    textarea_heights: HashMap<FieldRef, u32>,
}

impl Default for ConfirmForm {
    fn default() -> Self {
        Self {
            personal: PersonalInfo::default(),
            skills: RepeatableFieldGroup::new(EntryKind::Skill),
            experience: RepeatableFieldGroup::new(EntryKind::Experience),
            education: RepeatableFieldGroup::new(EntryKind::Education),
            certifications: RepeatableFieldGroup::new(EntryKind::Certification),
            submit: SubmitButton::default(),
            textarea_heights: HashMap::new(),
        }
    }
}

impl ConfirmForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the page as rendered for a freshly parsed CV.
    pub fn prefilled(cv: &CvDraft) -> Self {
        let skills = cv
            .skills
            .iter()
            .map(|s| Entry::blank(EntryKind::Skill).with("skills", s.as_str()))
            .collect();
        let certifications = cv
            .certifications
            .iter()
            .map(|c| Entry::blank(EntryKind::Certification).with("certifications", c.label()))
            .collect();
        let experience = cv
            .experience
            .iter()
            .map(|exp| {
                Entry::blank(EntryKind::Experience)
                    .with("exp_title", exp.title.as_str())
                    .with("exp_company", exp.company.as_str())
                    .with("exp_start", exp.start_date.as_str())
                    .with("exp_end", exp.end_date.as_str())
                    .with(
                        "exp_responsibilities",
                        exp.responsibilities.join(RESPONSIBILITY_SEPARATOR),
                    )
            })
            .collect();
        let education = cv
            .education
            .iter()
            .map(|edu| {
                Entry::blank(EntryKind::Education)
                    .with("edu_degree", edu.degree.as_str())
                    .with("edu_institution", edu.institution.as_str())
                    .with("edu_date", edu.graduation_date.as_str())
                    .with("edu_gpa", gpa_text(edu.gpa.as_ref()))
            })
            .collect();

        Self {
            personal: PersonalInfo {
                name: cv.name.clone(),
                email: cv.email.clone(),
                phone: cv.phone.clone(),
                location: cv.location.clone(),
                summary: cv.summary.clone(),
            },
            skills: RepeatableFieldGroup::from_entries(EntryKind::Skill, skills),
            experience: RepeatableFieldGroup::from_entries(EntryKind::Experience, experience),
            education: RepeatableFieldGroup::from_entries(EntryKind::Education, education),
            certifications: RepeatableFieldGroup::from_entries(
                EntryKind::Certification,
                certifications,
            ),
            ..Self::default()
        }
    }

    pub fn group(&self, kind: EntryKind) -> &RepeatableFieldGroup {
        match kind {
            EntryKind::Skill => &self.skills,
            EntryKind::Experience => &self.experience,
            EntryKind::Education => &self.education,
            EntryKind::Certification => &self.certifications,
        }
    }

    pub fn group_mut(&mut self, kind: EntryKind) -> &mut RepeatableFieldGroup {
        match kind {
            EntryKind::Skill => &mut self.skills,
            EntryKind::Experience => &mut self.experience,
            EntryKind::Education => &mut self.education,
            EntryKind::Certification => &mut self.certifications,
        }
    }

    pub fn name(&self) -> &str {
        &self.personal.name
    }

    /// Trimmed, non-blank skill values in document order.
    pub fn filled_skills(&self) -> Vec<&str> {
        self.skills
            .entries()
            .iter()
            .filter_map(|e| e.get("skills"))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn field_info(&self, field: &FieldRef) -> Result<FieldInfo, FormError> {
        match field {
            FieldRef::Personal { field } => Ok(FieldInfo {
                widget: field.widget(),
                is_date: false,
            }),
            FieldRef::Entry { kind, entry, field } => {
                self.group(*kind)
                    .get(*entry)
                    .ok_or(FormError::UnknownEntry {
                        kind: *kind,
                        entry: *entry,
                    })?;
                let spec = kind
                    .field(field)
                    .ok_or_else(|| FormError::UnknownField(field.clone()))?;
                Ok(FieldInfo {
                    widget: spec.widget,
                    is_date: spec.is_date,
                })
            }
        }
    }

    pub fn value(&self, field: &FieldRef) -> Result<&str, FormError> {
        match field {
            FieldRef::Personal { field } => Ok(self.personal.get(*field)),
            FieldRef::Entry { kind, entry, field } => self
                .group(*kind)
                .get(*entry)
                .ok_or(FormError::UnknownEntry {
                    kind: *kind,
                    entry: *entry,
                })?
                .get(field)
                .ok_or_else(|| FormError::UnknownField(field.clone())),
        }
    }

    pub fn set_value(
        &mut self,
        field: &FieldRef,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let slot = match field {
            FieldRef::Personal { field } => self.personal.get_mut(*field),
            FieldRef::Entry { kind, entry, field } => self
                .group_mut(*kind)
                .get_mut(*entry)
                .ok_or(FormError::UnknownEntry {
                    kind: *kind,
                    entry: *entry,
                })?
                .slot_mut(field)
                .ok_or_else(|| FormError::UnknownField(field.clone()))?,
        };
        *slot = value.into();
        Ok(())
    }

    pub fn textarea_height(&self, field: &FieldRef) -> Option<u32> {
        self.textarea_heights.get(field).copied()
    }

    pub(crate) fn set_textarea_height(&mut self, field: &FieldRef, height: u32) {
        self.textarea_heights.insert(field.clone(), height);
    }

    /// Drops heights of textareas whose entry no longer exists.
    pub(crate) fn forget_entry(&mut self, id: EntryId) {
        self.textarea_heights
            .retain(|field, _| !matches!(field, FieldRef::Entry { entry, .. } if *entry == id));
    }

    /// The name/value pairs the browser would post, in document order.
    ///
    /// Repeated names (`skills`, `exp_title`, …) appear once per entry, which
    /// is how the form handler pairs up experience and education fields.
    pub fn form_data(&self) -> Vec<(String, String)> {
        let personal = PersonalField::ALL
            .iter()
            .map(|f| (f.name().to_string(), self.personal.get(*f).to_string()));

        let entries = EntryKind::ALL.iter().flat_map(|kind| {
            self.group(*kind).entries().iter().flat_map(|entry| {
                entry
                    .fields
                    .iter()
                    .map(|f| (f.spec.name.to_string(), f.value.clone()))
            })
        });

        personal.chain(entries).collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prefill input
// ────────────────────────────────────────────────────────────────────────────

/// Separator used to flatten a responsibilities list into one textarea.
pub const RESPONSIBILITY_SEPARATOR: &str = "; ";

/// A parsed CV as handed to the confirmation page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub certifications: Vec<CertificationDraft>,
    pub experience: Vec<ExperienceDraft>,
    pub education: Vec<EducationDraft>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CertificationDraft {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        issuer: String,
    },
}

impl CertificationDraft {
    pub fn label(&self) -> String {
        match self {
            CertificationDraft::Name(name) => name.clone(),
            CertificationDraft::Detailed { name, issuer } if issuer.trim().is_empty() => {
                name.clone()
            }
            CertificationDraft::Detailed { name, issuer } => format!("{name} ({issuer})"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceDraft {
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationDraft {
    pub degree: String,
    pub institution: String,
    pub graduation_date: String,
    /// Parsers emit this as either a string or a number.
    pub gpa: Option<Value>,
}

fn gpa_text(gpa: Option<&Value>) -> String {
    match gpa {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_cv() -> CvDraft {
        serde_json::from_value(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "skills": ["Rust", "Analytical engines"],
            "certifications": ["AWS SAA", {"name": "CKA", "issuer": "CNCF"}],
            "experience": [{
                "title": "Engineer",
                "company": "Babbage & Co",
                "start_date": "01/1842",
                "end_date": "Present",
                "responsibilities": ["Wrote programs", "Annotated papers"]
            }],
            "education": [{"degree": "Mathematics", "institution": "Home", "gpa": 3.9}]
        }))
        .expect("valid cv json")
    }

    #[test]
    fn test_default_form_has_one_entry_per_group() {
        let form = ConfirmForm::new();
        for kind in EntryKind::ALL {
            assert_eq!(form.group(kind).len(), 1);
        }
        assert!(!form.submit.disabled);
    }

    #[test]
    fn test_prefilled_copies_cv_values() {
        let form = ConfirmForm::prefilled(&sample_cv());
        assert_eq!(form.name(), "Ada Lovelace");
        assert_eq!(form.filled_skills(), vec!["Rust", "Analytical engines"]);

        let exp = &form.group(EntryKind::Experience).entries()[0];
        assert_eq!(
            exp.get("exp_responsibilities"),
            Some("Wrote programs; Annotated papers")
        );

        let certs: Vec<&str> = form
            .group(EntryKind::Certification)
            .entries()
            .iter()
            .filter_map(|e| e.get("certifications"))
            .collect();
        assert_eq!(certs, vec!["AWS SAA", "CKA (CNCF)"]);

        let edu = &form.group(EntryKind::Education).entries()[0];
        assert_eq!(edu.get("edu_gpa"), Some("3.9"));
    }

    #[test]
    fn test_prefilled_empty_sections_keep_one_blank_entry() {
        let form = ConfirmForm::prefilled(&CvDraft {
            name: "Someone".to_string(),
            ..CvDraft::default()
        });
        let experience = form.group(EntryKind::Experience);
        assert_eq!(experience.len(), 1);
        assert!(experience.entries()[0].is_blank());
    }

    #[test]
    fn test_set_and_read_entry_value() {
        let mut form = ConfirmForm::new();
        let id = form.group(EntryKind::Education).entries()[0].id;
        let field = FieldRef::entry(EntryKind::Education, id, "edu_date");
        form.set_value(&field, "062020").expect("known field");
        assert_eq!(form.value(&field), Ok("062020"));
        assert!(form.field_info(&field).expect("info").is_date);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut form = ConfirmForm::new();
        let id = form.group(EntryKind::Skill).entries()[0].id;
        let field = FieldRef::entry(EntryKind::Skill, id, "exp_title");
        assert_eq!(
            form.set_value(&field, "x"),
            Err(FormError::UnknownField("exp_title".to_string()))
        );
    }

    #[test]
    fn test_form_data_repeats_names_per_entry() {
        let mut form = ConfirmForm::prefilled(&sample_cv());
        form.group_mut(EntryKind::Experience).add();

        let data = form.form_data();
        assert_eq!(data[0], ("name".to_string(), "Ada Lovelace".to_string()));
        let skills: Vec<&str> = data
            .iter()
            .filter(|(k, _)| k == "skills")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(skills, vec!["Rust", "Analytical engines"]);
        assert_eq!(data.iter().filter(|(k, _)| k == "exp_title").count(), 2);
    }

    #[test]
    fn test_submit_button_restore_uses_idle_label() {
        let mut button = SubmitButton::new("Continue");
        button.begin_processing("Working");
        button.begin_processing("Working");
        button.restore();
        assert_eq!(button.label, "Continue");
        assert!(!button.disabled);
    }
}
