use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{EntryKind, FieldSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The remove handler bound to one entry when it is built.
///
/// Hosts attach this to the entry's remove button and hand it back to the
/// controller on click, so no lookup by button identity is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveAction {
    pub kind: EntryKind,
    pub entry: EntryId,
}

/// One value slot of an entry, paired with its schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValue {
    pub spec: &'static FieldSpec,
    pub value: String,
}

/// A structured entry node, ready for insertion into its group container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub id: EntryId,
    pub kind: EntryKind,
    pub fields: Vec<FieldValue>,
    pub remove: RemoveAction,
}

impl Entry {
    /// Builds a blank entry from the kind's schema.
    pub fn blank(kind: EntryKind) -> Self {
        let id = EntryId::new();
        Self {
            id,
            kind,
            fields: kind
                .fields()
                .iter()
                .map(|spec| FieldValue {
                    spec,
                    value: String::new(),
                })
                .collect(),
            remove: RemoveAction { kind, entry: id },
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.spec.name == name)
            .map(|f| f.value.as_str())
    }

    /// Mutable access to the value slot called `name`.
    pub fn slot_mut(&mut self, name: &str) -> Option<&mut String> {
        self.fields
            .iter_mut()
            .find(|f| f.spec.name == name)
            .map(|f| &mut f.value)
    }

    /// Sets a field. Returns false when the kind has no such field.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.slot_mut(name) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Builder-style setter used when prefilling; unknown names are ignored.
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
    }

    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.value.trim().is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Typed views
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub responsibilities: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub graduation_date: String,
    pub gpa: Option<String>,
}

impl ExperienceEntry {
    pub fn from_entry(entry: &Entry) -> Option<Self> {
        if entry.kind != EntryKind::Experience {
            return None;
        }
        let field = |name: &str| entry.get(name).unwrap_or_default().to_string();
        Some(Self {
            title: field("exp_title"),
            company: field("exp_company"),
            start_date: field("exp_start"),
            end_date: field("exp_end"),
            responsibilities: field("exp_responsibilities"),
        })
    }
}

impl EducationEntry {
    pub fn from_entry(entry: &Entry) -> Option<Self> {
        if entry.kind != EntryKind::Education {
            return None;
        }
        let field = |name: &str| entry.get(name).unwrap_or_default().to_string();
        let gpa = field("edu_gpa");
        Some(Self {
            degree: field("edu_degree"),
            institution: field("edu_institution"),
            graduation_date: field("edu_date"),
            gpa: (!gpa.trim().is_empty()).then_some(gpa),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_entry_follows_schema() {
        let entry = Entry::blank(EntryKind::Experience);
        let names: Vec<&str> = entry.fields.iter().map(|f| f.spec.name).collect();
        assert_eq!(
            names,
            vec!["exp_title", "exp_company", "exp_start", "exp_end", "exp_responsibilities"]
        );
        assert!(entry.is_blank());
    }

    #[test]
    fn test_remove_action_is_bound_to_entry() {
        let entry = Entry::blank(EntryKind::Education);
        assert_eq!(entry.remove.entry, entry.id);
        assert_eq!(entry.remove.kind, EntryKind::Education);
    }

    #[test]
    fn test_set_unknown_field_is_rejected() {
        let mut entry = Entry::blank(EntryKind::Skill);
        assert!(!entry.set("edu_gpa", "4.0"));
        assert!(entry.set("skills", "Rust"));
        assert_eq!(entry.get("skills"), Some("Rust"));
    }

    #[test]
    fn test_clear_empties_every_field() {
        let mut entry = Entry::blank(EntryKind::Experience)
            .with("exp_title", "Engineer")
            .with("exp_responsibilities", "Shipped things");
        entry.clear();
        assert!(entry.is_blank());
        assert_eq!(entry.fields.len(), 5);
    }

    #[test]
    fn test_education_view_drops_blank_gpa() {
        let entry = Entry::blank(EntryKind::Education)
            .with("edu_degree", "BSc")
            .with("edu_gpa", "  ");
        let view = EducationEntry::from_entry(&entry).expect("education entry");
        assert_eq!(view.degree, "BSc");
        assert_eq!(view.gpa, None);
    }

    #[test]
    fn test_typed_view_rejects_other_kind() {
        let entry = Entry::blank(EntryKind::Skill);
        assert!(ExperienceEntry::from_entry(&entry).is_none());
    }
}
