//! Field schemas for the repeatable sections of the confirmation form.
//!
//! Every entry kind owns an ordered list of `FieldSpec`s. Builders, markup and
//! validation all read from these tables, so the input names below are the
//! markup contract shared with the page template and the form handler.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Markup identifiers
// ────────────────────────────────────────────────────────────────────────────

pub const FORM_CLASS: &str = "confirm-form";
pub const SUBMIT_CLASS: &str = "submit-btn";
pub const REMOVE_CLASS: &str = "remove-btn";
pub const NAME_FIELD: &str = "name";

// ────────────────────────────────────────────────────────────────────────────
// Widgets and field specs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    Input,
    TextArea { rows: u16 },
}

impl Widget {
    /// Minimum visible rows: 1 for plain inputs.
    pub fn rows(self) -> u16 {
        match self {
            Widget::Input => 1,
            Widget::TextArea { rows } => rows,
        }
    }
}

/// One input inside an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Form-encoded name, repeated once per entry.
    pub name: &'static str,
    /// Visible label. Empty for the single-input list kinds.
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
    pub widget: Widget,
    /// Reformatted towards `MM/YYYY` on blur.
    pub is_date: bool,
}

impl FieldSpec {
    const fn input(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            placeholder: None,
            widget: Widget::Input,
            is_date: false,
        }
    }

    const fn date(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            name,
            label,
            placeholder: Some(placeholder),
            widget: Widget::Input,
            is_date: true,
        }
    }

    const fn list_item(name: &'static str, placeholder: &'static str) -> Self {
        Self {
            name,
            label: "",
            placeholder: Some(placeholder),
            widget: Widget::Input,
            is_date: false,
        }
    }

    const fn textarea(name: &'static str, label: &'static str, rows: u16) -> Self {
        Self {
            name,
            label,
            placeholder: None,
            widget: Widget::TextArea { rows },
            is_date: false,
        }
    }

    pub fn is_textarea(&self) -> bool {
        matches!(self.widget, Widget::TextArea { .. })
    }
}

static SKILL_FIELDS: [FieldSpec; 1] = [FieldSpec::list_item("skills", "Enter skill")];

static CERTIFICATION_FIELDS: [FieldSpec; 1] =
    [FieldSpec::list_item("certifications", "Enter certification")];

static EXPERIENCE_FIELDS: [FieldSpec; 5] = [
    FieldSpec::input("exp_title", "Job Title"),
    FieldSpec::input("exp_company", "Company"),
    FieldSpec::date("exp_start", "Start Date", "MM/YYYY"),
    FieldSpec::date("exp_end", "End Date", "MM/YYYY or Present"),
    FieldSpec::textarea("exp_responsibilities", "Key Responsibilities", 3),
];

static EDUCATION_FIELDS: [FieldSpec; 4] = [
    FieldSpec::input("edu_degree", "Degree"),
    FieldSpec::input("edu_institution", "Institution"),
    FieldSpec::date("edu_date", "Graduation Date", "MM/YYYY"),
    FieldSpec::input("edu_gpa", "GPA (Optional)"),
];

// ────────────────────────────────────────────────────────────────────────────
// Entry kinds
// ────────────────────────────────────────────────────────────────────────────

/// The four repeatable sections of the confirmation page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Skill,
    Certification,
    Experience,
    Education,
}

impl EntryKind {
    /// Document order of the sections.
    pub const ALL: [EntryKind; 4] = [
        EntryKind::Skill,
        EntryKind::Experience,
        EntryKind::Education,
        EntryKind::Certification,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Skill => "skill",
            EntryKind::Certification => "certification",
            EntryKind::Experience => "experience",
            EntryKind::Education => "education",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            EntryKind::Skill => &SKILL_FIELDS,
            EntryKind::Certification => &CERTIFICATION_FIELDS,
            EntryKind::Experience => &EXPERIENCE_FIELDS,
            EntryKind::Education => &EDUCATION_FIELDS,
        }
    }

    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Id of the container element the entries are appended to.
    pub fn container_id(self) -> &'static str {
        match self {
            EntryKind::Skill => "skills-list",
            EntryKind::Certification => "certifications-list",
            EntryKind::Experience => "experience-list",
            EntryKind::Education => "education-list",
        }
    }

    pub fn item_class(self) -> &'static str {
        match self {
            EntryKind::Skill | EntryKind::Certification => "list-item",
            EntryKind::Experience => "experience-item",
            EntryKind::Education => "education-item",
        }
    }

    pub fn remove_label(self) -> &'static str {
        match self {
            EntryKind::Skill | EntryKind::Certification => "×",
            EntryKind::Experience => "Remove Experience",
            EntryKind::Education => "Remove Education",
        }
    }

    /// Single-input kinds render as a bare input plus remove button.
    pub fn is_list(self) -> bool {
        matches!(self, EntryKind::Skill | EntryKind::Certification)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info
// ────────────────────────────────────────────────────────────────────────────

/// The non-repeatable inputs at the top of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalField {
    Name,
    Email,
    Phone,
    Location,
    Summary,
}

impl PersonalField {
    pub const ALL: [PersonalField; 5] = [
        PersonalField::Name,
        PersonalField::Email,
        PersonalField::Phone,
        PersonalField::Location,
        PersonalField::Summary,
    ];

    /// Element id and form-encoded name (they coincide for personal fields).
    pub fn name(self) -> &'static str {
        match self {
            PersonalField::Name => NAME_FIELD,
            PersonalField::Email => "email",
            PersonalField::Phone => "phone",
            PersonalField::Location => "location",
            PersonalField::Summary => "summary",
        }
    }

    pub fn widget(self) -> Widget {
        match self {
            PersonalField::Summary => Widget::TextArea { rows: 4 },
            _ => Widget::Input,
        }
    }
}
