//! HTML for entry nodes.
//!
//! Output mirrors the page template: same classes, labels, placeholders and
//! input names. Remove buttons carry `data-kind`/`data-entry-id` so the host
//! can turn a click back into the entry's `RemoveAction`.

use std::fmt::Write;

use crate::entry::{Entry, FieldValue};
use crate::form::{ConfirmForm, SubmitButton};
use crate::group::RepeatableFieldGroup;
use crate::schema::{EntryKind, PersonalField, Widget, FORM_CLASS, REMOVE_CLASS, SUBMIT_CLASS};

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn render_control(out: &mut String, field: &FieldValue) {
    let name = field.spec.name;
    let value = escape(&field.value);
    match field.spec.widget {
        Widget::Input => {
            let _ = write!(out, r#"<input type="text" name="{name}""#);
            if let Some(placeholder) = field.spec.placeholder {
                let _ = write!(out, r#" placeholder="{}""#, escape(placeholder));
            }
            let _ = write!(out, r#" value="{value}">"#);
        }
        Widget::TextArea { rows } => {
            let _ = write!(
                out,
                r#"<textarea name="{name}" rows="{rows}">{value}</textarea>"#
            );
        }
    }
}

fn render_group_field(out: &mut String, field: &FieldValue, extra_class: &str) {
    let _ = write!(
        out,
        r#"<div class="form-group{extra_class}"><label>{}</label>"#,
        escape(field.spec.label)
    );
    render_control(out, field);
    out.push_str("</div>");
}

/// Renders one entry as the node appended to its group container.
pub fn render_entry(entry: &Entry) -> String {
    let kind = entry.kind;
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<div class="{}" data-entry-id="{}">"#,
        kind.item_class(),
        entry.id
    );

    if kind.is_list() {
        for field in &entry.fields {
            render_control(&mut out, field);
        }
    } else {
        out.push_str(r#"<div class="form-grid">"#);
        for field in entry.fields.iter().filter(|f| !f.spec.is_textarea()) {
            render_group_field(&mut out, field, "");
        }
        out.push_str("</div>");
        for field in entry.fields.iter().filter(|f| f.spec.is_textarea()) {
            render_group_field(&mut out, field, " full-width");
        }
    }

    let _ = write!(
        out,
        r#"<button type="button" class="{REMOVE_CLASS}" data-kind="{}" data-entry-id="{}">{}</button>"#,
        entry.remove.kind.as_str(),
        entry.remove.entry,
        kind.remove_label()
    );
    out.push_str("</div>");
    out
}

/// Renders a whole group inside its container element.
pub fn render_group(group: &RepeatableFieldGroup) -> String {
    let mut out = format!(r#"<div id="{}">"#, group.kind().container_id());
    for entry in group.entries() {
        out.push_str(&render_entry(entry));
    }
    out.push_str("</div>");
    out
}

/// Renders the submit control in its current state.
pub fn render_submit_button(button: &SubmitButton) -> String {
    let disabled = if button.disabled { " disabled" } else { "" };
    format!(
        r#"<button type="submit" class="{SUBMIT_CLASS}"{disabled}>{}</button>"#,
        escape(&button.label)
    )
}

fn render_personal_field(out: &mut String, field: PersonalField, value: &str) {
    let name = field.name();
    let value = escape(value);
    match field.widget() {
        Widget::Input => {
            let _ = write!(out, r#"<input type="text" id="{name}" name="{name}" value="{value}">"#);
        }
        Widget::TextArea { rows } => {
            let _ = write!(
                out,
                r#"<textarea id="{name}" name="{name}" rows="{rows}">{value}</textarea>"#
            );
        }
    }
}

/// Renders the whole confirmation form posting to `action`.
pub fn render_form(form: &ConfirmForm, action: &str) -> String {
    let mut out = format!(
        r#"<form class="{FORM_CLASS}" method="post" action="{}">"#,
        escape(action)
    );
    for field in PersonalField::ALL {
        render_personal_field(&mut out, field, form.personal.get(field));
    }
    for kind in EntryKind::ALL {
        out.push_str(&render_group(form.group(kind)));
    }
    out.push_str(&render_submit_button(&form.submit));
    out.push_str("</form>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_entry_markup() {
        let entry = Entry::blank(EntryKind::Skill).with("skills", "Rust");
        let html = render_entry(&entry);
        assert!(html.starts_with(r#"<div class="list-item""#));
        assert!(html.contains(r#"name="skills" placeholder="Enter skill" value="Rust""#));
        assert!(html.contains(r#"class="remove-btn" data-kind="skill""#));
        assert!(html.contains(&format!(r#"data-entry-id="{}""#, entry.id)));
        assert!(html.contains(">×</button>"));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn test_experience_entry_layout() {
        let entry = Entry::blank(EntryKind::Experience);
        let html = render_entry(&entry);
        assert!(html.contains(r#"<div class="experience-item""#));
        assert!(html.contains("<label>Job Title</label>"));
        assert!(html.contains(r#"placeholder="MM/YYYY or Present""#));
        assert!(html.contains(
            r#"<div class="form-group full-width"><label>Key Responsibilities</label><textarea name="exp_responsibilities" rows="3"></textarea></div>"#
        ));
        assert!(html.contains(">Remove Experience</button>"));
    }

    #[test]
    fn test_values_are_escaped() {
        let entry = Entry::blank(EntryKind::Education)
            .with("edu_institution", r#"Smith & "Sons" <School>"#);
        let html = render_entry(&entry);
        assert!(html.contains("Smith &amp; &quot;Sons&quot; &lt;School&gt;"));
        assert!(!html.contains("<School>"));
    }

    #[test]
    fn test_group_container_id() {
        let mut group = RepeatableFieldGroup::new(EntryKind::Certification);
        group.add();
        let html = render_group(&group);
        assert!(html.starts_with(r#"<div id="certifications-list">"#));
        assert_eq!(html.matches(r#"class="list-item""#).count(), 2);
    }

    #[test]
    fn test_form_uses_contract_classes() {
        let mut form = ConfirmForm::new();
        form.personal.name = "Ada <3".to_string();
        let html = render_form(&form, "/confirm_cv");

        assert!(html.starts_with(r#"<form class="confirm-form" method="post" action="/confirm_cv">"#));
        assert!(html.contains(r#"<input type="text" id="name" name="name" value="Ada &lt;3">"#));
        assert!(html.contains(r#"<textarea id="summary" name="summary" rows="4"></textarea>"#));
        for kind in EntryKind::ALL {
            assert!(html.contains(&format!(r#"<div id="{}">"#, kind.container_id())));
        }
        assert!(html.ends_with(r#"<button type="submit" class="submit-btn">Confirm &amp; Continue</button></form>"#));
    }

    #[test]
    fn test_disabled_submit_button() {
        let mut button = SubmitButton::new("Continue");
        button.begin_processing("Processing... Please wait");
        assert_eq!(
            render_submit_button(&button),
            r#"<button type="submit" class="submit-btn" disabled>Processing... Please wait</button>"#
        );
    }
}
