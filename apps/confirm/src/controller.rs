//! Event handling for the confirmation page.
//!
//! # Lifecycle
//! - `FormController::bind` is called once when the page is ready. It takes
//!   ownership of the form document and a handle to the page host.
//! - The host forwards user events, either through the dedicated methods or
//!   through `dispatch(PageEvent)`.
//! - The only deferred work is the submit watchdog, spawned on the tokio
//!   runtime captured at bind time.
//!
//! The form sits behind `Arc<Mutex<_>>` only so the watchdog task can reach
//! the submit button. Host callbacks are always made with the lock released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::dates::reformat_date;
use crate::entry::{EntryId, RemoveAction};
use crate::errors::FormError;
use crate::form::{ConfirmForm, FieldRef};
use crate::group::Removal;
use crate::host::PageHost;
use crate::schema::{EntryKind, Widget};
use crate::validation::{validate_submission, ValidationFailure};
use crate::watchdog::Watchdog;

// ────────────────────────────────────────────────────────────────────────────
// Events
// ────────────────────────────────────────────────────────────────────────────

/// A form `submit` event. Preventing default keeps the browser on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A `keydown` event as seen by the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(skip)]
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, ctrl: bool, meta: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
            meta,
            default_prevented: false,
        }
    }

    /// Ctrl+Enter, or Cmd+Enter on macOS.
    pub fn is_submit_shortcut(&self) -> bool {
        (self.ctrl || self.meta) && self.key == "Enter"
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Everything a host can forward to the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PageEvent {
    /// Click on a section's add button.
    Add { kind: EntryKind },
    /// Click on an entry's remove button.
    Remove { action: RemoveAction },
    /// The form's submit event (submit button or Enter in a field).
    Submit,
    /// Text typed into a field; carries the field's new value.
    Input { field: FieldRef, value: String },
    Blur { field: FieldRef },
    KeyDown { key: KeyEvent },
    /// The host learned that the posted form was accepted.
    SubmissionCompleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Validation passed; the button is in its loading state.
    Accepted,
    Rejected { failure: ValidationFailure },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted)
    }
}

/// Result of `dispatch`, one variant per event family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum EventOutcome {
    Added { entry: EntryId },
    Removed { removal: Removal },
    /// `proceed` tells the host whether to let the native submission run.
    Submitted { outcome: SubmitOutcome, proceed: bool },
    Resized { height_px: Option<u32> },
    Reformatted { value: Option<String> },
    /// `handled` is false for keys that are not the submit shortcut.
    Key {
        handled: bool,
        outcome: Option<SubmitOutcome>,
    },
    Completed { watchdog_cancelled: bool },
}

// ────────────────────────────────────────────────────────────────────────────
// Controller
// ────────────────────────────────────────────────────────────────────────────

pub struct FormController {
    form: Arc<Mutex<ConfirmForm>>,
    host: Arc<dyn PageHost>,
    config: ControllerConfig,
    watchdog: Watchdog,
}

fn lock(form: &Mutex<ConfirmForm>) -> MutexGuard<'_, ConfirmForm> {
    form.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FormController {
    /// Binds the controller to a page. Call once per page lifecycle, from
    /// inside the tokio runtime that will drive the watchdog.
    pub fn bind(
        form: ConfirmForm,
        host: Arc<dyn PageHost>,
        config: ControllerConfig,
    ) -> Result<Self, FormError> {
        let watchdog = Watchdog::new()?;
        debug!(
            watchdog = ?config.watchdog_delay,
            "Form controller bound"
        );
        Ok(Self {
            form: Arc::new(Mutex::new(form)),
            host,
            config,
            watchdog,
        })
    }

    /// Like `bind`, reading the configuration from the environment.
    pub fn bind_from_env(form: ConfirmForm, host: Arc<dyn PageHost>) -> Result<Self, FormError> {
        let config = ControllerConfig::from_env()?;
        Self::bind(form, host, config)
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// A copy of the current form state.
    pub fn snapshot(&self) -> ConfirmForm {
        lock(&self.form).clone()
    }

    pub fn form_data(&self) -> Vec<(String, String)> {
        lock(&self.form).form_data()
    }

    pub fn value(&self, field: &FieldRef) -> Result<String, FormError> {
        lock(&self.form).value(field).map(str::to_string)
    }

    /// Applies a keystroke-level change to one field.
    pub fn set_value(&self, field: &FieldRef, value: impl Into<String>) -> Result<(), FormError> {
        lock(&self.form).set_value(field, value)
    }

    // ── Repeatable groups ──────────────────────────────────────────────────

    pub fn add_entry(&self, kind: EntryKind) -> EntryId {
        let mut form = lock(&self.form);
        let group = form.group_mut(kind);
        let id = group.add();
        debug!(kind = kind.as_str(), entry = %id, entries = group.len(), "Entry added");
        id
    }

    /// Removes an entry, or clears it when it is the last of its group.
    pub fn remove_entry(&self, kind: EntryKind, entry: EntryId) -> Result<Removal, FormError> {
        let mut form = lock(&self.form);
        let removal = form.group_mut(kind).remove(entry)?;
        if removal == Removal::Removed {
            form.forget_entry(entry);
        }
        debug!(kind = kind.as_str(), entry = %entry, ?removal, "Entry remove requested");
        Ok(removal)
    }

    /// Runs the remove action bound to an entry's button.
    pub fn remove(&self, action: RemoveAction) -> Result<Removal, FormError> {
        self.remove_entry(action.kind, action.entry)
    }

    // ── Submission ─────────────────────────────────────────────────────────

    /// Gates the form's submit event.
    ///
    /// On failure the event is cancelled, the user is alerted and the
    /// offending field focused. On success the submit button switches to its
    /// loading state and the watchdog is (re)armed.
    pub fn validate_on_submit(&mut self, event: &mut SubmitEvent) -> SubmitOutcome {
        let mut form = lock(&self.form);

        if let Err(failure) = validate_submission(&form) {
            event.prevent_default();
            let target = failure.focus_target(&form);
            drop(form);

            warn!(reason = ?failure, "Submission blocked by validation");
            self.host.alert(self.config.alert_text(failure));
            if let Some(field) = target {
                self.host.focus(&field);
            }
            return SubmitOutcome::Rejected { failure };
        }

        form.submit.begin_processing(&self.config.processing_label);
        drop(form);

        self.arm_watchdog();
        info!("Submission accepted; submit button disabled");
        SubmitOutcome::Accepted
    }

    fn arm_watchdog(&mut self) {
        let form = Arc::clone(&self.form);
        let delay = self.config.watchdog_delay;
        self.watchdog.arm(delay, move || {
            let mut form = lock(&form);
            if form.submit.disabled {
                form.submit.restore();
                info!(
                    ?delay,
                    "No submission completion seen; submit button re-enabled"
                );
            }
        });
    }

    /// Completion signal from the host: the loading state is final, so the
    /// watchdog must not undo it.
    pub fn submission_completed(&mut self) -> bool {
        let cancelled = self.watchdog.cancel();
        debug!(watchdog_cancelled = cancelled, "Submission completed");
        cancelled
    }

    pub fn is_watchdog_pending(&self) -> bool {
        self.watchdog.is_pending()
    }

    /// Ctrl/Cmd+Enter anywhere on the page submits the form through the same
    /// validation as the submit button. Returns `None` for any other key.
    pub fn submit_on_shortcut(&mut self, event: &mut KeyEvent) -> Option<SubmitOutcome> {
        if !event.is_submit_shortcut() {
            return None;
        }
        event.prevent_default();

        let mut submit = SubmitEvent::new();
        let outcome = self.validate_on_submit(&mut submit);
        if !submit.default_prevented() {
            self.host.submit();
        }
        Some(outcome)
    }

    // ── Cosmetic handlers ──────────────────────────────────────────────────

    /// Grows a textarea to fit its content. Returns the new height, or `None`
    /// when `field` is not a textarea.
    pub fn auto_resize(&self, field: &FieldRef) -> Result<Option<u32>, FormError> {
        let mut form = lock(&self.form);
        let info = form.field_info(field)?;
        if !matches!(info.widget, Widget::TextArea { .. }) {
            return Ok(None);
        }

        let height = self
            .config
            .textarea
            .fit_height(form.value(field)?, info.widget.rows());
        if form.textarea_height(field) != Some(height) {
            debug!(field = field.input_name(), height, "Textarea resized");
        }
        form.set_textarea_height(field, height);
        Ok(Some(height))
    }

    /// Normalises a date field on blur. Returns the value written back, or
    /// `None` when the field was left untouched.
    pub fn reformat_date_field(&self, field: &FieldRef) -> Result<Option<String>, FormError> {
        let mut form = lock(&self.form);
        if !form.field_info(field)?.is_date {
            return Ok(None);
        }

        let Some(value) = reformat_date(form.value(field)?) else {
            return Ok(None);
        };
        debug!(field = field.input_name(), %value, "Date field normalised");
        form.set_value(field, value.clone())?;
        Ok(Some(value))
    }

    // ── Dispatch ───────────────────────────────────────────────────────────

    /// Routes a page event to its handler.
    pub fn dispatch(&mut self, event: PageEvent) -> Result<EventOutcome, FormError> {
        match event {
            PageEvent::Add { kind } => Ok(EventOutcome::Added {
                entry: self.add_entry(kind),
            }),
            PageEvent::Remove { action } => Ok(EventOutcome::Removed {
                removal: self.remove(action)?,
            }),
            PageEvent::Submit => {
                let mut submit = SubmitEvent::new();
                let outcome = self.validate_on_submit(&mut submit);
                Ok(EventOutcome::Submitted {
                    outcome,
                    proceed: !submit.default_prevented(),
                })
            }
            PageEvent::Input { field, value } => {
                self.set_value(&field, value)?;
                Ok(EventOutcome::Resized {
                    height_px: self.auto_resize(&field)?,
                })
            }
            PageEvent::Blur { field } => Ok(EventOutcome::Reformatted {
                value: self.reformat_date_field(&field)?,
            }),
            PageEvent::KeyDown { mut key } => {
                let outcome = self.submit_on_shortcut(&mut key);
                Ok(EventOutcome::Key {
                    handled: key.default_prevented(),
                    outcome,
                })
            }
            PageEvent::SubmissionCompleted => Ok(EventOutcome::Completed {
                watchdog_cancelled: self.submission_completed(),
            }),
        }
    }
}
