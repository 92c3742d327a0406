//! Dynamic form behaviour for the CV confirmation page.
//!
//! The page shows a parsed CV for the user to correct before job analysis.
//! This crate models that form headlessly and drives it from page events:
//! repeatable sections with a floor of one entry, pre-submit validation, a
//! submit-button loading state with a watchdog, textarea auto-resize, date
//! normalisation and the Ctrl/Cmd+Enter shortcut.
//!
//! A UI host implements `PageHost`, binds a `FormController` once the page is
//! ready, and forwards events to it.

pub mod autoresize;
pub mod config;
pub mod controller;
pub mod dates;
pub mod entry;
pub mod errors;
pub mod form;
pub mod group;
pub mod host;
pub mod markup;
pub mod schema;
pub mod telemetry;
pub mod validation;
pub mod watchdog;

pub use config::ControllerConfig;
pub use controller::{
    EventOutcome, FormController, KeyEvent, PageEvent, SubmitEvent, SubmitOutcome,
};
pub use entry::{EducationEntry, Entry, EntryId, ExperienceEntry, RemoveAction};
pub use errors::FormError;
pub use form::{ConfirmForm, CvDraft, FieldRef};
pub use group::{Removal, RepeatableFieldGroup};
pub use host::{PageHost, RecordingHost};
pub use schema::{EntryKind, PersonalField};
pub use validation::ValidationFailure;
