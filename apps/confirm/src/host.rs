use std::sync::{Mutex, PoisonError};

use crate::form::FieldRef;

/// The page-side effects the controller needs from its environment.
///
/// A browser binding implements these with `alert()`, `element.focus()` and
/// `form.submit()`. Implementations must not call back into the controller.
pub trait PageHost: Send + Sync {
    /// Shows a blocking message to the user.
    fn alert(&self, message: &str);

    fn focus(&self, field: &FieldRef);

    /// Hands the form to the browser's native submission (the form's action).
    fn submit(&self);
}

/// One recorded `PageHost` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Alert(String),
    Focus(FieldRef),
    Submit,
}

/// A host that records every call in order. Useful for headless drivers and tests.
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Alert(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    pub fn submissions(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, HostCall::Submit))
            .count()
    }

    fn record(&self, call: HostCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl PageHost for RecordingHost {
    fn alert(&self, message: &str) {
        self.record(HostCall::Alert(message.to_string()));
    }

    fn focus(&self, field: &FieldRef) {
        self.record(HostCall::Focus(field.clone()));
    }

    fn submit(&self) {
        self.record(HostCall::Submit);
    }
}
