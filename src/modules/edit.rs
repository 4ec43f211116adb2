use derive_more::with_trait::Display;
use serde::{Deserialize, Serialize};
use crate::modules::types::{Entry, EntryId, Submission};
use crate::modules::validation::FieldErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    #[display("add")]
    Add,
    #[display("edit")]
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissSignal {
    #[display("close button")]
    CloseButton,
    /// Click on the backdrop around the edit surface.
    #[display("overlay")]
    Overlay,
    #[display("escape")]
    Escape,
}

/// Contents of the edit surface while an entry is being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub id: EntryId,
    pub values: Submission,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(EditForm),
}

impl EditSession {
    /// Loads `entry` into the surface, replacing whatever was open.
    pub fn open(&mut self, entry: &Entry) {
        *self = EditSession::Editing(EditForm {
            id: entry.id(),
            values: Submission::from(entry),
            errors: FieldErrors::default(),
        });
    }

    pub fn close(&mut self) {
        *self = EditSession::Idle;
    }

    pub fn is_active(&self) -> bool {
        matches!(self, EditSession::Editing(_))
    }

    pub fn editing(&self) -> Option<EntryId> {
        self.form().map(|form| form.id)
    }

    pub fn form(&self) -> Option<&EditForm> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing(form) => Some(form),
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut EditForm> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing(form) => Some(form),
        }
    }
}
