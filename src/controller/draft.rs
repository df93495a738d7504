//! The form draft: the edit buffer behind a page's create/update form.

use crate::models::FieldErrors;

/// Whether the draft creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Creating,
    Editing { id: i64 },
}

/// In-progress edit buffer, one per page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDraft<F> {
    pub mode: FormMode,
    pub fields: F,
    /// Inline validation messages from the last submit attempt
    pub errors: FieldErrors,
}

impl<F: Default> FormDraft<F> {
    /// Empty draft in create mode.
    pub fn new() -> Self {
        Self {
            mode: FormMode::Creating,
            fields: F::default(),
            errors: FieldErrors::new(),
        }
    }

    /// Draft pre-filled from an existing record.
    pub fn editing(id: i64, fields: F) -> Self {
        Self {
            mode: FormMode::Editing { id },
            fields,
            errors: FieldErrors::new(),
        }
    }

    /// Back to an empty create-mode draft.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Editing { .. })
    }
}
