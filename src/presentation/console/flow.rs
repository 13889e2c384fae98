//! The linear form workflow shared by every console controller:
//! load, validate, confirm, then save or cancel.

/// Where a form stands in the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormFlow<T> {
    Idle,
    Editing(T),
    AwaitingConfirmation(T),
}

impl<T> Default for FormFlow<T> {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("No form is being edited")]
    NotEditing,

    #[error("Nothing is awaiting confirmation")]
    NotAwaitingConfirmation,
}

impl<T> FormFlow<T> {
    /// Start editing `form`, dropping whatever was in progress.
    pub fn begin(&mut self, form: T) {
        *self = Self::Editing(form);
    }

    /// Skip editing and ask for confirmation straight away (deletions).
    pub fn ask(&mut self, form: T) {
        *self = Self::AwaitingConfirmation(form);
    }

    pub fn form(&self) -> Option<&T> {
        match self {
            Self::Idle => None,
            Self::Editing(form) | Self::AwaitingConfirmation(form) => Some(form),
        }
    }

    /// The form, only while it is editable.
    pub fn form_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Editing(form) => Some(form),
            _ => None,
        }
    }

    /// Editing -> AwaitingConfirmation.
    pub fn submit(&mut self) -> Result<&T, FlowError> {
        match std::mem::take(self) {
            Self::Editing(form) => {
                *self = Self::AwaitingConfirmation(form);
                self.form().ok_or(FlowError::NotEditing)
            }
            other => {
                *self = other;
                Err(FlowError::NotEditing)
            }
        }
    }

    /// AwaitingConfirmation -> Editing, after a failed validation.
    pub fn reopen(&mut self) {
        if let Self::AwaitingConfirmation(form) = std::mem::take(self) {
            *self = Self::Editing(form);
        }
    }

    /// AwaitingConfirmation -> Idle, handing the confirmed form out.
    pub fn confirm(&mut self) -> Result<T, FlowError> {
        match std::mem::take(self) {
            Self::AwaitingConfirmation(form) => Ok(form),
            other => {
                *self = other;
                Err(FlowError::NotAwaitingConfirmation)
            }
        }
    }

    /// Back to Idle from anywhere. Returns whether anything was dropped.
    pub fn cancel(&mut self) -> bool {
        !matches!(std::mem::take(self), Self::Idle)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    pub fn is_awaiting_confirmation(&self) -> bool {
        matches!(self, Self::AwaitingConfirmation(_))
    }
}
