use std::fmt;

use getset::{CopyGetters, Getters};

use super::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// User-facing feedback for one ledger operation, handed to whatever shows
/// toasts in the UI.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Notification {
    #[getset(get_copy = "pub")]
    kind: NotificationKind,
    #[getset(get = "pub")]
    title: String,
    #[getset(get = "pub")]
    description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Notification {
        Notification {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Notification {
        Notification {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

impl From<&LedgerError> for Notification {
    fn from(err: &LedgerError) -> Self {
        match err {
            LedgerError::Validation(validation) if validation.only_missing() => {
                Notification::error("Missing information", validation.to_string())
            },
            LedgerError::Validation(validation) => Notification::error("Invalid information", validation.to_string()),
            LedgerError::InvalidEntry(_) => Notification::error("Could not record entry", err.to_string()),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
