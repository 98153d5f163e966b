use std::io;
use thiserror::Error;

/// Failures surfaced by the diary library. The `Display` text is what the
/// interface shows in its dialogs.
#[derive(Debug, Error)]
pub enum DiaryError {
    #[error("User not found.")]
    UserNotFound,

    #[error("Invalid password.")]
    InvalidPassword,

    #[error("Username already exists.")]
    UsernameTaken,

    #[error("Invalid username '{0}'. Use letters, digits, '_', '-' or '.'.")]
    InvalidUsername(String),

    #[error("Password must not be empty.")]
    EmptyPassword,

    #[error("Entry '{0}' is locked. Unlock it first.")]
    EntryLocked(String),

    #[error("No entry at position {0}.")]
    NoSuchEntry(usize),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed data file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF export failed: {0}")]
    Pdf(String),
}

pub type DiaryResult<T> = Result<T, DiaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let err: DiaryError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        match err {
            DiaryError::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::NotFound),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn dialog_messages() {
        assert_eq!(DiaryError::UserNotFound.to_string(), "User not found.");
        assert_eq!(DiaryError::InvalidPassword.to_string(), "Invalid password.");
        assert_eq!(
            DiaryError::UsernameTaken.to_string(),
            "Username already exists."
        );
        assert_eq!(
            DiaryError::EntryLocked("Monday".into()).to_string(),
            "Entry 'Monday' is locked. Unlock it first."
        );
    }
}
