//! Validated task title.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum title length in characters, after trimming.
pub const MIN_TITLE_LENGTH: usize = 3;

/// Maximum title length in characters, after trimming.
pub const MAX_TITLE_LENGTH: usize = 200;

const ELLIPSIS: &str = "...";

/// Trimmed task title between 3 and 200 characters.
///
/// Lengths are counted in characters, not bytes.
///
/// # Examples
///
///     use taskflow::task::domain::TaskTitle;
///
///     let title = TaskTitle::new("  Write the release notes ")?;
///     assert_eq!(title.as_str(), "Write the release notes");
///     assert_eq!(title.truncated(10), "Write t...");
///     assert!(title.contains("RELEASE"));
///     # Ok::<(), taskflow::task::domain::TaskDomainError>(())
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank value,
    /// [`TaskDomainError::TitleTooShort`] or [`TaskDomainError::TitleTooLong`]
    /// when the trimmed value is out of range.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let length = trimmed.chars().count();
        if length < MIN_TITLE_LENGTH {
            return Err(TaskDomainError::TitleTooShort {
                minimum: MIN_TITLE_LENGTH,
            });
        }
        if length > MAX_TITLE_LENGTH {
            return Err(TaskDomainError::TitleTooLong {
                maximum: MAX_TITLE_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the title length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Returns `true` when the title has no characters. Never true for a
    /// constructed title.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the title cut to at most `max_length` characters.
    ///
    /// A title longer than `max_length` keeps its first `max_length - 3`
    /// characters followed by `...`.
    #[must_use]
    pub fn truncated(&self, max_length: usize) -> String {
        if self.len() <= max_length {
            return self.0.clone();
        }
        let kept: String = self
            .0
            .chars()
            .take(max_length.saturating_sub(ELLIPSIS.len()))
            .collect();
        format!("{kept}{ELLIPSIS}")
    }

    /// Returns the title in upper case.
    #[must_use]
    pub fn to_uppercase(&self) -> String {
        self.0.to_uppercase()
    }

    /// Returns the title in lower case.
    #[must_use]
    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }

    /// Returns `true` when `word` occurs in the title, ignoring case.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.to_lowercase().contains(&word.to_lowercase())
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(title: TaskTitle) -> Self {
        title.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
