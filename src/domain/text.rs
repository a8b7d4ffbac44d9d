use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
    str::FromStr,
};

use non_empty_string::NonEmptyString;

/// A validated text field that is neither empty nor whitespace-only.
///
/// The text is stored exactly as given; surrounding whitespace is not trimmed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldText(NonEmptyString);

impl FieldText {
    /// Creates a new `FieldText` from a string.
    ///
    /// # Errors
    ///
    /// Returns `BlankTextError` if the string is empty or consists only of
    /// whitespace.
    pub fn new(s: String) -> Result<Self, BlankTextError> {
        // Whitespace-only text counts as empty
        if s.trim().is_empty() {
            return Err(BlankTextError);
        }
        NonEmptyString::new(s).map(Self).map_err(|_| BlankTextError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consumes the field, returning the owned string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0.into_inner()
    }

    /// Wraps a string without the blank check.
    ///
    /// Only the persistence boundary may hold values that skipped validation.
    /// Empty text is still refused.
    pub(crate) fn unchecked(s: String) -> Option<Self> {
        NonEmptyString::new(s).ok().map(Self)
    }
}

impl TryFrom<String> for FieldText {
    type Error = BlankTextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for FieldText {
    type Error = BlankTextError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl AsRef<str> for FieldText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for FieldText {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl Hash for FieldText {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for FieldText {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FieldText {
    type Err = BlankTextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

/// Error returned when a text field is empty or whitespace-only.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
#[error("text must not be empty or blank")]
pub struct BlankTextError;
