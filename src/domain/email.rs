use std::{fmt, ops::Deref, str::FromStr, sync::LazyLock};

use regex::Regex;

use super::text::{BlankTextError, FieldText};

/// Shape an address must have: a local part, `@`, a domain, and a 2-6 letter
/// top-level label.
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,6}$";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Returns `true` if `email` matches the accepted address shape.
///
/// The whole string must match; leading or trailing text fails.
///
/// ```
/// use payroll::domain::is_valid_email;
///
/// assert!(is_valid_email("fbaggins@email.com"));
/// assert!(!is_valid_email("fbaggins@.com"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// A validated email address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Email(FieldText);

impl Email {
    /// Creates a new `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError::Blank`] if the string is empty or whitespace-only,
    /// and [`EmailError::Format`] if it does not have the shape of an address.
    pub fn new(s: String) -> Result<Self, EmailError> {
        let text = FieldText::new(s)?;
        if !is_valid_email(&text) {
            return Err(EmailError::Format(text.into_inner()));
        }
        Ok(Self(text))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consumes the address, returning the owned string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0.into_inner()
    }

    pub(crate) fn unchecked(s: String) -> Option<Self> {
        FieldText::unchecked(s).map(Self)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Email {
    type Error = EmailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for Email {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

/// Errors that can occur when constructing an [`Email`].
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum EmailError {
    /// The address is empty or whitespace-only.
    #[error(transparent)]
    Blank(#[from] BlankTextError),

    /// The address does not match the accepted shape.
    #[error("Invalid email '{0}'")]
    Format(String),
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("fbaggins@email.com"; "simple")]
    #[test_case("samwise.gamgee@shire.co.uk"; "dotted domain")]
    #[test_case("pippin+took@mail-server.org"; "plus and hyphen")]
    #[test_case("M_B%99@x.museum"; "six letter tld")]
    #[test_case("a@b.io"; "two letter tld")]
    fn accepts_valid_addresses(input: &str) {
        assert!(is_valid_email(input));
        assert_eq!(Email::new(input.to_string()).unwrap().as_str(), input);
    }

    #[test_case("fbaggins"; "no at sign")]
    #[test_case("fbaggins@"; "no domain")]
    #[test_case("fbaggins@.com"; "empty domain label")]
    #[test_case("fbaggins.com"; "no local part separator")]
    #[test_case("fbaggins@email"; "no tld")]
    #[test_case("fbaggins@email.c"; "one letter tld")]
    #[test_case("fbaggins@email.company"; "seven letter tld")]
    #[test_case("fbaggins@email.c0m"; "digit in tld")]
    #[test_case("frodo@baggins@email.com"; "two at signs")]
    #[test_case(" fbaggins@email.com"; "leading space")]
    #[test_case("fbaggins@email.com\n"; "trailing newline")]
    #[test_case("@email.com"; "empty local part")]
    fn rejects_malformed_addresses(input: &str) {
        assert!(!is_valid_email(input));
        assert_eq!(
            Email::new(input.to_string()),
            Err(EmailError::Format(input.to_string()))
        );
    }

    #[test_case(""; "empty")]
    #[test_case("   "; "spaces")]
    fn rejects_blank_addresses(input: &str) {
        assert_eq!(
            Email::new(input.to_string()),
            Err(EmailError::Blank(BlankTextError))
        );
    }
}
