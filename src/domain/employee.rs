use std::{
    fmt,
    hash::{Hash, Hasher},
    num::NonZeroU64,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use super::{
    EmployeeRecord,
    email::{Email, EmailError},
    text::{BlankTextError, FieldText},
};

/// Identifier assigned to an employee by the persistence layer.
///
/// Identifiers start at 1; zero is never a valid id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(NonZeroU64);

impl EmployeeId {
    /// The first identifier handed out by a fresh registry.
    pub const FIRST: Self = Self(NonZeroU64::MIN);

    /// Creates an id from a raw integer, returning `None` for zero.
    #[must_use]
    pub const fn new(id: u64) -> Option<Self> {
        match NonZeroU64::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// Returns the id following this one, or `None` on overflow.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmployeeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Errors that can occur when constructing or modifying an [`Employee`].
///
/// The variants do not say which field was rejected; only a malformed email
/// address is reported separately.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A text field is missing or blank, or the job tenure is negative.
    #[error("All fields must be filled in")]
    InvalidArgument,

    /// Every other field is valid, but the email address is malformed.
    #[error("Invalid email")]
    InvalidEmail,
}

impl From<BlankTextError> for Error {
    fn from(_: BlankTextError) -> Self {
        Self::InvalidArgument
    }
}

impl From<EmailError> for Error {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::Blank(_) => Self::InvalidArgument,
            EmailError::Format(_) => Self::InvalidEmail,
        }
    }
}

/// A single employee on the payroll.
///
/// Values are built through [`Employee::new`], which checks every field before
/// anything is returned. Setters re-run the check for the field they change
/// and leave the employee untouched when it fails.
///
/// Two employees are equal when all fields, including the id, are equal. The
/// [`Hash`] implementation leaves out the email address, which is still
/// consistent with equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EmployeeRecord", into = "EmployeeRecord")]
pub struct Employee {
    id: Option<EmployeeId>,
    first_name: FieldText,
    last_name: FieldText,
    description: FieldText,
    job_years: u32,
    job_title: FieldText,
    email: Email,
}

impl Employee {
    /// Construct a new [`Employee`] from its fields.
    ///
    /// The returned employee has no id; one is assigned when it is saved to a
    /// [`Registry`](crate::Registry).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if any text field is empty or blank,
    /// or if `job_years` is negative. Returns [`Error::InvalidEmail`] if only
    /// the email address is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll::{Employee, Error};
    ///
    /// let frodo = Employee::new(
    ///     "Frodo",
    ///     "Baggins",
    ///     "ring bearer",
    ///     1,
    ///     "Janitor",
    ///     "fbaggins@email.com",
    /// )
    /// .unwrap();
    /// assert_eq!(frodo.first_name(), "Frodo");
    /// assert_eq!(frodo.id(), None);
    ///
    /// let err = Employee::new("Frodo", "Baggins", "ring bearer", 1, "Janitor", "fbaggins@.com");
    /// assert_eq!(err, Err(Error::InvalidEmail));
    /// ```
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        description: impl Into<String>,
        job_years: i32,
        job_title: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, Error> {
        let first_name = FieldText::new(first_name.into())?;
        let last_name = FieldText::new(last_name.into())?;
        let description = FieldText::new(description.into())?;
        let job_title = FieldText::new(job_title.into())?;
        let job_years = checked_job_years(job_years)?;
        // The email is checked last so that a blank field elsewhere always
        // wins over a malformed address.
        let email = Email::new(email.into())?;

        Ok(Self {
            id: None,
            first_name,
            last_name,
            description,
            job_years,
            job_title,
            email,
        })
    }

    /// Assemble an employee from stored fields without validating them.
    ///
    /// Reserved for the persistence boundary, which only hands back rows it
    /// previously stored.
    pub(crate) const fn from_parts_unchecked(
        id: EmployeeId,
        first_name: FieldText,
        last_name: FieldText,
        description: FieldText,
        job_years: u32,
        job_title: FieldText,
        email: Email,
    ) -> Self {
        Self {
            id: Some(id),
            first_name,
            last_name,
            description,
            job_years,
            job_title,
            email,
        }
    }

    /// Returns the id assigned by the persistence layer, if any.
    #[must_use]
    pub const fn id(&self) -> Option<EmployeeId> {
        self.id
    }

    pub(crate) const fn set_id(&mut self, id: EmployeeId) {
        self.id = Some(id);
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Returns the free-form role description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the number of years in the job.
    #[must_use]
    pub const fn job_years(&self) -> u32 {
        self.job_years
    }

    /// Returns the job title.
    #[must_use]
    pub fn job_title(&self) -> &str {
        self.job_title.as_str()
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Replaces the first name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name is blank.
    pub fn set_first_name(&mut self, first_name: impl Into<String>) -> Result<(), Error> {
        self.first_name = FieldText::new(first_name.into())?;
        Ok(())
    }

    /// Replaces the last name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name is blank.
    pub fn set_last_name(&mut self, last_name: impl Into<String>) -> Result<(), Error> {
        self.last_name = FieldText::new(last_name.into())?;
        Ok(())
    }

    /// Replaces the role description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the description is blank.
    pub fn set_description(&mut self, description: impl Into<String>) -> Result<(), Error> {
        self.description = FieldText::new(description.into())?;
        Ok(())
    }

    /// Replaces the number of years in the job.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `job_years` is negative.
    pub fn set_job_years(&mut self, job_years: i32) -> Result<(), Error> {
        self.job_years = checked_job_years(job_years)?;
        Ok(())
    }

    /// Replaces the job title.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the title is blank.
    pub fn set_job_title(&mut self, job_title: impl Into<String>) -> Result<(), Error> {
        self.job_title = FieldText::new(job_title.into())?;
        Ok(())
    }

    /// Replaces the email address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the address is blank and
    /// [`Error::InvalidEmail`] if it is malformed.
    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), Error> {
        self.email = Email::new(email.into())?;
        Ok(())
    }
}

fn checked_job_years(job_years: i32) -> Result<u32, Error> {
    u32::try_from(job_years).map_err(|_| Error::InvalidArgument)
}

impl Hash for Employee {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.first_name.hash(state);
        self.last_name.hash(state);
        self.description.hash(state);
        self.job_years.hash(state);
        self.job_title.hash(state);
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Employee{id=")?;
        match self.id {
            Some(id) => write!(f, "{id}")?,
            None => f.write_str("null")?,
        }
        write!(
            f,
            ", firstName='{}', lastName='{}', description='{}', jobYears='{}', jobTitle='{}', \
             email='{}'}}",
            self.first_name,
            self.last_name,
            self.description,
            self.job_years,
            self.job_title,
            self.email
        )
    }
}

impl TryFrom<EmployeeRecord> for Employee {
    type Error = Error;

    fn try_from(record: EmployeeRecord) -> Result<Self, Self::Error> {
        record.validate()
    }
}

impl From<Employee> for EmployeeRecord {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            first_name: Some(employee.first_name.into_inner()),
            last_name: Some(employee.last_name.into_inner()),
            description: Some(employee.description.into_inner()),
            // Stored tenure always came from a non-negative `i32`.
            job_years: Some(i32::try_from(employee.job_years).unwrap_or(i32::MAX)),
            job_title: Some(employee.job_title.into_inner()),
            email: Some(employee.email.into_inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::hash::{BuildHasher, RandomState};

    use test_case::test_case;

    use super::*;

    fn frodo() -> Employee {
        Employee::new(
            "Frodo",
            "Baggins",
            "ring bearer",
            1,
            "Janitor",
            "fbaggins@email.com",
        )
        .unwrap()
    }

    #[test]
    fn valid_fields_round_trip_through_accessors() {
        let employee = frodo();
        assert_eq!(employee.id(), None);
        assert_eq!(employee.first_name(), "Frodo");
        assert_eq!(employee.last_name(), "Baggins");
        assert_eq!(employee.description(), "ring bearer");
        assert_eq!(employee.job_years(), 1);
        assert_eq!(employee.job_title(), "Janitor");
        assert_eq!(employee.email(), "fbaggins@email.com");
    }

    #[test]
    fn zero_job_years_is_accepted() {
        let employee =
            Employee::new("Sam", "Gamgee", "gardener", 0, "Gardener", "sam@shire.org").unwrap();
        assert_eq!(employee.job_years(), 0);
    }

    #[test_case("", "Baggins", "ring bearer", "Janitor"; "empty first name")]
    #[test_case("Frodo", "", "ring bearer", "Janitor"; "empty last name")]
    #[test_case("Frodo", "Baggins", "", "Janitor"; "empty description")]
    #[test_case("Frodo", "Baggins", "ring bearer", ""; "empty job title")]
    #[test_case("  ", "Baggins", "ring bearer", "Janitor"; "blank first name")]
    #[test_case("Frodo", "\t", "ring bearer", "Janitor"; "blank last name")]
    #[test_case("Frodo", "Baggins", " \n ", "Janitor"; "blank description")]
    #[test_case("Frodo", "Baggins", "ring bearer", "   "; "blank job title")]
    fn blank_text_is_invalid_argument(first: &str, last: &str, description: &str, title: &str) {
        let result = Employee::new(first, last, description, 1, title, "fbaggins@email.com");
        assert_eq!(result, Err(Error::InvalidArgument));
    }

    #[test_case(-1; "minus one")]
    #[test_case(i32::MIN; "minimum")]
    fn negative_job_years_is_invalid_argument(job_years: i32) {
        let result = Employee::new(
            "Frodo",
            "Baggins",
            "ring bearer",
            job_years,
            "Janitor",
            "fbaggins@email.com",
        );
        assert_eq!(result, Err(Error::InvalidArgument));
    }

    #[test_case(""; "empty")]
    #[test_case("   "; "blank")]
    fn blank_email_is_invalid_argument(email: &str) {
        let result = Employee::new("Frodo", "Baggins", "ring bearer", 1, "Janitor", email);
        assert_eq!(result, Err(Error::InvalidArgument));
    }

    #[test_case("fbaggins"; "no at sign")]
    #[test_case("fbaggins@"; "no domain")]
    #[test_case("fbaggins@.com"; "empty domain label")]
    #[test_case("fbaggins.com"; "no local part")]
    #[test_case("fbaggins@email"; "no tld")]
    fn malformed_email_is_invalid_email(email: &str) {
        let result = Employee::new("Frodo", "Baggins", "ring bearer", 1, "Janitor", email);
        assert_eq!(result, Err(Error::InvalidEmail));
    }

    #[test]
    fn other_failures_take_precedence_over_email() {
        let result = Employee::new("", "Baggins", "ring bearer", 1, "Janitor", "fbaggins");
        assert_eq!(result, Err(Error::InvalidArgument));

        let result = Employee::new("Frodo", "Baggins", "ring bearer", -1, "Janitor", "fbaggins");
        assert_eq!(result, Err(Error::InvalidArgument));
    }

    #[test]
    fn identical_inputs_are_equal() {
        assert_eq!(frodo(), frodo());
    }

    #[test]
    fn setter_change_breaks_equality() {
        let original = frodo();

        let mut changed = frodo();
        changed.set_first_name("Bilbo").unwrap();
        assert_ne!(changed, original);

        let mut changed = frodo();
        changed.set_job_years(2).unwrap();
        assert_ne!(changed, original);

        let mut changed = frodo();
        changed.set_email("frodo@bagend.me").unwrap();
        assert_ne!(changed, original);

        let mut changed = frodo();
        changed.set_id(EmployeeId::FIRST);
        assert_ne!(changed, original);
    }

    #[test]
    fn rejected_setter_leaves_employee_unchanged() {
        let mut employee = frodo();

        assert_eq!(employee.set_last_name(" "), Err(Error::InvalidArgument));
        assert_eq!(employee.set_description(""), Err(Error::InvalidArgument));
        assert_eq!(employee.set_job_title("\t"), Err(Error::InvalidArgument));
        assert_eq!(employee.set_job_years(-3), Err(Error::InvalidArgument));
        assert_eq!(employee.set_email(""), Err(Error::InvalidArgument));
        assert_eq!(employee.set_email("fbaggins@"), Err(Error::InvalidEmail));

        assert_eq!(employee, frodo());
    }

    #[test]
    fn hash_ignores_email() {
        let hasher = RandomState::new();
        let mut other = frodo();
        other.set_email("frodo@bagend.me").unwrap();

        assert_ne!(frodo(), other);
        assert_eq!(hasher.hash_one(frodo()), hasher.hash_one(&other));
    }

    #[test]
    fn display_lists_every_field_in_order() {
        assert_eq!(
            frodo().to_string(),
            "Employee{id=null, firstName='Frodo', lastName='Baggins', description='ring bearer', \
             jobYears='1', jobTitle='Janitor', email='fbaggins@email.com'}"
        );

        let mut employee = frodo();
        employee.set_id(EmployeeId::new(7).unwrap());
        assert!(employee.to_string().starts_with("Employee{id=7, firstName='Frodo'"));
    }

    #[test]
    fn employee_id_rejects_zero() {
        assert_eq!(EmployeeId::new(0), None);
        assert_eq!(EmployeeId::new(1), Some(EmployeeId::FIRST));
        assert_eq!(EmployeeId::FIRST.next().map(EmployeeId::get), Some(2));
        assert_eq!(EmployeeId::new(u64::MAX).unwrap().next(), None);
        assert!("0".parse::<EmployeeId>().is_err());
        assert_eq!("42".parse::<EmployeeId>().unwrap().get(), 42);
    }
}
