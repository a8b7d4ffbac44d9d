//! In-memory store of saved employees.
//!
//! The [`Registry`] is the only place that assigns employee ids. It keeps
//! nothing on disk.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::domain::{Email, Employee, EmployeeId, EmployeeRecord, Error, FieldText};

/// Saved employees, keyed by the id the registry assigned to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    employees: BTreeMap<EmployeeId, Employee>,

    /// The id the next unsaved employee will receive. `None` once the id
    /// space is exhausted.
    next_id: Option<EmployeeId>,
}

/// Errors that can occur when saving an employee.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum SaveError {
    /// The largest possible id has already been handed out.
    #[error("no employee ids left to assign")]
    IdsExhausted,
}

/// Errors that can occur when seeding the registry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeedError {
    /// The sample employee failed validation.
    #[error(transparent)]
    Invalid(#[from] Error),
    /// The sample employee could not be saved.
    #[error(transparent)]
    Save(#[from] SaveError),
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when restoring a stored row into the registry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RestoreError {
    /// The row has no id.
    #[error("stored employee has no id")]
    MissingId,
    /// The row is missing a field, or holds it as empty text.
    #[error("stored employee {id} is missing '{field}'")]
    MissingField {
        /// Id of the incomplete row.
        id: EmployeeId,
        /// Wire name of the missing field.
        field: &'static str,
    },
    /// The row holds a negative job tenure.
    #[error("stored employee {id} has negative job years ({job_years})")]
    NegativeJobYears {
        /// Id of the offending row.
        id: EmployeeId,
        /// The stored value.
        job_years: i32,
    },
    /// Another employee already holds the id.
    #[error("employee {0} already exists")]
    Duplicate(EmployeeId),
}

impl Registry {
    /// Creates an empty registry that hands out ids starting at 1.
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(EmployeeId::FIRST)
    }

    /// Creates an empty registry that hands out ids starting at `first_id`.
    #[must_use]
    pub const fn starting_at(first_id: EmployeeId) -> Self {
        Self {
            employees: BTreeMap::new(),
            next_id: Some(first_id),
        }
    }

    /// Saves an employee and returns its id.
    ///
    /// An employee without an id receives the next free one. An employee that
    /// already has an id replaces whatever is stored under it.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::IdsExhausted`] if the employee has no id and the
    /// largest possible id is already in use.
    #[instrument(level = "debug", skip_all)]
    pub fn save(&mut self, mut employee: Employee) -> Result<EmployeeId, SaveError> {
        let id = if let Some(id) = employee.id() {
            id
        } else {
            let id = self.allocate_id()?;
            employee.set_id(id);
            id
        };
        self.bump_past(id);

        if self.employees.insert(id, employee).is_some() {
            debug!(%id, "updated employee");
        } else {
            debug!(%id, "saved new employee");
        }
        Ok(id)
    }

    /// Loads a previously stored row without re-validating its contents.
    ///
    /// This is the persistence boundary: rows handed back here were valid when
    /// they were saved, so only their structure is checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the row has no id, is missing a field or holds it
    /// as empty text, has a negative job tenure, or reuses an id that is
    /// already taken.
    #[instrument(level = "debug", skip_all, fields(id = ?record.id))]
    pub fn restore(&mut self, record: EmployeeRecord) -> Result<EmployeeId, RestoreError> {
        let id = record.id.ok_or(RestoreError::MissingId)?;
        if self.employees.contains_key(&id) {
            return Err(RestoreError::Duplicate(id));
        }

        let missing = |field| RestoreError::MissingField { id, field };
        let job_years = record.job_years.ok_or_else(|| missing("jobYears"))?;
        let job_years = u32::try_from(job_years)
            .map_err(|_| RestoreError::NegativeJobYears { id, job_years })?;

        let text = |value: Option<String>, field| {
            value
                .and_then(FieldText::unchecked)
                .ok_or_else(|| missing(field))
        };

        let employee = Employee::from_parts_unchecked(
            id,
            text(record.first_name, "firstName")?,
            text(record.last_name, "lastName")?,
            text(record.description, "description")?,
            job_years,
            text(record.job_title, "jobTitle")?,
            record
                .email
                .and_then(Email::unchecked)
                .ok_or_else(|| missing("email"))?,
        );

        self.bump_past(id);
        self.employees.insert(id, employee);
        Ok(id)
    }

    /// Returns the employee stored under `id`.
    #[must_use]
    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.get(&id)
    }

    /// Removes and returns the employee stored under `id`.
    ///
    /// Ids are not reused after removal.
    pub fn remove(&mut self, id: EmployeeId) -> Option<Employee> {
        let removed = self.employees.remove(&id);
        if removed.is_some() {
            debug!(%id, "removed employee");
        }
        removed
    }

    /// Iterates over the saved employees in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// Returns the number of saved employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns `true` if no employees are saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    fn allocate_id(&mut self) -> Result<EmployeeId, SaveError> {
        let id = self.next_id.ok_or(SaveError::IdsExhausted)?;
        self.next_id = id.next();
        Ok(id)
    }

    /// Ensures ids handed out later never collide with `id`.
    fn bump_past(&mut self, id: EmployeeId) {
        if self.next_id.is_some_and(|next| next <= id) {
            self.next_id = id.next();
        }
    }
}

/// Saves the sample employee the payroll application starts with.
///
/// # Errors
///
/// Returns an error if the sample employee fails validation or no id is
/// left for it.
pub fn seed(registry: &mut Registry) -> Result<EmployeeId, SeedError> {
    let frodo = Employee::new(
        "Frodo",
        "Baggins",
        "ring bearer",
        1,
        "Janitor",
        "fbaggins@email.com",
    )?;
    Ok(registry.save(frodo)?)
}
