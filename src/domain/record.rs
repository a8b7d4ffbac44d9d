use serde::{Deserialize, Serialize};

use super::{Employee, EmployeeId, Error};

/// The wire representation of an employee.
///
/// Field names follow the JSON shape used by the payroll front end. Every
/// field is optional so that incomplete input can be read and then rejected
/// by [`EmployeeRecord::validate`] rather than by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    /// Identifier assigned by the persistence layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Free-form role description.
    #[serde(default)]
    pub description: Option<String>,
    /// Years in the job.
    #[serde(default)]
    pub job_years: Option<i32>,
    /// Job title.
    #[serde(default)]
    pub job_title: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
}

impl EmployeeRecord {
    /// Checks the record and turns it into an [`Employee`].
    ///
    /// A missing field is treated like a blank one. An `id` present in the
    /// record is carried over unchanged.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Employee::new`], with
    /// [`Error::InvalidArgument`] for any missing field.
    pub fn validate(self) -> Result<Employee, Error> {
        let (
            Some(first_name),
            Some(last_name),
            Some(description),
            Some(job_years),
            Some(job_title),
            Some(email),
        ) = (
            self.first_name,
            self.last_name,
            self.description,
            self.job_years,
            self.job_title,
            self.email,
        )
        else {
            return Err(Error::InvalidArgument);
        };

        let mut employee = Employee::new(
            first_name,
            last_name,
            description,
            job_years,
            job_title,
            email,
        )?;
        if let Some(id) = self.id {
            employee.set_id(id);
        }
        Ok(employee)
    }
}
