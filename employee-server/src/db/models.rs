//! Employee Model
//!
//! Column names and JSON keys are both PascalCase (`UserId`, `FirstName`, ...).

use serde::{Deserialize, Deserializer, Serialize};

/// Stored employee row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "PascalCase")]
#[sqlx(rename_all = "PascalCase")]
pub struct Employee {
    #[serde(rename = "UserId")]
    #[sqlx(rename = "UserId")]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub employee_type: String,
    pub email: String,
    /// ISO date `YYYY-MM-DD`
    pub begin_date: String,
    pub job_title: String,
    /// Manager display name (free text, not a foreign key)
    pub manager: Option<String>,
}

/// Every mutable column of an employee, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFields {
    pub first_name: String,
    pub last_name: String,
    pub employee_type: String,
    pub email: String,
    pub begin_date: String,
    pub job_title: String,
    pub manager: Option<String>,
}

impl From<Employee> for EmployeeFields {
    fn from(e: Employee) -> Self {
        Self {
            first_name: e.first_name,
            last_name: e.last_name,
            employee_type: e.employee_type,
            email: e.email,
            begin_date: e.begin_date,
            job_title: e.job_title,
            manager: e.manager,
        }
    }
}

/// Create / replace payload
///
/// Every field is optional at the wire level so that missing fields can be
/// reported together instead of failing on the first one. `UserId` is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeeInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub employee_type: Option<String>,
    pub email: Option<String>,
    pub begin_date: Option<String>,
    pub job_title: Option<String>,
    pub manager: Option<String>,
}

/// Partial update payload
///
/// `None` leaves a column untouched. `Manager` additionally distinguishes an
/// explicit `null` (`Some(None)`, clears the manager) from an absent key.
/// A `null` for any other field counts as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub employee_type: Option<String>,
    pub email: Option<String>,
    pub begin_date: Option<String>,
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub manager: Option<Option<String>>,
}

impl EmployeePatch {
    /// Merge the provided fields over an existing row.
    pub fn apply_to(self, existing: Employee) -> EmployeeFields {
        let current = EmployeeFields::from(existing);
        EmployeeFields {
            first_name: self.first_name.unwrap_or(current.first_name),
            last_name: self.last_name.unwrap_or(current.last_name),
            employee_type: self.employee_type.unwrap_or(current.employee_type),
            email: self.email.unwrap_or(current.email),
            begin_date: self.begin_date.unwrap_or(current.begin_date),
            job_title: self.job_title.unwrap_or(current.job_title),
            manager: self.manager.unwrap_or(current.manager),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.employee_type.is_none()
            && self.email.is_none()
            && self.begin_date.is_none()
            && self.job_title.is_none()
            && self.manager.is_none()
    }
}

// Present key (even `null`) => Some(..); absent key falls back to `default`.
fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Query string of `GET /employees`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeQuery {
    #[serde(rename = "type")]
    pub employee_type: Option<String>,
    pub manager: Option<String>,
    pub q: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub offset: Option<i64>,
}

// `?limit=` behaves like an absent parameter; anything else must be an integer.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Normalized list filter handed to the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub employee_type: Option<String>,
    pub manager: Option<String>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for EmployeeFilter {
    fn default() -> Self {
        Self {
            employee_type: None,
            manager: None,
            search: None,
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}

impl EmployeeQuery {
    /// Drop empty filters and clamp paging to `0..=max_limit` / `>= 0`.
    pub fn into_filter(self, max_limit: i64) -> EmployeeFilter {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        EmployeeFilter {
            employee_type: non_empty(self.employee_type),
            manager: non_empty(self.manager),
            search: non_empty(self.q),
            limit: self
                .limit
                .unwrap_or(DEFAULT_LIST_LIMIT)
                .clamp(0, max_limit.max(0)),
            offset: self.offset.unwrap_or(0).max(0),
        }
    }
}
