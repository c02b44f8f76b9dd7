//! Employee Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Employee, EmployeeFields, EmployeeFilter, EmployeePatch};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const SELECT_EMPLOYEE: &str = "SELECT UserId, FirstName, LastName, EmployeeType, Email, BeginDate, JobTitle, Manager FROM Employees";

pub(crate) const INSERT_EMPLOYEE: &str = "INSERT INTO Employees (FirstName, LastName, EmployeeType, Email, BeginDate, JobTitle, Manager) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

const UPDATE_EMPLOYEE: &str = "UPDATE Employees SET FirstName = ?1, LastName = ?2, EmployeeType = ?3, Email = ?4, BeginDate = ?5, JobTitle = ?6, Manager = ?7 WHERE UserId = ?8";

/// List employees matching `filter`, ascending by id.
///
/// `type` and `manager` are exact matches; the search term is a
/// case-insensitive substring match over first name, last name and email.
/// Case folding is SQLite's built-in `LIKE`, which only folds ASCII letters:
/// `q=ÁSHA` does not match `ásha`. `%`, `_` and `\` in the term match literally.
pub async fn find_all(pool: &SqlitePool, filter: &EmployeeFilter) -> RepoResult<Vec<Employee>> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(SELECT_EMPLOYEE);
    let mut sep = " WHERE ";

    if let Some(employee_type) = &filter.employee_type {
        qb.push(sep).push("EmployeeType = ").push_bind(employee_type.as_str());
        sep = " AND ";
    }
    if let Some(manager) = &filter.manager {
        qb.push(sep).push("Manager = ").push_bind(manager.as_str());
        sep = " AND ";
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(search));
        qb.push(sep)
            .push("(FirstName LIKE ")
            .push_bind(pattern.clone())
            .push(r" ESCAPE '\' OR LastName LIKE ")
            .push_bind(pattern.clone())
            .push(r" ESCAPE '\' OR Email LIKE ")
            .push_bind(pattern)
            .push(r" ESCAPE '\')");
    }

    qb.push(" ORDER BY UserId ASC LIMIT ")
        .push_bind(filter.limit)
        .push(" OFFSET ")
        .push_bind(filter.offset);

    let employees = qb.build_query_as::<Employee>().fetch_all(pool).await?;
    Ok(employees)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(&format!("{SELECT_EMPLOYEE} WHERE UserId = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(employee)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Employees")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Insert a new employee and return the stored row.
pub async fn create(pool: &SqlitePool, data: &EmployeeFields) -> RepoResult<Employee> {
    let result = sqlx::query(INSERT_EMPLOYEE)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.employee_type)
        .bind(&data.email)
        .bind(&data.begin_date)
        .bind(&data.job_title)
        .bind(&data.manager)
        .execute(pool)
        .await?;
    let id = result.last_insert_rowid();
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Employee {id} missing after insert")))
}

/// Overwrite every mutable column of an existing employee.
pub async fn replace(pool: &SqlitePool, id: i64, data: &EmployeeFields) -> RepoResult<Employee> {
    let rows = sqlx::query(UPDATE_EMPLOYEE)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.employee_type)
        .bind(&data.email)
        .bind(&data.begin_date)
        .bind(&data.job_title)
        .bind(&data.manager)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))
}

/// Merge `patch` over the stored row and write the result back.
pub async fn update(pool: &SqlitePool, id: i64, patch: EmployeePatch) -> RepoResult<Employee> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))?;
    if patch.is_empty() {
        return Ok(existing);
    }
    let merged = patch.apply_to(existing);
    replace(pool, id, &merged).await
}

/// Hard delete an employee
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM Employees WHERE UserId = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    Ok(())
}

/// Escape LIKE wildcards so the search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
