//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{Employee, EmployeeFields, EmployeeInput, EmployeePatch, EmployeeQuery};
use crate::db::repository::employee;
use crate::utils::validation::{
    MAX_DATE_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, take_required, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// List employees with optional `type` / `manager` / `q` filters and paging
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<EmployeeQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Employee>>> {
    let Query(query) = query?;
    let filter = query.into_filter(state.config.max_list_limit);
    let employees = employee::find_all(&state.db.pool, &filter).await?;
    Ok(Json(employees))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let id = parse_id(&id)?;
    let employee = employee::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(employee))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let Json(payload) = payload?;
    let fields = validate_input(payload)?;

    let created = employee::create(&state.db.pool, &fields).await?;
    tracing::info!(id = created.id, "Employee created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace every mutable field of an employee
pub async fn replace(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> AppResult<Json<Employee>> {
    let id = parse_id(&id)?;
    let Json(payload) = payload?;
    let fields = validate_input(payload)?;

    let updated = employee::replace(&state.db.pool, id, &fields).await?;
    tracing::info!(id, "Employee replaced");

    Ok(Json(updated))
}

/// Merge the provided fields into an employee
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeePatch>, JsonRejection>,
) -> AppResult<Json<Employee>> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;

    let updated = employee::update(&state.db.pool, id, patch).await?;
    tracing::info!(id, "Employee updated");

    Ok(Json(updated))
}

/// Hard delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;
    employee::delete(&state.db.pool, id).await?;
    tracing::info!(id, "Employee deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Ids are integers; anything else cannot name a row.
fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse().map_err(|_| AppError::NotFound)
}

/// Check required fields (reported together, in column order) and lengths.
fn validate_input(input: EmployeeInput) -> AppResult<EmployeeFields> {
    let mut missing = Vec::new();
    let fields = EmployeeFields {
        first_name: take_required(input.first_name, "FirstName", &mut missing),
        last_name: take_required(input.last_name, "LastName", &mut missing),
        employee_type: take_required(input.employee_type, "EmployeeType", &mut missing),
        email: take_required(input.email, "Email", &mut missing),
        begin_date: take_required(input.begin_date, "BeginDate", &mut missing),
        job_title: take_required(input.job_title, "JobTitle", &mut missing),
        manager: input.manager,
    };
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    validate_required_text(&fields.first_name, "FirstName", MAX_NAME_LEN)?;
    validate_required_text(&fields.last_name, "LastName", MAX_NAME_LEN)?;
    validate_required_text(&fields.employee_type, "EmployeeType", MAX_NAME_LEN)?;
    validate_required_text(&fields.email, "Email", MAX_EMAIL_LEN)?;
    validate_required_text(&fields.begin_date, "BeginDate", MAX_DATE_LEN)?;
    validate_required_text(&fields.job_title, "JobTitle", MAX_NAME_LEN)?;
    validate_optional_text(fields.manager.as_deref(), "Manager", MAX_NAME_LEN)?;

    Ok(fields)
}
