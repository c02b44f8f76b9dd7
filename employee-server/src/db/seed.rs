//! Schema bootstrap and demo data

use sqlx::SqlitePool;

use super::repository::employee::INSERT_EMPLOYEE;

const CREATE_EMPLOYEES: &str = r#"
CREATE TABLE IF NOT EXISTS Employees (
  UserId       INTEGER PRIMARY KEY AUTOINCREMENT,
  FirstName    TEXT NOT NULL,
  LastName     TEXT NOT NULL,
  EmployeeType TEXT NOT NULL,
  Email        TEXT NOT NULL UNIQUE,
  BeginDate    TEXT NOT NULL,
  JobTitle     TEXT NOT NULL,
  Manager      TEXT
)
"#;

struct SeedEmployee {
    first_name: &'static str,
    last_name: &'static str,
    employee_type: &'static str,
    email: &'static str,
    begin_date: &'static str,
    job_title: &'static str,
    manager: Option<&'static str>,
}

const SEED_EMPLOYEES: [SeedEmployee; 3] = [
    SeedEmployee {
        first_name: "Asha",
        last_name: "Verma",
        employee_type: "FullTime",
        email: "asha.verma@example.com",
        begin_date: "2024-01-10",
        job_title: "Software Engineer",
        manager: Some("Ravi Kumar"),
    },
    SeedEmployee {
        first_name: "Ravi",
        last_name: "Kumar",
        employee_type: "FullTime",
        email: "ravi.kumar@example.com",
        begin_date: "2022-09-01",
        job_title: "Engineering Manager",
        manager: None,
    },
    SeedEmployee {
        first_name: "Meera",
        last_name: "Iyer",
        employee_type: "Contractor",
        email: "meera.iyer@example.com",
        begin_date: "2025-06-01",
        job_title: "UX Designer",
        manager: Some("Ravi Kumar"),
    },
];

/// Create the `Employees` table if it does not exist yet.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_EMPLOYEES).execute(pool).await?;
    Ok(())
}

/// Insert the demo rows when the table is empty.
///
/// All rows go in one transaction. Returns how many rows were inserted
/// (0 when the table already had data).
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<usize, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Employees")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        tx.rollback().await?;
        return Ok(0);
    }

    for row in &SEED_EMPLOYEES {
        sqlx::query(INSERT_EMPLOYEE)
            .bind(row.first_name)
            .bind(row.last_name)
            .bind(row.employee_type)
            .bind(row.email)
            .bind(row.begin_date)
            .bind(row.job_title)
            .bind(row.manager)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    tracing::info!(rows = SEED_EMPLOYEES.len(), "Seeded demo employees");
    Ok(SEED_EMPLOYEES.len())
}
