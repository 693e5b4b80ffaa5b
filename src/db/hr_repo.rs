// src/db/hr_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::hr::{Attendance, Employee, EmployeeStatus},
};

#[derive(Clone)]
pub struct HrRepository {
    pool: PgPool,
}

impl HrRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  FUNCIONÁRIOS
    // =========================================================================

    pub async fn create_employee(
        &self,
        full_name: &str,
        role_title: &str,
        base_salary: Decimal,
        hired_at: NaiveDate,
    ) -> Result<Employee, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (full_name, role_title, base_salary, hired_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(full_name)
        .bind(role_title)
        .bind(base_salary)
        .bind(hired_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, AppError> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees ORDER BY full_name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    pub async fn list_active_employees(&self) -> Result<Vec<Employee>, AppError> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE status = 'ACTIVE' ORDER BY full_name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    pub async fn update_employee(
        &self,
        id: Uuid,
        role_title: Option<&str>,
        base_salary: Option<Decimal>,
        status: Option<EmployeeStatus>,
    ) -> Result<Employee, AppError> {
        sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET role_title  = COALESCE($2, role_title),
                base_salary = COALESCE($3, base_salary),
                status      = COALESCE($4, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(role_title)
        .bind(base_salary)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::RecordNotFound)
    }

    pub async fn delete_employee(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::RecordNotFound);
        }

        Ok(())
    }

    // =========================================================================
    //  PONTO
    // =========================================================================

    /// Uma marcação por funcionário por dia; remarcar sobrescreve (UPSERT)
    pub async fn record_attendance(
        &self,
        employee_id: Uuid,
        work_date: NaiveDate,
        present: bool,
        note: Option<&str>,
    ) -> Result<Attendance, AppError> {
        let attendance = sqlx::query_as::<_, Attendance>(
            r#"
            INSERT INTO attendance (employee_id, work_date, present, note)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (employee_id, work_date)
            DO UPDATE SET present = EXCLUDED.present, note = EXCLUDED.note
            RETURNING *
            "#,
        )
        .bind(employee_id)
        .bind(work_date)
        .bind(present)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;

        Ok(attendance)
    }

    /// Todas as marcações dentro de [start, end) — insumo da folha
    pub async fn list_attendance_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Attendance>, AppError> {
        let rows = sqlx::query_as::<_, Attendance>(
            r#"
            SELECT *
            FROM attendance
            WHERE work_date >= $1 AND work_date < $2
            ORDER BY work_date ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
