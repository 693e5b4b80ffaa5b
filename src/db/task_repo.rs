// src/db/task_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        bookings::RecordSource,
        tasks::{Task, TaskStatus},
    },
};

#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_task(
        &self,
        title: &str,
        details: Option<&str>,
        due_date: Option<NaiveDate>,
        assignee: Option<&str>,
        source: RecordSource,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, details, due_date, assignee, source)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(details)
        .bind(due_date)
        .bind(assignee)
        .bind(source)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn update_task(
        &self,
        id: Uuid,
        title: Option<&str>,
        details: Option<&str>,
        status: Option<TaskStatus>,
        due_date: Option<NaiveDate>,
        assignee: Option<&str>,
    ) -> Result<Task, AppError> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title    = COALESCE($2, title),
                details  = COALESCE($3, details),
                status   = COALESCE($4, status),
                due_date = COALESCE($5, due_date),
                assignee = COALESCE($6, assignee),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(details)
        .bind(status)
        .bind(due_date)
        .bind(assignee)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::RecordNotFound)
    }

    pub async fn delete_task(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::RecordNotFound);
        }

        Ok(())
    }
}
