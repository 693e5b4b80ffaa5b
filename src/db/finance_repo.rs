// src/db/finance_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{Expense, ExpenseCategory, ExpenseSummaryEntry},
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_expense(
        &self,
        description: &str,
        category: ExpenseCategory,
        amount: Decimal,
        spent_at: NaiveDate,
    ) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (description, category, amount, spent_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(description)
        .bind(category)
        .bind(amount)
        .bind(spent_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn list_expenses(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT *
            FROM expenses
            WHERE ($1::date IS NULL OR spent_at >= $1)
              AND ($2::date IS NULL OR spent_at < $2)
            ORDER BY spent_at DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    pub async fn update_expense(
        &self,
        id: Uuid,
        description: Option<&str>,
        category: Option<ExpenseCategory>,
        amount: Option<Decimal>,
        spent_at: Option<NaiveDate>,
    ) -> Result<Expense, AppError> {
        sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET description = COALESCE($2, description),
                category    = COALESCE($3, category),
                amount      = COALESCE($4, amount),
                spent_at    = COALESCE($5, spent_at)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(description)
        .bind(category)
        .bind(amount)
        .bind(spent_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::RecordNotFound)
    }

    pub async fn delete_expense(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::RecordNotFound);
        }

        Ok(())
    }

    /// Soma por categoria dentro de [from, to) — alimenta o dashboard
    /// e o relatório mensal
    pub async fn summary_by_category(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ExpenseSummaryEntry>, AppError> {
        let entries = sqlx::query_as::<_, ExpenseSummaryEntry>(
            r#"
            SELECT category, SUM(amount) AS total
            FROM expenses
            WHERE spent_at >= $1 AND spent_at < $2
            GROUP BY category
            ORDER BY total DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
