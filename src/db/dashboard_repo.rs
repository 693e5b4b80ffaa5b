// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::dashboard::{DashboardSummary, RevenueChartEntry},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Resumo geral. Uma transação para o snapshot ser consistente.
    pub async fn get_summary<'e, E>(&self, executor: E) -> Result<DashboardSummary, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let occupied_rooms: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM rooms WHERE status = 'OCCUPIED'")
                .fetch_one(&mut *tx)
                .await?;

        let available_rooms: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM rooms WHERE status = 'AVAILABLE'")
                .fetch_one(&mut *tx)
                .await?;

        let arrivals_today: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM bookings
            WHERE check_in = CURRENT_DATE AND status = 'CONFIRMED'
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        let departures_today: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM bookings
            WHERE check_out = CURRENT_DATE AND status = 'CHECKED_IN'
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        // Receita do mês: reservas não-canceladas com check-in no mês corrente
        let revenue_month: Option<Decimal> = sqlx::query_scalar(
            r#"
            SELECT SUM(total_price)
            FROM bookings
            WHERE status <> 'CANCELLED'
              AND date_trunc('month', check_in) = date_trunc('month', CURRENT_DATE)
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        let pending_invoices: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM invoices WHERE status IN ('PENDING', 'OVERDUE')",
        )
        .fetch_one(&mut *tx)
        .await?;

        let open_tasks: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE status <> 'DONE'")
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(DashboardSummary {
            occupied_rooms,
            available_rooms,
            arrivals_today,
            departures_today,
            revenue_month: revenue_month.unwrap_or(Decimal::ZERO),
            pending_invoices,
            open_tasks,
        })
    }

    /// Série diária dos últimos 30 dias: receita das estadias encerradas
    pub async fn revenue_last_30_days(&self) -> Result<Vec<RevenueChartEntry>, AppError> {
        let data = sqlx::query_as::<_, RevenueChartEntry>(
            r#"
            SELECT
                to_char(check_out, 'YYYY-MM-DD') AS date,
                SUM(total_price) AS total
            FROM bookings
            WHERE status = 'CHECKED_OUT'
              AND check_out >= (CURRENT_DATE - INTERVAL '30 days')
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }
}
