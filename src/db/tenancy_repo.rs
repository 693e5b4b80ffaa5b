// src/db/tenancy_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::tenancy::{Invoice, InvoiceDetail, InvoiceStatus, Tenant, TenantStatus},
};

#[derive(Clone)]
pub struct TenancyRepository {
    pool: PgPool,
}

impl TenancyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  INQUILINOS
    // =========================================================================

    pub async fn insert_tenant<'e, E>(
        &self,
        executor: E,
        full_name: &str,
        phone: &str,
        room_id: Uuid,
        monthly_rent: Decimal,
        start_date: NaiveDate,
    ) -> Result<Tenant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants (full_name, phone, room_id, monthly_rent, start_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(full_name)
        .bind(phone)
        .bind(room_id)
        .bind(monthly_rent)
        .bind(start_date)
        .fetch_one(executor)
        .await?;

        Ok(tenant)
    }

    pub async fn list_tenants(&self) -> Result<Vec<Tenant>, AppError> {
        let tenants = sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tenants)
    }

    pub async fn find_tenant<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Tenant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::RecordNotFound)
    }

    pub async fn set_tenant_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: TenantStatus,
    ) -> Result<Tenant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Tenant>(
            "UPDATE tenants SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::RecordNotFound)
    }

    // =========================================================================
    //  FATURAS
    // =========================================================================

    pub async fn insert_invoice<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        reference_month: NaiveDate,
        amount: Decimal,
        due_date: NaiveDate,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (tenant_id, reference_month, amount, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(reference_month)
        .bind(amount)
        .bind(due_date)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // UNIQUE (tenant_id, reference_month): uma fatura por mês
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "fatura de {}",
                        reference_month.format("%Y-%m")
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn list_invoices_detailed(&self) -> Result<Vec<InvoiceDetail>, AppError> {
        let invoices = sqlx::query_as::<_, InvoiceDetail>(
            r#"
            SELECT
                i.*,
                t.full_name AS tenant_name,
                r.number    AS room_number
            FROM invoices i
            JOIN tenants t ON i.tenant_id = t.id
            JOIN rooms   r ON t.room_id = r.id
            ORDER BY i.reference_month DESC, t.full_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    pub async fn find_invoice_detail<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<InvoiceDetail, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, InvoiceDetail>(
            r#"
            SELECT
                i.*,
                t.full_name AS tenant_name,
                r.number    AS room_number
            FROM invoices i
            JOIN tenants t ON i.tenant_id = t.id
            JOIN rooms   r ON t.room_id = r.id
            WHERE i.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::RecordNotFound)
    }

    pub async fn mark_invoice_paid(&self, id: Uuid) -> Result<Invoice, AppError> {
        sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET status = 'PAID', paid_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::RecordNotFound)
    }

    pub async fn set_invoice_status(
        &self,
        id: Uuid,
        status: InvoiceStatus,
    ) -> Result<Invoice, AppError> {
        sqlx::query_as::<_, Invoice>(
            "UPDATE invoices SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::RecordNotFound)
    }
}
