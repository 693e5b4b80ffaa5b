// src/db/booking_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::bookings::{Booking, BookingDetail, BookingStatus, Guest, RecordSource},
};

// Código do Postgres para violação de exclusion constraint.
// É o que a bookings_no_overlap dispara quando duas reservas se cruzam.
const EXCLUSION_VIOLATION: &str = "23P01";

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  RESERVAS
    // =========================================================================

    /// Listagem com hóspede e quarto já resolvidos (JOIN)
    pub async fn list_detailed(&self) -> Result<Vec<BookingDetail>, AppError> {
        let bookings = sqlx::query_as::<_, BookingDetail>(
            r#"
            SELECT
                b.*,
                g.full_name AS guest_name,
                g.phone     AS guest_phone,
                r.number    AS room_number
            FROM bookings b
            JOIN guests g ON b.guest_id = g.id
            JOIN rooms  r ON b.room_id = r.id
            ORDER BY b.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Reservas não-canceladas de um quarto (o insumo do check de
    /// disponibilidade). Opcionalmente ignora uma reserva (edição).
    pub async fn list_active_for_room<'e, E>(
        &self,
        executor: E,
        room_id: Uuid,
        except: Option<Uuid>,
    ) -> Result<Vec<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT *
            FROM bookings
            WHERE room_id = $1
              AND status <> 'CANCELLED'
              AND ($2::uuid IS NULL OR id <> $2)
            ORDER BY check_in ASC
            "#,
        )
        .bind(room_id)
        .bind(except)
        .fetch_all(executor)
        .await?;

        Ok(bookings)
    }

    pub async fn insert_booking<'e, E>(
        &self,
        executor: E,
        guest_id: Uuid,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        total_price: Decimal,
        source: RecordSource,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (guest_id, room_id, check_in, check_out, total_price, source)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(guest_id)
        .bind(room_id)
        .bind(check_in)
        .bind(check_out)
        .bind(total_price)
        .bind(source)
        .fetch_one(executor)
        .await
        .map_err(Self::map_overlap_error)
    }

    pub async fn find_booking<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(booking)
    }

    pub async fn find_detail<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<BookingDetail, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, BookingDetail>(
            r#"
            SELECT
                b.*,
                g.full_name AS guest_name,
                g.phone     AS guest_phone,
                r.number    AS room_number
            FROM bookings b
            JOIN guests g ON b.guest_id = g.id
            JOIN rooms  r ON b.room_id = r.id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::RecordNotFound)
    }

    /// Reagendamento: novas datas e novo total, já recalculado pelo serviço
    pub async fn update_booking_dates<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        total_price: Decimal,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET check_in = $2, check_out = $3, total_price = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(check_in)
        .bind(check_out)
        .bind(total_price)
        .fetch_optional(executor)
        .await
        .map_err(Self::map_overlap_error)?
        .ok_or(AppError::RecordNotFound)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::RecordNotFound)
    }

    pub async fn delete_booking(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::RecordNotFound);
        }

        Ok(())
    }

    /// Quantidade, receita e noites ocupadas (recortadas à janela) das
    /// reservas não-canceladas com check-in em [start, end) — insumo do
    /// relatório mensal
    pub async fn month_stats<'e, E>(
        &self,
        executor: E,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(i64, Decimal, i64), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row: (i64, Option<Decimal>, Option<i64>) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                SUM(total_price),
                SUM(LEAST(check_out, $2) - GREATEST(check_in, $1))::bigint
            FROM bookings
            WHERE status <> 'CANCELLED'
              AND check_in >= $1 AND check_in < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(executor)
        .await?;

        Ok((
            row.0,
            row.1.unwrap_or(Decimal::ZERO),
            row.2.unwrap_or(0),
        ))
    }

    // =========================================================================
    //  HÓSPEDES
    // =========================================================================

    pub async fn list_guests(&self) -> Result<Vec<Guest>, AppError> {
        let guests = sqlx::query_as::<_, Guest>("SELECT * FROM guests ORDER BY full_name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(guests)
    }

    pub async fn find_guest(&self, id: Uuid) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::RecordNotFound)
    }

    /// Deduplicação: o hóspede é o mesmo se nome e telefone baterem
    pub async fn find_guest_by_name_phone<'e, E>(
        &self,
        executor: E,
        full_name: &str,
        phone: &str,
    ) -> Result<Option<Guest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let guest = sqlx::query_as::<_, Guest>(
            "SELECT * FROM guests WHERE full_name = $1 AND phone = $2",
        )
        .bind(full_name)
        .bind(phone)
        .fetch_optional(executor)
        .await?;

        Ok(guest)
    }

    pub async fn insert_guest<'e, E>(
        &self,
        executor: E,
        full_name: &str,
        phone: &str,
    ) -> Result<Guest, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let guest = sqlx::query_as::<_, Guest>(
            "INSERT INTO guests (full_name, phone) VALUES ($1, $2) RETURNING *",
        )
        .bind(full_name)
        .bind(phone)
        .fetch_one(executor)
        .await?;

        Ok(guest)
    }

    /// Anexa o id da reserva ao histórico do hóspede (ordem de criação)
    pub async fn append_guest_history<'e, E>(
        &self,
        executor: E,
        guest_id: Uuid,
        booking_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE guests SET history = array_append(history, $2) WHERE id = $1")
            .bind(guest_id)
            .bind(booking_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    // A exclusion constraint devolve 23P01; traduzimos para o erro de
    // domínio em vez de vazar "database error" para quem chamou.
    fn map_overlap_error(e: sqlx::Error) -> AppError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.code().as_deref() == Some(EXCLUSION_VIOLATION) {
                return AppError::RoomUnavailable;
            }
        }
        e.into()
    }
}
