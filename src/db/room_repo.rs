// src/db/room_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::rooms::{Room, RoomStatus, RoomType},
};

#[derive(Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_room(
        &self,
        number: &str,
        room_type: RoomType,
        price: Decimal,
    ) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (number, room_type, price)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(number)
        .bind(room_type)
        .bind(price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // O índice único em LOWER(number) garante o rótulo único
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "quarto '{}'",
                        number
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn list_rooms(&self) -> Result<Vec<Room>, AppError> {
        let rooms = sqlx::query_as::<_, Room>("SELECT * FROM rooms ORDER BY number ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rooms)
    }

    /// Resolve o rótulo digitado pelo usuário ignorando caixa.
    /// O índice único garante no máximo um resultado.
    pub async fn find_by_label<'e, E>(
        &self,
        executor: E,
        label: &str,
    ) -> Result<Option<Room>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let room = sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE LOWER(number) = LOWER($1)",
        )
        .bind(label)
        .fetch_optional(executor)
        .await?;

        Ok(room)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Room>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let room = sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(room)
    }

    // Atualização parcial: campos None ficam como estão (COALESCE)
    pub async fn update_room(
        &self,
        id: Uuid,
        room_type: Option<RoomType>,
        price: Option<Decimal>,
        status: Option<RoomStatus>,
    ) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms
            SET room_type = COALESCE($2, room_type),
                price     = COALESCE($3, price),
                status    = COALESCE($4, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(room_type)
        .bind(price)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::RecordNotFound)
    }

    /// Troca só o status (efeito colateral de check-in/check-out/locação)
    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: RoomStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE rooms SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn delete_room(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::RecordNotFound);
        }

        Ok(())
    }

    /// Quartos livres no intervalo [check_in, check_out): nenhuma reserva
    /// ativa sobrepondo e sem inquilino mensal. Alimenta o formulário de
    /// reserva e a tool `getAvailableRooms` do assistente.
    pub async fn list_available(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<Room>, AppError> {
        let rooms = sqlx::query_as::<_, Room>(
            r#"
            SELECT r.*
            FROM rooms r
            WHERE r.status <> 'MONTHLY_RENTAL'
              AND NOT EXISTS (
                  SELECT 1
                  FROM bookings b
                  WHERE b.room_id = r.id
                    AND b.status <> 'CANCELLED'
                    AND b.check_in < $2
                    AND b.check_out > $1
              )
            ORDER BY r.number ASC
            "#,
        )
        .bind(check_in)
        .bind(check_out)
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }
}
