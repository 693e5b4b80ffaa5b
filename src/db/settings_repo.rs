// src/db/settings_repo.rs

use serde_json::Value;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::settings::{PropertySettings, UiPreference, UpdateSettingsRequest},
};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_settings(&self) -> Result<PropertySettings, AppError> {
        let settings = sqlx::query_as::<_, PropertySettings>(
            r#"
            SELECT property_name, document_number, address, phone, email,
                   currency_symbol, updated_at
            FROM property_settings
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        // Sem linha ainda = configurações vazias, não é erro
        match settings {
            Some(s) => Ok(s),
            None => Ok(PropertySettings {
                property_name: None,
                document_number: None,
                address: None,
                phone: None,
                email: None,
                currency_symbol: None,
                updated_at: None,
            }),
        }
    }

    pub async fn update_settings(
        &self,
        input: UpdateSettingsRequest,
    ) -> Result<PropertySettings, AppError> {
        // UPSERT na linha única
        let settings = sqlx::query_as::<_, PropertySettings>(
            r#"
            INSERT INTO property_settings (
                singleton, property_name, document_number, address, phone,
                email, currency_symbol, updated_at
            )
            VALUES (TRUE, $1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (singleton)
            DO UPDATE SET
                property_name   = EXCLUDED.property_name,
                document_number = EXCLUDED.document_number,
                address         = EXCLUDED.address,
                phone           = EXCLUDED.phone,
                email           = EXCLUDED.email,
                currency_symbol = EXCLUDED.currency_symbol,
                updated_at      = NOW()
            RETURNING property_name, document_number, address, phone, email,
                      currency_symbol, updated_at
            "#,
        )
        .bind(input.property_name)
        .bind(input.document_number)
        .bind(input.address)
        .bind(input.phone)
        .bind(input.email)
        .bind(input.currency_symbol)
        .fetch_one(&self.pool)
        .await?;

        Ok(settings)
    }

    // --- Preferências de UI (chave -> JSON) ---

    pub async fn get_preference(&self, key: &str) -> Result<UiPreference, AppError> {
        sqlx::query_as::<_, UiPreference>("SELECT * FROM ui_preferences WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::RecordNotFound)
    }

    pub async fn put_preference(
        &self,
        key: &str,
        value: Value,
    ) -> Result<UiPreference, AppError> {
        let pref = sqlx::query_as::<_, UiPreference>(
            r#"
            INSERT INTO ui_preferences (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key)
            DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(key)
        .bind(value)
        .fetch_one(&self.pool)
        .await?;

        Ok(pref)
    }
}
