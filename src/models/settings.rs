// src/models/settings.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

// Configurações da propriedade (linha única no banco)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertySettings {
    #[schema(example = "Pousada Mar Azul")]
    pub property_name: Option<String>,
    pub document_number: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[schema(example = "R$")]
    pub currency_symbol: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub property_name: Option<String>,
    pub document_number: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub currency_symbol: Option<String>,
}

// Preferência de UI persistida no servidor (o espelho do antigo
// localStorage). O valor é JSON livre; datas viajam como ISO-8601
// e são revividas no cliente.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UiPreference {
    #[schema(example = "dashboard.activeTab")]
    pub key: String,
    pub value: Value,
    pub updated_at: DateTime<Utc>,
}
