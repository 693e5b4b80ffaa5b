// src/db/document_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::documents::{DocumentKind, GeneratedDocument},
};

#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_document<'e, E>(
        &self,
        executor: E,
        kind: DocumentKind,
        title: &str,
        reference_id: Option<Uuid>,
    ) -> Result<GeneratedDocument, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let document = sqlx::query_as::<_, GeneratedDocument>(
            r#"
            INSERT INTO generated_documents (kind, title, reference_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(kind)
        .bind(title)
        .bind(reference_id)
        .fetch_one(executor)
        .await?;

        Ok(document)
    }

    pub async fn list_documents(&self) -> Result<Vec<GeneratedDocument>, AppError> {
        let documents = sqlx::query_as::<_, GeneratedDocument>(
            "SELECT * FROM generated_documents ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }
}
