//! Func-key repository implementation
//!
//! Templates and their key mappings are written together: creating or
//! updating a template rewrites its `func_keys` rows inside one
//! transaction, so a device never provisions from a half-written layout.

use sqlx::PgPool;
use uuid::Uuid;

use domain_funckey::{FuncKeyDestination, FuncKeyMapping, FuncKeyTemplate};
use pbx_kernel::FuncKeyTemplateId;

use crate::error::DatabaseError;

/// Database row for a template
#[derive(Debug, sqlx::FromRow)]
struct TemplateRow {
    id: Uuid,
    name: String,
    private: bool,
}

/// Database row for one key mapping
#[derive(Debug, sqlx::FromRow)]
struct KeyRow {
    position: i32,
    label: Option<String>,
    blf: bool,
    r#type: String,
    typeval: String,
}

impl KeyRow {
    fn into_domain(self) -> Result<FuncKeyMapping, DatabaseError> {
        let destination = FuncKeyDestination::from_columns(&self.r#type, &self.typeval)
            .map_err(|e| DatabaseError::CorruptRow(format!("func_keys: {}", e)))?;

        Ok(FuncKeyMapping {
            position: self.position.clamp(0, i32::from(u16::MAX)) as u16,
            label: self.label,
            blf: self.blf,
            destination,
        })
    }
}

/// Repository for func-key templates
#[derive(Debug, Clone)]
pub struct FuncKeyRepository {
    pool: PgPool,
}

impl FuncKeyRepository {
    /// Creates a new FuncKeyRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a template with all of its keys in one transaction
    pub async fn create_template(&self, template: &FuncKeyTemplate) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO func_key_templates (id, name, private) VALUES ($1, $2, $3)")
            .bind(template.id.as_uuid())
            .bind(&template.name)
            .bind(template.private)
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        for key in &template.keys {
            insert_key(&mut tx, template.id, key).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Retrieves a template with its keys, sorted by position
    pub async fn get_template(
        &self,
        id: FuncKeyTemplateId,
    ) -> Result<FuncKeyTemplate, DatabaseError> {
        let row = sqlx::query_as::<_, TemplateRow>(
            "SELECT id, name, private FROM func_key_templates WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("FuncKeyTemplate", id))?;

        let key_rows = sqlx::query_as::<_, KeyRow>(
            r#"
            SELECT position, label, blf, type, typeval
            FROM func_keys
            WHERE template_id = $1
            ORDER BY position
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let keys = key_rows
            .into_iter()
            .map(KeyRow::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FuncKeyTemplate {
            id: FuncKeyTemplateId::from(row.id),
            name: row.name,
            private: row.private,
            keys,
        })
    }

    /// Lists shared templates ordered by name
    ///
    /// Private templates belong to a single user and are not listed.
    pub async fn list_shared_templates(&self) -> Result<Vec<FuncKeyTemplate>, DatabaseError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM func_key_templates WHERE NOT private ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut templates = Vec::with_capacity(rows.len());
        for (id,) in rows {
            templates.push(self.get_template(FuncKeyTemplateId::from(id)).await?);
        }
        Ok(templates)
    }

    /// Replaces a template's name, visibility, and entire key layout
    pub async fn update_template(&self, template: &FuncKeyTemplate) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let result =
            sqlx::query("UPDATE func_key_templates SET name = $2, private = $3 WHERE id = $1")
                .bind(template.id.as_uuid())
                .bind(&template.name)
                .bind(template.private)
                .execute(&mut *tx)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("FuncKeyTemplate", template.id));
        }

        sqlx::query("DELETE FROM func_keys WHERE template_id = $1")
            .bind(template.id.as_uuid())
            .execute(&mut *tx)
            .await?;

        for key in &template.keys {
            insert_key(&mut tx, template.id, key).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Deletes a template and its keys
    pub async fn delete_template(&self, id: FuncKeyTemplateId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM func_key_templates WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("FuncKeyTemplate", id));
        }
        Ok(())
    }
}

async fn insert_key(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    template_id: FuncKeyTemplateId,
    key: &FuncKeyMapping,
) -> Result<(), DatabaseError> {
    sqlx::query(
        r#"
        INSERT INTO func_keys (template_id, position, label, blf, type, typeval)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(template_id.as_uuid())
    .bind(i32::from(key.position))
    .bind(&key.label)
    .bind(key.blf)
    .bind(key.destination.type_str())
    .bind(key.destination.type_val())
    .execute(&mut **tx)
    .await
    .map_err(|e| DatabaseError::from(&e))?;

    Ok(())
}
