//! Dial-plan repository implementation
//!
//! This module provides database access for contexts, their numbering
//! ranges, and extensions. Contexts and ranges are written together in one
//! transaction; extension uniqueness rides on the `(exten, context)` unique
//! constraint.

use sqlx::PgPool;
use uuid::Uuid;

use domain_dialplan::{
    Context, ContextRange, ContextType, DialplanValidator, Extension, ExtensionDestination,
    RangeKind,
};
use pbx_kernel::{ExtenNumber, ExtensionId};

use crate::error::DatabaseError;

/// Database row for a context
#[derive(Debug, sqlx::FromRow)]
struct ContextRow {
    name: String,
    display_name: Option<String>,
    context_type: String,
    description: Option<String>,
    enabled: bool,
}

/// Database row for a numbering range
#[derive(Debug, sqlx::FromRow)]
struct RangeRow {
    kind: String,
    range_start: i64,
    range_end: Option<i64>,
    did_length: i16,
}

/// Database row for an extension
#[derive(Debug, sqlx::FromRow)]
struct ExtensionRow {
    id: Uuid,
    exten: String,
    context: String,
    r#type: String,
    typeval: String,
    enabled: bool,
}

impl ExtensionRow {
    fn into_domain(self) -> Result<Extension, DatabaseError> {
        let exten = ExtenNumber::parse(&self.exten)
            .map_err(|_| DatabaseError::corrupt("extensions", "exten", &self.exten))?;
        let destination = ExtensionDestination::from_columns(&self.r#type, &self.typeval)
            .ok_or_else(|| {
                DatabaseError::corrupt(
                    "extensions",
                    "type",
                    format!("{}/{}", self.r#type, self.typeval),
                )
            })?;

        Ok(Extension {
            id: ExtensionId::from(self.id),
            exten,
            context: self.context,
            destination,
            enabled: self.enabled,
        })
    }
}

fn context_from_rows(row: ContextRow, ranges: Vec<RangeRow>) -> Result<Context, DatabaseError> {
    let context_type = ContextType::parse(&row.context_type)
        .ok_or_else(|| DatabaseError::corrupt("contexts", "context_type", &row.context_type))?;

    let mut typed_ranges = Vec::with_capacity(ranges.len());
    for range in ranges {
        let kind = RangeKind::parse(&range.kind)
            .ok_or_else(|| DatabaseError::corrupt("context_ranges", "kind", &range.kind))?;
        typed_ranges.push((
            kind,
            ContextRange {
                start: range.range_start.clamp(0, i64::from(u32::MAX)) as u32,
                end: range.range_end.map(|e| e.clamp(0, i64::from(u32::MAX)) as u32),
                did_length: range.did_length.max(0) as u16,
            },
        ));
    }

    Ok(Context {
        name: row.name,
        display_name: row.display_name,
        context_type,
        description: row.description,
        enabled: row.enabled,
        ranges: typed_ranges,
    })
}

/// Repository for dial-plan contexts and extensions
#[derive(Debug, Clone)]
pub struct DialplanRepository {
    pool: PgPool,
}

impl DialplanRepository {
    /// Creates a new DialplanRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a context together with its numbering ranges
    ///
    /// # Arguments
    ///
    /// * `context` - The context to persist
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEntry` when a context with the same name exists.
    pub async fn create_context(&self, context: &Context) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO contexts (name, display_name, context_type, description, enabled)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&context.name)
        .bind(&context.display_name)
        .bind(context.context_type.as_str())
        .bind(&context.description)
        .bind(context.enabled)
        .execute(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        for (kind, range) in &context.ranges {
            insert_range(&mut tx, &context.name, *kind, range).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Retrieves a context by name, ranges included
    ///
    /// # Arguments
    ///
    /// * `name` - The context name
    ///
    /// # Returns
    ///
    /// The context or a NotFound error
    pub async fn get_context(&self, name: &str) -> Result<Context, DatabaseError> {
        let row = sqlx::query_as::<_, ContextRow>(
            r#"
            SELECT name, display_name, context_type, description, enabled
            FROM contexts
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Context", name))?;

        let ranges = sqlx::query_as::<_, RangeRow>(
            r#"
            SELECT kind, range_start, range_end, did_length
            FROM context_ranges
            WHERE context_name = $1
            ORDER BY kind, range_start
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        context_from_rows(row, ranges)
    }

    /// Lists all contexts ordered by name, ranges included
    pub async fn list_contexts(&self) -> Result<Vec<Context>, DatabaseError> {
        let rows = sqlx::query_as::<_, ContextRow>(
            r#"
            SELECT name, display_name, context_type, description, enabled
            FROM contexts
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut contexts = Vec::with_capacity(rows.len());
        for row in rows {
            let ranges = sqlx::query_as::<_, RangeRow>(
                r#"
                SELECT kind, range_start, range_end, did_length
                FROM context_ranges
                WHERE context_name = $1
                ORDER BY kind, range_start
                "#,
            )
            .bind(&row.name)
            .fetch_all(&self.pool)
            .await?;
            contexts.push(context_from_rows(row, ranges)?);
        }

        Ok(contexts)
    }

    /// Replaces a context's attributes and ranges
    ///
    /// Ranges are rewritten wholesale inside the transaction; partial range
    /// edits are a dial-plan hazard the API deliberately does not offer.
    pub async fn update_context(&self, context: &Context) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE contexts
            SET display_name = $2, context_type = $3, description = $4, enabled = $5
            WHERE name = $1
            "#,
        )
        .bind(&context.name)
        .bind(&context.display_name)
        .bind(context.context_type.as_str())
        .bind(&context.description)
        .bind(context.enabled)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Context", &context.name));
        }

        sqlx::query("DELETE FROM context_ranges WHERE context_name = $1")
            .bind(&context.name)
            .execute(&mut *tx)
            .await?;

        for (kind, range) in &context.ranges {
            insert_range(&mut tx, &context.name, *kind, range).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Deletes an empty context
    ///
    /// # Errors
    ///
    /// Returns `AssociationRule` when extensions or lines still live in the
    /// context, and `NotFound` when it does not exist.
    pub async fn delete_context(&self, name: &str) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let (occupants,): (i64,) = sqlx::query_as(
            r#"
            SELECT (SELECT count(*) FROM extensions WHERE context = $1)
                 + (SELECT count(*) FROM lines WHERE context = $1)
            "#,
        )
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

        if occupants > 0 {
            return Err(DatabaseError::AssociationRule(format!(
                "context '{}' still holds {} extensions or lines",
                name, occupants
            )));
        }

        sqlx::query("DELETE FROM context_ranges WHERE context_name = $1")
            .bind(name)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM contexts WHERE name = $1")
            .bind(name)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Context", name));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Creates an extension
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEntry` when `(exten, context)` is already taken and
    /// `ForeignKeyViolation` when the context does not exist.
    pub async fn create_extension(&self, extension: &Extension) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO extensions (id, exten, context, type, typeval, enabled)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(extension.id.as_uuid())
        .bind(extension.exten.as_str())
        .bind(&extension.context)
        .bind(extension.destination.type_str())
        .bind(extension.destination.type_val())
        .bind(extension.enabled)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(())
    }

    /// Retrieves an extension by number and context
    pub async fn get_extension(
        &self,
        exten: &ExtenNumber,
        context: &str,
    ) -> Result<Extension, DatabaseError> {
        let row = sqlx::query_as::<_, ExtensionRow>(
            r#"
            SELECT id, exten, context, type, typeval, enabled
            FROM extensions
            WHERE exten = $1 AND context = $2
            "#,
        )
        .bind(exten.as_str())
        .bind(context)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            DatabaseError::not_found("Extension", format!("{}@{}", exten, context))
        })?;

        row.into_domain()
    }

    /// Retrieves an extension by identifier
    pub async fn get_extension_by_id(
        &self,
        id: ExtensionId,
    ) -> Result<Extension, DatabaseError> {
        let row = sqlx::query_as::<_, ExtensionRow>(
            r#"
            SELECT id, exten, context, type, typeval, enabled
            FROM extensions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Extension", id))?;

        row.into_domain()
    }

    /// Lists the extensions of a context ordered by number
    pub async fn list_extensions(&self, context: &str) -> Result<Vec<Extension>, DatabaseError> {
        let rows = sqlx::query_as::<_, ExtensionRow>(
            r#"
            SELECT id, exten, context, type, typeval, enabled
            FROM extensions
            WHERE context = $1
            ORDER BY exten
            "#,
        )
        .bind(context)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ExtensionRow::into_domain).collect()
    }

    /// Updates an extension's number, destination, and enabled flag
    pub async fn update_extension(&self, extension: &Extension) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE extensions
            SET exten = $2, context = $3, type = $4, typeval = $5, enabled = $6
            WHERE id = $1
            "#,
        )
        .bind(extension.id.as_uuid())
        .bind(extension.exten.as_str())
        .bind(&extension.context)
        .bind(extension.destination.type_str())
        .bind(extension.destination.type_val())
        .bind(extension.enabled)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Extension", extension.id));
        }
        Ok(())
    }

    /// Deletes an extension
    pub async fn delete_extension(&self, id: ExtensionId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM extensions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Extension", id));
        }
        Ok(())
    }

    /// Numeric extensions already taken in a context
    ///
    /// Pattern extensions carry no numeric value and are skipped. The result
    /// feeds `first_available_exten` when picking a number for a new line.
    pub async fn taken_extens(&self, context: &str) -> Result<Vec<u32>, DatabaseError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT exten FROM extensions WHERE context = $1")
                .bind(context)
                .fetch_all(&self.pool)
                .await?;

        let mut taken: Vec<u32> = rows
            .into_iter()
            .filter_map(|(e,)| ExtenNumber::parse(&e).ok().and_then(|n| n.value()))
            .collect();
        taken.sort_unstable();
        Ok(taken)
    }

    /// Lowest free number in a context's ranges of the given kind
    ///
    /// `None` when the context declares no such ranges or every slot is
    /// used. Callers provisioning a user pass `RangeKind::User`.
    pub async fn next_available_exten(
        &self,
        context: &str,
        kind: RangeKind,
    ) -> Result<Option<u32>, DatabaseError> {
        let context = self.get_context(context).await?;
        let ranges: Vec<ContextRange> = context
            .ranges_of_kind(kind)
            .into_iter()
            .copied()
            .collect();
        let taken = self.taken_extens(&context.name).await?;
        Ok(DialplanValidator::first_available_exten(&ranges, &taken))
    }
}

async fn insert_range(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    context_name: &str,
    kind: RangeKind,
    range: &ContextRange,
) -> Result<(), DatabaseError> {
    let did_length = i16::try_from(range.did_length).map_err(|_| {
        DatabaseError::ConstraintViolation(format!(
            "DID length {} does not fit the did_length column",
            range.did_length
        ))
    })?;

    sqlx::query(
        r#"
        INSERT INTO context_ranges (context_name, kind, range_start, range_end, did_length)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(context_name)
    .bind(kind.as_str())
    .bind(i64::from(range.start))
    .bind(range.end.map(i64::from))
    .bind(did_length)
    .execute(&mut **tx)
    .await
    .map_err(|e| DatabaseError::from(&e))?;

    Ok(())
}
