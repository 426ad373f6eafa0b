//! Endpoint repository implementation
//!
//! This module provides database access for users, lines, voicemail boxes,
//! CTI profiles, and boss/secretary call filters, together with the
//! user/line and line/extension association tables.
//!
//! # Association Rules
//!
//! The association tables carry rules the schema alone cannot express:
//! the first user on a line becomes its main user, the first line of a user
//! becomes the main line, and a main user cannot be dissociated while
//! secondary users remain on the line. Every mutation that touches those
//! flags runs inside a transaction.

use sqlx::PgPool;
use uuid::Uuid;

use domain_endpoint::{
    CallFilter, CallFilterMember, CtiProfile, FilterMemberRole, FilterStrategy, Line,
    LineExtension, LineProtocol, User, UserLine, Voicemail,
};
use pbx_kernel::{CallFilterId, CtiProfileId, ExtensionId, LineId, UserId, VoicemailId};

use crate::error::DatabaseError;

/// Database row for a user
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    caller_id: Option<String>,
    outgoing_caller_id: Option<String>,
    email: Option<String>,
    mobile_phone: Option<String>,
    language: Option<String>,
    timezone: Option<String>,
    music_on_hold: Option<String>,
    ring_seconds: i32,
    simultaneous_calls: i32,
    dnd_enabled: bool,
    call_record_enabled: bool,
    cti_enabled: bool,
    cti_profile_id: Option<Uuid>,
    voicemail_id: Option<Uuid>,
    description: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::from(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            caller_id: row.caller_id,
            outgoing_caller_id: row.outgoing_caller_id,
            email: row.email,
            mobile_phone: row.mobile_phone,
            language: row.language,
            timezone: row.timezone,
            music_on_hold: row.music_on_hold,
            ring_seconds: row.ring_seconds.clamp(0, i32::from(u16::MAX)) as u16,
            simultaneous_calls: row.simultaneous_calls.clamp(0, i32::from(u8::MAX)) as u8,
            dnd_enabled: row.dnd_enabled,
            call_record_enabled: row.call_record_enabled,
            cti_enabled: row.cti_enabled,
            cti_profile_id: row.cti_profile_id.map(CtiProfileId::from),
            voicemail_id: row.voicemail_id.map(VoicemailId::from),
            description: row.description,
        }
    }
}

/// Database row for a line
#[derive(Debug, sqlx::FromRow)]
struct LineRow {
    id: Uuid,
    name: String,
    protocol: String,
    context: String,
    device_id: Option<String>,
    position: i32,
    registrar: Option<String>,
    caller_id: Option<String>,
    enabled: bool,
}

impl LineRow {
    fn into_domain(self) -> Result<Line, DatabaseError> {
        let protocol = LineProtocol::parse(&self.protocol)
            .ok_or_else(|| DatabaseError::corrupt("lines", "protocol", &self.protocol))?;

        Ok(Line {
            id: LineId::from(self.id),
            name: self.name,
            protocol,
            context: self.context,
            device_id: self.device_id,
            position: self.position.clamp(0, i32::from(u8::MAX)) as u8,
            registrar: self.registrar,
            caller_id: self.caller_id,
            enabled: self.enabled,
        })
    }
}

/// Database row for a voicemail box
#[derive(Debug, sqlx::FromRow)]
struct VoicemailRow {
    id: Uuid,
    name: String,
    number: String,
    context: String,
    password: Option<String>,
    email: Option<String>,
    language: Option<String>,
    timezone: Option<String>,
    max_messages: Option<i32>,
    attach_audio: bool,
    delete_after_notify: bool,
    ask_password: bool,
    enabled: bool,
}

impl From<VoicemailRow> for Voicemail {
    fn from(row: VoicemailRow) -> Self {
        Voicemail {
            id: VoicemailId::from(row.id),
            name: row.name,
            number: row.number,
            context: row.context,
            password: row.password,
            email: row.email,
            language: row.language,
            timezone: row.timezone,
            max_messages: row.max_messages.map(|m| m.max(0) as u32),
            attach_audio: row.attach_audio,
            delete_after_notify: row.delete_after_notify,
            ask_password: row.ask_password,
            enabled: row.enabled,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserLineRow {
    user_id: Uuid,
    line_id: Uuid,
    main_user: bool,
    main_line: bool,
}

impl From<UserLineRow> for UserLine {
    fn from(row: UserLineRow) -> Self {
        UserLine {
            user_id: UserId::from(row.user_id),
            line_id: LineId::from(row.line_id),
            main_user: row.main_user,
            main_line: row.main_line,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CallFilterRow {
    id: Uuid,
    name: String,
    strategy: String,
    ring_seconds: i32,
    enabled: bool,
}

impl CallFilterRow {
    fn into_domain(self) -> Result<CallFilter, DatabaseError> {
        let strategy = FilterStrategy::parse(&self.strategy)
            .ok_or_else(|| DatabaseError::corrupt("call_filters", "strategy", &self.strategy))?;

        Ok(CallFilter {
            id: CallFilterId::from(self.id),
            name: self.name,
            strategy,
            ring_seconds: self.ring_seconds.clamp(0, i32::from(u16::MAX)) as u16,
            enabled: self.enabled,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FilterMemberRow {
    filter_id: Uuid,
    user_id: Uuid,
    role: String,
    active: bool,
}

impl FilterMemberRow {
    fn into_domain(self) -> Result<CallFilterMember, DatabaseError> {
        let role = match self.role.as_str() {
            "boss" => FilterMemberRole::Boss,
            "secretary" => FilterMemberRole::Secretary,
            other => return Err(DatabaseError::corrupt("call_filter_members", "role", other)),
        };

        Ok(CallFilterMember {
            filter_id: CallFilterId::from(self.filter_id),
            user_id: UserId::from(self.user_id),
            role,
            active: self.active,
        })
    }
}

fn role_str(role: FilterMemberRole) -> &'static str {
    match role {
        FilterMemberRole::Boss => "boss",
        FilterMemberRole::Secretary => "secretary",
    }
}

/// Repository for users, lines, voicemail, CTI profiles, and call filters
#[derive(Debug, Clone)]
pub struct EndpointRepository {
    pool: PgPool,
}

impl EndpointRepository {
    /// Creates a new EndpointRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Creates a user
    pub async fn create_user(&self, user: &User) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, first_name, last_name, caller_id, outgoing_caller_id, email,
                mobile_phone, language, timezone, music_on_hold, ring_seconds,
                simultaneous_calls, dnd_enabled, call_record_enabled, cti_enabled,
                cti_profile_id, voicemail_id, description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.caller_id)
        .bind(&user.outgoing_caller_id)
        .bind(&user.email)
        .bind(&user.mobile_phone)
        .bind(&user.language)
        .bind(&user.timezone)
        .bind(&user.music_on_hold)
        .bind(i32::from(user.ring_seconds))
        .bind(i32::from(user.simultaneous_calls))
        .bind(user.dnd_enabled)
        .bind(user.call_record_enabled)
        .bind(user.cti_enabled)
        .bind(user.cti_profile_id.map(|id| *id.as_uuid()))
        .bind(user.voicemail_id.map(|id| *id.as_uuid()))
        .bind(&user.description)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(())
    }

    /// Retrieves a user by identifier
    pub async fn get_user(&self, id: UserId) -> Result<User, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("User", id))?;

        Ok(row.into())
    }

    /// Lists all users ordered by name
    pub async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let rows =
            sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY last_name, first_name")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Updates a user's attributes
    pub async fn update_user(&self, user: &User) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                first_name = $2, last_name = $3, caller_id = $4,
                outgoing_caller_id = $5, email = $6, mobile_phone = $7,
                language = $8, timezone = $9, music_on_hold = $10,
                ring_seconds = $11, simultaneous_calls = $12, dnd_enabled = $13,
                call_record_enabled = $14, cti_enabled = $15, cti_profile_id = $16,
                voicemail_id = $17, description = $18
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.caller_id)
        .bind(&user.outgoing_caller_id)
        .bind(&user.email)
        .bind(&user.mobile_phone)
        .bind(&user.language)
        .bind(&user.timezone)
        .bind(&user.music_on_hold)
        .bind(i32::from(user.ring_seconds))
        .bind(i32::from(user.simultaneous_calls))
        .bind(user.dnd_enabled)
        .bind(user.call_record_enabled)
        .bind(user.cti_enabled)
        .bind(user.cti_profile_id.map(|id| *id.as_uuid()))
        .bind(user.voicemail_id.map(|id| *id.as_uuid()))
        .bind(&user.description)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("User", user.id));
        }
        Ok(())
    }

    /// Deletes a user; association rows go with it
    pub async fn delete_user(&self, id: UserId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("User", id));
        }
        Ok(())
    }

    /// Finds the user reachable at an extension in a context
    ///
    /// Walks extension -> line -> main user. Returns NotFound when the
    /// extension exists but no line or main user is attached.
    pub async fn find_user_by_extension(
        &self,
        exten: &str,
        context: &str,
    ) -> Result<User, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.*
            FROM users u
            INNER JOIN user_lines ul ON ul.user_id = u.id AND ul.main_user
            INNER JOIN line_extensions le ON le.line_id = ul.line_id
            INNER JOIN extensions e ON e.id = le.extension_id
            WHERE e.exten = $1 AND e.context = $2
            "#,
        )
        .bind(exten)
        .bind(context)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            DatabaseError::not_found("User", format!("extension {}@{}", exten, context))
        })?;

        Ok(row.into())
    }

    // ------------------------------------------------------------------
    // Lines
    // ------------------------------------------------------------------

    /// Creates a line
    pub async fn create_line(&self, line: &Line) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO lines (
                id, name, protocol, context, device_id, position, registrar,
                caller_id, enabled
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(line.id.as_uuid())
        .bind(&line.name)
        .bind(line.protocol.as_str())
        .bind(&line.context)
        .bind(&line.device_id)
        .bind(i32::from(line.position))
        .bind(&line.registrar)
        .bind(&line.caller_id)
        .bind(line.enabled)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(())
    }

    /// Retrieves a line by identifier
    pub async fn get_line(&self, id: LineId) -> Result<Line, DatabaseError> {
        let row = sqlx::query_as::<_, LineRow>("SELECT * FROM lines WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Line", id))?;

        row.into_domain()
    }

    /// Lists the lines of a context ordered by name
    pub async fn list_lines(&self, context: &str) -> Result<Vec<Line>, DatabaseError> {
        let rows =
            sqlx::query_as::<_, LineRow>("SELECT * FROM lines WHERE context = $1 ORDER BY name")
                .bind(context)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(LineRow::into_domain).collect()
    }

    /// Deletes a line; association rows go with it
    pub async fn delete_line(&self, id: LineId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM lines WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Line", id));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // User/line associations
    // ------------------------------------------------------------------

    /// Associates a user to a line
    ///
    /// The first user on the line becomes its main user; the first line of
    /// the user becomes the main line. Both checks and the insert share one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEntry` when the pair already exists.
    pub async fn associate_user_line(
        &self,
        user_id: UserId,
        line_id: LineId,
    ) -> Result<UserLine, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let (has_main_user,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM user_lines WHERE line_id = $1 AND main_user)",
        )
        .bind(line_id.as_uuid())
        .fetch_one(&mut *tx)
        .await?;

        let (has_main_line,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM user_lines WHERE user_id = $1 AND main_line)",
        )
        .bind(user_id.as_uuid())
        .fetch_one(&mut *tx)
        .await?;

        let association = UserLine {
            user_id,
            line_id,
            main_user: !has_main_user,
            main_line: !has_main_line,
        };

        sqlx::query(
            r#"
            INSERT INTO user_lines (user_id, line_id, main_user, main_line)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(line_id.as_uuid())
        .bind(association.main_user)
        .bind(association.main_line)
        .execute(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        tx.commit().await?;
        Ok(association)
    }

    /// Dissociates a user from a line
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the pair does not exist and `AssociationRule`
    /// when the main user would leave secondary users behind on the line.
    pub async fn dissociate_user_line(
        &self,
        user_id: UserId,
        line_id: LineId,
    ) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserLineRow>(
            "SELECT * FROM user_lines WHERE user_id = $1 AND line_id = $2 FOR UPDATE",
        )
        .bind(user_id.as_uuid())
        .bind(line_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            DatabaseError::not_found("UserLine", format!("{}/{}", user_id, line_id))
        })?;

        if row.main_user {
            let (others,): (i64,) = sqlx::query_as(
                "SELECT count(*) FROM user_lines WHERE line_id = $1 AND user_id <> $2",
            )
            .bind(line_id.as_uuid())
            .bind(user_id.as_uuid())
            .fetch_one(&mut *tx)
            .await?;

            if others > 0 {
                return Err(DatabaseError::AssociationRule(format!(
                    "line {} still has {} secondary users",
                    line_id, others
                )));
            }
        }

        sqlx::query("DELETE FROM user_lines WHERE user_id = $1 AND line_id = $2")
            .bind(user_id.as_uuid())
            .bind(line_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// The main user of a line, when any user is associated
    pub async fn main_user_of_line(&self, line_id: LineId) -> Result<User, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.*
            FROM users u
            INNER JOIN user_lines ul ON ul.user_id = u.id
            WHERE ul.line_id = $1 AND ul.main_user
            "#,
        )
        .bind(line_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("User", format!("main user of {}", line_id)))?;

        Ok(row.into())
    }

    /// Association rows of a line, main user first
    pub async fn users_of_line(&self, line_id: LineId) -> Result<Vec<UserLine>, DatabaseError> {
        let rows = sqlx::query_as::<_, UserLineRow>(
            "SELECT * FROM user_lines WHERE line_id = $1 ORDER BY main_user DESC",
        )
        .bind(line_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserLine::from).collect())
    }

    /// Association rows of a user, main line first
    pub async fn lines_of_user(&self, user_id: UserId) -> Result<Vec<UserLine>, DatabaseError> {
        let rows = sqlx::query_as::<_, UserLineRow>(
            "SELECT * FROM user_lines WHERE user_id = $1 ORDER BY main_line DESC",
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserLine::from).collect())
    }

    // ------------------------------------------------------------------
    // Line/extension associations
    // ------------------------------------------------------------------

    /// Attaches an extension to a line; the first becomes main
    pub async fn associate_line_extension(
        &self,
        line_id: LineId,
        extension_id: ExtensionId,
    ) -> Result<LineExtension, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let (has_main,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM line_extensions WHERE line_id = $1 AND main_extension)",
        )
        .bind(line_id.as_uuid())
        .fetch_one(&mut *tx)
        .await?;

        let association = LineExtension {
            line_id,
            extension_id,
            main_extension: !has_main,
        };

        sqlx::query(
            r#"
            INSERT INTO line_extensions (line_id, extension_id, main_extension)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(line_id.as_uuid())
        .bind(extension_id.as_uuid())
        .bind(association.main_extension)
        .execute(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        tx.commit().await?;
        Ok(association)
    }

    /// Detaches an extension from a line
    pub async fn dissociate_line_extension(
        &self,
        line_id: LineId,
        extension_id: ExtensionId,
    ) -> Result<(), DatabaseError> {
        let result =
            sqlx::query("DELETE FROM line_extensions WHERE line_id = $1 AND extension_id = $2")
                .bind(line_id.as_uuid())
                .bind(extension_id.as_uuid())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(
                "LineExtension",
                format!("{}/{}", line_id, extension_id),
            ));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Voicemail
    // ------------------------------------------------------------------

    /// Creates a voicemail box
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEntry` when `(number, context)` is already taken.
    pub async fn create_voicemail(&self, voicemail: &Voicemail) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO voicemails (
                id, name, number, context, password, email, language, timezone,
                max_messages, attach_audio, delete_after_notify, ask_password, enabled
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(voicemail.id.as_uuid())
        .bind(&voicemail.name)
        .bind(&voicemail.number)
        .bind(&voicemail.context)
        .bind(&voicemail.password)
        .bind(&voicemail.email)
        .bind(&voicemail.language)
        .bind(&voicemail.timezone)
        .bind(voicemail.max_messages.map(|m| m as i32))
        .bind(voicemail.attach_audio)
        .bind(voicemail.delete_after_notify)
        .bind(voicemail.ask_password)
        .bind(voicemail.enabled)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(())
    }

    /// Retrieves a voicemail box by identifier
    pub async fn get_voicemail(&self, id: VoicemailId) -> Result<Voicemail, DatabaseError> {
        let row = sqlx::query_as::<_, VoicemailRow>("SELECT * FROM voicemails WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Voicemail", id))?;

        Ok(row.into())
    }

    /// Retrieves a voicemail box by its `number@context` address
    pub async fn get_voicemail_by_number(
        &self,
        number: &str,
        context: &str,
    ) -> Result<Voicemail, DatabaseError> {
        let row = sqlx::query_as::<_, VoicemailRow>(
            "SELECT * FROM voicemails WHERE number = $1 AND context = $2",
        )
        .bind(number)
        .bind(context)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            DatabaseError::not_found("Voicemail", format!("{}@{}", number, context))
        })?;

        Ok(row.into())
    }

    /// Deletes a voicemail box not referenced by any user
    ///
    /// # Errors
    ///
    /// Returns `AssociationRule` while users still point at the box.
    pub async fn delete_voicemail(&self, id: VoicemailId) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let (owners,): (i64,) =
            sqlx::query_as("SELECT count(*) FROM users WHERE voicemail_id = $1")
                .bind(id.as_uuid())
                .fetch_one(&mut *tx)
                .await?;

        if owners > 0 {
            return Err(DatabaseError::AssociationRule(format!(
                "voicemail {} is still used by {} users",
                id, owners
            )));
        }

        let result = sqlx::query("DELETE FROM voicemails WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Voicemail", id));
        }

        tx.commit().await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // CTI profiles
    // ------------------------------------------------------------------

    /// Creates a CTI profile
    pub async fn create_cti_profile(&self, profile: &CtiProfile) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO cti_profiles (id, name, description) VALUES ($1, $2, $3)")
            .bind(profile.id.as_uuid())
            .bind(&profile.name)
            .bind(&profile.description)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        Ok(())
    }

    /// Lists all CTI profiles ordered by name
    pub async fn list_cti_profiles(&self) -> Result<Vec<CtiProfile>, DatabaseError> {
        let rows: Vec<(Uuid, String, Option<String>)> =
            sqlx::query_as("SELECT id, name, description FROM cti_profiles ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, description)| CtiProfile {
                id: CtiProfileId::from(id),
                name,
                description,
            })
            .collect())
    }

    // ------------------------------------------------------------------
    // Call filters
    // ------------------------------------------------------------------

    /// Creates a call filter with its members in one transaction
    pub async fn create_call_filter(
        &self,
        filter: &CallFilter,
        members: &[CallFilterMember],
    ) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO call_filters (id, name, strategy, ring_seconds, enabled)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(filter.id.as_uuid())
        .bind(&filter.name)
        .bind(filter.strategy.as_str())
        .bind(i32::from(filter.ring_seconds))
        .bind(filter.enabled)
        .execute(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        for member in members {
            sqlx::query(
                r#"
                INSERT INTO call_filter_members (filter_id, user_id, role, active)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(member.filter_id.as_uuid())
            .bind(member.user_id.as_uuid())
            .bind(role_str(member.role))
            .bind(member.active)
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from(&e))?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Retrieves a call filter by identifier
    pub async fn get_call_filter(&self, id: CallFilterId) -> Result<CallFilter, DatabaseError> {
        let row = sqlx::query_as::<_, CallFilterRow>("SELECT * FROM call_filters WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("CallFilter", id))?;

        row.into_domain()
    }

    /// Membership rows of a call filter, bosses first
    pub async fn filter_members(
        &self,
        id: CallFilterId,
    ) -> Result<Vec<CallFilterMember>, DatabaseError> {
        let rows = sqlx::query_as::<_, FilterMemberRow>(
            "SELECT * FROM call_filter_members WHERE filter_id = $1 ORDER BY role, user_id",
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(FilterMemberRow::into_domain).collect()
    }

    /// Flips the active flag of one filter membership
    pub async fn set_member_active(
        &self,
        filter_id: CallFilterId,
        user_id: UserId,
        active: bool,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE call_filter_members SET active = $3 WHERE filter_id = $1 AND user_id = $2",
        )
        .bind(filter_id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(active)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(
                "CallFilterMember",
                format!("{}/{}", filter_id, user_id),
            ));
        }
        Ok(())
    }

    /// Whether some filter has `secretary` actively filtering `boss`
    ///
    /// One join over the membership table; the in-memory twin of
    /// `domain_endpoint::does_secretary_filter_boss`.
    pub async fn does_secretary_filter_boss(
        &self,
        boss: UserId,
        secretary: UserId,
    ) -> Result<bool, DatabaseError> {
        let (filtering,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM call_filter_members b
                INNER JOIN call_filter_members s ON s.filter_id = b.filter_id
                WHERE b.user_id = $1 AND b.role = 'boss' AND b.active
                  AND s.user_id = $2 AND s.role = 'secretary' AND s.active
            )
            "#,
        )
        .bind(boss.as_uuid())
        .bind(secretary.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(filtering)
    }
}
