//! Call-center repository implementation
//!
//! This module provides database access for queues, agents, and queue
//! membership. Member ordering (penalty, then position) is maintained in
//! the database; adding a member appends it at the end of its queue inside
//! a transaction.

use sqlx::PgPool;
use uuid::Uuid;

use domain_callcenter::{Agent, Queue, QueueMember, RingStrategy};
use pbx_kernel::{AgentId, QueueId, UserId};

use crate::error::DatabaseError;

/// Database row for a queue
#[derive(Debug, sqlx::FromRow)]
struct QueueRow {
    id: Uuid,
    name: String,
    display_name: Option<String>,
    music_on_hold: Option<String>,
    strategy: String,
    member_timeout: i32,
    max_wait_time: Option<i32>,
    preprocess_subroutine: Option<String>,
    enabled: bool,
}

impl QueueRow {
    fn into_domain(self) -> Result<Queue, DatabaseError> {
        let strategy = RingStrategy::parse(&self.strategy)
            .ok_or_else(|| DatabaseError::corrupt("queues", "strategy", &self.strategy))?;

        Ok(Queue {
            id: QueueId::from(self.id),
            name: self.name,
            display_name: self.display_name,
            music_on_hold: self.music_on_hold,
            strategy,
            member_timeout: self.member_timeout.clamp(0, i32::from(u16::MAX)) as u16,
            max_wait_time: self.max_wait_time.map(|w| w.max(0) as u32),
            preprocess_subroutine: self.preprocess_subroutine,
            enabled: self.enabled,
        })
    }
}

/// Database row for an agent
#[derive(Debug, sqlx::FromRow)]
struct AgentRow {
    id: Uuid,
    number: String,
    first_name: String,
    last_name: Option<String>,
    context: String,
    language: Option<String>,
    description: Option<String>,
}

impl From<AgentRow> for Agent {
    fn from(row: AgentRow) -> Self {
        Agent {
            id: AgentId::from(row.id),
            number: row.number,
            first_name: row.first_name,
            last_name: row.last_name,
            context: row.context,
            language: row.language,
            description: row.description,
        }
    }
}

/// Database row for a queue member
#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    queue_id: Uuid,
    user_id: Option<Uuid>,
    agent_id: Option<Uuid>,
    interface: String,
    penalty: i32,
    position: i32,
}

impl From<MemberRow> for QueueMember {
    fn from(row: MemberRow) -> Self {
        QueueMember {
            queue_id: QueueId::from(row.queue_id),
            user_id: row.user_id.map(UserId::from),
            agent_id: row.agent_id.map(AgentId::from),
            interface: row.interface,
            penalty: row.penalty.clamp(0, i32::from(u8::MAX)) as u8,
            position: row.position.clamp(0, i32::from(u16::MAX)) as u16,
        }
    }
}

/// Repository for queues, agents, and queue membership
#[derive(Debug, Clone)]
pub struct CallCenterRepository {
    pool: PgPool,
}

impl CallCenterRepository {
    /// Creates a new CallCenterRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ------------------------------------------------------------------
    // Queues
    // ------------------------------------------------------------------

    /// Creates a queue
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEntry` when the queue name is already taken.
    pub async fn create_queue(&self, queue: &Queue) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO queues (
                id, name, display_name, music_on_hold, strategy, member_timeout,
                max_wait_time, preprocess_subroutine, enabled
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(queue.id.as_uuid())
        .bind(&queue.name)
        .bind(&queue.display_name)
        .bind(&queue.music_on_hold)
        .bind(queue.strategy.as_str())
        .bind(i32::from(queue.member_timeout))
        .bind(queue.max_wait_time.map(|w| w as i32))
        .bind(&queue.preprocess_subroutine)
        .bind(queue.enabled)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(())
    }

    /// Retrieves a queue by identifier
    pub async fn get_queue(&self, id: QueueId) -> Result<Queue, DatabaseError> {
        let row = sqlx::query_as::<_, QueueRow>("SELECT * FROM queues WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Queue", id))?;

        row.into_domain()
    }

    /// Retrieves a queue by its name, the natural key of the queue-log rows
    pub async fn get_queue_by_name(&self, name: &str) -> Result<Queue, DatabaseError> {
        let row = sqlx::query_as::<_, QueueRow>("SELECT * FROM queues WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Queue", name))?;

        row.into_domain()
    }

    /// Lists all queues ordered by name
    pub async fn list_queues(&self) -> Result<Vec<Queue>, DatabaseError> {
        let rows = sqlx::query_as::<_, QueueRow>("SELECT * FROM queues ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(QueueRow::into_domain).collect()
    }

    /// Updates a queue's attributes
    pub async fn update_queue(&self, queue: &Queue) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE queues SET
                name = $2, display_name = $3, music_on_hold = $4, strategy = $5,
                member_timeout = $6, max_wait_time = $7, preprocess_subroutine = $8,
                enabled = $9
            WHERE id = $1
            "#,
        )
        .bind(queue.id.as_uuid())
        .bind(&queue.name)
        .bind(&queue.display_name)
        .bind(&queue.music_on_hold)
        .bind(queue.strategy.as_str())
        .bind(i32::from(queue.member_timeout))
        .bind(queue.max_wait_time.map(|w| w as i32))
        .bind(&queue.preprocess_subroutine)
        .bind(queue.enabled)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Queue", queue.id));
        }
        Ok(())
    }

    /// Deletes a queue; member rows go with it
    pub async fn delete_queue(&self, id: QueueId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM queues WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Queue", id));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Agents
    // ------------------------------------------------------------------

    /// Creates an agent
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEntry` when `(number, context)` is already taken.
    pub async fn create_agent(&self, agent: &Agent) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO agents (id, number, first_name, last_name, context, language, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(agent.id.as_uuid())
        .bind(&agent.number)
        .bind(&agent.first_name)
        .bind(&agent.last_name)
        .bind(&agent.context)
        .bind(&agent.language)
        .bind(&agent.description)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(())
    }

    /// Retrieves an agent by identifier
    pub async fn get_agent(&self, id: AgentId) -> Result<Agent, DatabaseError> {
        let row = sqlx::query_as::<_, AgentRow>("SELECT * FROM agents WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Agent", id))?;

        Ok(row.into())
    }

    /// Finds an agent by login number within a context
    pub async fn find_agent_by_number(
        &self,
        number: &str,
        context: &str,
    ) -> Result<Agent, DatabaseError> {
        let row = sqlx::query_as::<_, AgentRow>(
            "SELECT * FROM agents WHERE number = $1 AND context = $2",
        )
        .bind(number)
        .bind(context)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Agent", format!("{}@{}", number, context)))?;

        Ok(row.into())
    }

    /// Lists all agents ordered by number
    pub async fn list_agents(&self) -> Result<Vec<Agent>, DatabaseError> {
        let rows = sqlx::query_as::<_, AgentRow>("SELECT * FROM agents ORDER BY number")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Agent::from).collect())
    }

    /// Deletes an agent; member rows go with it
    pub async fn delete_agent(&self, id: AgentId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM agents WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Agent", id));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------

    /// Adds a member at the end of its queue
    ///
    /// The stored position is computed inside the transaction as one past
    /// the queue's current maximum, so concurrent adds cannot collide; the
    /// `position` carried by the argument is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConstraintViolation` when the member references both a user
    /// and an agent, or neither.
    pub async fn add_member(&self, member: &QueueMember) -> Result<QueueMember, DatabaseError> {
        member
            .validate()
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;

        let mut tx = self.pool.begin().await?;

        let (position,): (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(position), 0) + 1 FROM queue_members WHERE queue_id = $1",
        )
        .bind(member.queue_id.as_uuid())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO queue_members (queue_id, user_id, agent_id, interface, penalty, position)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(member.queue_id.as_uuid())
        .bind(member.user_id.map(|id| *id.as_uuid()))
        .bind(member.agent_id.map(|id| *id.as_uuid()))
        .bind(&member.interface)
        .bind(i32::from(member.penalty))
        .bind(position)
        .execute(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        tx.commit().await?;

        Ok(QueueMember {
            position: position.clamp(0, i32::from(u16::MAX)) as u16,
            ..member.clone()
        })
    }

    /// Changes a member's ring penalty
    pub async fn set_member_penalty(
        &self,
        queue_id: QueueId,
        interface: &str,
        penalty: u16,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE queue_members SET penalty = $3 WHERE queue_id = $1 AND interface = $2",
        )
        .bind(queue_id.as_uuid())
        .bind(interface)
        .bind(i32::from(penalty))
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(
                "QueueMember",
                format!("{}/{}", queue_id, interface),
            ));
        }
        Ok(())
    }

    /// Removes a member by its interface string
    pub async fn remove_member(
        &self,
        queue_id: QueueId,
        interface: &str,
    ) -> Result<(), DatabaseError> {
        let result =
            sqlx::query("DELETE FROM queue_members WHERE queue_id = $1 AND interface = $2")
                .bind(queue_id.as_uuid())
                .bind(interface)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(
                "QueueMember",
                format!("{}/{}", queue_id, interface),
            ));
        }
        Ok(())
    }

    /// Members of a queue in ring order (penalty, then position)
    pub async fn members_of_queue(
        &self,
        queue_id: QueueId,
    ) -> Result<Vec<QueueMember>, DatabaseError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT queue_id, user_id, agent_id, interface, penalty, position
            FROM queue_members
            WHERE queue_id = $1
            ORDER BY penalty, position
            "#,
        )
        .bind(queue_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(QueueMember::from).collect())
    }

    /// Queues an agent is a member of, ordered by queue name
    pub async fn queues_of_agent(&self, agent_id: AgentId) -> Result<Vec<Queue>, DatabaseError> {
        let rows = sqlx::query_as::<_, QueueRow>(
            r#"
            SELECT q.*
            FROM queues q
            INNER JOIN queue_members qm ON qm.queue_id = q.id
            WHERE qm.agent_id = $1
            ORDER BY q.name
            "#,
        )
        .bind(agent_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(QueueRow::into_domain).collect()
    }
}
