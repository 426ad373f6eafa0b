//! Queue-log repository implementation
//!
//! The queue log is append-only: the PBX writes one row per call event and
//! nothing ever updates them. Reporting reads either raw rows or the hourly
//! aggregation, which is one GROUP BY over `date_trunc('hour', time)` and
//! lands in the same `HourlyQueueStats` shape the in-memory aggregation
//! produces.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use domain_callcenter::{HourlyQueueStats, QueueEventKind, QueueLogEvent};

use crate::error::DatabaseError;

/// Database row for a queue-log event
#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    time: DateTime<Utc>,
    call_id: String,
    queue: String,
    agent: Option<String>,
    event: String,
    wait_time: Option<i32>,
    talk_time: Option<i32>,
}

impl EventRow {
    fn into_domain(self) -> Result<QueueLogEvent, DatabaseError> {
        let kind = QueueEventKind::parse(&self.event)
            .ok_or_else(|| DatabaseError::corrupt("queue_log", "event", &self.event))?;

        Ok(QueueLogEvent {
            time: self.time,
            call_id: self.call_id,
            queue: self.queue,
            agent: self.agent,
            kind,
            wait_time: self.wait_time.map(|w| w.max(0) as u32),
            talk_time: self.talk_time.map(|t| t.max(0) as u32),
        })
    }
}

/// Database row for one hourly aggregation bucket
#[derive(Debug, sqlx::FromRow)]
struct StatRow {
    queue: String,
    hour: Option<DateTime<Utc>>,
    answered: i64,
    abandoned: i64,
    timeout: i64,
    full: i64,
    closed: i64,
    joinempty: i64,
    leaveempty: i64,
    divert_ca_ratio: i64,
    divert_waittime: i64,
    total_wait_time: i64,
    total_talk_time: i64,
}

impl From<StatRow> for HourlyQueueStats {
    fn from(row: StatRow) -> Self {
        HourlyQueueStats {
            queue: row.queue,
            hour: row.hour,
            answered: row.answered.max(0) as u64,
            abandoned: row.abandoned.max(0) as u64,
            timeout: row.timeout.max(0) as u64,
            full: row.full.max(0) as u64,
            closed: row.closed.max(0) as u64,
            joinempty: row.joinempty.max(0) as u64,
            leaveempty: row.leaveempty.max(0) as u64,
            divert_ca_ratio: row.divert_ca_ratio.max(0) as u64,
            divert_waittime: row.divert_waittime.max(0) as u64,
            total_wait_time: row.total_wait_time.max(0) as u64,
            total_talk_time: row.total_talk_time.max(0) as u64,
        }
    }
}

/// Repository for the append-only queue log
#[derive(Debug, Clone)]
pub struct QueueLogRepository {
    pool: PgPool,
}

impl QueueLogRepository {
    /// Creates a new QueueLogRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appends one event to the log
    pub async fn insert_event(&self, event: &QueueLogEvent) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO queue_log (time, call_id, queue, agent, event, wait_time, talk_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event.time)
        .bind(&event.call_id)
        .bind(&event.queue)
        .bind(&event.agent)
        .bind(event.kind.as_str())
        .bind(event.wait_time.map(|w| w as i32))
        .bind(event.talk_time.map(|t| t as i32))
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(())
    }

    /// Raw events of one queue over `[start, end)`, in time order
    pub async fn events_for_queue(
        &self,
        queue: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<QueueLogEvent>, DatabaseError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT time, call_id, queue, agent, event, wait_time, talk_time
            FROM queue_log
            WHERE queue = $1 AND time >= $2 AND time < $3
            ORDER BY time
            "#,
        )
        .bind(queue)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EventRow::into_domain).collect()
    }

    /// Hourly buckets for every queue over `[start, end)`
    ///
    /// Buckets come back sorted by queue name then hour, matching the
    /// in-memory aggregation. Hours with no events produce no bucket.
    pub async fn hourly_stats(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<HourlyQueueStats>, DatabaseError> {
        let rows = sqlx::query_as::<_, StatRow>(
            r#"
            SELECT
                queue,
                date_trunc('hour', time) AS hour,
                count(*) FILTER (WHERE event = 'answered')         AS answered,
                count(*) FILTER (WHERE event = 'abandoned')        AS abandoned,
                count(*) FILTER (WHERE event = 'timeout')          AS timeout,
                count(*) FILTER (WHERE event = 'full')             AS full,
                count(*) FILTER (WHERE event = 'closed')           AS closed,
                count(*) FILTER (WHERE event = 'joinempty')        AS joinempty,
                count(*) FILTER (WHERE event = 'leaveempty')       AS leaveempty,
                count(*) FILTER (WHERE event = 'divert_ca_ratio')  AS divert_ca_ratio,
                count(*) FILTER (WHERE event = 'divert_waittime')  AS divert_waittime,
                COALESCE(SUM(wait_time), 0)                        AS total_wait_time,
                COALESCE(SUM(talk_time) FILTER (WHERE event = 'answered'), 0)
                                                                   AS total_talk_time
            FROM queue_log
            WHERE time >= $1 AND time < $2
            GROUP BY queue, date_trunc('hour', time)
            ORDER BY queue, hour
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(HourlyQueueStats::from).collect())
    }

    /// Hourly buckets for one queue over `[start, end)`
    pub async fn hourly_stats_for_queue(
        &self,
        queue: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<HourlyQueueStats>, DatabaseError> {
        let all = self.hourly_stats(start, end).await?;
        Ok(all.into_iter().filter(|s| s.queue == queue).collect())
    }
}
