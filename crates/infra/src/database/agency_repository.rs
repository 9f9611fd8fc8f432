//! Agency repository implementation using SQLite
//!
//! Persists agencies with their Alto settings and the append-only audit log
//! of settings edits.

use std::sync::Arc;

use altolink_core::AgencyRepository as AgencyRepositoryPort;
use altolink_domain::{
    Agency, AltoLinkError, AltoSettingsChange, AltoSettingsUpdate, AuditEntry,
    Result as DomainResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row, TransactionBehavior};
use tokio::task;
use uuid::Uuid;

use super::manager::{map_sql_error, DbManager};

const AGENCY_COLUMNS: &str =
    "id, name, username, created_at, agency_ref, alto_production_enabled";

/// SQLite-backed implementation of `AgencyRepository`
pub struct SqliteAgencyRepository {
    db: Arc<DbManager>,
}

impl SqliteAgencyRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AgencyRepositoryPort for SqliteAgencyRepository {
    async fn list(&self, offset: u64, limit: u64) -> DomainResult<(Vec<Agency>, u64)> {
        let db = Arc::clone(&self.db);
        let offset = to_sql_int(offset)?;
        let limit = to_sql_int(limit)?;

        task::spawn_blocking(move || -> DomainResult<(Vec<Agency>, u64)> {
            let conn = db.get_connection()?;

            let total: i64 = conn
                .query_row("SELECT COUNT(*) FROM agencies", [], |row| row.get(0))
                .map_err(map_sql_error)?;

            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {AGENCY_COLUMNS} FROM agencies
                     ORDER BY name COLLATE NOCASE, id
                     LIMIT ?1 OFFSET ?2"
                ))
                .map_err(map_sql_error)?;

            let agencies = stmt
                .query_map(params![limit, offset], map_agency_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;

            Ok((agencies, u64::try_from(total).unwrap_or(0)))
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get(&self, id: &str) -> DomainResult<Option<Agency>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Agency>> {
            let conn = db.get_connection()?;
            conn.query_row(
                &format!("SELECT {AGENCY_COLUMNS} FROM agencies WHERE id = ?1"),
                params![&id],
                map_agency_row,
            )
            .optional()
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn insert(&self, agency: Agency) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO agencies (id, name, username, created_at, agency_ref, alto_production_enabled)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    &agency.id,
                    &agency.name,
                    &agency.username,
                    agency.created_at.timestamp_millis(),
                    &agency.agency_ref,
                    bool_to_int(agency.alto_production_enabled),
                ],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update_alto_settings(
        &self,
        id: &str,
        update: AltoSettingsUpdate,
        actor: &str,
    ) -> DomainResult<AltoSettingsChange> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();
        let actor = actor.to_string();

        task::spawn_blocking(move || -> DomainResult<AltoSettingsChange> {
            let mut conn = db.get_connection()?;
            // IMMEDIATE takes the write lock before the read below
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;

            let before = tx
                .query_row(
                    &format!("SELECT {AGENCY_COLUMNS} FROM agencies WHERE id = ?1"),
                    params![&id],
                    map_agency_row,
                )
                .optional()
                .map_err(map_sql_error)?
                .ok_or_else(|| AltoLinkError::NotFound(format!("agency {id}")))?;

            let after = before.with_alto_settings(&update)?;
            let Some(entry) = AuditEntry::for_change(&before, &after, &actor) else {
                return Ok(AltoSettingsChange { agency: after, audit: None });
            };

            tx.execute(
                "UPDATE agencies
                 SET agency_ref = ?1, alto_production_enabled = ?2
                 WHERE id = ?3",
                params![&after.agency_ref, bool_to_int(after.alto_production_enabled), &after.id],
            )
            .map_err(map_sql_error)?;

            tx.execute(
                "INSERT INTO agency_alto_audit
                    (id, agency_id, old_value, new_value, old_production_enabled,
                     new_production_enabled, actor, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    entry.id.to_string(),
                    &entry.agency_id,
                    &entry.old_value,
                    &entry.new_value,
                    bool_to_int(entry.old_production_enabled),
                    bool_to_int(entry.new_production_enabled),
                    &entry.actor,
                    entry.timestamp.timestamp_millis(),
                ],
            )
            .map_err(map_sql_error)?;

            tx.commit().map_err(map_sql_error)?;
            Ok(AltoSettingsChange { agency: after, audit: Some(entry) })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_audit(&self, agency_id: &str) -> DomainResult<Vec<AuditEntry>> {
        let db = Arc::clone(&self.db);
        let agency_id = agency_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<AuditEntry>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, agency_id, old_value, new_value, old_production_enabled,
                            new_production_enabled, actor, created_at
                     FROM agency_alto_audit
                     WHERE agency_id = ?1
                     ORDER BY created_at DESC, rowid DESC",
                )
                .map_err(map_sql_error)?;

            let entries = stmt
                .query_map(params![&agency_id], map_audit_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(entries)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_agency_row(row: &Row<'_>) -> rusqlite::Result<Agency> {
    Ok(Agency {
        id: row.get(0)?,
        name: row.get(1)?,
        username: row.get(2)?,
        created_at: millis_to_datetime(3, row.get(3)?)?,
        agency_ref: row.get(4)?,
        alto_production_enabled: row.get::<_, i64>(5)? != 0,
    })
}

fn map_audit_row(row: &Row<'_>) -> rusqlite::Result<AuditEntry> {
    let raw_id: String = row.get(0)?;
    let id = Uuid::parse_str(&raw_id)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

    Ok(AuditEntry {
        id,
        agency_id: row.get(1)?,
        old_value: row.get(2)?,
        new_value: row.get(3)?,
        old_production_enabled: row.get::<_, i64>(4)? != 0,
        new_production_enabled: row.get::<_, i64>(5)? != 0,
        actor: row.get(6)?,
        timestamp: millis_to_datetime(7, row.get(7)?)?,
    })
}

fn millis_to_datetime(column: usize, millis: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(column, millis))
}

fn to_sql_int(value: u64) -> DomainResult<i64> {
    i64::try_from(value)
        .map_err(|_| AltoLinkError::InvalidInput(format!("value {value} is out of range")))
}

fn map_join_error(err: task::JoinError) -> AltoLinkError {
    AltoLinkError::Internal(format!("Task join error: {err}"))
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
