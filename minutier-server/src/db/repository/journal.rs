//! Journal Repository
//!
//! Append-only audit trail of registry mutations. Entries are written on
//! the mutating transaction, so an aborted operation leaves no journal
//! trace either.

use crate::common::error::RegistreResult;
use sqlx::{Sqlite, SqlitePool, Transaction};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JournalRow {
    pub id: i64,
    pub notaire_id: i64,
    pub acte_id: Option<i64>,
    pub action: String,
    pub detail: Option<String>,
    pub created_at: i64,
}

pub async fn log(
    tx: &mut Transaction<'_, Sqlite>,
    notaire_id: i64,
    acte_id: Option<i64>,
    action: &str,
    detail: Option<&str>,
    now: i64,
) -> RegistreResult<()> {
    sqlx::query(
        "INSERT INTO journal_registre (notaire_id, acte_id, action, detail, created_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(notaire_id)
    .bind(acte_id)
    .bind(action)
    .bind(detail)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Most recent entries first.
pub async fn list_recent(
    pool: &SqlitePool,
    notaire_id: i64,
    limit: i64,
) -> RegistreResult<Vec<JournalRow>> {
    let rows = sqlx::query_as::<_, JournalRow>(
        "SELECT id, notaire_id, acte_id, action, detail, created_at \
         FROM journal_registre WHERE notaire_id = ? ORDER BY id DESC LIMIT ?",
    )
    .bind(notaire_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn list_by_acte(pool: &SqlitePool, acte_id: i64) -> RegistreResult<Vec<JournalRow>> {
    let rows = sqlx::query_as::<_, JournalRow>(
        "SELECT id, notaire_id, acte_id, action, detail, created_at \
         FROM journal_registre WHERE acte_id = ? ORDER BY id",
    )
    .bind(acte_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
