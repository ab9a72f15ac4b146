//! Sequence Allocator
//!
//! Gap-free, strictly increasing counters per (notaire, kind, scope),
//! stored as rows and incremented on the caller's open transaction. A
//! rollback of the enclosing transaction therefore never advances a
//! counter — the numbering stays legally gap-free.

use crate::common::error::RegistreResult;
use sqlx::{Sqlite, Transaction};

/// Counter kinds, one independent scope each.
///
/// Within a single transaction counters must be acquired in declaration
/// order (Minutier, Repertoire, Archive, Copie) so that concurrent
/// creations and copy issuances keep a global lock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
    Minutier,
    Repertoire,
    Archive,
    Copie,
}

impl CounterKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CounterKind::Minutier => "MINUTIER",
            CounterKind::Repertoire => "REPERTOIRE",
            CounterKind::Archive => "ARCHIVE",
            CounterKind::Copie => "COPIE",
        }
    }
}

/// Allocate the next value for a counter scope: contiguous integers
/// starting at 1.
///
/// The read-increment-write runs as a single UPDATE on the caller's
/// transaction, so the store's row lock serializes concurrent callers;
/// no optimistic retry is involved.
pub async fn next_value(
    tx: &mut Transaction<'_, Sqlite>,
    notaire_id: i64,
    kind: CounterKind,
    scope: &str,
) -> RegistreResult<i64> {
    sqlx::query(
        "INSERT INTO sequence_counter (notaire_id, kind, scope, value) VALUES (?, ?, ?, 0) \
         ON CONFLICT(notaire_id, kind, scope) DO NOTHING",
    )
    .bind(notaire_id)
    .bind(kind.as_str())
    .bind(scope)
    .execute(&mut **tx)
    .await?;

    let value: i64 = sqlx::query_scalar(
        "UPDATE sequence_counter SET value = value + 1 \
         WHERE notaire_id = ? AND kind = ? AND scope = ? RETURNING value",
    )
    .bind(notaire_id)
    .bind(kind.as_str())
    .bind(scope)
    .fetch_one(&mut **tx)
    .await?;

    Ok(value)
}

/// Read the current value of a counter without advancing it (0 if the
/// scope was never used).
pub async fn current_value(
    pool: &sqlx::SqlitePool,
    notaire_id: i64,
    kind: CounterKind,
    scope: &str,
) -> RegistreResult<i64> {
    let value: Option<i64> = sqlx::query_scalar(
        "SELECT value FROM sequence_counter WHERE notaire_id = ? AND kind = ? AND scope = ?",
    )
    .bind(notaire_id)
    .bind(kind.as_str())
    .bind(scope)
    .fetch_optional(pool)
    .await?;
    Ok(value.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn test_values_contiguous_from_one() {
        let db = DbService::new_in_memory().await.unwrap();
        for expected in 1..=5 {
            let mut tx = db.pool.begin().await.unwrap();
            let v = next_value(&mut tx, 1, CounterKind::Minutier, "2026")
                .await
                .unwrap();
            tx.commit().await.unwrap();
            assert_eq!(v, expected);
        }
    }

    #[tokio::test]
    async fn test_rollback_does_not_advance() {
        let db = DbService::new_in_memory().await.unwrap();

        let mut tx = db.pool.begin().await.unwrap();
        let v = next_value(&mut tx, 1, CounterKind::Minutier, "2026")
            .await
            .unwrap();
        assert_eq!(v, 1);
        tx.rollback().await.unwrap();

        // Aborted allocation leaves no trace: the next caller gets 1 again
        let mut tx = db.pool.begin().await.unwrap();
        let v = next_value(&mut tx, 1, CounterKind::Minutier, "2026")
            .await
            .unwrap();
        tx.commit().await.unwrap();
        assert_eq!(v, 1);
        assert_eq!(
            current_value(&db.pool, 1, CounterKind::Minutier, "2026")
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_scopes_independent() {
        let db = DbService::new_in_memory().await.unwrap();
        let mut tx = db.pool.begin().await.unwrap();
        assert_eq!(
            next_value(&mut tx, 1, CounterKind::Minutier, "2026")
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            next_value(&mut tx, 1, CounterKind::Repertoire, "2026")
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            next_value(&mut tx, 1, CounterKind::Minutier, "2027")
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            next_value(&mut tx, 2, CounterKind::Minutier, "2026")
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            next_value(&mut tx, 1, CounterKind::Minutier, "2026")
                .await
                .unwrap(),
            2
        );
        tx.commit().await.unwrap();
    }
}
