//! Database Module
//!
//! SQLite connection pool and migrations. All serialization guarantees of
//! the registry come from this store: one writer transaction at a time,
//! counters mutated on the caller's transaction handle.

pub mod repository;

use crate::common::error::RegistreError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

/// Database service — owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Create a new database service with WAL mode
    pub async fn new(db_path: &str) -> Result<Self, RegistreError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| RegistreError::Storage(format!("invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| RegistreError::Storage(format!("failed to open database: {e}")))?;

        // busy_timeout: wait up to 5s on write contention instead of failing
        sqlx::query("PRAGMA busy_timeout = 5000;")
            .execute(&pool)
            .await
            .map_err(|e| RegistreError::Storage(format!("failed to set busy_timeout: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    /// In-memory database for tests: a single connection so every task sees
    /// the same store.
    pub async fn new_in_memory() -> Result<Self, RegistreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| RegistreError::Storage(format!("failed to open memory db: {e}")))?;
        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> Result<(), RegistreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(pool)
            .await
            .map_err(|e| RegistreError::Storage(format!("failed to apply schema: {e}")))?;
        tracing::info!("Database schema applied");
        Ok(())
    }
}

/// Registry schema. Nested structures (parties, demandeur, metadonnees) are
/// stored as JSON text; sealed content is an opaque BLOB.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS acte_authentique (
    id INTEGER PRIMARY KEY,
    numero_minutier TEXT NOT NULL,
    numero_repertoire INTEGER NOT NULL,
    type_acte TEXT NOT NULL,
    objet TEXT NOT NULL,
    parties TEXT NOT NULL,
    contenu_scelle BLOB NOT NULL,
    hash_integrite TEXT NOT NULL,
    chiffrement_cle TEXT NOT NULL,
    metadonnees TEXT NOT NULL,
    notaire_id INTEGER NOT NULL,
    statut TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    UNIQUE(notaire_id, numero_minutier)
);

CREATE INDEX IF NOT EXISTS idx_acte_notaire_created
    ON acte_authentique(notaire_id, created_at);

CREATE TABLE IF NOT EXISTS archivage (
    acte_id INTEGER PRIMARY KEY REFERENCES acte_authentique(id),
    numero_archive INTEGER NOT NULL,
    emplacement_physique TEXT,
    emplacement_numerique TEXT,
    duree_retention_jours INTEGER,
    statut TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS sauvegarde (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    acte_id INTEGER NOT NULL REFERENCES acte_authentique(id),
    type_sauvegarde TEXT NOT NULL,
    emplacement TEXT NOT NULL,
    statut TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    UNIQUE(acte_id, type_sauvegarde)
);

CREATE TABLE IF NOT EXISTS copie_conforme (
    id INTEGER PRIMARY KEY,
    acte_id INTEGER NOT NULL REFERENCES acte_authentique(id),
    type_copie TEXT NOT NULL,
    demandeur TEXT NOT NULL,
    numero_copie INTEGER NOT NULL,
    hash_integrite TEXT NOT NULL,
    validite_juridique INTEGER NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_copie_acte ON copie_conforme(acte_id);

CREATE TABLE IF NOT EXISTS sequence_counter (
    notaire_id INTEGER NOT NULL,
    kind TEXT NOT NULL,
    scope TEXT NOT NULL,
    value INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (notaire_id, kind, scope)
);

CREATE TABLE IF NOT EXISTS journal_registre (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    notaire_id INTEGER NOT NULL,
    acte_id INTEGER,
    action TEXT NOT NULL,
    detail TEXT,
    created_at INTEGER NOT NULL
);
"#;
