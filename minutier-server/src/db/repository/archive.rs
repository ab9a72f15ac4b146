//! Archive Repository
//!
//! Archive metadata (one row per acte) and backup records (one row per
//! destination kind). Activation and backup writes always run on the
//! caller's transaction so partial archivals never persist.

use crate::common::error::RegistreResult;
use sqlx::{Sqlite, SqlitePool, Transaction};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArchivageRow {
    pub acte_id: i64,
    pub numero_archive: i64,
    pub emplacement_physique: Option<String>,
    pub emplacement_numerique: Option<String>,
    pub duree_retention_jours: Option<i64>,
    pub statut: String,
    pub updated_at: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SauvegardeRow {
    pub id: i64,
    pub acte_id: i64,
    pub type_sauvegarde: String,
    pub emplacement: String,
    pub statut: String,
    pub created_at: i64,
}

/// Insert the EN_ATTENTE archive row created alongside a new acte.
pub async fn insert_initial(
    tx: &mut Transaction<'_, Sqlite>,
    acte_id: i64,
    numero_archive: i64,
    now: i64,
) -> RegistreResult<()> {
    sqlx::query(
        "INSERT INTO archivage (acte_id, numero_archive, statut, updated_at) \
         VALUES (?, ?, 'EN_ATTENTE', ?)",
    )
    .bind(acte_id)
    .bind(numero_archive)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Declare a backup destination at creation time, before anything has been
/// written to it.
pub async fn inserer_placeholder(
    tx: &mut Transaction<'_, Sqlite>,
    acte_id: i64,
    type_sauvegarde: &str,
    now: i64,
) -> RegistreResult<()> {
    sqlx::query(
        "INSERT INTO sauvegarde (acte_id, type_sauvegarde, emplacement, statut, created_at) \
         VALUES (?, ?, '', 'EN_ATTENTE', ?)",
    )
    .bind(acte_id)
    .bind(type_sauvegarde)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Flip the archive row to ACTIF with the locations and retention decided
/// at archival.
pub async fn activer(
    tx: &mut Transaction<'_, Sqlite>,
    acte_id: i64,
    emplacement_physique: &str,
    emplacement_numerique: &str,
    duree_retention_jours: i64,
    now: i64,
) -> RegistreResult<()> {
    sqlx::query(
        "UPDATE archivage SET emplacement_physique = ?, emplacement_numerique = ?, \
         duree_retention_jours = ?, statut = 'ACTIF', updated_at = ? WHERE acte_id = ?",
    )
    .bind(emplacement_physique)
    .bind(emplacement_numerique)
    .bind(duree_retention_jours)
    .bind(now)
    .bind(acte_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Record one persisted backup. Upsert: a placeholder declared at creation
/// becomes ACTIF, a kind never declared gets a fresh row.
pub async fn enregistrer_sauvegarde(
    tx: &mut Transaction<'_, Sqlite>,
    acte_id: i64,
    type_sauvegarde: &str,
    emplacement: &str,
    now: i64,
) -> RegistreResult<()> {
    sqlx::query(
        "INSERT INTO sauvegarde (acte_id, type_sauvegarde, emplacement, statut, created_at) \
         VALUES (?, ?, ?, 'ACTIF', ?) \
         ON CONFLICT(acte_id, type_sauvegarde) \
         DO UPDATE SET emplacement = excluded.emplacement, statut = 'ACTIF'",
    )
    .bind(acte_id)
    .bind(type_sauvegarde)
    .bind(emplacement)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn find_by_acte(
    pool: &SqlitePool,
    acte_id: i64,
) -> RegistreResult<Option<ArchivageRow>> {
    let row = sqlx::query_as::<_, ArchivageRow>(
        "SELECT acte_id, numero_archive, emplacement_physique, emplacement_numerique, \
         duree_retention_jours, statut, updated_at FROM archivage WHERE acte_id = ?",
    )
    .bind(acte_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn list_sauvegardes(
    pool: &SqlitePool,
    acte_id: i64,
) -> RegistreResult<Vec<SauvegardeRow>> {
    let rows = sqlx::query_as::<_, SauvegardeRow>(
        "SELECT id, acte_id, type_sauvegarde, emplacement, statut, created_at \
         FROM sauvegarde WHERE acte_id = ? ORDER BY type_sauvegarde",
    )
    .bind(acte_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn count_actives(pool: &SqlitePool, acte_id: i64) -> RegistreResult<i64> {
    let n: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sauvegarde WHERE acte_id = ? AND statut = 'ACTIF'",
    )
    .bind(acte_id)
    .fetch_one(pool)
    .await?;
    Ok(n)
}
