//! Copie Repository

use crate::common::error::RegistreResult;
use sqlx::{Sqlite, SqlitePool, Transaction};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CopieRow {
    pub id: i64,
    pub acte_id: i64,
    pub type_copie: String,
    /// Requester serialized as JSON
    pub demandeur: String,
    pub numero_copie: i64,
    pub hash_integrite: String,
    pub validite_juridique: bool,
    pub created_at: i64,
}

const COLONNES: &str =
    "id, acte_id, type_copie, demandeur, numero_copie, hash_integrite, validite_juridique, created_at";

pub async fn insert(tx: &mut Transaction<'_, Sqlite>, copie: &CopieRow) -> RegistreResult<()> {
    sqlx::query(
        "INSERT INTO copie_conforme (id, acte_id, type_copie, demandeur, numero_copie, \
         hash_integrite, validite_juridique, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(copie.id)
    .bind(copie.acte_id)
    .bind(&copie.type_copie)
    .bind(&copie.demandeur)
    .bind(copie.numero_copie)
    .bind(&copie.hash_integrite)
    .bind(copie.validite_juridique)
    .bind(copie.created_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RegistreResult<Option<CopieRow>> {
    let row = sqlx::query_as::<_, CopieRow>(&format!(
        "SELECT {COLONNES} FROM copie_conforme WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Copies of one acte, oldest first (issuance order equals numero_copie
/// order within a year).
pub async fn list_by_acte(pool: &SqlitePool, acte_id: i64) -> RegistreResult<Vec<CopieRow>> {
    let rows = sqlx::query_as::<_, CopieRow>(&format!(
        "SELECT {COLONNES} FROM copie_conforme WHERE acte_id = ? ORDER BY created_at, id"
    ))
    .bind(acte_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
