//! Acte Repository

use crate::common::error::RegistreResult;
use shared::models::RechercheCriteres;
use sqlx::{Sqlite, SqlitePool, Transaction};

/// Raw acte row; nested structures stay serialized until the service layer
/// unseals and reassembles the entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActeRow {
    pub id: i64,
    pub numero_minutier: String,
    pub numero_repertoire: i64,
    pub type_acte: String,
    pub objet: String,
    pub parties: String,
    pub contenu_scelle: Vec<u8>,
    pub hash_integrite: String,
    pub chiffrement_cle: String,
    pub metadonnees: String,
    pub notaire_id: i64,
    pub statut: String,
    pub created_at: i64,
    pub updated_at: i64,
}

const COLONNES: &str = "id, numero_minutier, numero_repertoire, type_acte, objet, parties, \
     contenu_scelle, hash_integrite, chiffrement_cle, metadonnees, notaire_id, statut, \
     created_at, updated_at";

/// Search predicate shared by the page, total and facet queries so facet
/// counts can never drift from the paged result.
const FILTRE_RECHERCHE: &str = "notaire_id = ?1 \
     AND (?2 IS NULL OR type_acte = ?2) \
     AND (?3 IS NULL OR objet LIKE '%' || ?3 || '%') \
     AND (?4 IS NULL OR created_at >= ?4) \
     AND (?5 IS NULL OR created_at <= ?5)";

pub async fn insert(tx: &mut Transaction<'_, Sqlite>, acte: &ActeRow) -> RegistreResult<()> {
    sqlx::query(
        "INSERT INTO acte_authentique (id, numero_minutier, numero_repertoire, type_acte, objet, \
         parties, contenu_scelle, hash_integrite, chiffrement_cle, metadonnees, notaire_id, \
         statut, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(acte.id)
    .bind(&acte.numero_minutier)
    .bind(acte.numero_repertoire)
    .bind(&acte.type_acte)
    .bind(&acte.objet)
    .bind(&acte.parties)
    .bind(&acte.contenu_scelle)
    .bind(&acte.hash_integrite)
    .bind(&acte.chiffrement_cle)
    .bind(&acte.metadonnees)
    .bind(acte.notaire_id)
    .bind(&acte.statut)
    .bind(acte.created_at)
    .bind(acte.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RegistreResult<Option<ActeRow>> {
    let row = sqlx::query_as::<_, ActeRow>(&format!(
        "SELECT {COLONNES} FROM acte_authentique WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Compare-and-set lifecycle transition. Returns false when the acte was
/// not in the expected state (concurrent transition or caller raced).
pub async fn update_statut(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    attendu: &[&str],
    nouveau: &str,
    now: i64,
) -> RegistreResult<bool> {
    // attendu is a fixed set of lifecycle states, never user input
    let placeholders = attendu
        .iter()
        .map(|s| format!("'{s}'"))
        .collect::<Vec<_>>()
        .join(", ");
    let rows = sqlx::query(&format!(
        "UPDATE acte_authentique SET statut = ?, updated_at = ? \
         WHERE id = ? AND statut IN ({placeholders})"
    ))
    .bind(nouveau)
    .bind(now)
    .bind(id)
    .execute(&mut **tx)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Paged search scoped to one notary. Returns the page rows and the size
/// of the full filtered set.
///
/// Runs on the caller's transaction so the page, the total and the facet
/// counts of one search all read the same snapshot.
pub async fn search(
    tx: &mut Transaction<'_, Sqlite>,
    notaire_id: i64,
    criteres: &RechercheCriteres,
) -> RegistreResult<(Vec<ActeRow>, i64)> {
    let (page, limite) = criteres.page_limite();
    // Widen before multiplying: page is caller-controlled and unbounded
    let offset = (i64::from(page) - 1) * i64::from(limite);
    let type_acte = criteres.type_acte.map(|t| t.as_str());

    let rows = sqlx::query_as::<_, ActeRow>(&format!(
        "SELECT {COLONNES} FROM acte_authentique WHERE {FILTRE_RECHERCHE} \
         ORDER BY created_at DESC, id DESC LIMIT ?6 OFFSET ?7"
    ))
    .bind(notaire_id)
    .bind(type_acte)
    .bind(criteres.objet.as_deref())
    .bind(criteres.date_debut)
    .bind(criteres.date_fin)
    .bind(i64::from(limite))
    .bind(offset)
    .fetch_all(&mut **tx)
    .await?;

    let total: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM acte_authentique WHERE {FILTRE_RECHERCHE}"
    ))
    .bind(notaire_id)
    .bind(type_acte)
    .bind(criteres.objet.as_deref())
    .bind(criteres.date_debut)
    .bind(criteres.date_fin)
    .fetch_one(&mut **tx)
    .await?;

    Ok((rows, total))
}

/// Facet counts (per type_acte and per statut) over the same predicate as
/// [`search`], never an independently-filtered query. Run on the search's
/// transaction so the counts cannot drift from its total.
pub async fn facettes(
    tx: &mut Transaction<'_, Sqlite>,
    notaire_id: i64,
    criteres: &RechercheCriteres,
) -> RegistreResult<(Vec<(String, i64)>, Vec<(String, i64)>)> {
    let type_acte = criteres.type_acte.map(|t| t.as_str());

    let par_type: Vec<(String, i64)> = sqlx::query_as(&format!(
        "SELECT type_acte, COUNT(*) FROM acte_authentique WHERE {FILTRE_RECHERCHE} \
         GROUP BY type_acte ORDER BY type_acte"
    ))
    .bind(notaire_id)
    .bind(type_acte)
    .bind(criteres.objet.as_deref())
    .bind(criteres.date_debut)
    .bind(criteres.date_fin)
    .fetch_all(&mut **tx)
    .await?;

    let par_statut: Vec<(String, i64)> = sqlx::query_as(&format!(
        "SELECT statut, COUNT(*) FROM acte_authentique WHERE {FILTRE_RECHERCHE} \
         GROUP BY statut ORDER BY statut"
    ))
    .bind(notaire_id)
    .bind(type_acte)
    .bind(criteres.objet.as_deref())
    .bind(criteres.date_debut)
    .bind(criteres.date_fin)
    .fetch_all(&mut **tx)
    .await?;

    Ok((par_type, par_statut))
}
