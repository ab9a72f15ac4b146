//! Copy Issuance Service
//!
//! Certified copies of signed deeds. A copy is only ever issued from an
//! acte that is at least SIGNE; drafts have no legal existence to copy.
//! Copy numbers are gap-free per (notary, year), allocated on the same
//! transaction as the copy row.

use crate::common::error::{RegistreError, RegistreResult};
use crate::db::repository::{CounterKind, copie, journal, sequence};
use crate::services::registre::RegistreActes;
use crate::services::scellement;
use shared::models::{CopieConforme, GenererCopieRequest, StatutActe};
use shared::util::{current_year, now_millis, snowflake_id};
use validator::Validate;

/// Issues and verifies certified copies
#[derive(Clone)]
pub struct EmetteurCopies {
    registre: RegistreActes,
}

impl EmetteurCopies {
    pub fn new(registre: RegistreActes) -> Self {
        Self { registre }
    }

    /// Issue a copy of a signed deed.
    ///
    /// The copy's digest binds it to the source content hash, so the pair
    /// can be re-verified at any later read. `validite_juridique` is set
    /// only on successful issuance.
    pub async fn generer_copie_conforme(
        &self,
        notaire_id: i64,
        req: GenererCopieRequest,
    ) -> RegistreResult<CopieConforme> {
        req.validate()?;

        // Ownership and content integrity checked by the full read
        let acte = self
            .registre
            .obtenir_acte_par_id(notaire_id, req.acte_id)
            .await?;
        if !acte.statut.est_signe() {
            return Err(RegistreError::InvalidStateTransition {
                requis: StatutActe::Signe,
                actuel: acte.statut,
            });
        }

        let annee = current_year().to_string();
        let now = now_millis();
        let id = snowflake_id();

        let mut tx = self.registre.db.pool.begin().await?;
        let numero_copie =
            sequence::next_value(&mut tx, notaire_id, CounterKind::Copie, &annee).await?;
        let hash_integrite =
            scellement::hash_copie(&acte.hash_integrite, req.type_copie, numero_copie);

        copie::insert(
            &mut tx,
            &copie::CopieRow {
                id,
                acte_id: acte.id,
                type_copie: req.type_copie.as_str().to_string(),
                demandeur: serde_json::to_string(&req.demandeur)?,
                numero_copie,
                hash_integrite: hash_integrite.clone(),
                validite_juridique: true,
                created_at: now,
            },
        )
        .await?;
        journal::log(
            &mut tx,
            notaire_id,
            Some(acte.id),
            "COPIE_EMISE",
            Some(&format!(r#"{{"numero_copie":{numero_copie}}}"#)),
            now,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(acte_id = acte.id, copie_id = id, numero_copie, "Copy issued");
        Ok(CopieConforme {
            id,
            acte_id: acte.id,
            type_copie: req.type_copie,
            demandeur: req.demandeur,
            numero_copie,
            hash_integrite,
            validite_juridique: true,
            created_at: now,
        })
    }

    /// Load one issued copy by id, re-verifying its digest against the
    /// source act's content hash.
    pub async fn obtenir_copie_par_id(
        &self,
        notaire_id: i64,
        copie_id: i64,
    ) -> RegistreResult<CopieConforme> {
        let row = copie::find_by_id(&self.registre.db.pool, copie_id)
            .await?
            .ok_or_else(|| RegistreError::copie_not_found(copie_id))?;
        let acte = self
            .registre
            .obtenir_acte_par_id(notaire_id, row.acte_id)
            .await?;
        verifier_copie(&acte.hash_integrite, row)
    }

    /// List the copies issued from one deed, re-verifying each copy digest
    /// against the source act's content hash.
    pub async fn lister_copies(
        &self,
        notaire_id: i64,
        acte_id: i64,
    ) -> RegistreResult<Vec<CopieConforme>> {
        let acte = self
            .registre
            .obtenir_acte_par_id(notaire_id, acte_id)
            .await?;

        let rows = copie::list_by_acte(&self.registre.db.pool, acte_id).await?;
        let mut copies = Vec::with_capacity(rows.len());
        for row in rows {
            copies.push(verifier_copie(&acte.hash_integrite, row)?);
        }
        Ok(copies)
    }
}

/// Recompute the copy digest from the source content hash and reject the
/// row on mismatch.
fn verifier_copie(hash_source: &str, row: copie::CopieRow) -> RegistreResult<CopieConforme> {
    let type_copie = row.type_copie.parse().map_err(RegistreError::Storage)?;
    let attendu = scellement::hash_copie(hash_source, type_copie, row.numero_copie);
    if attendu != row.hash_integrite {
        return Err(RegistreError::IntegrityViolation { record_id: row.id });
    }
    Ok(CopieConforme {
        id: row.id,
        acte_id: row.acte_id,
        type_copie,
        demandeur: serde_json::from_str(&row.demandeur)?,
        numero_copie: row.numero_copie,
        hash_integrite: row.hash_integrite,
        validite_juridique: row.validite_juridique,
        created_at: row.created_at,
    })
}
