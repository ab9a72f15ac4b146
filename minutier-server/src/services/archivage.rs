//! Archival Service
//!
//! Terminal lifecycle step. Archiving a deed flips it to ARCHIVE, fills
//! the archive row allocated at creation and records every requested
//! backup destination, all on one transaction. Either the acte ends up
//! archived with all its backups ACTIF, or nothing changed.

use crate::common::error::{RegistreError, RegistreResult};
use crate::db::repository::{acte, archive, journal};
use crate::services::registre::RegistreActes;
use shared::models::{ActeAuthentique, ArchiverActeRequest, StatutActe, TypeSauvegarde};
use shared::util::now_millis;
use validator::Validate;

/// Archives signed or registered deeds
#[derive(Clone)]
pub struct GestionnaireArchives {
    registre: RegistreActes,
}

impl GestionnaireArchives {
    pub fn new(registre: RegistreActes) -> Self {
        Self { registre }
    }

    /// Archive a deed.
    ///
    /// Requires SIGNE or ENREGISTRE; an acte already in ARCHIVE cannot be
    /// re-archived. The retention duration falls back to the configured
    /// default when the request carries none.
    pub async fn archiver_acte(
        &self,
        notaire_id: i64,
        req: ArchiverActeRequest,
    ) -> RegistreResult<ActeAuthentique> {
        req.validate()?;

        let acte_courant = self
            .registre
            .obtenir_acte_par_id(notaire_id, req.acte_id)
            .await?;
        if !acte_courant.statut.est_signe() || acte_courant.statut == StatutActe::Archive {
            return Err(RegistreError::InvalidStateTransition {
                requis: StatutActe::Signe,
                actuel: acte_courant.statut,
            });
        }

        let retention = req
            .duree_retention_jours
            .unwrap_or(self.registre.config.retention_defaut_jours);
        // Deduplicate while keeping the request order
        let mut kinds: Vec<TypeSauvegarde> = Vec::new();
        for k in &req.types_sauvegarde {
            if !kinds.contains(k) {
                kinds.push(*k);
            }
        }

        // Archive path under the deed's minutier year
        let annee = acte_courant
            .numero_minutier
            .split('-')
            .next()
            .unwrap_or_default();
        let emplacement_numerique = format!(
            "{}/{annee}/{}",
            self.registre.config.archive_base, acte_courant.archivage.numero_archive
        );

        let now = now_millis();
        let mut tx = self.registre.db.pool.begin().await?;
        let moved = acte::update_statut(
            &mut tx,
            acte_courant.id,
            &[StatutActe::Signe.as_str(), StatutActe::Enregistre.as_str()],
            StatutActe::Archive.as_str(),
            now,
        )
        .await?;
        if !moved {
            tx.rollback().await?;
            let actuel = self
                .registre
                .obtenir_acte_par_id(notaire_id, acte_courant.id)
                .await?
                .statut;
            return Err(RegistreError::InvalidStateTransition {
                requis: StatutActe::Signe,
                actuel,
            });
        }

        archive::activer(
            &mut tx,
            acte_courant.id,
            &req.emplacement_physique,
            &emplacement_numerique,
            retention,
            now,
        )
        .await?;
        for kind in &kinds {
            let emplacement =
                format!("{emplacement_numerique}/{}", kind.as_str().to_lowercase());
            archive::enregistrer_sauvegarde(&mut tx, acte_courant.id, kind.as_str(), &emplacement, now)
                .await?;
        }
        journal::log(
            &mut tx,
            notaire_id,
            Some(acte_courant.id),
            "ACTE_ARCHIVE",
            Some(&format!(r#"{{"sauvegardes":{}}}"#, kinds.len())),
            now,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            acte_id = acte_courant.id,
            numero_archive = acte_courant.archivage.numero_archive,
            sauvegardes = kinds.len(),
            "Acte archived"
        );
        self.registre.obtenir_acte_par_id(notaire_id, acte_courant.id).await
    }
}
