//! Acte Registry Service
//!
//! Lifecycle of the authenticated deed: creation with gap-free numbering,
//! signature and enregistrement transitions, sealed reads and the paged,
//! faceted search. Archival lives in [`crate::services::archivage`], copy
//! issuance in [`crate::services::copie`].

use crate::common::error::{RegistreError, RegistreResult};
use crate::core::config::Config;
use crate::db::DbService;
use crate::db::repository::{CounterKind, acte, archive, journal, sequence};
use crate::services::scellement::{self, ScellementError};
use shared::models::{
    ActeAuthentique, ArchivageInfo, CreerActeRequest, FacetteRecherche, FacettesRecherche,
    RechercheCriteres, ResultatRecherche, Sauvegarde, StatutActe,
};
use shared::util::{current_year, now_millis, snowflake_id};
use validator::Validate;

/// Registry of authenticated deeds, scoped per notary on every operation
#[derive(Clone)]
pub struct RegistreActes {
    pub(crate) db: DbService,
    pub(crate) config: Config,
}

impl RegistreActes {
    pub fn new(db: DbService, config: Config) -> Self {
        Self { db, config }
    }

    /// Direct handle on the underlying pool, for maintenance tooling
    pub fn db_pool(&self) -> &sqlx::SqlitePool {
        &self.db.pool
    }

    /// Create a deed in BROUILLON state.
    ///
    /// Allocates the minutier, repertoire and archive numbers on the same
    /// transaction as the insert, in that fixed order. The minutier number
    /// is formatted `YYYY-NNNNNN` and restarts at 1 each year; an aborted
    /// creation never consumes a number.
    pub async fn creer_acte(
        &self,
        notaire_id: i64,
        req: CreerActeRequest,
    ) -> RegistreResult<ActeAuthentique> {
        req.validate()?;
        for partie in &req.parties {
            partie.validate()?;
        }
        valider_contenu(&req)?;

        let scelle = self.sceller(&req)?;
        let annee = current_year().to_string();
        let now = now_millis();
        let id = snowflake_id();

        let mut tx = self.db.pool.begin().await?;
        let n_minutier =
            sequence::next_value(&mut tx, notaire_id, CounterKind::Minutier, &annee).await?;
        let n_repertoire =
            sequence::next_value(&mut tx, notaire_id, CounterKind::Repertoire, &annee).await?;
        let n_archive =
            sequence::next_value(&mut tx, notaire_id, CounterKind::Archive, &annee).await?;

        let numero_minutier = format!("{annee}-{n_minutier:06}");
        acte::insert(
            &mut tx,
            &acte::ActeRow {
                id,
                numero_minutier: numero_minutier.clone(),
                numero_repertoire: n_repertoire,
                type_acte: req.type_acte.as_str().to_string(),
                objet: req.objet.clone(),
                parties: serde_json::to_string(&req.parties)?,
                contenu_scelle: scelle.contenu_scelle,
                hash_integrite: scelle.hash_integrite,
                chiffrement_cle: scelle.chiffrement_cle,
                metadonnees: serde_json::to_string(&req.metadonnees)?,
                notaire_id,
                statut: StatutActe::Brouillon.as_str().to_string(),
                created_at: now,
                updated_at: now,
            },
        )
        .await?;

        archive::insert_initial(&mut tx, id, n_archive, now).await?;
        for kind in &self.config.sauvegardes_declarees {
            archive::inserer_placeholder(&mut tx, id, kind.as_str(), now).await?;
        }

        journal::log(
            &mut tx,
            notaire_id,
            Some(id),
            "ACTE_CREE",
            Some(&format!(r#"{{"numero_minutier":"{numero_minutier}"}}"#)),
            now,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(acte_id = id, %numero_minutier, notaire_id, "Acte created");
        self.obtenir_acte_par_id(notaire_id, id).await
    }

    /// Load a deed, unseal its content and verify the integrity digest.
    ///
    /// Fails with `Unauthorized` when the deed belongs to another notary
    /// and `IntegrityViolation` when the stored content or digest was
    /// altered since sealing.
    pub async fn obtenir_acte_par_id(
        &self,
        notaire_id: i64,
        id: i64,
    ) -> RegistreResult<ActeAuthentique> {
        let row = acte::find_by_id(&self.db.pool, id)
            .await?
            .ok_or_else(|| RegistreError::acte_not_found(id))?;
        if row.notaire_id != notaire_id {
            return Err(RegistreError::Unauthorized {
                acte_id: id,
                notaire_id,
            });
        }
        self.assembler(row).await
    }

    /// BROUILLON -> SIGNE.
    pub async fn signer_acte(&self, notaire_id: i64, id: i64) -> RegistreResult<ActeAuthentique> {
        self.transition(notaire_id, id, StatutActe::Brouillon, StatutActe::Signe, "ACTE_SIGNE")
            .await
    }

    /// SIGNE -> ENREGISTRE (formality registration with the authority).
    pub async fn enregistrer_acte(
        &self,
        notaire_id: i64,
        id: i64,
    ) -> RegistreResult<ActeAuthentique> {
        self.transition(
            notaire_id,
            id,
            StatutActe::Signe,
            StatutActe::Enregistre,
            "ACTE_ENREGISTRE",
        )
        .await
    }

    async fn transition(
        &self,
        notaire_id: i64,
        id: i64,
        requis: StatutActe,
        nouveau: StatutActe,
        action: &str,
    ) -> RegistreResult<ActeAuthentique> {
        // Full read first: ownership and integrity gate every transition
        self.obtenir_acte_par_id(notaire_id, id).await?;

        let now = now_millis();
        let mut tx = self.db.pool.begin().await?;
        let moved =
            acte::update_statut(&mut tx, id, &[requis.as_str()], nouveau.as_str(), now).await?;
        if !moved {
            tx.rollback().await?;
            // CAS lost: report the state the acte actually is in
            let actuel = self.obtenir_acte_par_id(notaire_id, id).await?.statut;
            return Err(RegistreError::InvalidStateTransition { requis, actuel });
        }
        journal::log(&mut tx, notaire_id, Some(id), action, None, now).await?;
        tx.commit().await?;

        tracing::info!(acte_id = id, statut = nouveau.as_str(), "Acte state transition");
        self.obtenir_acte_par_id(notaire_id, id).await
    }

    /// Paged, filtered search with facet counts.
    ///
    /// Facets are computed over the full filtered set with the same
    /// predicate as the page, so the per-type counts always sum to `total`.
    pub async fn rechercher_actes(
        &self,
        notaire_id: i64,
        criteres: &RechercheCriteres,
    ) -> RegistreResult<ResultatRecherche> {
        let (page, limite) = criteres.page_limite();
        // One read transaction: page, total and facets see the same snapshot
        let mut tx = self.db.pool.begin().await?;
        let (rows, total) = acte::search(&mut tx, notaire_id, criteres).await?;
        let (par_type, par_statut) = acte::facettes(&mut tx, notaire_id, criteres).await?;
        tx.commit().await?;

        let mut actes = Vec::with_capacity(rows.len());
        for row in rows {
            actes.push(self.assembler(row).await?);
        }

        let total_pages = ((total as u64).div_ceil(u64::from(limite))) as u32;
        Ok(ResultatRecherche {
            actes,
            total,
            page,
            total_pages,
            facettes: FacettesRecherche {
                par_type: en_facettes(par_type),
                par_statut: en_facettes(par_statut),
            },
        })
    }

    fn sceller(&self, req: &CreerActeRequest) -> RegistreResult<scellement::ContenuScelle> {
        scellement::sceller(&req.contenu).map_err(|e| RegistreError::Storage(e.to_string()))
    }

    /// Unseal a row and reassemble the full entity, archive metadata and
    /// backups included.
    pub(crate) async fn assembler(&self, row: acte::ActeRow) -> RegistreResult<ActeAuthentique> {
        let id = row.id;
        let contenu = scellement::desceller(&row.contenu_scelle, &row.chiffrement_cle, &row.hash_integrite)
            .map_err(|e| match e {
                ScellementError::Integrite => RegistreError::IntegrityViolation { record_id: id },
                ScellementError::Interne(msg) => RegistreError::Storage(msg),
            })?;

        let archivage = self.charger_archivage(id).await?;
        Ok(ActeAuthentique {
            id,
            numero_minutier: row.numero_minutier,
            numero_repertoire: row.numero_repertoire,
            type_acte: row.type_acte.parse().map_err(RegistreError::Storage)?,
            objet: row.objet,
            parties: serde_json::from_str(&row.parties)?,
            contenu,
            notaire_id: row.notaire_id,
            statut: row.statut.parse().map_err(RegistreError::Storage)?,
            hash_integrite: row.hash_integrite,
            chiffrement_cle: row.chiffrement_cle,
            metadonnees: serde_json::from_str(&row.metadonnees)?,
            archivage,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    async fn charger_archivage(&self, acte_id: i64) -> RegistreResult<ArchivageInfo> {
        let row = archive::find_by_acte(&self.db.pool, acte_id)
            .await?
            .ok_or(RegistreError::NotFound {
                entite: "archivage",
                id: acte_id,
            })?;
        let sauvegardes = archive::list_sauvegardes(&self.db.pool, acte_id)
            .await?
            .into_iter()
            .map(|s| {
                Ok(Sauvegarde {
                    id: s.id,
                    acte_id: s.acte_id,
                    type_sauvegarde: s.type_sauvegarde.parse().map_err(RegistreError::Storage)?,
                    emplacement: s.emplacement,
                    statut: s.statut.parse().map_err(RegistreError::Storage)?,
                    created_at: s.created_at,
                })
            })
            .collect::<RegistreResult<Vec<_>>>()?;

        Ok(ArchivageInfo {
            numero_archive: row.numero_archive,
            emplacement_physique: row.emplacement_physique,
            emplacement_numerique: row.emplacement_numerique,
            duree_retention_jours: row.duree_retention_jours,
            statut: row.statut.parse().map_err(RegistreError::Storage)?,
            sauvegardes,
        })
    }
}

fn en_facettes(buckets: Vec<(String, i64)>) -> Vec<FacetteRecherche> {
    buckets
        .into_iter()
        .map(|(valeur, count)| FacetteRecherche { valeur, count })
        .collect()
}

/// The mandatory content sections must all be present. Clause and mention
/// lists may be empty.
fn valider_contenu(req: &CreerActeRequest) -> RegistreResult<()> {
    let c = &req.contenu;
    let sections = [
        ("preambule", &c.preambule),
        ("comparution", &c.comparution),
        ("expose", &c.expose),
        ("dispositif", &c.dispositif),
        ("conclusion", &c.conclusion),
    ];
    for (nom, texte) in sections {
        if texte.trim().is_empty() {
            return Err(RegistreError::Validation(format!(
                "contenu.{nom} must not be empty"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{registre, requete};
    use shared::models::TypeActe;

    #[tokio::test]
    async fn test_creer_acte_numbering_and_state() {
        let reg = registre().await;
        let annee = current_year();

        let a1 = reg.creer_acte(1, requete("vente appartement")).await.unwrap();
        let a2 = reg.creer_acte(1, requete("vente maison")).await.unwrap();

        assert_eq!(a1.numero_minutier, format!("{annee}-000001"));
        assert_eq!(a2.numero_minutier, format!("{annee}-000002"));
        assert_eq!(a1.numero_repertoire, 1);
        assert_eq!(a2.numero_repertoire, 2);
        assert_eq!(a1.statut, StatutActe::Brouillon);
        assert_eq!(a1.archivage.numero_archive, 1);
        assert_eq!(a1.contenu.preambule, "Par-devant Maitre Durand");

        // Numbering is per notary
        let autre = reg.creer_acte(2, requete("donation")).await.unwrap();
        assert_eq!(autre.numero_minutier, format!("{annee}-000001"));
    }

    #[tokio::test]
    async fn test_creer_acte_rejects_empty_parties_and_content() {
        let reg = registre().await;

        let mut req = requete("vente");
        req.parties.clear();
        assert!(matches!(
            reg.creer_acte(1, req).await,
            Err(RegistreError::Validation(_))
        ));

        let mut req = requete("vente");
        req.contenu.dispositif = "  ".into();
        assert!(matches!(
            reg.creer_acte(1, req).await,
            Err(RegistreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_creation_consumes_no_number() {
        let reg = registre().await;
        let mut req = requete("vente");
        req.contenu.preambule = String::new();
        assert!(reg.creer_acte(1, req).await.is_err());

        let acte = reg.creer_acte(1, requete("vente ok")).await.unwrap();
        assert!(acte.numero_minutier.ends_with("-000001"));
    }

    #[tokio::test]
    async fn test_obtenir_scoped_to_notaire() {
        let reg = registre().await;
        let acte = reg.creer_acte(1, requete("testament")).await.unwrap();

        assert!(matches!(
            reg.obtenir_acte_par_id(2, acte.id).await,
            Err(RegistreError::Unauthorized { .. })
        ));
        assert!(matches!(
            reg.obtenir_acte_par_id(1, 99999).await,
            Err(RegistreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_lifecycle_transitions() {
        let reg = registre().await;
        let acte = reg.creer_acte(1, requete("vente")).await.unwrap();

        let signe = reg.signer_acte(1, acte.id).await.unwrap();
        assert_eq!(signe.statut, StatutActe::Signe);

        // Signing twice is not a valid transition
        let err = reg.signer_acte(1, acte.id).await.unwrap_err();
        assert!(matches!(
            err,
            RegistreError::InvalidStateTransition {
                requis: StatutActe::Brouillon,
                actuel: StatutActe::Signe,
            }
        ));

        let enr = reg.enregistrer_acte(1, acte.id).await.unwrap();
        assert_eq!(enr.statut, StatutActe::Enregistre);
    }

    #[tokio::test]
    async fn test_enregistrer_requires_signature() {
        let reg = registre().await;
        let acte = reg.creer_acte(1, requete("vente")).await.unwrap();
        assert!(matches!(
            reg.enregistrer_acte(1, acte.id).await,
            Err(RegistreError::InvalidStateTransition {
                requis: StatutActe::Signe,
                actuel: StatutActe::Brouillon,
            })
        ));
    }

    #[tokio::test]
    async fn test_tampered_content_detected_on_read() {
        let reg = registre().await;
        let acte = reg.creer_acte(1, requete("vente")).await.unwrap();

        sqlx::query("UPDATE acte_authentique SET hash_integrite = ? WHERE id = ?")
            .bind("0".repeat(64))
            .bind(acte.id)
            .execute(&reg.db.pool)
            .await
            .unwrap();

        assert!(matches!(
            reg.obtenir_acte_par_id(1, acte.id).await,
            Err(RegistreError::IntegrityViolation { record_id }) if record_id == acte.id
        ));
    }

    #[tokio::test]
    async fn test_recherche_pages_and_facettes() {
        let reg = registre().await;
        for i in 0..3 {
            reg.creer_acte(1, requete(&format!("vente {i}"))).await.unwrap();
        }
        let mut req = requete("donation terrain");
        req.type_acte = TypeActe::Donation;
        let don = reg.creer_acte(1, req).await.unwrap();
        reg.signer_acte(1, don.id).await.unwrap();

        let criteres = RechercheCriteres {
            limite: 2,
            ..Default::default()
        };
        let res = reg.rechercher_actes(1, &criteres).await.unwrap();
        assert_eq!(res.total, 4);
        assert_eq!(res.actes.len(), 2);
        assert_eq!(res.total_pages, 2);
        assert_eq!(
            res.facettes.par_type.iter().map(|f| f.count).sum::<i64>(),
            4
        );
        assert!(res
            .facettes
            .par_statut
            .iter()
            .any(|f| f.valeur == "SIGNE" && f.count == 1));

        // Newest first
        assert!(res.actes[0].created_at >= res.actes[1].created_at);
    }

    #[tokio::test]
    async fn test_recherche_page_far_beyond_results() {
        let reg = registre().await;
        reg.creer_acte(1, requete("vente")).await.unwrap();

        let criteres = RechercheCriteres {
            page: 30_000_000,
            limite: 200,
            ..Default::default()
        };
        let res = reg.rechercher_actes(1, &criteres).await.unwrap();
        assert!(res.actes.is_empty());
        assert_eq!(res.total, 1);
        assert_eq!(res.total_pages, 1);
    }
}
