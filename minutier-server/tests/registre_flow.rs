//! End-to-end registry flow over the public service API: creation,
//! signature, copy issuance, archival and search against a real
//! (file-backed or in-memory) store.

use minutier_server::{
    Config, DbService, EmetteurCopies, GestionnaireArchives, RechercheRegistre, RegistreActes,
};
use shared::models::{
    ArchiverActeRequest, ContenuActe, CreerActeRequest, DemandeurCopie, GenererCopieRequest,
    MetadonneesActe, PartieActe, PieceIdentite, RechercheCriteres, StatutActe, StatutSauvegarde,
    TypeActe, TypeCopie, TypePartie, TypeSauvegarde,
};
use shared::util::current_year;

const NOTAIRE: i64 = 7;

fn partie(nom: &str, qualite: &str) -> PartieActe {
    PartieActe {
        type_partie: TypePartie::PersonnePhysique,
        civilite: Some("Mme".into()),
        nom: nom.into(),
        nationalite: Some("Française".into()),
        adresse: "4 place du Marche, Lyon".into(),
        piece_identite: PieceIdentite {
            type_piece: "CNI".into(),
            numero: "987654321".into(),
            date_delivrance: Some("2021-03-02".into()),
            lieu_delivrance: Some("Lyon".into()),
        },
        qualite: qualite.into(),
    }
}

fn creer(type_acte: TypeActe, objet: &str) -> CreerActeRequest {
    CreerActeRequest {
        type_acte,
        objet: objet.into(),
        parties: vec![partie("Sophie Bernard", "vendeur")],
        contenu: ContenuActe {
            preambule: "Par-devant Maitre Lefevre, notaire a Lyon".into(),
            comparution: "A comparu Sophie Bernard".into(),
            expose: "La venderesse expose ce qui suit".into(),
            dispositif: "Article 1er: il est vendu le bien designe".into(),
            clauses: vec!["clause de non-garantie".into()],
            mentions: vec![],
            conclusion: "Dont acte, fait et passe a Lyon".into(),
        },
        metadonnees: MetadonneesActe {
            tags: vec!["immobilier".into()],
            references_juridiques: vec![],
            montant: Some(250_000.0),
            devise: Some("EUR".into()),
        },
    }
}

fn demandeur() -> DemandeurCopie {
    DemandeurCopie {
        nom: "Paul Renard".into(),
        adresse: "9 rue Victor Hugo, Lyon".into(),
        piece_identite: PieceIdentite {
            type_piece: "PASSEPORT".into(),
            numero: "20AB11223".into(),
            date_delivrance: None,
            lieu_delivrance: None,
        },
        motif: "achat du bien".into(),
    }
}

async fn services() -> (RegistreActes, EmetteurCopies, GestionnaireArchives, RechercheRegistre) {
    let db = DbService::new_in_memory().await.unwrap();
    let registre = RegistreActes::new(db, Config::default());
    (
        registre.clone(),
        EmetteurCopies::new(registre.clone()),
        GestionnaireArchives::new(registre.clone()),
        RechercheRegistre::new(registre),
    )
}

#[tokio::test]
async fn test_full_deed_lifecycle() {
    let (registre, copies, archives, recherche) = services().await;
    let annee = current_year();

    // Creation: first deed of the year gets number 1
    let acte = registre
        .creer_acte(NOTAIRE, creer(TypeActe::VenteImmobiliere, "vente appartement T3"))
        .await
        .unwrap();
    assert_eq!(acte.numero_minutier, format!("{annee}-000001"));
    assert_eq!(acte.statut, StatutActe::Brouillon);
    assert_eq!(acte.contenu.clauses.len(), 1);

    // No copy from a draft
    let refus = copies
        .generer_copie_conforme(
            NOTAIRE,
            GenererCopieRequest {
                acte_id: acte.id,
                type_copie: TypeCopie::Conforme,
                demandeur: demandeur(),
            },
        )
        .await;
    assert!(refus.is_err());

    // Sign, then the copy goes through
    registre.signer_acte(NOTAIRE, acte.id).await.unwrap();
    let copie = copies
        .generer_copie_conforme(
            NOTAIRE,
            GenererCopieRequest {
                acte_id: acte.id,
                type_copie: TypeCopie::Conforme,
                demandeur: demandeur(),
            },
        )
        .await
        .unwrap();
    assert_eq!(copie.numero_copie, 1);
    assert!(copie.validite_juridique);

    // Register, then archive with two backup destinations
    registre.enregistrer_acte(NOTAIRE, acte.id).await.unwrap();
    let archive = archives
        .archiver_acte(
            NOTAIRE,
            ArchiverActeRequest {
                acte_id: acte.id,
                emplacement_physique: "coffre B-03".into(),
                duree_retention_jours: None,
                types_sauvegarde: vec![TypeSauvegarde::Locale, TypeSauvegarde::Cloud],
            },
        )
        .await
        .unwrap();
    assert_eq!(archive.statut, StatutActe::Archive);
    assert_eq!(archive.archivage.sauvegardes.len(), 2);
    assert!(archive
        .archivage
        .sauvegardes
        .iter()
        .all(|s| s.statut == StatutSauvegarde::Actif));

    // Copies remain listable and verified after archival
    let listees = copies.lister_copies(NOTAIRE, acte.id).await.unwrap();
    assert_eq!(listees.len(), 1);
    assert_eq!(listees[0].demandeur.nom, "Paul Renard");

    // The archived deed is searchable with its facets
    let res = recherche
        .rechercher(NOTAIRE, &RechercheCriteres::default())
        .await
        .unwrap();
    assert_eq!(res.total, 1);
    assert!(res
        .facettes
        .par_statut
        .iter()
        .any(|f| f.valeur == "ARCHIVE" && f.count == 1));
}

#[tokio::test]
async fn test_numbering_contiguous_across_mixed_outcomes() {
    let (registre, _, _, _) = services().await;
    let annee = current_year();

    // A failed creation (empty content section) between two successes
    // must not leave a hole in the numbering
    registre
        .creer_acte(NOTAIRE, creer(TypeActe::Donation, "donation"))
        .await
        .unwrap();
    let mut mauvaise = creer(TypeActe::Testament, "testament");
    mauvaise.contenu.conclusion = String::new();
    assert!(registre.creer_acte(NOTAIRE, mauvaise).await.is_err());
    let acte = registre
        .creer_acte(NOTAIRE, creer(TypeActe::Testament, "testament"))
        .await
        .unwrap();

    assert_eq!(acte.numero_minutier, format!("{annee}-000002"));
    assert_eq!(acte.numero_repertoire, 2);
}

#[tokio::test]
async fn test_concurrent_creation_gap_free() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registre.db");
    let db = DbService::new(path.to_str().unwrap()).await.unwrap();
    let registre = RegistreActes::new(db, Config::default());

    let mut handles = Vec::new();
    for i in 0..8 {
        let reg = registre.clone();
        handles.push(tokio::spawn(async move {
            reg.creer_acte(NOTAIRE, creer(TypeActe::Autre, &format!("acte {i}")))
                .await
                .unwrap()
                .numero_minutier
        }));
    }

    let mut numeros = Vec::new();
    for h in handles {
        numeros.push(h.await.unwrap());
    }
    numeros.sort();

    let annee = current_year();
    let attendus: Vec<String> = (1..=8).map(|n| format!("{annee}-{n:06}")).collect();
    assert_eq!(numeros, attendus);
}

#[tokio::test]
async fn test_search_filters_and_pagination() {
    let (registre, _, _, recherche) = services().await;

    for i in 0..5 {
        registre
            .creer_acte(NOTAIRE, creer(TypeActe::VenteImmobiliere, &format!("vente lot {i}")))
            .await
            .unwrap();
    }
    let don = registre
        .creer_acte(NOTAIRE, creer(TypeActe::Donation, "donation vigne"))
        .await
        .unwrap();
    registre.signer_acte(NOTAIRE, don.id).await.unwrap();
    // Another notary's deed never shows up
    registre
        .creer_acte(NOTAIRE + 1, creer(TypeActe::Donation, "donation voisine"))
        .await
        .unwrap();

    let res = recherche
        .rechercher(
            NOTAIRE,
            &RechercheCriteres {
                limite: 4,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(res.total, 6);
    assert_eq!(res.actes.len(), 4);
    assert_eq!(res.total_pages, 2);

    let page2 = recherche
        .rechercher(
            NOTAIRE,
            &RechercheCriteres {
                page: 2,
                limite: 4,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(page2.actes.len(), 2);

    let filtre = recherche
        .rechercher(
            NOTAIRE,
            &RechercheCriteres {
                type_acte: Some(TypeActe::Donation),
                objet: Some("vigne".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(filtre.total, 1);
    assert_eq!(filtre.actes[0].id, don.id);
    assert!(filtre
        .facettes
        .par_statut
        .iter()
        .any(|f| f.valeur == "SIGNE" && f.count == 1));
}

#[tokio::test]
async fn test_tampering_detected_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registre.db");

    let acte_id = {
        let db = DbService::new(path.to_str().unwrap()).await.unwrap();
        let registre = RegistreActes::new(db, Config::default());
        let acte = registre
            .creer_acte(NOTAIRE, creer(TypeActe::Testament, "testament olographe"))
            .await
            .unwrap();
        sqlx::query("UPDATE acte_authentique SET contenu_scelle = X'00010203' WHERE id = ?")
            .bind(acte.id)
            .execute(registre.db_pool())
            .await
            .unwrap();
        acte.id
    };

    // Reopen the store, the corruption must surface on read
    let db = DbService::new(path.to_str().unwrap()).await.unwrap();
    let registre = RegistreActes::new(db, Config::default());
    let err = registre.obtenir_acte_par_id(NOTAIRE, acte_id).await.unwrap_err();
    assert!(matches!(
        err,
        minutier_server::RegistreError::IntegrityViolation { record_id } if record_id == acte_id
    ));
}
