//! Domain models for the minutier registry

pub mod acte;
pub mod archivage;
pub mod copie;
pub mod partie;
pub mod recherche;

// Re-exports
pub use acte::{
    ActeAuthentique, ContenuActe, CreerActeRequest, MetadonneesActe, StatutActe, TypeActe,
};
pub use archivage::{
    ArchivageInfo, ArchiverActeRequest, Sauvegarde, StatutArchivage, StatutSauvegarde,
    TypeSauvegarde,
};
pub use copie::{CopieConforme, DemandeurCopie, GenererCopieRequest, TypeCopie};
pub use partie::{PartieActe, PieceIdentite, TypePartie};
pub use recherche::{FacetteRecherche, FacettesRecherche, RechercheCriteres, ResultatRecherche};
