//! Registry Search
//!
//! Read-only facade over the registry's search path, for callers that
//! need lookup without the mutating surface of [`RegistreActes`].

use crate::common::error::RegistreResult;
use crate::services::registre::RegistreActes;
use shared::models::{RechercheCriteres, ResultatRecherche};

#[derive(Clone)]
pub struct RechercheRegistre {
    registre: RegistreActes,
}

impl RechercheRegistre {
    pub fn new(registre: RegistreActes) -> Self {
        Self { registre }
    }

    /// Paged, faceted search scoped to the requesting notary.
    pub async fn rechercher(
        &self,
        notaire_id: i64,
        criteres: &RechercheCriteres,
    ) -> RegistreResult<ResultatRecherche> {
        self.registre.rechercher_actes(notaire_id, criteres).await
    }
}
