//! Search DTOs (paginated, filtered lookup with facets)

use super::acte::{ActeAuthentique, TypeActe};
use serde::{Deserialize, Serialize};

fn default_page() -> u32 {
    1
}

fn default_limite() -> u32 {
    20
}

/// Search filter for the registry
///
/// All filters are optional and combine with AND. Results are always scoped
/// to the requesting notary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RechercheCriteres {
    pub type_acte: Option<TypeActe>,
    /// Free-text match on `objet` (substring)
    pub objet: Option<String>,
    /// Creation date range, millisecond timestamps, inclusive
    pub date_debut: Option<i64>,
    pub date_fin: Option<i64>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limite")]
    pub limite: u32,
}

impl Default for RechercheCriteres {
    fn default() -> Self {
        Self {
            type_acte: None,
            objet: None,
            date_debut: None,
            date_fin: None,
            page: default_page(),
            limite: default_limite(),
        }
    }
}

impl RechercheCriteres {
    /// Page and limit clamped to sane bounds (page >= 1, 1 <= limite <= 200)
    pub fn page_limite(&self) -> (u32, u32) {
        (self.page.max(1), self.limite.clamp(1, 200))
    }
}

/// One facet bucket: a value and the number of matching actes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetteRecherche {
    pub valeur: String,
    pub count: i64,
}

/// Facet counts computed over the full filtered set (not the returned page)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FacettesRecherche {
    pub par_type: Vec<FacetteRecherche>,
    pub par_statut: Vec<FacetteRecherche>,
}

/// Paged search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultatRecherche {
    pub actes: Vec<ActeAuthentique>,
    /// Size of the full filtered set
    pub total: i64,
    pub page: u32,
    pub total_pages: u32,
    pub facettes: FacettesRecherche,
}
