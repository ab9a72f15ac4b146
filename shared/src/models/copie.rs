//! Copie Conforme Model (certified copy of a deed)

use super::partie::PieceIdentite;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Kind of copy issued from a deed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeCopie {
    /// Certified true copy, carries legal validity
    #[serde(rename = "CONFORME")]
    Conforme,
    /// Plain informational copy
    #[serde(rename = "SIMPLE")]
    Simple,
    /// Extract of the operative clauses only
    #[serde(rename = "EXTRAIT")]
    Extrait,
}

impl TypeCopie {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TypeCopie::Conforme => "CONFORME",
            TypeCopie::Simple => "SIMPLE",
            TypeCopie::Extrait => "EXTRAIT",
        }
    }
}

impl FromStr for TypeCopie {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFORME" => Ok(TypeCopie::Conforme),
            "SIMPLE" => Ok(TypeCopie::Simple),
            "EXTRAIT" => Ok(TypeCopie::Extrait),
            other => Err(format!("unknown type_copie: {other}")),
        }
    }
}

impl fmt::Display for TypeCopie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Person requesting the copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DemandeurCopie {
    #[validate(length(min = 1))]
    pub nom: String,
    #[validate(length(min = 1))]
    pub adresse: String,
    #[validate(nested)]
    pub piece_identite: PieceIdentite,
    /// Stated reason for the request
    #[validate(length(min = 1))]
    pub motif: String,
}

/// A certified copy of a deed
///
/// Holds a non-owning back-reference (`acte_id`) to its source act,
/// always re-resolved by lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopieConforme {
    pub id: i64,
    pub acte_id: i64,
    pub type_copie: TypeCopie,
    pub demandeur: DemandeurCopie,
    /// Monotonic copy number per (notary, year) scope
    pub numero_copie: i64,
    /// Hex SHA-256 digest binding the copy to the source act content
    pub hash_integrite: String,
    /// True only when issuance succeeded without integrity violation
    pub validite_juridique: bool,
    pub created_at: i64,
}

/// Issue copy payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenererCopieRequest {
    pub acte_id: i64,
    pub type_copie: TypeCopie,
    #[validate(nested)]
    pub demandeur: DemandeurCopie,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_copie_str_roundtrip() {
        for t in [TypeCopie::Conforme, TypeCopie::Simple, TypeCopie::Extrait] {
            assert_eq!(t.as_str().parse::<TypeCopie>().unwrap(), t);
        }
        assert!("NOTARIEE".parse::<TypeCopie>().is_err());
    }

    #[test]
    fn test_demandeur_requires_motif() {
        let d = DemandeurCopie {
            nom: "Marie Curie".into(),
            adresse: "1 rue d'Ulm, Paris".into(),
            piece_identite: PieceIdentite {
                type_piece: "PASSEPORT".into(),
                numero: "P1234".into(),
                date_delivrance: None,
                lieu_delivrance: None,
            },
            motif: String::new(),
        };
        assert!(validator::Validate::validate(&d).is_err());
    }
}
