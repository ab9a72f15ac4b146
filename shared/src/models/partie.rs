//! Partie Model (party to a deed)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Kind of person appearing in a deed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypePartie {
    #[serde(rename = "PERSONNE_PHYSIQUE")]
    PersonnePhysique,
    #[serde(rename = "PERSONNE_MORALE")]
    PersonneMorale,
}

/// Identity document presented by a party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PieceIdentite {
    /// Document kind (CNI, passport, registration number, ...)
    pub type_piece: String,
    #[validate(length(min = 1))]
    pub numero: String,
    /// Issue date (ISO 8601 date)
    pub date_delivrance: Option<String>,
    pub lieu_delivrance: Option<String>,
}

/// A party to the deed (natural or legal person)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PartieActe {
    pub type_partie: TypePartie,
    /// Civility or legal form (M., Mme, SARL, ...)
    pub civilite: Option<String>,
    /// Full legal name
    #[validate(length(min = 1))]
    pub nom: String,
    pub nationalite: Option<String>,
    #[validate(length(min = 1))]
    pub adresse: String,
    #[validate(nested)]
    pub piece_identite: PieceIdentite,
    /// Role in the deed (vendeur, acquereur, donateur, ...)
    #[validate(length(min = 1))]
    pub qualite: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn partie() -> PartieActe {
        PartieActe {
            type_partie: TypePartie::PersonnePhysique,
            civilite: Some("M.".into()),
            nom: "Jean Dupont".into(),
            nationalite: Some("Française".into()),
            adresse: "12 rue de la Paix, 75002 Paris".into(),
            piece_identite: PieceIdentite {
                type_piece: "CNI".into(),
                numero: "123456789".into(),
                date_delivrance: Some("2019-05-14".into()),
                lieu_delivrance: Some("Paris".into()),
            },
            qualite: "vendeur".into(),
        }
    }

    #[test]
    fn test_partie_valid() {
        assert!(partie().validate().is_ok());
    }

    #[test]
    fn test_partie_rejects_empty_nom() {
        let mut p = partie();
        p.nom = String::new();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_partie_rejects_empty_piece_numero() {
        let mut p = partie();
        p.piece_identite.numero = String::new();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_type_partie_serde_rename() {
        let json = serde_json::to_string(&TypePartie::PersonneMorale).unwrap();
        assert_eq!(json, "\"PERSONNE_MORALE\"");
    }
}
