//! Acte Authentique Model (notarized deed)

use super::archivage::ArchivageInfo;
use super::partie::PartieActe;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Deed category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeActe {
    #[serde(rename = "VENTE_IMMOBILIERE")]
    VenteImmobiliere,
    #[serde(rename = "DONATION")]
    Donation,
    #[serde(rename = "TESTAMENT")]
    Testament,
    #[serde(rename = "CONTRAT_MARIAGE")]
    ContratMariage,
    #[serde(rename = "PROCURATION")]
    Procuration,
    #[serde(rename = "ACTE_NOTORIETE")]
    ActeNotoriete,
    #[serde(rename = "AUTRE")]
    Autre,
}

impl TypeActe {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TypeActe::VenteImmobiliere => "VENTE_IMMOBILIERE",
            TypeActe::Donation => "DONATION",
            TypeActe::Testament => "TESTAMENT",
            TypeActe::ContratMariage => "CONTRAT_MARIAGE",
            TypeActe::Procuration => "PROCURATION",
            TypeActe::ActeNotoriete => "ACTE_NOTORIETE",
            TypeActe::Autre => "AUTRE",
        }
    }
}

impl FromStr for TypeActe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VENTE_IMMOBILIERE" => Ok(TypeActe::VenteImmobiliere),
            "DONATION" => Ok(TypeActe::Donation),
            "TESTAMENT" => Ok(TypeActe::Testament),
            "CONTRAT_MARIAGE" => Ok(TypeActe::ContratMariage),
            "PROCURATION" => Ok(TypeActe::Procuration),
            "ACTE_NOTORIETE" => Ok(TypeActe::ActeNotoriete),
            "AUTRE" => Ok(TypeActe::Autre),
            other => Err(format!("unknown type_acte: {other}")),
        }
    }
}

impl fmt::Display for TypeActe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a deed
///
/// Transitions are one-directional:
/// BROUILLON -> SIGNE -> ENREGISTRE -> ARCHIVE. An acte is never deleted;
/// archival is the terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatutActe {
    #[serde(rename = "BROUILLON")]
    Brouillon,
    #[serde(rename = "SIGNE")]
    Signe,
    #[serde(rename = "ENREGISTRE")]
    Enregistre,
    #[serde(rename = "ARCHIVE")]
    Archive,
}

impl StatutActe {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StatutActe::Brouillon => "BROUILLON",
            StatutActe::Signe => "SIGNE",
            StatutActe::Enregistre => "ENREGISTRE",
            StatutActe::Archive => "ARCHIVE",
        }
    }

    /// Position in the forward lifecycle, used to forbid backward transitions
    pub const fn rang(&self) -> u8 {
        match self {
            StatutActe::Brouillon => 0,
            StatutActe::Signe => 1,
            StatutActe::Enregistre => 2,
            StatutActe::Archive => 3,
        }
    }

    /// Whether the acte is at least signed (certified copies permitted)
    pub const fn est_signe(&self) -> bool {
        self.rang() >= StatutActe::Signe.rang()
    }
}

impl FromStr for StatutActe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BROUILLON" => Ok(StatutActe::Brouillon),
            "SIGNE" => Ok(StatutActe::Signe),
            "ENREGISTRE" => Ok(StatutActe::Enregistre),
            "ARCHIVE" => Ok(StatutActe::Archive),
            other => Err(format!("unknown statut: {other}")),
        }
    }
}

impl fmt::Display for StatutActe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured deed content
///
/// Field order is the canonical serialization order: the integrity digest is
/// computed over the serialized bytes, so reordering fields changes the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContenuActe {
    /// Opening formula
    pub preambule: String,
    /// Appearance section (who appears before the notary)
    pub comparution: String,
    /// Statement of facts
    pub expose: String,
    /// Operative clauses
    pub dispositif: String,
    /// Optional clause list
    #[serde(default)]
    pub clauses: Vec<String>,
    /// Optional marginal mentions
    #[serde(default)]
    pub mentions: Vec<String>,
    /// Closing formula
    pub conclusion: String,
}

/// Free-form deed metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MetadonneesActe {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub references_juridiques: Vec<String>,
    /// Monetary amount of the operation, if any
    pub montant: Option<f64>,
    pub devise: Option<String>,
}

/// An authenticated legal deed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActeAuthentique {
    pub id: i64,
    /// Chronological minutier number, format `YYYY-NNNNNN`, unique and
    /// strictly increasing per notary per year
    pub numero_minutier: String,
    /// Secondary chronological index, independent counter
    pub numero_repertoire: i64,
    pub type_acte: TypeActe,
    /// Free-text description of the deed's subject
    pub objet: String,
    pub parties: Vec<PartieActe>,
    pub contenu: ContenuActe,
    /// Owning notary, immutable after creation
    pub notaire_id: i64,
    pub statut: StatutActe,
    /// Hex SHA-256 digest over canonical serialized `contenu`
    pub hash_integrite: String,
    /// Per-act symmetric key reference (kept out of serialized responses)
    #[serde(skip_serializing)]
    pub chiffrement_cle: String,
    pub metadonnees: MetadonneesActe,
    pub archivage: ArchivageInfo,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create deed payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreerActeRequest {
    pub type_acte: TypeActe,
    #[validate(length(min = 1, message = "objet must not be empty"))]
    pub objet: String,
    #[validate(length(min = 1, message = "at least one party is required"))]
    pub parties: Vec<PartieActe>,
    pub contenu: ContenuActe,
    #[serde(default)]
    pub metadonnees: MetadonneesActe,
}
