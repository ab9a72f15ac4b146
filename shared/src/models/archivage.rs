//! Archivage Model (archive metadata and backup records)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Backup destination kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeSauvegarde {
    #[serde(rename = "LOCALE")]
    Locale,
    #[serde(rename = "CLOUD")]
    Cloud,
    #[serde(rename = "EXTERNE")]
    Externe,
}

impl TypeSauvegarde {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TypeSauvegarde::Locale => "LOCALE",
            TypeSauvegarde::Cloud => "CLOUD",
            TypeSauvegarde::Externe => "EXTERNE",
        }
    }
}

impl FromStr for TypeSauvegarde {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOCALE" => Ok(TypeSauvegarde::Locale),
            "CLOUD" => Ok(TypeSauvegarde::Cloud),
            "EXTERNE" => Ok(TypeSauvegarde::Externe),
            other => Err(format!("unknown type_sauvegarde: {other}")),
        }
    }
}

impl fmt::Display for TypeSauvegarde {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Archive lifecycle state
///
/// EN_ATTENTE from creation until `archiver_acte` completes, ACTIF afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatutArchivage {
    #[serde(rename = "EN_ATTENTE")]
    EnAttente,
    #[serde(rename = "ACTIF")]
    Actif,
}

impl StatutArchivage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StatutArchivage::EnAttente => "EN_ATTENTE",
            StatutArchivage::Actif => "ACTIF",
        }
    }
}

impl FromStr for StatutArchivage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EN_ATTENTE" => Ok(StatutArchivage::EnAttente),
            "ACTIF" => Ok(StatutArchivage::Actif),
            other => Err(format!("unknown statut_archivage: {other}")),
        }
    }
}

/// State of one backup record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatutSauvegarde {
    /// Placeholder declared at creation, not yet written
    #[serde(rename = "EN_ATTENTE")]
    EnAttente,
    /// Backup persisted during archival
    #[serde(rename = "ACTIF")]
    Actif,
}

impl StatutSauvegarde {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StatutSauvegarde::EnAttente => "EN_ATTENTE",
            StatutSauvegarde::Actif => "ACTIF",
        }
    }
}

impl FromStr for StatutSauvegarde {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EN_ATTENTE" => Ok(StatutSauvegarde::EnAttente),
            "ACTIF" => Ok(StatutSauvegarde::Actif),
            other => Err(format!("unknown statut_sauvegarde: {other}")),
        }
    }
}

/// A single backup record for one archival destination kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sauvegarde {
    pub id: i64,
    pub acte_id: i64,
    pub type_sauvegarde: TypeSauvegarde,
    /// Destination path or locator
    pub emplacement: String,
    pub statut: StatutSauvegarde,
    pub created_at: i64,
}

/// Archive metadata embedded in an acte
///
/// Present from creation (numero_archive is allocated with the acte),
/// populated fully only at archival.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivageInfo {
    /// Archive number, allocated at acte creation
    pub numero_archive: i64,
    /// Physical archive location, set at archival
    pub emplacement_physique: Option<String>,
    /// Digital storage path, set at archival
    pub emplacement_numerique: Option<String>,
    /// Retention duration in days, set at archival
    pub duree_retention_jours: Option<i64>,
    pub statut: StatutArchivage,
    pub sauvegardes: Vec<Sauvegarde>,
}

/// Archive deed payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ArchiverActeRequest {
    pub acte_id: i64,
    #[validate(length(min = 1, message = "emplacement_physique must not be empty"))]
    pub emplacement_physique: String,
    /// Retention duration in days; the configured default applies when absent
    pub duree_retention_jours: Option<i64>,
    #[validate(length(min = 1, message = "at least one backup kind is required"))]
    pub types_sauvegarde: Vec<TypeSauvegarde>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_sauvegarde_str_roundtrip() {
        for t in [
            TypeSauvegarde::Locale,
            TypeSauvegarde::Cloud,
            TypeSauvegarde::Externe,
        ] {
            assert_eq!(t.as_str().parse::<TypeSauvegarde>().unwrap(), t);
        }
    }

    #[test]
    fn test_archiver_request_requires_backup_kind() {
        let req = ArchiverActeRequest {
            acte_id: 1,
            emplacement_physique: "coffre A-12".into(),
            duree_retention_jours: None,
            types_sauvegarde: vec![],
        };
        assert!(validator::Validate::validate(&req).is_err());
    }
}
