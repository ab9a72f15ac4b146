//! Registry server configuration

use shared::models::TypeSauvegarde;
use std::str::FromStr;

/// Default retention for notarial deeds: 75 years
const DEFAULT_RETENTION_JOURS: i64 = 27_375;

/// Registry server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database path (env: MINUTIER_DATABASE_PATH)
    pub database_path: String,
    /// Base path for digital archive locations (env: MINUTIER_ARCHIVE_BASE)
    pub archive_base: String,
    /// Retention duration applied when an archive request carries none
    /// (env: MINUTIER_RETENTION_JOURS)
    pub retention_defaut_jours: i64,
    /// Backup kinds declared at acte creation, comma-separated
    /// (env: MINUTIER_SAUVEGARDES, e.g. "LOCALE,CLOUD"); placeholders for
    /// these kinds are inserted with every new acte
    pub sauvegardes_declarees: Vec<TypeSauvegarde>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let sauvegardes_declarees = match std::env::var("MINUTIER_SAUVEGARDES") {
            Ok(raw) if !raw.trim().is_empty() => raw
                .split(',')
                .map(|s| TypeSauvegarde::from_str(s.trim()))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| anyhow::anyhow!("invalid MINUTIER_SAUVEGARDES: {e}"))?,
            _ => Vec::new(),
        };

        Ok(Self {
            database_path: std::env::var("MINUTIER_DATABASE_PATH")
                .unwrap_or_else(|_| "data/minutier.db".into()),
            archive_base: std::env::var("MINUTIER_ARCHIVE_BASE")
                .unwrap_or_else(|_| "archives".into()),
            retention_defaut_jours: std::env::var("MINUTIER_RETENTION_JOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RETENTION_JOURS),
            sauvegardes_declarees,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "data/minutier.db".into(),
            archive_base: "archives".into(),
            retention_defaut_jours: DEFAULT_RETENTION_JOURS,
            sauvegardes_declarees: Vec::new(),
        }
    }
}
