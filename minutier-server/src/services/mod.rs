//! Service Layer
//!
//! Registry operations over the repositories. Every mutating operation
//! runs as one transaction: counters, rows, backups and journal entries
//! commit together or not at all.

pub mod archivage;
pub mod copie;
pub mod recherche;
pub mod registre;
pub mod scellement;
