//! Minutier server — notarial deed registry
//!
//! Owns the `ActeAuthentique` lifecycle: gap-free chronological numbering,
//! sealed (encrypted + digest-verified) content storage, certified copy
//! issuance and durable archival with redundant backup destinations.
//!
//! The surrounding REST transport, authentication and RBAC evaluation are
//! external collaborators; this crate exposes the service boundary only.

pub mod common;
pub mod core;
pub mod db;
pub mod services;

pub use common::error::{RegistreError, RegistreResult};
pub use crate::core::config::Config;
pub use db::DbService;
pub use services::archivage::GestionnaireArchives;
pub use services::copie::EmetteurCopies;
pub use services::recherche::RechercheRegistre;
pub use services::registre::RegistreActes;
