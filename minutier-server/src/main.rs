use minutier_server::db::DbService;
use minutier_server::{Config, EmetteurCopies, GestionnaireArchives, RechercheRegistre, RegistreActes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    minutier_server::common::logger::init();

    tracing::info!("Minutier registry server starting...");

    let config = Config::from_env()?;
    let db = DbService::new(&config.database_path).await?;

    let registre = RegistreActes::new(db, config);
    let _copies = EmetteurCopies::new(registre.clone());
    let _archives = GestionnaireArchives::new(registre.clone());
    let _recherche = RechercheRegistre::new(registre);

    // The transport layer (REST, auth) attaches to these services from its
    // own process; this binary owns the store and stays up until stopped.
    tracing::info!("Minutier registry ready");
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    Ok(())
}
