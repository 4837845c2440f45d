use anyhow::Result;
use sales_service::cfg::CONFIG;
use sales_service::server::Server;
use sales_service::{db, logging};
use tokio::sync::oneshot;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init(CONFIG.debug);

    let pool = db::connect(&CONFIG.database_url()).await?;
    db::init_schema(&pool).await?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        let _ = shutdown_tx.send(());
    });

    Server::new(pool).start(shutdown_rx).await
}
