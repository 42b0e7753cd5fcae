use commerce_server::utils::logger::init_logger;
use commerce_server::{Config, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logger("info");

    let config = Config::from_env();
    shared::error::set_expose_details(!config.is_production());

    tracing::info!("commerce server starting");

    let server = Server::new(config);
    server.run().await
}
