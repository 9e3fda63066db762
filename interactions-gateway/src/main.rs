use interactions_gateway::http::Server;
use interactions_gateway::{Config, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = Config::from_envvar();

    let server = Server::new(config).await;
    server.start().await
}
