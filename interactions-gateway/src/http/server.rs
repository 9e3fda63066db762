use std::net::SocketAddr;
use std::sync::Arc;

use ed25519_dalek::PublicKey;
use event_stream::Publisher;
use log::{info, warn};
use warp::http::StatusCode;
use warp::reply::Json;
use warp::{Filter, Rejection};

use crate::http::response::{ErrorResponse, HealthResponse};
use crate::{Config, Error};

pub struct Server {
    pub config: Config,
    pub public_key: PublicKey,
    pub publisher: Option<Arc<Publisher>>,
}

impl Server {
    pub async fn new(config: Config) -> Server {
        let public_key = config.parse_public_key();
        let publisher = Server::build_publisher(&config).await;

        Server {
            config,
            public_key,
            publisher,
        }
    }

    pub async fn start(self) -> Result<(), Error> {
        let address: SocketAddr = self
            .config
            .server_addr
            .parse()
            .expect("Failed to parse server address");

        let filter = Arc::new(self).filter();

        info!("Starting server on {}", address);

        warp::serve(filter).run(address).await;

        Ok(())
    }

    /// A missing destination topic is not an error: the gateway still
    /// verifies, classifies and responds, it just publishes nothing. A
    /// failed connection at startup degrades to the same no-op mode.
    async fn build_publisher(config: &Config) -> Option<Arc<Publisher>> {
        let topic = match config.resolved_topic() {
            Some(topic) => topic,
            None => {
                info!("No destination topic configured, publishing is disabled");
                return None;
            }
        };

        match Publisher::new(config.kafka_brokers.clone(), topic).await {
            Ok(publisher) => Some(Arc::new(publisher)),
            Err(e) => {
                warn!("Failed to initialise publisher, publishing is disabled: {}", e);
                None
            }
        }
    }

    fn filter(
        self: Arc<Self>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = Rejection> + Clone {
        let health = warp::get()
            .and(warp::path("health"))
            .and(warp::path::end())
            .map(|| warp::reply::json(&HealthResponse::ok()));

        let interactions = warp::post()
            .and(warp::path::end().or(warp::path!("interactions")).unify())
            .and(warp::any().map(move || self.clone()))
            .and(warp::header::optional::<String>("x-signature-ed25519"))
            .and(warp::header::optional::<String>("x-signature-timestamp"))
            .and(warp::body::bytes())
            .and_then(super::handle);

        health
            .or(interactions)
            .with(warp::log("warp"))
            .recover(handle_rejection)
    }
}

async fn handle_rejection(rejection: Rejection) -> Result<impl warp::Reply, Rejection> {
    if let Some(error) = rejection.find::<Error>() {
        let json: Json = ErrorResponse::from(error).into();

        let status_code = match error {
            Error::MissingSignatureHeaders | Error::InvalidSignature => StatusCode::UNAUTHORIZED,
            Error::JsonError(..) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Ok(warp::reply::with_status(json, status_code))
    } else {
        Err(rejection)
    }
}
