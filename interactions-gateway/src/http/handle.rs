use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use event_stream::{Envelope, Publisher};
use log::{debug, error};
use model::interaction::{ApplicationCommandInteraction, Interaction, InteractionResponse};
use serde_json::Value;
use warp::hyper::body::Bytes;
use warp::{reply::Response, Rejection, Reply};

use crate::http::Server;
use crate::{signature, Error};

/// Hard bound on a single publish attempt, including broker acknowledgment.
const PUBLISH_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn handle(
    server: Arc<Server>,
    signature: Option<String>,
    timestamp: Option<String>,
    body: Bytes,
) -> Result<Response, Rejection> {
    let (signature_hex, timestamp) = match (signature, timestamp) {
        (Some(signature), Some(timestamp)) => (signature, timestamp),
        _ => return Err(Error::MissingSignatureHeaders.into()),
    };

    let now = Utc::now().timestamp();
    if !signature::verify(&server.public_key, &signature_hex, &timestamp, &body, now) {
        return Err(Error::InvalidSignature.into());
    }

    let interaction: Interaction = serde_json::from_slice(&body)
        .map_err(Error::JsonError)
        .map_err(warp::reject::custom)?;

    match interaction {
        // Pings are acknowledged and nothing else: never forwarded, even
        // with a publisher configured.
        Interaction::Ping(_) => {
            let response = InteractionResponse::new_pong();
            Ok(warp::reply::json(&response).into_response())
        }

        Interaction::ApplicationCommand(interaction) => {
            if let Some(publisher) = &server.publisher {
                spawn_publish(Arc::clone(publisher), interaction);
            }

            let response = InteractionResponse::new_deferred_channel_message_with_source();
            Ok(warp::reply::json(&response).into_response())
        }
    }
}

/// Forwards a command interaction without holding up the response path: the
/// task is spawned, never awaited, and reports only through logs. A publish
/// failure is terminal; the client already has its reply.
fn spawn_publish(publisher: Arc<Publisher>, interaction: Box<ApplicationCommandInteraction>) {
    tokio::spawn(async move {
        let interaction_id = interaction.id.as_deref().unwrap_or("unknown").to_owned();

        match publish(&publisher, &interaction).await {
            Ok((partition, offset)) => debug!(
                "Published interaction {} to partition {} at offset {}",
                interaction_id, partition, offset
            ),
            Err(e) => error!("Failed to publish interaction {}: {}", interaction_id, e),
        }
    });
}

async fn publish(
    publisher: &Publisher,
    interaction: &ApplicationCommandInteraction,
) -> Result<(i32, i64), Error> {
    let data = serde_json::to_vec(&interaction.sanitized()).map_err(Error::JsonError)?;

    let envelope = Envelope {
        data,
        attributes: derive_attributes(interaction),
    };

    publisher
        .send(&envelope, PUBLISH_TIMEOUT)
        .await
        .map_err(Error::PublishError)
}

fn derive_attributes(interaction: &ApplicationCommandInteraction) -> HashMap<String, String> {
    let mut attributes = HashMap::with_capacity(7);

    attributes.insert(
        "interaction_id".to_owned(),
        interaction.id.as_deref().unwrap_or_default().to_owned(),
    );
    attributes.insert(
        "interaction_type".to_owned(),
        (interaction.r#type as u8).to_string(),
    );
    attributes.insert(
        "application_id".to_owned(),
        interaction
            .application_id
            .as_deref()
            .unwrap_or_default()
            .to_owned(),
    );
    attributes.insert(
        "guild_id".to_owned(),
        interaction.guild_id.as_deref().unwrap_or_default().to_owned(),
    );
    attributes.insert(
        "channel_id".to_owned(),
        interaction.channel_id.as_deref().unwrap_or_default().to_owned(),
    );
    attributes.insert(
        "timestamp".to_owned(),
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    );

    if let Some(name) = interaction
        .data
        .as_ref()
        .and_then(|data| data.get("name"))
        .and_then(Value::as_str)
    {
        attributes.insert("command_name".to_owned(), name.to_owned());
    }

    attributes
}
