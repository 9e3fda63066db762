use ed25519_dalek::{PublicKey, PUBLIC_KEY_LENGTH};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Config {
    pub server_addr: String,

    /// Hex-encoded Ed25519 verify key for inbound webhook signatures.
    pub public_key: String,

    #[serde(default = "default_brokers")]
    pub kafka_brokers: Vec<String>,

    // Publishing is enabled only when both of these are set. The deployment
    // id scopes topic resolution: the resolved topic is
    // "{deployment_id}.{kafka_topic}".
    pub kafka_topic: Option<String>,
    pub deployment_id: Option<String>,
}

fn default_brokers() -> Vec<String> {
    vec!["127.0.0.1:9092".to_owned()]
}

impl Config {
    pub fn from_envvar() -> Config {
        envy::from_env().expect("Parsing config failed")
    }

    /// Panics on a malformed key: serving requests without a usable verify
    /// key is never acceptable, so startup aborts instead.
    pub fn parse_public_key(&self) -> PublicKey {
        let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
        hex::decode_to_slice(&self.public_key, &mut bytes)
            .expect("PUBLIC_KEY was not valid hex");

        PublicKey::from_bytes(&bytes).expect("PUBLIC_KEY was not a valid ed25519 key")
    }

    pub fn resolved_topic(&self) -> Option<String> {
        match (&self.deployment_id, &self.kafka_topic) {
            (Some(deployment_id), Some(topic)) => Some(format!("{}.{}", deployment_id, topic)),
            _ => None,
        }
    }
}
