use std::convert::TryFrom;

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// An inbound webhook event, discriminated by the `type` field of the raw
/// JSON body. Interactions are deserialize-only: the only serializable view
/// of an interaction is [`super::SanitizedInteraction`], which is how the
/// interaction token is kept out of everything that leaves the process.
#[derive(Debug)]
pub enum Interaction {
    Ping(Box<PingInteraction>),
    ApplicationCommand(Box<ApplicationCommandInteraction>),
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InteractionType {
    Ping = 1,
    ApplicationCommand = 2,
}

impl TryFrom<u64> for InteractionType {
    type Error = Box<str>;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            _ => {
                return Err(format!("unsupported interaction type \"{}\"", value).into_boxed_str())
            }
        })
    }
}

#[derive(Deserialize, Debug)]
pub struct PingInteraction {
    pub r#type: InteractionType,
    pub id: Option<Box<str>>,
    pub application_id: Option<Box<str>>,
}

/// A slash command invocation. Identifier fields stay strings and the
/// `data`/`member`/`user` payloads stay untyped JSON so that the sanitized
/// copy carries them through without coercing any value types.
#[derive(Deserialize, Debug)]
pub struct ApplicationCommandInteraction {
    pub r#type: InteractionType,
    pub id: Option<Box<str>>,
    pub application_id: Option<Box<str>>,
    pub token: Option<Box<str>>,
    pub data: Option<Value>,
    pub guild_id: Option<Box<str>>,
    pub channel_id: Option<Box<str>>,
    pub member: Option<Value>,
    pub user: Option<Value>,
    pub locale: Option<Box<str>>,
    pub guild_locale: Option<Box<str>>,
}

impl<'de> Deserialize<'de> for Interaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        let interaction_type = value
            .get("type")
            .and_then(Value::as_u64)
            .ok_or_else(|| Box::from("interaction type was not an integer"))
            .and_then(InteractionType::try_from)
            .map_err(D::Error::custom)?;

        let interaction = match interaction_type {
            InteractionType::Ping => serde_json::from_value(value).map(Interaction::Ping),
            InteractionType::ApplicationCommand => {
                serde_json::from_value(value).map(Interaction::ApplicationCommand)
            }
        }
        .map_err(D::Error::custom)?;

        Ok(interaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ping() {
        let json = r#"{"type":1,"id":"x","application_id":"y","token":"t"}"#;

        let interaction: Interaction = serde_json::from_str(json).unwrap();
        match interaction {
            Interaction::Ping(ping) => {
                assert_eq!(ping.r#type, InteractionType::Ping);
                assert_eq!(ping.id.as_deref(), Some("x"));
                assert_eq!(ping.application_id.as_deref(), Some("y"));
            }
            other => panic!("expected ping, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_application_command() {
        let json = r#"{
            "type": 2,
            "id": "1234567890",
            "application_id": "9876543210",
            "token": "SECRET",
            "data": {"id": "cmd-123", "name": "ping", "options": []},
            "guild_id": "111",
            "channel_id": "444"
        }"#;

        let interaction: Interaction = serde_json::from_str(json).unwrap();
        match interaction {
            Interaction::ApplicationCommand(command) => {
                assert_eq!(command.r#type, InteractionType::ApplicationCommand);
                assert_eq!(command.id.as_deref(), Some("1234567890"));
                assert_eq!(command.token.as_deref(), Some("SECRET"));
                assert_eq!(command.guild_id.as_deref(), Some("111"));

                let data = command.data.unwrap();
                assert_eq!(data["name"], "ping");
            }
            other => panic!("expected application command, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_unsupported_type() {
        let err = serde_json::from_str::<Interaction>(r#"{"type":99}"#).unwrap_err();
        assert!(err.to_string().contains("unsupported interaction type"));
    }

    #[test]
    fn test_deserialize_missing_type() {
        assert!(serde_json::from_str::<Interaction>(r#"{"id":"x"}"#).is_err());
    }

    #[test]
    fn test_deserialize_non_integer_type() {
        assert!(serde_json::from_str::<Interaction>(r#"{"type":"1"}"#).is_err());
        assert!(serde_json::from_str::<Interaction>(r#"{"type":1.5}"#).is_err());
        assert!(serde_json::from_str::<Interaction>(r#"{"type":null}"#).is_err());
    }
}
