use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::interaction::{ApplicationCommandInteraction, InteractionType};

/// The only serializable view of an interaction: every field of the inbound
/// payload except the token, which must never leave the process. Absent
/// fields are omitted from the output; `null` values inside the untyped
/// subtrees survive as `null`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SanitizedInteraction {
    pub r#type: InteractionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Box<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<Box<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Box<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Box<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<Box<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_locale: Option<Box<str>>,
}

impl ApplicationCommandInteraction {
    pub fn sanitized(&self) -> SanitizedInteraction {
        SanitizedInteraction {
            r#type: self.r#type,
            id: self.id.clone(),
            application_id: self.application_id.clone(),
            // token is deliberately not carried over
            data: self.data.clone(),
            guild_id: self.guild_id.clone(),
            channel_id: self.channel_id.clone(),
            member: self.member.clone(),
            user: self.user.clone(),
            locale: self.locale.clone(),
            guild_locale: self.guild_locale.clone(),
        }
    }
}
