use serde::Serialize;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Synchronous reply to an interaction. The webhook core only ever answers
/// with a bare `{"type": N}` body; richer responses are delivered later via
/// the follow-up edit mechanism, outside this service.
#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum InteractionResponse {
    Pong(SimpleInteractionResponse),
    DeferredChannelMessageWithSource(SimpleInteractionResponse),
}

#[derive(Serialize, Debug)]
pub struct SimpleInteractionResponse {
    r#type: InteractionResponseType,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[non_exhaustive]
pub enum InteractionResponseType {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
    DeferredMessageUpdate = 6,
    UpdateMessage = 7,
}

impl InteractionResponse {
    pub fn new_pong() -> InteractionResponse {
        InteractionResponse::Pong(SimpleInteractionResponse {
            r#type: InteractionResponseType::Pong,
        })
    }

    pub fn new_deferred_channel_message_with_source() -> InteractionResponse {
        InteractionResponse::DeferredChannelMessageWithSource(SimpleInteractionResponse {
            r#type: InteractionResponseType::DeferredChannelMessageWithSource,
        })
    }
}
