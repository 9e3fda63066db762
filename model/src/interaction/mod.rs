mod interaction;
pub use interaction::{
    ApplicationCommandInteraction, Interaction, InteractionType, PingInteraction,
};

mod interaction_response;
pub use interaction_response::{InteractionResponse, InteractionResponseType};

mod sanitized;
pub use sanitized::SanitizedInteraction;
