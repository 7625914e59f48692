//! Access to the generative service with normalized failure handling,
//! plus the prompt templates the site sends through it.

pub mod gateway;
pub mod prompts;

#[cfg(test)]
pub(crate) mod testing;

pub use gateway::{
    AssistantGateway, CONNECTION_TROUBLE_REPLY, GatewaySettings, RATE_LIMITED_REPLY,
};
