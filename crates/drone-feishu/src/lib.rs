//! Drone CI plugin that posts signed build-result cards to a Feishu/Lark
//! custom-bot webhook.

pub mod card;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod markdown;
pub mod orchestrator;
pub mod signature;
pub mod sink;
