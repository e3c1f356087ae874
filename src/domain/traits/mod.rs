//! Domain traits

pub mod bot;

pub use bot::{Bot, BotInfo};
