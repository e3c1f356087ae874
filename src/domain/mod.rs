//! Domain layer - Core entities and traits

pub mod entities;
pub mod traits;
