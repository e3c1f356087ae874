//! Application layer - Routing and command bundles

pub mod bundles;
pub mod errors;
pub mod messaging;
