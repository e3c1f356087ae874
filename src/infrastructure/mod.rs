//! Infrastructure layer - adapters, external APIs, config, storage

pub mod adapters;
pub mod api;
pub mod config;
pub mod storage;
