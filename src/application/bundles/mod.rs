//! Command bundles - independently registrable groups of handlers
//!
//! Every handler follows the same shape: validate the argument string, make
//! at most one outbound call, extract the typed fields, reply exactly once.
//! Failures never leave a handler as errors; they become the documented
//! fallback text.

pub mod ai;
pub mod core;
pub mod fun;
pub mod utilities;
