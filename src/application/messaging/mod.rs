//! Message routing - parsing inbound text and dispatching invocations

pub mod parser;
pub mod router;

pub use parser::CommandParser;
pub use router::{Bundle, Command, Router};
