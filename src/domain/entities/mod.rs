//! Domain entities

pub mod invocation;
pub mod reply;
pub mod user;

pub use invocation::Invocation;
pub use reply::Reply;
pub use user::User;
