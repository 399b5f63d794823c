//! Notify Core Types
//!
//! Shared types for the device-side notification history and the send relay.

mod message;
mod push;
mod record;
mod relay;
mod route;

pub use message::*;
pub use push::*;
pub use record::*;
pub use relay::*;
pub use route::*;
