//! Notify Push
//!
//! Provider delivery for the relay and push-token acquisition for the device.

mod fcm;
mod token;
mod traits;

pub use fcm::*;
pub use token::*;
pub use traits::*;
