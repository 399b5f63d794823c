//! Notify Device
//!
//! Client-side intake of delivered notifications: persisted history, badge
//! count, deep-link routing and the outbound send path.

pub mod alert;
pub mod badge;
pub mod config;
pub mod device;
pub mod inbox;
pub mod intake;
pub mod relay;
pub mod router;

pub use alert::Alerter;
pub use badge::BadgeCounter;
pub use config::DeviceConfig;
pub use device::Device;
pub use inbox::Inbox;
pub use intake::{Delivery, IntakePipeline};
pub use relay::{RelayClient, SendError, SendReceipt};
pub use router::{Navigator, Route};
