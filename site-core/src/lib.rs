pub mod calculations;
pub mod error;
pub mod models;
pub mod sink;

pub use error::ErrorKind;
pub use models::*;
pub use sink::{EstimateSink, Notification, NotificationLevel, Notifier, SinkError};
