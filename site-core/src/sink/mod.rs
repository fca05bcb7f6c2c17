//! Outbound seams: user-facing notifications and the hand-off of saved
//! estimates. Both are collaborators outside the core; the core only defines
//! the traits and a couple of in-process implementations.

pub mod estimate_sink;
pub mod notifier;
pub mod registry;

pub use estimate_sink::{EstimateSink, InMemoryEstimateSink, SinkError};
pub use notifier::{Notification, NotificationLevel, Notifier, RecordingNotifier};
pub use registry::{InMemorySinkFactory, SinkConfig, SinkFactory, SinkRegistry};
