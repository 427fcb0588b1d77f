// Realtime layer - live push channels over websockets
pub mod registry;
pub mod socket;

pub use registry::{ChannelRegistry, InMemoryChannelRegistry, PushMessage};
pub use socket::{notification_channel, RealtimeState};
