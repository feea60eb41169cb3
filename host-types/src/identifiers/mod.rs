//! Defines identifier types

mod channel_id;
mod port_id;
mod sequence;

pub use channel_id::ChannelId;
pub use port_id::PortId;
pub use sequence::Sequence;
