pub mod cache;
pub mod error;
pub mod fetch;
pub mod playlist;
pub mod select;
pub mod session;

pub use error::{ZapError, ZapResult};
pub use playlist::Channel;
pub use select::ChannelSelector;
pub use session::{CastTarget, PlaybackEnd, PlaybackSession};
