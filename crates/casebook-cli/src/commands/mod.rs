//! Command implementations.

mod config;
mod session;
mod timeline;

pub use config::{ConfigCommand, ConfigReport};
pub use session::{SessionCommand, SessionReport};
pub use timeline::{TimelineCommand, TimelineReport};
