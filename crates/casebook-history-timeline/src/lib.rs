//! Case history timeline assembly for Casebook.
//!
//! A case's history is kept in two places: the status history (transitions
//! such as `active` to `arrested`) and the audit log (who created, edited or
//! viewed the record). This crate merges both into a single list, newest
//! first, that a front end can render and filter.
//!
//! ```
//! use casebook_history_timeline::{TimelineBuilder, TimelineFilter};
//!
//! let timeline = TimelineBuilder::new().build(&[], &[], TimelineFilter::All);
//! assert!(timeline.is_empty());
//! ```
//!
//! Building is pure: no I/O, inputs are only borrowed, and the same inputs
//! always produce an equal timeline.

mod builder;
mod entry;
mod filter;
mod render;

pub use builder::{Timeline, TimelineBuilder, TimelineSummary};
pub use entry::{Accent, EntryCategory, Icon, TimelineEntry};
pub use filter::{FilterParseError, TimelineFilter};
pub use render::RenderOptions;
