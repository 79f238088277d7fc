//! Tubewatch core: typed configuration records and the pure decisions of a run.
//!
//! Nothing in here performs IO. The engine crate feeds pages and dispatch
//! results through these types and acts on what they decide.
mod config;
mod cutoff;
mod item;
mod matching;
mod watermark;

pub use config::{Action, ChannelConfig, ConfigError, Rule};
pub use cutoff::{NewItems, PageVerdict};
pub use item::{PlaylistItem, Timestamp};
pub use matching::{match_in_order, RuleMatch};
pub use watermark::WatermarkPolicy;
