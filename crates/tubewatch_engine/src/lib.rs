//! Tubewatch engine: platform IO, rule dispatch and config persistence.
mod actions;
mod api;
mod config_store;
mod dispatch;
mod persist;
mod run;
mod scan;
mod types;

pub use actions::ActionExecutor;
pub use api::{ApiSettings, PlatformApi, ReqwestPlatformApi, DEFAULT_API_BASE, MAX_PAGE_SIZE};
pub use config_store::{ConfigStore, StoreError};
pub use dispatch::RuleEngine;
pub use persist::{AtomicFileWriter, PersistError};
pub use run::{RunOptions, WatchRun};
pub use scan::PlaylistScanner;
pub use types::{
    ApiError, ChannelReport, DispatchOutcome, FailureKind, ItemPage, RunSummary, ScanOutcome,
};
