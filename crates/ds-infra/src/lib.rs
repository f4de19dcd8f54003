//! # ds-infra
//!
//! Infrastructure adapters for the DecorSync draft engine: the SQLite draft
//! cache, the HTTP remote store, the connectivity source, the
//! reconnect-driven retry runtime, the scratch file, and the system clock.
//! Each adapter implements a `ds-core` port.

pub mod config;
pub mod db;
pub mod directory;
pub mod fs;
pub mod net;
pub mod remote;
pub mod retry;
pub mod time;

pub use config::FileEngineSettings;
pub use db::{init_db_pool, DbPool, DieselCacheRecordRepository};
pub use directory::SharedProjectDirectory;
pub use fs::{default_data_dir, JsonScratchStore};
pub use net::{ConnectivityHandle, WatchConnectivity};
pub use remote::HttpRemoteStore;
pub use retry::{ReconnectRetryRuntime, UnavailableDeferredRetry};
pub use time::SystemClock;
