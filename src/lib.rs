//! Sweep Cache - An in-memory key/value cache with TTL expiration
//!
//! Provides per-entry TTL expiration with lazy (on-read) expiry and two
//! background garbage-collection strategies: a bounded-sample partial sweep
//! and an unbounded total sweep, both driven by a periodic scheduler with
//! cooperative cancellation.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod gc;
pub mod storage;
pub mod tasks;

pub use cache::{Cache, Value};
pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use config::Config;
pub use error::{CacheError, Result};
pub use gc::{GarbageCollector, PartialGc, PartialGcConfig, TotalGc};
pub use storage::{ConcurrentHashMap, Storage};
pub use tasks::{run_gc, spawn_gc_task};
