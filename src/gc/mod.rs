//! Garbage Collection Module
//!
//! Two background strategies for reclaiming expired entries: a
//! bounded-sample partial sweep repeated until the store looks clean enough,
//! and a total full sweep. Both honor cooperative cancellation at entry
//! granularity and are invoked uniformly through [`GarbageCollector`].

mod counter;
mod handler;
mod partial;
mod total;

pub use partial::{PartialGc, PartialGcConfig};
pub use total::TotalGc;

pub(crate) use counter::SweepCounter;
pub(crate) use handler::SweepHandler;

use tokio_util::sync::CancellationToken;

// == Garbage Collector Trait ==
/// A background cleaning capability over shared cache storage.
///
/// The two strategies are structurally unrelated; this one-method contract is
/// all the periodic scheduler needs to drive either of them.
pub trait GarbageCollector: Send + Sync {
    /// Runs one cleaning cycle, honoring the cancellation token per visited
    /// entry. Returns promptly once the token fires.
    fn clean(&self, token: &CancellationToken);
}
