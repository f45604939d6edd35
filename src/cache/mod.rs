//! Cache Module
//!
//! Provides the cache facade and the TTL-carrying value wrapper.

mod store;
mod value;


// Re-export public types
pub use store::Cache;
pub use value::Value;
