//! Background Tasks Module
//!
//! Contains the periodic scheduler that drives a GC strategy while the
//! cache serves foreground traffic.

mod gc_loop;

pub use gc_loop::{run_gc, spawn_gc_task};
