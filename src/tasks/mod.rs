//! Background Tasks Module
//!
//! Long-running tasks tied to the server lifecycle.

pub mod cleanup;

pub use cleanup::spawn_cleanup_task;
