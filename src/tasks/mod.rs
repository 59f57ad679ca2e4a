//! Background Tasks Module
//!
//! # Tasks
//! - Cache cleanup: purges expired item representations at a fixed interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
