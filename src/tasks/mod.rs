//! Background Tasks Module
//!
//! Worker threads that drive the shared cache concurrently.
//!
//! # Tasks
//! - Writer: issues a fixed sequence of puts, then signals completion
//! - Demo: two writers plus a coordinator waiting on the completion barrier

mod demo;
mod writer;

pub use demo::{demo_plans, run_demo, run_writers};
pub use writer::{spawn_writer, WriterPlan};
