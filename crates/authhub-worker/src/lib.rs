//! Scheduled background tasks for AuthHub.
//!
//! This crate provides:
//! - A cron scheduler that owns the periodic tasks
//! - The session sweep job that revokes tokens past their retention window

pub mod jobs;
pub mod scheduler;

pub use jobs::SweepJob;
pub use scheduler::CronScheduler;
