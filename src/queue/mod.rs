//! The queue/retry engine: admission, ordering, concurrency, recovery.
//!
//! This module is the core of the pipeline:
//!
//! - **Job**: One event plus admission metadata, executed at most once
//! - **RetryQueue**: FIFO pending sequence with append-on-retry semantics
//! - **Worker**: The single execution context draining the queue
//!
//! # Architecture
//!
//! ```text
//!   ┌──────────┐  admit   ┌─────────────┐  take    ┌──────────┐
//!   │  Driver  │ ───────▶ │  RetryQueue │ ───────▶ │  Worker  │
//!   └──────────┘          └─────────────┘          └────┬─────┘
//!                                ▲                      │
//!                                │  admit(retry + 1)    ▼
//!                                └──────────────── negative ack
//! ```
//!
//! # Guarantees
//!
//! - Jobs execute in strict admission order; a requeued job re-enters at
//!   the current tail, behind jobs admitted after the original attempt
//! - At most one handler invocation is in flight at any time
//! - A handler failure is absorbed as a retry, never as a worker crash
//! - Retries are unbounded: there is no max-attempts policy and no
//!   dead-letter path
pub mod job;
pub mod retry_queue;
pub mod worker;

pub use job::Job;
pub use retry_queue::RetryQueue;
pub use worker::Worker;
