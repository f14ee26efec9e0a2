//! # Change Notifier
//!
//! Watches a set of directories and publishes each batch of changes as a
//! sequentially numbered notification file for a downstream consumer.
//!
//! ## Features
//!
//! - **Batching**: changes are coalesced over a latency window by the platform
//! - **Prefix Exclusion**: changes under excluded prefixes are dropped
//! - **Atomic Publication**: files appear fully written or not at all
//! - **Parent Supervision**: the process exits once its parent is gone
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Change Notifier                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  NotifySource ──► EventAggregator ──► NotificationWriter        │
//! │                        │                     │                  │
//! │                        ▼                     ▼                  │
//! │                  ExcludeFilter        <seq>.txt in notify dir   │
//! │                                                                 │
//! │  LivenessMonitor + signals ──► CancellationToken ──► run loop   │
//! │  any fatal error ──► ErrorReporter (error.txt, exit status)     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod exclude;
pub mod lists;
pub mod liveness;
pub mod logging;
pub mod reporter;
pub mod runner;
pub mod source;
pub mod writer;

pub use aggregator::EventAggregator;
pub use cli::Cli;
pub use config::WatcherConfig;
pub use error::{Result, WatcherError};
pub use event::{EventBatch, FileEventKind, RawEvent};
pub use exclude::ExcludeFilter;
pub use lists::WatchList;
pub use liveness::LivenessMonitor;
pub use reporter::ErrorReporter;
pub use runner::{RunOutcome, run, run_loop};
pub use source::{ChangeEventSource, ChannelSource, NotifySource};
pub use writer::NotificationWriter;
