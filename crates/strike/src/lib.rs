//! Chime Strike Scheduler
//!
//! Turns a sequence of calendar values into a schedule that yields each
//! value when the observed clock reaches its first instant.
//!
//! ## State Machine
//!
//! ```text
//! Idle ──► Scheduled ──► Struck ──► Scheduled ──► ... ──► Completed
//!   │          │                                              ▲
//!   └──────────┴──── cancelled / no candidate left ───────────┘
//! ```
//!
//! Candidates come from a [`Chime`] (fixed stride, predicate filter or a
//! single instant). Candidates that already started are skipped, so a schedule
//! never strikes the past. Waiting is converted to real time through the
//! clock's rate, so scaled clocks strike proportionally faster.
//!
//! ## Usage
//!
//! ```ignore
//! use chime_clock::SystemClock;
//! use chime_core::Stride;
//! use chime_strike::Strike;
//!
//! let mut strike = Strike::every(SystemClock::utc(), Stride::minutes(15), None)?;
//! while let Some(quarter) = strike.next().await {
//!     println!("{quarter}");
//! }
//!
//! // Or on a task, cancelled when the handle is dropped
//! let mut handle = Strike::every(SystemClock::utc(), Stride::hours(1), None)?.spawn(16);
//! let first = handle.recv().await;
//! ```

mod cancel;
mod chime;
pub mod config;
mod error;
mod handle;
mod strike;

pub use cancel::CancellationToken;
pub use chime::Chime;
pub use config::{ConfigError, StrikeConfig};
pub use error::{Result, StrikeError};
pub use handle::StrikeHandle;
pub use strike::{Blocking, Strike, StrikeState};
