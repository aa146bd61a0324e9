//! Trait seams for Pitchcraft.
//!
//! The workflow orchestrator talks to the outside world through two traits:
//!
//! - [`PitchGenerator`]: the generation client, one method per provider
//!   operation
//! - [`ApiKeySelector`]: the host's API-key selection capability, consulted
//!   before video generation
//!
//! [`PollPolicy`] carries the interval, deadline, and cancellation signal for
//! long-running provider jobs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod poll;
mod traits;

pub use poll::{CancelHandle, PollPolicy, DEFAULT_POLL_INTERVAL};
pub use traits::{ApiKeySelector, PitchGenerator, StaticKeySelector};
