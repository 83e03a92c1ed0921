//! # Contracts
//!
//! Frozen interface contracts, defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Events are stamped with wall-clock UTC time at ingestion
//! - `occurred_at` is assigned once and never rewritten downstream

mod blueprint;
mod error;
mod event;
mod sink;
mod state;
mod transport;

pub use blueprint::*;
pub use error::*;
pub use event::ChatEvent;
pub use sink::*;
pub use state::{HealthSnapshot, RuntimeState};
pub use transport::ChatTransport;
