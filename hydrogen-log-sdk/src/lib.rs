//! The queue, fan-out router, built-in sinks, and lifecycle controller for
//! the Hydrogen logging core.
//!
//! Wires together the vocabulary from `hydrogen-log` into a running
//! system: producers call [`lifecycle::Logging::enqueue`], a dedicated
//! consumer thread drains the bounded [`queue::Queue`] and dispatches each
//! record to whichever of the five destinations its severity clears,
//! through [`router::run`].

#[cfg(feature = "remote")]
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod lifecycle;
pub mod queue;
pub mod router;
pub mod sinks;

#[cfg(feature = "remote")]
pub use bootstrap::attach_remote_from_env;
pub use config::{Config, ConfigBuilder};
pub use error::SdkError;
pub use filter::DestinationFilter;
pub use lifecycle::Logging;
pub use router::Destinations;

pub type Result<T> = std::result::Result<T, SdkError>;
