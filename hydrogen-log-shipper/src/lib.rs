//! The Hydrogen remote log shipper: a batching HTTP/JSON exporter for the
//! `Remote` destination, started only when `VICTORIALOGS_URL` names a valid
//! endpoint.
//!
//! This crate owns its own ingress queue and worker thread, independent of
//! `hydrogen-log-sdk`'s primary consumer thread, so a slow or unreachable
//! remote collector never blocks Console/File delivery. The only seam back
//! into the SDK is [`hydrogen_log::RemoteForwarder`], which [`Shipper`]
//! implements.

pub mod batch;
pub mod config;
pub mod error;
pub mod ingress;
pub mod remote_record;
pub mod shipper;
pub mod transport;
pub mod worker;

pub use config::ShipperConfig;
pub use error::ShipError;
pub use shipper::Shipper;
pub use worker::ShipperStats;

pub type Result<T> = std::result::Result<T, ShipError>;
