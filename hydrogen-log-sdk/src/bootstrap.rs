//! Convenience wiring between the fan-out router and the optional remote
//! shipper crate, gated behind the `remote` feature so an embedder that
//! only wants Console/File never pulls in `hydrogen-log-shipper` (and its
//! `native-tls`/`url` dependency chain) at all.

use std::sync::Arc;

use hydrogen_log::RemoteForwarder;
use hydrogen_log_shipper::Shipper;

use crate::router::Destinations;

/// Fills `destinations.remote` from `VICTORIALOGS_URL` and friends,
/// leaving it untouched if shipping isn't configured in the environment --
/// the same "absent means disabled, not an error" contract
/// [`hydrogen_log_shipper::Shipper::from_env`] itself follows.
pub fn attach_remote_from_env(mut destinations: Destinations) -> Destinations {
    if let Some(shipper) = Shipper::from_env() {
        destinations.remote = Some(shipper as Arc<dyn RemoteForwarder>);
    }
    destinations
}
