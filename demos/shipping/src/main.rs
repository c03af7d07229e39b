//! Set `VICTORIALOGS_URL` to a reachable VictoriaLogs-compatible endpoint
//! (e.g. `http://127.0.0.1:9428/insert/jsonline`) and run with
//! `cargo run -p demo-shipping -- <record-count>`. With no argument this
//! sends a single record (immediate ship); pass `500` to exercise batching
//! (at most `ceil(500/50)` POSTs).

use std::env;

use hydrogen_log::{DestinationHints, Severity, Subsystem};
use hydrogen_log_sdk::sinks::console::ConsoleSink;
use hydrogen_log_sdk::{attach_remote_from_env, Config, DestinationFilter, Destinations, Logging};

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    if env::var("VICTORIALOGS_URL").is_err() {
        eprintln!("VICTORIALOGS_URL is not set; the shipper will stay disabled.");
        eprintln!("export VICTORIALOGS_URL=http://127.0.0.1:9428/insert/jsonline and re-run.");
    }

    let count: usize = env::args().nth(1).and_then(|arg| arg.parse().ok()).unwrap_or(1);

    let filter =
        DestinationFilter::default().with_default_threshold(hydrogen_log::Destination::Remote, Severity::Debug);
    let destinations = attach_remote_from_env(Destinations {
        console: Some(Box::new(ConsoleSink::stderr())),
        ..Destinations::default()
    });

    let logging = Logging::init(Config::default(), filter, destinations).expect("logging core failed to start");

    let subsystem = Subsystem::new("Boot");
    for i in 0..count {
        logging.enqueue(&subsystem, Severity::Debug, &format!("hello from record {i}"), DestinationHints::ALL);
    }

    // Give the shipper's idle (short) timer a chance to flush a
    // low-volume burst before shutdown forces the final flush anyway.
    std::thread::sleep(std::time::Duration::from_secs(2));

    logging.shutdown().expect("logging core failed to drain");
}
