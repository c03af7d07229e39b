//! `VICTORIALOGS_URL` unset, a thousand records logged to Console and File
//! at severity `State`, then a clean shutdown. Run with
//! `cargo run -p demo-basic`.

use std::env;

use hydrogen_log::{DestinationHints, Severity, Subsystem};
use hydrogen_log_sdk::sinks::console::ConsoleSink;
use hydrogen_log_sdk::sinks::file::FileSink;
use hydrogen_log_sdk::{Config, DestinationFilter, Destinations, Logging};

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let log_path = env::temp_dir().join("hydrogen-demo-basic.log");
    let destinations = Destinations {
        console: Some(Box::new(ConsoleSink::stderr())),
        file: Some(Box::new(FileSink::open(&log_path).expect("open demo log file"))),
        ..Destinations::default()
    };

    let logging = Logging::init(Config::default(), DestinationFilter::default(), destinations)
        .expect("logging core failed to start");

    let subsystem = Subsystem::new("Test");
    for i in 0..1_000 {
        logging.enqueue(&subsystem, Severity::State, &format!("boot sequence step {i}"), DestinationHints::ALL);
    }

    logging.shutdown().expect("logging core failed to drain");
    eprintln!("wrote 1000 records to {}", log_path.display());
}
