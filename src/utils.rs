//! Utils

use clap::Parser;

/// Arguments for the booking demo
#[derive(Debug, Parser)]
pub struct DemoBookingArgs {
    /// Fixture set to use for the listing catalog & cart holds
    #[clap(short, long, default_value = "coastal")]
    pub fixture: String,

    /// Seconds to simulate between adding holds and checking out
    #[clap(short, long, default_value_t = 30)]
    pub elapsed: i64,
}
