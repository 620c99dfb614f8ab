//! Tracing setup for hosts embedding the dashboard charts.
//!
//! Charts only emit `tracing` events; installing a subscriber is the host's
//! decision. `init_default_tracing` is a convenience for demos and tests.

/// Installs a compact `fmt` subscriber honouring `RUST_LOG` (default `info`).
///
/// Returns `false` when the `telemetry` feature is disabled or when the host
/// already installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
