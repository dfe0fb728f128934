//! Log output for the `seqoid` binary.
//!
//! Identifiers go to stdout, so diagnostics are written to stderr. The filter
//! is read from `RUST_LOG` and defaults to `warn`:
//!
//! ```bash
//! RUST_LOG=seqoid=debug seqoid --count 3
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()?;
    Ok(())
}
