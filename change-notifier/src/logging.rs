//! Diagnostic logging on stderr.
//!
//! Quiet by default. `RUST_LOG` overrides the default filter:
//! ```bash
//! RUST_LOG=debug change-notifier 0 watch.txt exclude.txt /tmp/notify
//! RUST_LOG=change_notifier::aggregator=trace change-notifier ...
//! ```
//!
//! Logging is for operators watching the process. The consumer only ever sees
//! the notification directory and `error.txt`.

use std::sync::Once;

use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Initialize logging with [`DEFAULT_FILTER`].
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Initialize logging. Only the first call takes effect.
pub fn init_with_filter(default: &str) {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(CompactTime)
            .with_filter(filter);

        // Another subscriber may already be installed, e.g. by a test harness.
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}
