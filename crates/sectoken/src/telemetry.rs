//! Log output setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs a global `fmt` subscriber filtered by `RUST_LOG`, falling back
/// to `default_filter` (e.g. `"sectoken=debug"`) when it is unset.
///
/// Returns `false` if a global subscriber was already installed, which
/// makes repeated calls from tests harmless.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
