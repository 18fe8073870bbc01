use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Installs the global subscriber once. Logs go to stderr so that a report
/// printed on stdout stays machine-readable.
pub fn init_logging(verbose: bool) {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            let level = if verbose { Level::DEBUG } else { Level::INFO };
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        });
    }
}
