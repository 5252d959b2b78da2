use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the fmt subscriber once; later calls and an already-set
/// global dispatcher are left alone.
pub fn init_logging(verbosity: u8) {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            tracing_subscriber::fmt()
                .with_max_level(level_for(verbosity))
                .with_target(false)
                .init();
        });
    }
}
