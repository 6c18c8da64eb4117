use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the global logger with the `RUST_LOG` filter, or `info` without one.
pub fn init_logging() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match std::env::var("RUST_LOG") {
            Ok(filter) => builder.parse_filters(&filter),
            Err(_) => builder.filter_level(log::LevelFilter::Info),
        };
        builder.init();

        log::debug!("logging initialized");
    });
}
