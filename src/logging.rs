use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the global `env_logger` once. `RUST_LOG` wins when set;
/// otherwise our own crate logs at `info` and wgpu at `warn`.
pub fn init() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match std::env::var("RUST_LOG") {
            Ok(filter) => {
                builder.parse_filters(&filter);
            }
            Err(_) => {
                builder
                    .filter_level(log::LevelFilter::Info)
                    .filter_module("wgpu_core", log::LevelFilter::Warn)
                    .filter_module("wgpu_hal", log::LevelFilter::Warn)
                    .filter_module("naga", log::LevelFilter::Warn);
            }
        }
        builder.init();
        log::debug!("logging initialized");
    });
}
