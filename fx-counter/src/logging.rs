use {
    std::sync::Once,
    tracing::Level,
    tracing_subscriber::FmtSubscriber,
};

/// Installs stdout logging for the process. Safe to call more than once.
pub fn init_logger() {
    static LOGGER_INIT: Once = Once::new();
    LOGGER_INIT.call_once(|| {
        // platform log collector adds its own timestamps
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::INFO)
            .without_time()
            .with_target(false)
            .finish();

        if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("failed to set global logger: {err:?}");
        }
    });
}
