use tracing::Level;

/// Log lines go to stderr; stdout carries only CSV.
pub fn init() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();
}
