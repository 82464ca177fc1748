use tracing::Level;

/* Unknown names fall back to info */
pub fn level_from_name(name: &str) -> Level {
  match name.to_ascii_lowercase().as_str() {
    "trace" => Level::TRACE,
    "debug" => Level::DEBUG,
    "info" => Level::INFO,
    "warn" => Level::WARN,
    "error" => Level::ERROR,
    _ => Level::INFO,
  }
}

/* Installs the global fmt subscriber. Returns false if one was
  already installed, in which case the existing one is kept. */
pub fn init(level: &str) -> bool {
  tracing_subscriber::fmt()
    .with_max_level(level_from_name(level))
    .with_target(false)
    .try_init()
    .is_ok()
}
