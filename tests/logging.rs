// Installs a global subscriber, so it lives in its own test binary.
use tracing::Level;

#[test]
fn test_rust_log_enables_crate_events_without_verbose() {
    unsafe { std::env::set_var("RUST_LOG", "debug") };
    marketboard::core::log::init_logging(false);

    assert!(tracing::enabled!(target: "marketboard::core::client", Level::WARN));
    assert!(tracing::enabled!(target: "marketboard", Level::DEBUG));
    assert!(!tracing::enabled!(target: "marketboard", Level::TRACE));
}
