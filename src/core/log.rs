use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global subscriber on stderr.
///
/// A valid `RUST_LOG` decides everything on its own. Otherwise the output is
/// silent unless `verbose`, which turns on `debug` for this crate while
/// dependencies stay capped at `warn`.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().pretty().without_time().with_writer(std::io::stderr);

    if let Ok(env_filter) = EnvFilter::try_from_default_env() {
        tracing_subscriber::registry()
            .with(fmt_layer)
            .with(env_filter)
            .init();
        return;
    }

    let level_filter = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    let app_filter = Targets::new()
        .with_target("marketboard", level_filter)
        .with_default(LevelFilter::WARN.min(level_filter));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(app_filter)
        .init();
}
