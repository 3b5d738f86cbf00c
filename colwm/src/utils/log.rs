use tracing::{metadata::LevelFilter, Subscriber};
use tracing_subscriber::{filter::ParseError, layer::SubscriberExt, EnvFilter};

#[cfg(feature = "journald-log")]
mod journald;

/// Builds the filter from `level_regex`, falling back to `info` when it does not parse.
#[must_use]
pub fn parse_log_level(level_regex: &str) -> (impl Subscriber, Option<ParseError>) {
    let mut parse_err = None;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse(level_regex)
        .unwrap_or_else(|err| {
            parse_err = Some(err);
            EnvFilter::default().add_directive(LevelFilter::INFO.into())
        });
    (get_subscribers(filter), parse_err)
}

/// Installs the global subscriber, filtered by `RUST_LOG`.
pub fn setup_logging() {
    let level = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let (subscriber, parse_err) = parse_log_level(&level);
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Couldn't setup global subscriber (logger): {err}");
        return;
    }
    if let Some(err) = parse_err {
        tracing::warn!("ignoring {}={:?}: {}", EnvFilter::DEFAULT_ENV, level, err);
    }
}

#[allow(clippy::let_and_return)]
pub fn get_subscribers(filter: EnvFilter) -> impl Subscriber {
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    #[cfg(feature = "journald-log")]
    let subscriber = journald::add_layer(subscriber);

    subscriber
}
