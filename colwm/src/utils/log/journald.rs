use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

/// Adds the journald layer when journald is reachable, the subscriber is returned as is otherwise.
pub fn add_layer<S>(subscriber: S) -> impl Subscriber + for<'span> LookupSpan<'span>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let layer = tracing_journald::layer()
        .map_err(|err| eprintln!("Couldn't setup journald-logger: {err}"))
        .ok()
        .map(|layer| layer.with_syslog_identifier("colwm".to_owned()));
    subscriber.with(layer)
}
