use tracing::Level;
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt, Registry};

pub fn parse_level(log_level: &str) -> Level {
    match log_level {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

fn targets(level: Level) -> filter::Targets {
    // CARGO_PKG_NAME keeps its dash, module targets use an underscore.
    filter::Targets::new()
        .with_target(env!("CARGO_PKG_NAME").replace('-', "_"), level)
        .with_default(Level::WARN)
}

pub fn init(log_level: &str) {
    let filter = targets(parse_level(log_level));

    let tracing_layer = tracing_subscriber::fmt::layer().with_target(false);

    Registry::default().with(tracing_layer).with(filter).init();
}
