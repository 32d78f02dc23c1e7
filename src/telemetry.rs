use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppConfig;

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured log level. Production emits JSON lines;
/// every other environment uses the human-readable formatter.
pub fn init(app: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "vitrine={level},actix_web=info,sqlx=warn",
            level = app.log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if app.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
