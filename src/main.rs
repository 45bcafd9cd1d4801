use actix_web::HttpServer;
use tracing_subscriber::EnvFilter;
use vitamind_api::{AppState, ServerConfig, create_app};

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG` (default `info`); `LOG_FORMAT=json` switches
/// to one JSON object per line.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let server_config = ServerConfig::from_env();
    let state = AppState::from_env().map_err(std::io::Error::other)?;

    tracing::info!(
        bind_address = %server_config.bind_address,
        version = env!("CARGO_PKG_VERSION"),
        "Vitamin D API starting"
    );

    HttpServer::new(move || create_app(state.clone()))
        .bind(&server_config.bind_address)?
        .run()
        .await
}
