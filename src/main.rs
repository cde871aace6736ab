use page_chat::api::{create_router, AppState};
use page_chat::application::{Gateways, Session};
use page_chat::infrastructure::{build_llm, AppConfig, TextEmbedding, WebPageLoader};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::load()?;
    info!(
        llm = %config.config.llm.provider,
        model = %config.config.llm.model,
        embedding = %config.config.embedding.model,
        "configuration loaded"
    );

    let gateways = Gateways::new(
        Arc::new(WebPageLoader::new(
            &config.config.loader,
            config.config.rag.chunk_size,
        )?),
        Arc::new(TextEmbedding::from_config(&config.config.embedding)?),
        build_llm(&config.config.llm)?,
    );
    let session = Session::new(gateways, config.session_settings()?);

    let addr = SocketAddr::new(
        config.config.server.host.parse()?,
        config.config.server.port,
    );
    let app = create_router(AppState::new(session, config));

    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "page_chat=debug,api=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutting down");
}
