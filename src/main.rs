use postdesk::application::{
    ports::backend::{AuthService, FileStorage, PostStore},
    services::ApplicationServices,
};
use postdesk::config::{AppConfig, BackendConfig};
use postdesk::infrastructure::backend::{AppwriteBackend, InMemoryBackend};
use postdesk::presentation::http::{
    routes::{RouterOptions, build_router_with_options},
    session_cookie::SessionCookie,
    state::HttpState,
};
use anyhow::Result;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

type Ports = (Arc<dyn PostStore>, Arc<dyn FileStorage>, Arc<dyn AuthService>);

fn ports<B>(backend: Arc<B>) -> Ports
where
    B: PostStore + FileStorage + AuthService + 'static,
{
    (backend.clone(), backend.clone(), backend)
}

fn backend_ports(config: &AppConfig) -> Result<Ports> {
    match config.backend() {
        BackendConfig::Memory => {
            tracing::warn!("using the in-memory backend; data is lost on restart");
            Ok(ports(Arc::new(InMemoryBackend::default())))
        }
        BackendConfig::Appwrite(settings) => {
            tracing::info!(endpoint = %settings.endpoint, "using the appwrite backend");
            Ok(ports(Arc::new(AppwriteBackend::new(settings.clone())?)))
        }
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let (posts, files, auth) = backend_ports(&config)?;
    let services = Arc::new(ApplicationServices::new(posts, files, auth));

    let state = HttpState {
        services,
        session_cookie: SessionCookie::new(
            config.session_cookie_name(),
            config.session_cookie_secure(),
        ),
        slug_policy: config.slug_sync_policy(),
    };
    tracing::info!(slug_policy = config.slug_sync_policy().as_str(), "slug sync policy");

    let options = RouterOptions {
        allowed_origins: config.allowed_origins().to_vec(),
        max_upload_bytes: config.max_upload_bytes(),
    };
    let app = build_router_with_options(state, &options);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
